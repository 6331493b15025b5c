use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use colored::Colorize;
use fridge_core::data::Database;
use fridge_core::dictionary::{format_matches, load_dictionary, search_prompt};
use fridge_core::scrape::{
    IngredientScrapeOptions, RecipeScrapeOptions, execute_ingredient_scrape,
    execute_recipe_scrape, generate_dictionary_report, generate_recipe_report,
};
use fridge_scanner::{IngredientDictionary, ListingPages};
use std::fs;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;

const DATABASE_FILE: &str = "fridge.db";

/// Installs the global tracing subscriber. `RUST_LOG` wins over the default
/// level; quiet runs only log warnings and errors.
pub fn init_logging(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Expands a leading `~` to the user's home directory
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn database_location(config_dir: &Path) -> PathBuf {
    config_dir.join(DATABASE_FILE)
}

pub fn listing_pages(reuse_listing: bool) -> ListingPages {
    if reuse_listing {
        ListingPages::Reuse
    } else {
        ListingPages::Fetch
    }
}

/// Answer for a single query against the dictionary.
pub fn search_line(dictionary: &IngredientDictionary, query: &str) -> String {
    format_matches(query, &dictionary.search(query))
}

fn fail(e: anyhow::Error) -> ! {
    eprintln!("{} {:#}", "✗".red().bold(), e);
    std::process::exit(1);
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_prompt(msg: &str) -> Result<String> {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush()?;
    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().to_string())
}

pub fn handle_init(args: &ArgMatches) {
    if let Err(e) = run_init(args) {
        fail(e);
    }
}

fn run_init(args: &ArgMatches) -> Result<()> {
    print_divider();
    println!("{}", "  FRIDGE INITIALIZATION".bright_white().bold());
    print_divider();
    println!();

    let config_dir = args
        .get_one::<String>("PATH")
        .map(|raw| expand_path(raw))
        .context("No configuration directory given")?;
    let force = args.get_flag("force");
    let db_path = database_location(&config_dir);

    println!(
        "{} Target: {}",
        "→".blue(),
        config_dir.display().to_string().bright_white()
    );
    println!();

    if Database::exists(&db_path) {
        let overwrite = if force {
            println!(
                "{} Deleting existing database (force mode)",
                "→".yellow().bold()
            );
            true
        } else {
            println!("{}", "⚠ WARNING".yellow().bold());
            println!("Database already exists at:");
            println!(
                "  {} {}",
                "•".yellow(),
                db_path.display().to_string().bright_white()
            );
            println!();

            let response = print_prompt("Would you like to overwrite it? [y/N]:")?;
            println!();
            matches!(response.to_lowercase().as_str(), "y" | "yes")
        };

        if !overwrite {
            println!("{} Keeping existing database", "→".blue());
            return Ok(());
        }

        Database::drop(&db_path)
            .with_context(|| format!("Failed to remove {}", db_path.display()))?;
        println!("{} Existing database removed", "✓".green().bold());
        println!();
    }

    println!("{} Creating directory structure...", "→".blue());
    fs::create_dir_all(&config_dir)
        .with_context(|| format!("Failed to create {}", config_dir.display()))?;

    println!("{} Creating database...", "→".blue());
    Database::new(&db_path)
        .with_context(|| format!("Failed to create database at {}", db_path.display()))?;

    println!();
    print_divider();
    println!("{}", "  INITIALIZATION COMPLETE".green().bold());
    print_divider();
    println!();
    println!(
        "{} Config directory: {}",
        "✓".green().bold(),
        config_dir.display().to_string().bright_white()
    );
    println!(
        "{} Database: {}",
        "✓".green().bold(),
        db_path.display().to_string().bright_white()
    );
    println!();
    Ok(())
}

pub async fn handle_serve(args: &ArgMatches) {
    if let Err(e) = run_serve(args).await {
        fail(e);
    }
}

async fn run_serve(args: &ArgMatches) -> Result<()> {
    let bind = *args
        .get_one::<SocketAddr>("bind")
        .context("No bind address given")?;
    let db_path = args
        .get_one::<String>("db")
        .map(|raw| expand_path(raw))
        .context("No database path given")?;

    if !Database::exists(&db_path) {
        bail!(
            "No database at {}. Run `fridge init` first.",
            db_path.display()
        );
    }

    let db = Database::new(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    println!(
        "\n{} Serving fridge lists on {}\n",
        "→".blue().bold(),
        format!("http://{}/", bind).bright_white()
    );
    fridge_web::serve(bind, db).await?;
    Ok(())
}

pub async fn handle_scrape_recipes(args: &ArgMatches) {
    if let Err(e) = run_scrape_recipes(args).await {
        fail(e);
    }
}

async fn run_scrape_recipes(args: &ArgMatches) -> Result<()> {
    let url = args.get_one::<Url>("url").context("No URL given")?;
    let output = args
        .get_one::<String>("output")
        .map(|raw| expand_path(raw))
        .context("No output path given")?;
    let max_depth = *args.get_one::<usize>("max-depth").unwrap_or(&8);
    let timeout_secs = *args.get_one::<u64>("timeout").unwrap_or(&10);
    let listing_pages = listing_pages(args.get_flag("reuse-listing"));

    println!("\n🍳 Walking recipes from {}", url);
    println!("Max depth: {}", max_depth);
    let pages_mode = match listing_pages {
        ListingPages::Fetch => "fetch each result page",
        ListingPages::Reuse => "reuse first result page",
    };
    println!("Listing pages: {}\n", pages_mode);

    let options = RecipeScrapeOptions {
        url: url.to_string(),
        output: output.clone(),
        max_depth,
        listing_pages,
        timeout_secs,
        show_progress_bars: true,
    };

    let book = execute_recipe_scrape(options)
        .await
        .context("Recipe walk failed")?;

    println!(
        "\n{} {} recipes written to {}\n",
        "✓".green().bold(),
        book.len(),
        output.display()
    );
    print!("{}", generate_recipe_report(&book));
    Ok(())
}

pub async fn handle_scrape_ingredients(args: &ArgMatches) {
    if let Err(e) = run_scrape_ingredients(args).await {
        fail(e);
    }
}

async fn run_scrape_ingredients(args: &ArgMatches) -> Result<()> {
    let url = args.get_one::<Url>("url").context("No URL given")?;
    let output = args
        .get_one::<String>("output")
        .map(|raw| expand_path(raw))
        .context("No output path given")?;
    let timeout_secs = *args.get_one::<u64>("timeout").unwrap_or(&10);

    println!("\n🥕 Scraping ingredients from {}\n", url);

    let options = IngredientScrapeOptions {
        url: url.to_string(),
        output: output.clone(),
        timeout_secs,
        show_progress_bars: true,
    };

    let dictionary = execute_ingredient_scrape(options)
        .await
        .context("Ingredient scrape failed")?;

    println!(
        "\n{} {} ingredients written to {}\n",
        "✓".green().bold(),
        dictionary.total(),
        output.display()
    );
    print!("{}", generate_dictionary_report(&dictionary));
    Ok(())
}

pub fn handle_search(args: &ArgMatches) {
    if let Err(e) = run_search(args) {
        fail(e);
    }
}

fn run_search(args: &ArgMatches) -> Result<()> {
    let path = args
        .get_one::<String>("dictionary")
        .map(|raw| expand_path(raw))
        .context("No dictionary path given")?;
    let dictionary = load_dictionary(&path)?;

    let query = match args.get_one::<String>("QUERY") {
        Some(query) => query.clone(),
        None => print_prompt(&search_prompt(&dictionary))?,
    };

    println!("{}", search_line(&dictionary, &query));
    Ok(())
}
