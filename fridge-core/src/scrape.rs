use crate::dictionary::write_json;
use crate::error::Result;
use fridge_scanner::{
    Fetcher, IngredientDictionary, IngredientScraper, ListingPages, RecipeBook, RecipeWalker,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::info;
use url::Url;

pub const RECIPE_INDEX_URL: &str = "http://deliaonline.com/recipes/type-of-dish";
pub const INGREDIENT_INDEX_URL: &str = "http://food.ndtv.com/ingredient";

/// Options for a recipe crawl
pub struct RecipeScrapeOptions {
    pub url: String,
    pub output: PathBuf,
    pub max_depth: usize,
    pub listing_pages: ListingPages,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

impl Default for RecipeScrapeOptions {
    fn default() -> Self {
        Self {
            url: RECIPE_INDEX_URL.to_string(),
            output: PathBuf::from("recipes.json"),
            max_depth: 8,
            listing_pages: ListingPages::Fetch,
            timeout_secs: 10,
            show_progress_bars: false,
        }
    }
}

/// Options for an ingredient dictionary scrape
pub struct IngredientScrapeOptions {
    pub url: String,
    pub output: PathBuf,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

impl Default for IngredientScrapeOptions {
    fn default() -> Self {
        Self {
            url: INGREDIENT_INDEX_URL.to_string(),
            output: PathBuf::from("ingredients.json"),
            timeout_secs: 10,
            show_progress_bars: false,
        }
    }
}

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

/// Walks the recipe site and writes the collected recipes to `options.output`.
///
/// Nothing is written when the walk fails.
pub async fn execute_recipe_scrape(options: RecipeScrapeOptions) -> Result<RecipeBook> {
    let RecipeScrapeOptions {
        url,
        output,
        max_depth,
        listing_pages,
        timeout_secs,
        show_progress_bars,
    } = options;

    let progress_bar = show_progress_bars.then(|| Arc::new(spinner("Starting recipe walk...")));
    let processed_count = Arc::new(AtomicUsize::new(0));

    let mut walker = RecipeWalker::with_fetcher(Fetcher::with_timeout(timeout_secs)?)
        .with_max_depth(max_depth)
        .with_listing_pages(listing_pages);

    if let Some(ref pb) = progress_bar {
        let pb_clone = pb.clone();
        let count_clone = processed_count.clone();
        walker = walker.with_progress_callback(Arc::new(move |depth: usize, url: String| {
            let count = count_clone.fetch_add(1, Ordering::Relaxed) + 1;
            pb_clone.set_message(format!(
                "Walking... {} pages (depth {}: {})",
                count,
                depth,
                extract_url_path(&url)
            ));
        }));
    }

    let result = walker.crawl(&url).await;

    if let Some(ref pb) = progress_bar {
        match result {
            Ok(ref book) => pb.finish_with_message(format!(
                "Walk complete! {} recipes from {} pages",
                book.len(),
                processed_count.load(Ordering::Relaxed)
            )),
            Err(_) => pb.finish_and_clear(),
        }
    }

    let book = result?;
    write_json(&output, &book)?;
    info!("Wrote {} recipes to {}", book.len(), output.display());
    Ok(book)
}

/// Scrapes the ingredient site and writes the dictionary to `options.output`.
pub async fn execute_ingredient_scrape(
    options: IngredientScrapeOptions,
) -> Result<IngredientDictionary> {
    let IngredientScrapeOptions {
        url,
        output,
        timeout_secs,
        show_progress_bars,
    } = options;

    let progress_bar =
        show_progress_bars.then(|| spinner(&format!("Scraping ingredients from {}...", url)));

    let scraper = IngredientScraper::with_fetcher(Fetcher::with_timeout(timeout_secs)?);
    let result = scraper.scrape(&url).await;

    if let Some(ref pb) = progress_bar {
        match result {
            Ok(ref dictionary) => pb.finish_with_message(format!(
                "Scrape complete! {} ingredients in {} categories",
                dictionary.total(),
                dictionary.category_count()
            )),
            Err(_) => pb.finish_and_clear(),
        }
    }

    let dictionary = result?;
    write_json(&output, &dictionary)?;
    info!(
        "Wrote {} ingredients to {}",
        dictionary.total(),
        output.display()
    );
    Ok(dictionary)
}

/// Generate a summary report of a recipe crawl
pub fn generate_recipe_report(book: &RecipeBook) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Recipes found: {}\n", book.len()));

    let total_ingredients: usize = book.iter().map(|(_, ingredients)| ingredients.len()).sum();
    report.push_str(&format!("  Ingredient lines: {}\n", total_ingredients));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for (name, ingredients) in book.iter() {
        report.push_str(&format!("## {}\n", name));
        for ingredient in ingredients {
            report.push_str(&format!("  - {}\n", ingredient));
        }
        report.push('\n');
    }

    report
}

/// Generate a summary report of an ingredient dictionary
pub fn generate_dictionary_report(dictionary: &IngredientDictionary) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Categories: {}\n", dictionary.category_count()));
    report.push_str(&format!("  Ingredients: {}\n", dictionary.total()));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for (category, ingredients) in dictionary.iter() {
        report.push_str(&format!("  {:<30} {}\n", category, ingredients.len()));
    }

    report
}
