use commands::command_argument_builder;
use fridge::handlers::{
    handle_init, handle_scrape_ingredients, handle_scrape_recipes, handle_search, handle_serve,
    init_logging,
};
use fridge_core::print_banner;

mod commands;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if chosen_command.subcommand().is_none() {
        // No subcommand provided, just show the banner
        return;
    }

    init_logging(quiet);

    match chosen_command.subcommand() {
        Some(("init", primary_command)) => handle_init(primary_command),
        Some(("serve", primary_command)) => handle_serve(primary_command).await,
        Some(("scrape", primary_command)) => match primary_command.subcommand() {
            Some(("recipes", secondary_command)) => handle_scrape_recipes(secondary_command).await,
            Some(("ingredients", secondary_command)) => {
                handle_scrape_ingredients(secondary_command).await
            }
            _ => unreachable!("clap should ensure we don't get here"),
        },
        Some(("search", primary_command)) => handle_search(primary_command),
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
