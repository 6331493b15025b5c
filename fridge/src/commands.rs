use crate::CLAP_STYLING;
use clap::{arg, command};
use fridge_core::scrape::{INGREDIENT_INDEX_URL, RECIPE_INDEX_URL};
use std::net::SocketAddr;
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("fridge")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("fridge")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .subcommand_required(false)
        .subcommand(
            command!("init")
                .about("Initializes the fridge database on your filesystem")
                .arg(
                    arg!([PATH])
                        .required(false)
                        .help("Location to store the fridge database")
                        .default_value("~/.config/fridge/"),
                )
                .arg(
                    arg!(-f --"force")
                        .help(
                            "Forces the overwriting of any existing database at the specified \
                        location.",
                        )
                        .required(false),
                ),
        )
        .subcommand(
            command!("serve")
                .about("Runs the fridge list web application")
                .arg(
                    arg!(-b --"bind" <ADDR>)
                        .required(false)
                        .help("Address to listen on")
                        .value_parser(clap::value_parser!(SocketAddr))
                        .default_value("127.0.0.1:8000"),
                )
                .arg(
                    arg!(--"db" <PATH>)
                        .required(false)
                        .help("Path to the fridge database (created by `fridge init`)")
                        .default_value("~/.config/fridge/fridge.db"),
                ),
        )
        .subcommand(
            command!("scrape")
                .about("Builds recipe and ingredient dictionaries from recipe sites")
                .subcommand_required(true)
                .subcommand(
                    command!("recipes")
                        .about(
                            "Walks a recipe site's category tree and writes every recipe's \
                        ingredients to a JSON file.",
                        )
                        .arg(
                            arg!(-u --"url" <URL>)
                                .required(false)
                                .help("The category listing to start from")
                                .value_parser(clap::value_parser!(Url))
                                .default_value(RECIPE_INDEX_URL),
                        )
                        .arg(
                            arg!(-o --"output" <PATH>)
                                .required(false)
                                .help("Where to write the recipes")
                                .default_value("recipes.json"),
                        )
                        .arg(
                            arg!(--"max-depth" <DEPTH>)
                                .required(false)
                                .help("How many category levels to descend")
                                .value_parser(clap::value_parser!(usize))
                                .default_value("8"),
                        )
                        .arg(
                            arg!(--"reuse-listing")
                                .required(false)
                                .help(
                                    "Re-read the first listing page for every result page \
                                instead of fetching each one",
                                )
                                .action(clap::ArgAction::SetTrue),
                        )
                        .arg(
                            arg!(--"timeout" <SECONDS>)
                                .required(false)
                                .help("Request timeout in seconds")
                                .value_parser(clap::value_parser!(u64))
                                .default_value("10"),
                        ),
                )
                .subcommand(
                    command!("ingredients")
                        .about(
                            "Scrapes an ingredient site's categories and writes them to a \
                        JSON dictionary.",
                        )
                        .arg(
                            arg!(-u --"url" <URL>)
                                .required(false)
                                .help("The ingredient index page")
                                .value_parser(clap::value_parser!(Url))
                                .default_value(INGREDIENT_INDEX_URL),
                        )
                        .arg(
                            arg!(-o --"output" <PATH>)
                                .required(false)
                                .help("Where to write the dictionary")
                                .default_value("ingredients.json"),
                        )
                        .arg(
                            arg!(--"timeout" <SECONDS>)
                                .required(false)
                                .help("Request timeout in seconds")
                                .value_parser(clap::value_parser!(u64))
                                .default_value("10"),
                        ),
                ),
        )
        .subcommand(
            command!("search")
                .about("Searches the ingredient dictionary (prompts when no query is given)")
                .arg(
                    arg!([QUERY])
                        .required(false)
                        .help("Part of an ingredient name, case-insensitive"),
                )
                .arg(
                    arg!(-d --"dictionary" <PATH>)
                        .required(false)
                        .help("Dictionary written by `fridge scrape ingredients`")
                        .default_value("ingredients.json"),
                ),
        )
}
