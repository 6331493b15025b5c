use colored::Colorize;

pub mod data;
pub mod dictionary;
pub mod error;
pub mod scrape;

pub use error::CoreError;

const BANNER: &str = r#"
   ___      _     _
  / __\ __ (_) __| | __ _  ___
 / _\| '__|| |/ _` |/ _` |/ _ \
/ /  | |   | | (_| | (_| |  __/
\/   |_|   |_|\__,_|\__, |\___|
                    |___/
"#;

pub fn print_banner() {
    println!("{}", BANNER.bright_cyan().bold());
    println!(
        "  {} {}\n",
        "fridge".bright_white().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
}
