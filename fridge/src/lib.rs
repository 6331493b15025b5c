pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{database_location, expand_path, init_logging, listing_pages, search_line};

// Re-export scrape functionality from fridge-core
pub use fridge_core::scrape::{
    IngredientScrapeOptions, RecipeScrapeOptions, execute_ingredient_scrape,
    execute_recipe_scrape, generate_dictionary_report, generate_recipe_report,
};
