pub mod error;
pub mod fetch;
pub mod ingredients;
pub mod page;
pub mod result;
pub mod walker;

pub use error::{PageCountError, ScanError};
pub use fetch::Fetcher;
pub use ingredients::IngredientScraper;
pub use result::{Category, IngredientDictionary, Recipe, RecipeBook};
pub use walker::{ListingPages, ProgressCallback, RecipeWalker};
