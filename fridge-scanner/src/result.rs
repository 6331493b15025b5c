use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A sub-category link found on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub label: String,
    pub url: String,
}

impl Category {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
}

/// Recipes collected by a walk, keyed by name in discovery order.
///
/// Serializes as a plain JSON object: `{"name": ["ingredient", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeBook {
    recipes: IndexMap<String, Vec<String>>,
}

impl RecipeBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a recipe, replacing any earlier one with the same name.
    /// Returns the replaced ingredient list.
    pub fn insert(&mut self, recipe: Recipe) -> Option<Vec<String>> {
        let previous = self.recipes.insert(recipe.name.clone(), recipe.ingredients);
        if previous.is_some() {
            warn!("Recipe '{}' seen twice, keeping the latest", recipe.name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.recipes.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.recipes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.recipes
            .iter()
            .map(|(name, ingredients)| (name.as_str(), ingredients.as_slice()))
    }
}

/// Ingredient names grouped by category, in the order the site lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientDictionary {
    categories: IndexMap<String, Vec<String>>,
}

impl IngredientDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a category with no ingredients yet. Existing entries are kept.
    pub fn add_category(&mut self, name: impl Into<String>) {
        self.categories.entry(name.into()).or_default();
    }

    pub fn push(&mut self, category: &str, ingredient: impl Into<String>) {
        self.categories
            .entry(category.to_string())
            .or_default()
            .push(ingredient.into());
    }

    pub fn category(&self, name: &str) -> Option<&[String]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of ingredient entries across every category.
    pub fn total(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Every ingredient whose name contains `query`, ignoring case and the
    /// query's surrounding whitespace. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        self.categories
            .values()
            .flatten()
            .filter(|ingredient| ingredient.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, ingredients)| (name.as_str(), ingredients.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            name: name.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_recipe_book_overwrites_duplicate_names() {
        let mut book = RecipeBook::new();
        assert!(book.insert(recipe("Trifle", &["sponge"])).is_none());
        let previous = book.insert(recipe("Trifle", &["custard", "cream"]));

        assert_eq!(previous, Some(vec!["sponge".to_string()]));
        assert_eq!(book.len(), 1);
        assert_eq!(book.get("Trifle").unwrap(), ["custard", "cream"]);
    }

    #[test]
    fn test_recipe_book_serializes_as_object_in_insertion_order() {
        let mut book = RecipeBook::new();
        book.insert(recipe("Zabaglione", &["eggs"]));
        book.insert(recipe("Apple crumble", &["apples", "flour"]));

        let json = serde_json::to_string(&book).unwrap();
        assert_eq!(
            json,
            r#"{"Zabaglione":["eggs"],"Apple crumble":["apples","flour"]}"#
        );
    }

    #[test]
    fn test_dictionary_search_is_case_insensitive() {
        let mut dict = IngredientDictionary::new();
        dict.push("Vegetables", "Red Onion");
        dict.push("Vegetables", "Carrot");
        dict.push("Spices", "Onion Seeds");

        assert_eq!(dict.search("  ONION "), vec!["Red Onion", "Onion Seeds"]);
        assert!(dict.search("saffron").is_empty());
    }

    #[test]
    fn test_dictionary_empty_query_matches_everything() {
        let mut dict = IngredientDictionary::new();
        dict.add_category("Dairy");
        dict.push("Fruit", "Fig");
        dict.push("Fruit", "Date");

        assert_eq!(dict.total(), 2);
        assert_eq!(dict.category_count(), 2);
        assert_eq!(dict.search(""), vec!["Fig", "Date"]);
    }

    #[test]
    fn test_add_category_keeps_existing_entries() {
        let mut dict = IngredientDictionary::new();
        dict.push("Fruit", "Fig");
        dict.add_category("Fruit");

        assert_eq!(dict.category("Fruit").unwrap(), ["Fig"]);
    }
}
