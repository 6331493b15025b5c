// Tests for loading and searching the ingredient dictionary

use fridge_core::CoreError;
use fridge_core::dictionary::{format_matches, load_dictionary, search_prompt, write_json};
use fridge_scanner::IngredientDictionary;
use std::fs;
use tempfile::TempDir;

fn sample_dictionary() -> IngredientDictionary {
    let mut dict = IngredientDictionary::new();
    dict.push("Vegetables", "Spring Onion");
    dict.push("Vegetables", "Carrot");
    dict.push("Spices", "Onion Seeds");
    dict.push("Spices", "Cumin");
    dict.add_category("Dairy");
    dict
}

#[test]
fn test_load_dictionary_from_scraper_output() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ingredients.json");
    fs::write(
        &path,
        r#"{"Vegetables": ["Spring Onion", "Carrot"], "Spices": ["Cumin"]}"#,
    )
    .unwrap();

    let dict = load_dictionary(&path).unwrap();
    assert_eq!(dict.total(), 3);
    assert_eq!(dict.category("Spices").unwrap(), ["Cumin"]);
}

#[test]
fn test_write_then_load_keeps_category_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ingredients.json");

    write_json(&path, &sample_dictionary()).unwrap();
    let dict = load_dictionary(&path).unwrap();

    let categories: Vec<&str> = dict.iter().map(|(name, _)| name).collect();
    assert_eq!(categories, vec!["Vegetables", "Spices", "Dairy"]);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_dictionary(&temp_dir.path().join("nope.json")).unwrap_err();

    assert!(matches!(err, CoreError::Io { .. }));
}

#[test]
fn test_load_invalid_json() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ingredients.json");
    fs::write(&path, "[1, 2, 3]").unwrap();

    let err = load_dictionary(&path).unwrap_err();
    assert!(matches!(err, CoreError::Json { .. }));
}

#[test]
fn test_search_across_categories() {
    let dict = sample_dictionary();

    assert_eq!(dict.search("onion"), vec!["Spring Onion", "Onion Seeds"]);
    assert_eq!(dict.search(" CUMIN\n"), vec!["Cumin"]);
}

#[test]
fn test_format_matches() {
    let dict = sample_dictionary();
    let matches = dict.search("onion");

    assert_eq!(
        format_matches(" onion ", &matches),
        "onion could be ['Spring Onion', 'Onion Seeds']"
    );
    assert_eq!(format_matches("kale", &[]), "kale could be []");
}

#[test]
fn test_search_prompt_counts_all_ingredients() {
    assert_eq!(
        search_prompt(&sample_dictionary()),
        "Search for an ingredient from 4 ingredients:"
    );
}
