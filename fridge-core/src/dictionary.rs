use crate::error::{CoreError, Result};
use fridge_scanner::IngredientDictionary;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Reads a dictionary written by the ingredient scraper.
pub fn load_dictionary(path: &Path) -> Result<IngredientDictionary> {
    let content = fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `value` as pretty-printed JSON, replacing any existing file.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| CoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, json).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `onion could be ['Red Onion', 'Spring Onion']`
pub fn format_matches(query: &str, matches: &[&str]) -> String {
    let quoted: Vec<String> = matches.iter().map(|m| format!("'{}'", m)).collect();
    format!("{} could be [{}]", query.trim(), quoted.join(", "))
}

pub fn search_prompt(dictionary: &IngredientDictionary) -> String {
    format!(
        "Search for an ingredient from {} ingredients:",
        dictionary.total()
    )
}
