//! Reading recipe-site pages.
//!
//! A page is either a recipe (it carries an ingredient group) or a listing of
//! sub-categories, possibly split over several result pages. Everything here
//! works on a parsed [`Html`] document and returns owned values, so callers
//! can drop the DOM before their next await.

use crate::error::{PageCountError, Result, ScanError};
use crate::result::{Category, Recipe};
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

static INGREDIENT_GROUPS: LazyLock<Selector> =
    LazyLock::new(|| selector(".field-name-field-ingredient-groups"));
static RECIPE_HEADING: LazyLock<Selector> = LazyLock::new(|| selector(".recipe-information h1"));
static RECIPE_INGREDIENT: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[itemprop="recipeIngredient"]"#));
static PAGER_CURRENT: LazyLock<Selector> = LazyLock::new(|| selector(".pager-current"));
static MOBILE_COUNT: LazyLock<Selector> = LazyLock::new(|| selector("i.mobile"));
static TERM_LISTING: LazyLock<Selector> = LazyLock::new(|| selector(".term-listing-content"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h3"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));

/// What a fetched page turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Recipe(Recipe),
    Listing(Listing),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub page_count: usize,
    pub categories: Vec<Category>,
}

/// Parses `html` and reads it as either a recipe or a listing.
pub fn analyse(html: &str, page_url: &Url) -> Result<Page> {
    let document = Html::parse_document(html);

    if is_recipe_page(&document) {
        return extract_recipe(&document).map(Page::Recipe);
    }

    Ok(Page::Listing(Listing {
        page_count: resolve_page_count(&document),
        categories: categories(&document, page_url)?,
    }))
}

/// Categories of one result page of a listing.
pub fn listing_categories(html: &str, page_url: &Url) -> Result<Vec<Category>> {
    let document = Html::parse_document(html);
    categories(&document, page_url)
}

pub fn is_recipe_page(document: &Html) -> bool {
    document.select(&INGREDIENT_GROUPS).next().is_some()
}

/// Pulls the recipe name and its ingredient lines out of a recipe page.
pub fn extract_recipe(document: &Html) -> Result<Recipe> {
    let name = document
        .select(&RECIPE_HEADING)
        .next()
        .ok_or(ScanError::MissingElement(".recipe-information h1"))?;

    let group = document
        .select(&INGREDIENT_GROUPS)
        .next()
        .ok_or(ScanError::MissingElement(".field-name-field-ingredient-groups"))?;

    let ingredients = group
        .select(&RECIPE_INGREDIENT)
        .map(|ingredient| element_text(&ingredient).trim().to_string())
        .collect();

    Ok(Recipe {
        name: element_text(&name).trim().to_string(),
        ingredients,
    })
}

/// Reads the page count from the pager's mobile indicator ("Page 1 of 12").
pub fn page_count(document: &Html) -> std::result::Result<usize, PageCountError> {
    let pager = document
        .select(&PAGER_CURRENT)
        .next()
        .ok_or(PageCountError::MissingPager)?;

    let indicator = pager
        .select(&MOBILE_COUNT)
        .next()
        .ok_or(PageCountError::MissingIndicator)?;

    let text = element_text(&indicator);
    let last = text
        .split_whitespace()
        .last()
        .ok_or_else(|| PageCountError::Unparsable(text.clone()))?;

    match last.parse::<usize>() {
        Ok(0) => Err(PageCountError::Zero),
        Ok(count) => Ok(count),
        Err(_) => Err(PageCountError::Unparsable(last.to_string())),
    }
}

/// [`page_count`], assuming a single page when the count can't be read.
pub fn resolve_page_count(document: &Html) -> usize {
    match page_count(document) {
        Ok(count) => {
            debug!("Found {} pages", count);
            count
        }
        Err(reason) => {
            debug!("Assuming a single page: {}", reason);
            1
        }
    }
}

/// Sub-categories of a listing page in document order, duplicates included.
pub fn categories(document: &Html, page_url: &Url) -> Result<Vec<Category>> {
    let listing = document
        .select(&TERM_LISTING)
        .next()
        .ok_or(ScanError::MissingElement(".term-listing-content"))?;

    listing
        .select(&HEADING)
        .map(|heading| -> Result<Category> {
            let anchor = heading
                .select(&ANCHOR)
                .next()
                .ok_or(ScanError::MissingElement("h3 a"))?;
            let href = anchor
                .value()
                .attr("href")
                .ok_or(ScanError::MissingAttribute {
                    element: "a",
                    attribute: "href",
                })?;
            let url = page_url
                .join(href)
                .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", href, e)))?;

            Ok(Category::new(first_own_text(&anchor), url.to_string()))
        })
        .collect()
}

pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

/// First non-blank text node directly under `element`, ignoring nested tags.
pub(crate) fn first_own_text(element: &ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://deliaonline.com/recipes/type-of-dish").unwrap()
    }

    const RECIPE_PAGE: &str = r#"<html><body>
        <div class="recipe-information"><h1>  Spiced Lamb Pilaf
        </h1></div>
        <div class="field-name-field-ingredient-groups">
            <ul>
                <li itemprop="recipeIngredient">
                    450g <a href="/ingredients/lamb">lamb</a> neck fillet
                </li>
                <li itemprop="recipeIngredient">	1 onion  </li>
                <li itemprop="recipeIngredient">2 tbsp olive oil</li>
            </ul>
        </div>
    </body></html>"#;

    fn listing(headings: &str, pager: &str) -> String {
        format!(
            r#"<html><body>
                <div class="term-listing-content">{headings}</div>
                {pager}
            </body></html>"#
        )
    }

    #[test]
    fn test_recipe_page_is_classified_as_leaf() {
        let document = Html::parse_document(RECIPE_PAGE);
        assert!(is_recipe_page(&document));
    }

    #[test]
    fn test_listing_page_is_not_classified_as_leaf() {
        let document = Html::parse_document(&listing("", ""));
        assert!(!is_recipe_page(&document));
    }

    #[test]
    fn test_extract_recipe_trims_ingredients() {
        let document = Html::parse_document(RECIPE_PAGE);
        let recipe = extract_recipe(&document).unwrap();

        assert_eq!(recipe.name, "Spiced Lamb Pilaf");
        assert_eq!(
            recipe.ingredients,
            vec!["450g lamb neck fillet", "1 onion", "2 tbsp olive oil"]
        );
        for ingredient in &recipe.ingredients {
            assert_eq!(ingredient, ingredient.trim());
        }
    }

    #[test]
    fn test_extract_recipe_without_heading_fails() {
        let html = r#"<div class="field-name-field-ingredient-groups">
            <span itemprop="recipeIngredient">salt</span></div>"#;
        let document = Html::parse_document(html);

        let err = extract_recipe(&document).unwrap_err();
        assert!(matches!(err, ScanError::MissingElement(".recipe-information h1")));
    }

    #[test]
    fn test_page_count_reads_last_token() {
        let html = listing(
            "",
            r#"<ul><li class="pager-current"><i class="mobile">Page 1 of 12</i></li></ul>"#,
        );
        let document = Html::parse_document(&html);

        assert_eq!(page_count(&document), Ok(12));
        assert_eq!(resolve_page_count(&document), 12);
    }

    #[test]
    fn test_page_count_without_pager_falls_back_to_one() {
        let document = Html::parse_document(&listing("", ""));

        assert_eq!(page_count(&document), Err(PageCountError::MissingPager));
        assert_eq!(resolve_page_count(&document), 1);
    }

    #[test]
    fn test_page_count_without_indicator_falls_back_to_one() {
        let html = listing("", r#"<li class="pager-current">1</li>"#);
        let document = Html::parse_document(&html);

        assert_eq!(page_count(&document), Err(PageCountError::MissingIndicator));
        assert_eq!(resolve_page_count(&document), 1);
    }

    #[test]
    fn test_page_count_unparsable_falls_back_to_one() {
        let html = listing(
            "",
            r#"<li class="pager-current"><i class="mobile">Page one of many</i></li>"#,
        );
        let document = Html::parse_document(&html);

        assert_eq!(
            page_count(&document),
            Err(PageCountError::Unparsable("many".to_string()))
        );
        assert_eq!(resolve_page_count(&document), 1);
    }

    #[test]
    fn test_page_count_zero_falls_back_to_one() {
        let html = listing(
            "",
            r#"<li class="pager-current"><i class="mobile">Page 0 of 0</i></li>"#,
        );
        let document = Html::parse_document(&html);

        assert_eq!(page_count(&document), Err(PageCountError::Zero));
        assert_eq!(resolve_page_count(&document), 1);
    }

    #[test]
    fn test_categories_keep_dom_order_and_duplicates() {
        let html = listing(
            r#"
            <h3><a href="/recipes/type-of-dish/soups">Soups <span>(24)</span></a></h3>
            <h3><a href="/recipes/type-of-dish/puddings">Puddings</a></h3>
            <h3><a href="/recipes/type-of-dish/soups">Soups</a></h3>
            "#,
            "",
        );
        let document = Html::parse_document(&html);
        let found = categories(&document, &base()).unwrap();

        assert_eq!(
            found,
            vec![
                Category::new("Soups", "http://deliaonline.com/recipes/type-of-dish/soups"),
                Category::new(
                    "Puddings",
                    "http://deliaonline.com/recipes/type-of-dish/puddings"
                ),
                Category::new("Soups", "http://deliaonline.com/recipes/type-of-dish/soups"),
            ]
        );
    }

    #[test]
    fn test_category_label_ignores_nested_markup() {
        let html = listing(
            r#"<h3><a href="/x"><img src="x.png"> Cakes <em>and</em> bakes</a></h3>"#,
            "",
        );
        let document = Html::parse_document(&html);
        let found = categories(&document, &base()).unwrap();

        assert_eq!(found[0].label, "Cakes");
    }

    #[test]
    fn test_categories_without_listing_container_fails() {
        let document = Html::parse_document("<html><body><h3>Nothing</h3></body></html>");
        let err = categories(&document, &base()).unwrap_err();

        assert!(matches!(err, ScanError::MissingElement(".term-listing-content")));
    }

    #[test]
    fn test_category_anchor_without_href_fails() {
        let html = listing(r#"<h3><a name="soups">Soups</a></h3>"#, "");
        let document = Html::parse_document(&html);
        let err = categories(&document, &base()).unwrap_err();

        assert!(matches!(
            err,
            ScanError::MissingAttribute {
                element: "a",
                attribute: "href"
            }
        ));
    }

    #[test]
    fn test_analyse_reads_listing() {
        let html = listing(
            r#"<h3><a href="/recipes/soups">Soups</a></h3>"#,
            r#"<li class="pager-current"><i class="mobile">Page 1 of 3</i></li>"#,
        );

        match analyse(&html, &base()).unwrap() {
            Page::Listing(listing) => {
                assert_eq!(listing.page_count, 3);
                assert_eq!(listing.categories.len(), 1);
            }
            other => panic!("expected a listing, got {:?}", other),
        }
    }

    #[test]
    fn test_analyse_reads_recipe() {
        match analyse(RECIPE_PAGE, &base()).unwrap() {
            Page::Recipe(recipe) => assert_eq!(recipe.ingredients.len(), 3),
            other => panic!("expected a recipe, got {:?}", other),
        }
    }
}
