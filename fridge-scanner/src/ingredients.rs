//! Ingredient dictionary scraper.
//!
//! The index page lists ingredient categories as `h3` headings inside
//! `#video_listing`. Each category is paged as `<category>/page-<n>`, with the
//! page links in `#inside_pagination`.

use crate::error::{PageCountError, Result, ScanError};
use crate::fetch::Fetcher;
use crate::page::element_text;
use crate::result::{Category, IngredientDictionary};
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::{debug, info};
use url::Url;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector must parse")
}

static VIDEO_LISTING: LazyLock<Selector> = LazyLock::new(|| selector("#video_listing"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("h3"));
static ITEM_NAME: LazyLock<Selector> = LazyLock::new(|| selector(r#"[itemprop="name"]"#));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));
static PAGINATION: LazyLock<Selector> = LazyLock::new(|| selector("#inside_pagination"));
static PAGE_SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span.pagination"));

/// Category names and links from the index page.
pub fn index_categories(document: &Html, page_url: &Url) -> Result<Vec<Category>> {
    let listing = document
        .select(&VIDEO_LISTING)
        .next()
        .ok_or(ScanError::MissingElement("#video_listing"))?;

    listing
        .select(&HEADING)
        .map(|heading| -> Result<Category> {
            let name = heading
                .select(&ITEM_NAME)
                .next()
                .ok_or(ScanError::MissingElement(r#"h3 [itemprop="name"]"#))?;
            let href = heading
                .select(&ANCHOR)
                .next()
                .ok_or(ScanError::MissingElement("h3 a"))?
                .value()
                .attr("href")
                .ok_or(ScanError::MissingAttribute {
                    element: "a",
                    attribute: "href",
                })?;
            let url = page_url
                .join(href)
                .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", href, e)))?;

            Ok(Category::new(element_text(&name), url.to_string()))
        })
        .collect()
}

/// Ingredient names on one page of a category.
pub fn ingredient_names(document: &Html) -> Result<Vec<String>> {
    let listing = document
        .select(&VIDEO_LISTING)
        .next()
        .ok_or(ScanError::MissingElement("#video_listing"))?;

    Ok(listing
        .select(&HEADING)
        .flat_map(|heading| heading.select(&ITEM_NAME).map(|name| element_text(&name)))
        .collect())
}

/// Number of pagination links on a category page.
pub fn category_page_count(document: &Html) -> std::result::Result<usize, PageCountError> {
    let pagination = document
        .select(&PAGINATION)
        .next()
        .ok_or(PageCountError::MissingPager)?;

    let count = pagination
        .select(&PAGE_SPAN)
        .filter(|span| span.select(&ANCHOR).next().is_some())
        .count();

    if count == 0 {
        return Err(PageCountError::Zero);
    }
    Ok(count)
}

fn resolve_category_page_count(document: &Html) -> usize {
    category_page_count(document).unwrap_or_else(|reason| {
        debug!("Assuming a single page: {}", reason);
        1
    })
}

fn category_page_url(category_url: &str, page: usize) -> Result<Url> {
    let raw = format!("{}/page-{}", category_url.trim_end_matches('/'), page);
    Url::parse(&raw).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", raw, e)))
}

pub struct IngredientScraper {
    fetcher: Fetcher,
}

impl IngredientScraper {
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(Fetcher::new()?))
    }

    pub fn with_fetcher(fetcher: Fetcher) -> Self {
        Self { fetcher }
    }

    /// Scrapes every category listed on `index_url`.
    ///
    /// A failing page fetch ends that category's paging; a page missing the
    /// expected markup fails the whole scrape.
    pub async fn scrape(&self, index_url: &str) -> Result<IngredientDictionary> {
        let index_url = Url::parse(index_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", index_url, e)))?;

        info!("Fetching ingredient index {}", index_url);
        let body = self.fetcher.fetch(&index_url).await?;
        let categories = index_categories(&Html::parse_document(&body), &index_url)?;

        let mut dictionary = IngredientDictionary::new();
        for category in &categories {
            dictionary.add_category(category.label.clone());
        }

        for category in &categories {
            info!("Scraping category {}", category.label);
            let first = Url::parse(&category.url)
                .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", category.url, e)))?;
            let body = self.fetcher.fetch(&first).await?;
            let pages = resolve_category_page_count(&Html::parse_document(&body));

            for page in 1..=pages {
                debug!("Getting page {} of {}", page, category.label);
                let page_url = category_page_url(&category.url, page)?;
                let body = match self.fetcher.fetch(&page_url).await {
                    Ok(body) => body,
                    Err(e) => {
                        info!("Last page of category {} ({})", category.label, e);
                        break;
                    }
                };

                let names = ingredient_names(&Html::parse_document(&body))?;
                for name in names {
                    dictionary.push(&category.label, name);
                }
            }
        }

        info!(
            "Scraped {} ingredients in {} categories",
            dictionary.total(),
            dictionary.category_count()
        );
        Ok(dictionary)
    }
}
