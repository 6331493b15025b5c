use crate::error::{Result, ScanError};
use crate::fetch::Fetcher;
use crate::page::{self, Page};
use crate::result::RecipeBook;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Called with `(depth, url)` before each page is fetched.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Where the categories of a listing's later result pages come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingPages {
    /// Fetch result page `i` from the listing URL with `?page=i`.
    #[default]
    Fetch,
    /// Re-read the first result page for every page index.
    Reuse,
}

type VisitFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Depth-first walker over a recipe site's category tree.
///
/// Listing pages are expanded into their sub-categories, recipe pages end the
/// branch and land in the [`RecipeBook`]. A URL is walked again only when
/// reached from a shallower depth than before, and nothing deeper than
/// `max_depth` is fetched. Any fetch or page error stops the walk.
pub struct RecipeWalker {
    fetcher: Fetcher,
    max_depth: usize,
    listing_pages: ListingPages,
    progress_callback: Option<ProgressCallback>,
}

impl RecipeWalker {
    pub fn new() -> Result<Self> {
        Ok(Self::with_fetcher(Fetcher::new()?))
    }

    pub fn with_fetcher(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            max_depth: 8,
            listing_pages: ListingPages::default(),
            progress_callback: None,
        }
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_listing_pages(mut self, listing_pages: ListingPages) -> Self {
        self.listing_pages = listing_pages;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Walks from `start_url` into a fresh book.
    pub async fn crawl(&self, start_url: &str) -> Result<RecipeBook> {
        let mut book = RecipeBook::new();
        self.walk(start_url, &mut book).await?;
        Ok(book)
    }

    /// Walks from `start_url`, adding recipes to `book` as they are found.
    /// On error, recipes found before the failure stay in `book`.
    pub async fn walk(&self, start_url: &str, book: &mut RecipeBook) -> Result<()> {
        let url = Url::parse(start_url)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", start_url, e)))?;

        info!("Starting recipe walk at {}", url);
        let mut visited = HashMap::new();
        self.visit(url, 0, book, &mut visited).await?;
        info!(
            "Walk complete. {} recipes from {} pages",
            book.len(),
            visited.len()
        );
        Ok(())
    }

    fn visit<'a>(
        &'a self,
        url: Url,
        depth: usize,
        book: &'a mut RecipeBook,
        visited: &'a mut HashMap<String, usize>,
    ) -> VisitFuture<'a> {
        Box::pin(async move {
            if depth > self.max_depth {
                warn!("Skipping {}: deeper than {}", url, self.max_depth);
                return Ok(());
            }
            // Shallowest depth each URL was walked from.
            match visited.get(url.as_str()) {
                Some(&seen) if seen <= depth => {
                    debug!("Already walked {}", url);
                    return Ok(());
                }
                Some(_) => debug!("Walking {} again from a shallower depth", url),
                None => {}
            }
            visited.insert(url.to_string(), depth);

            if let Some(ref callback) = self.progress_callback {
                callback(depth, url.to_string());
            }

            let body = self.fetcher.fetch(&url).await?;
            match page::analyse(&body, &url)? {
                Page::Recipe(recipe) => {
                    debug!(
                        "Recipe page {}: '{}' ({} ingredients)",
                        url,
                        recipe.name,
                        recipe.ingredients.len()
                    );
                    book.insert(recipe);
                }
                Page::Listing(listing) => {
                    debug!(
                        "Listing page {}: {} categories over {} pages",
                        url,
                        listing.categories.len(),
                        listing.page_count
                    );

                    for index in 0..listing.page_count {
                        let categories =
                            if index == 0 || self.listing_pages == ListingPages::Reuse {
                                listing.categories.clone()
                            } else {
                                let page_url = listing_page_url(&url, index);
                                let body = self.fetcher.fetch(&page_url).await?;
                                page::listing_categories(&body, &page_url)?
                            };

                        for category in categories {
                            let next = Url::parse(&category.url).map_err(|e| {
                                ScanError::InvalidUrl(format!("{}: {}", category.url, e))
                            })?;
                            self.visit(next, depth + 1, book, visited).await?;
                        }
                    }
                }
            }

            Ok(())
        })
    }
}

/// `listing` with its `page` query parameter set to `index`.
fn listing_page_url(listing: &Url, index: usize) -> Url {
    let kept: Vec<(String, String)> = listing
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = listing.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("page", &index.to_string());
    url
}
