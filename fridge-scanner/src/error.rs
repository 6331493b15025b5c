use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Element not found: {0}")]
    MissingElement(&'static str),

    #[error("Attribute '{attribute}' missing on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ScanError>;

/// Why a page count could not be read from a listing page.
///
/// Callers fall back to a single page on any of these; the variant is kept so
/// the reason shows up in logs and tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageCountError {
    #[error("no pager element on page")]
    MissingPager,

    #[error("pager has no page count indicator")]
    MissingIndicator,

    #[error("page count '{0}' is not a number")]
    Unparsable(String),

    #[error("page count is zero")]
    Zero,
}
