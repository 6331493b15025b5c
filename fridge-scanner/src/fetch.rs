use crate::error::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("Fridge/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client for the crawlers. One GET at a time, no retries.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    /// GETs `url` and returns the body. Non-success statuses are errors.
    pub async fn fetch(&self, url: &Url) -> Result<String> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}
