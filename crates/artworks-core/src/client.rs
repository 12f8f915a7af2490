//! HTTP document fetching for the crawler
//!
//! This module defines the [`Fetcher`] seam the crawler pulls documents
//! through, and [`HttpFetcher`], a reqwest implementation that retries
//! transient errors with exponential backoff.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use url::Url;

use crate::error::{ArtworksError, Result};

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Base delay for exponential backoff (in milliseconds)
const BASE_RETRY_DELAY_MS: u64 = 1000;

/// Source of HTML documents.
///
/// The crawler only ever sees documents for successful fetches; an `Err`
/// drops the branch that asked for it.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the HTML body at `url`
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// Configuration for the HTTP fetcher
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Retries after a 429 or 5xx response (default: 3)
    pub max_retries: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

/// reqwest-backed [`Fetcher`]
///
/// This client automatically:
/// - Retries on transient errors (429, 5xx) with exponential backoff
/// - Maps 404 to `ArtworksError::NotFound`
pub struct HttpFetcher {
    /// Underlying HTTP client
    client: reqwest::Client,
    max_retries: u32,
}

impl HttpFetcher {
    /// Create a new fetcher with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new fetcher with custom configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
        })
    }

    /// Internal method to fetch with retry logic
    async fn fetch_with_retry(&self, url: &Url) -> Result<String> {
        let mut attempt = 0;

        loop {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response.text().await?);
            }

            // Handle 404 - Not Found (no retry)
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(ArtworksError::NotFound(url.to_string()));
            }

            let transient =
                status == reqwest::StatusCode::TOO_MANY_REQUESTS || status.is_server_error();
            if transient && attempt < self.max_retries {
                let delay = calculate_backoff_delay(attempt);
                tracing::debug!(%url, %status, attempt, ?delay, "retrying fetch");
                sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(response
                .error_for_status()
                .err()
                .map(ArtworksError::HttpError)
                .unwrap_or_else(|| ArtworksError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_string(),
                }));
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        self.fetch_with_retry(url).await
    }
}

/// Calculate exponential backoff delay for retry
fn calculate_backoff_delay(attempt: u32) -> Duration {
    // Exponential backoff: 1s, 2s, 4s, ...
    let delay_ms = BASE_RETRY_DELAY_MS * 2u64.pow(attempt);
    Duration::from_millis(delay_ms)
}
