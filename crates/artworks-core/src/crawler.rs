//! Main crawler API
//!
//! This module drives the walker over the whole site. It keeps a worklist of
//! pending [`Request`]s, fetches them concurrently through a [`Fetcher`],
//! feeds each document back into the matching parser and hands finished
//! records to a [`RecordEmitter`].

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use tokio::task::JoinSet;
use url::Url;

use crate::client::{ClientConfig, Fetcher, HttpFetcher};
use crate::error::Result;
use crate::parser::{parse_item, parse_listing, walk_category};
use crate::sink::{RecordEmitter, VecEmitter};
use crate::types::{ArtworkRecord, CategoryPath, Request, Visit, VisitKind};

/// Browse root of the catalog site
pub const DEFAULT_START_URL: &str = "http://pstrial-2019-12-16.toscrape.com/browse/";

/// Top-level categories entered by default
pub const DEFAULT_CATEGORIES: [&str; 2] = ["In Sunsh", "Summertime"];

/// Default number of in-flight fetches
const DEFAULT_CONCURRENCY: usize = 8;

/// Configuration for a crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Browse page the crawl starts from
    pub start_url: Url,
    /// Site origin used to absolutize image sources
    pub base_url: Url,
    /// Top-level category labels eligible to be entered
    pub allowed_categories: Vec<String>,
    /// Maximum concurrent fetches (default: 8)
    pub concurrency: usize,
    /// Stop scheduling after this many fetches
    pub max_pages: Option<usize>,
}

impl CrawlConfig {
    /// Configuration for `start_url` with the default allow-list.
    ///
    /// The base URL is the origin of `start_url`.
    pub fn new(start_url: Url) -> Self {
        let mut base_url = start_url.clone();
        base_url.set_path("/");
        base_url.set_query(None);
        base_url.set_fragment(None);

        Self {
            start_url,
            base_url,
            allowed_categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            concurrency: DEFAULT_CONCURRENCY,
            max_pages: None,
        }
    }

    /// Configuration for the catalog's own browse root
    ///
    /// # Errors
    /// Returns `ArtworksError::UrlParse` if the built-in URL fails to parse
    pub fn site_default() -> Result<Self> {
        Ok(Self::new(Url::parse(DEFAULT_START_URL)?))
    }
}

/// Counters reported at the end of a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Documents fetched successfully
    pub pages_fetched: usize,
    /// Fetches that failed and were dropped
    pub fetch_errors: usize,
    /// Documents the parsers rejected
    pub parse_errors: usize,
    /// Records handed to the emitter
    pub records: usize,
}

/// Site crawler for the art catalog
///
/// # Example
/// ```no_run
/// use artworks_core::{CrawlConfig, Crawler};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let crawler = Crawler::new(CrawlConfig::site_default()?)?;
///     let records = crawler.collect().await?;
///     println!("Scraped {} artworks", records.len());
///     Ok(())
/// }
/// ```
pub struct Crawler<F: Fetcher> {
    fetcher: Arc<F>,
    config: CrawlConfig,
}

impl Crawler<HttpFetcher> {
    /// Create a crawler backed by an [`HttpFetcher`] with default settings.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: CrawlConfig) -> Result<Self> {
        Self::with_client_config(config, ClientConfig::default())
    }

    /// Create a crawler backed by an [`HttpFetcher`] with custom settings.
    pub fn with_client_config(config: CrawlConfig, client: ClientConfig) -> Result<Self> {
        let fetcher = HttpFetcher::with_config(client)?;
        Ok(Self::with_fetcher(fetcher, config))
    }
}

impl<F: Fetcher + 'static> Crawler<F> {
    /// Create a crawler with a custom fetcher.
    ///
    /// This is useful for testing or for plugging in another transport.
    pub fn with_fetcher(fetcher: F, config: CrawlConfig) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            config,
        }
    }

    /// Handle one fetched document according to the request that produced it.
    pub fn handle(&self, request: &Request, html: &str) -> Result<Visit> {
        match request.kind {
            VisitKind::Category => walk_category(
                html,
                &request.url,
                &request.categories,
                &self.config.allowed_categories,
            ),
            VisitKind::Listing => parse_listing(html, &request.url, &request.categories),
            VisitKind::Item => {
                let record = parse_item(
                    html,
                    &request.url,
                    &self.config.base_url,
                    request.categories.clone(),
                )?;
                let mut visit = Visit::new();
                visit.emit(record);
                Ok(visit)
            }
        }
    }

    /// Crawl from the start URL until the worklist drains.
    ///
    /// Each URL is fetched at most once per run. Failed fetches and pages
    /// the parsers reject end their branch; only emitter errors abort.
    ///
    /// # Arguments
    /// * `emitter` - Receives every finished record
    ///
    /// # Returns
    /// * `Ok(CrawlStats)` once nothing is left to fetch
    /// * `Err(ArtworksError)` if the emitter fails
    pub async fn run<E: RecordEmitter>(&self, emitter: &mut E) -> Result<CrawlStats> {
        let concurrency = self.config.concurrency.max(1);
        let mut stats = CrawlStats::default();
        let mut pending: VecDeque<Request> = VecDeque::new();
        let mut seen: HashSet<Url> = HashSet::new();
        let mut in_flight = JoinSet::new();
        let mut dispatched = 0usize;

        tracing::info!(
            start_url = %self.config.start_url,
            categories = ?self.config.allowed_categories,
            concurrency,
            "starting crawl"
        );

        let start = Request::new(
            self.config.start_url.clone(),
            VisitKind::Category,
            CategoryPath::root(),
        );
        seen.insert(start.url.clone());
        pending.push_back(start);

        loop {
            while in_flight.len() < concurrency {
                if self.config.max_pages.is_some_and(|limit| dispatched >= limit) {
                    break;
                }
                let Some(request) = pending.pop_front() else {
                    break;
                };
                let fetcher = Arc::clone(&self.fetcher);
                dispatched += 1;
                in_flight.spawn(async move {
                    let result = fetcher.fetch(&request.url).await;
                    (request, result)
                });
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };

            let (request, result) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::warn!(error = %e, "fetch task aborted");
                    stats.fetch_errors += 1;
                    continue;
                }
            };

            let html = match result {
                Ok(html) => html,
                Err(e) => {
                    tracing::warn!(url = %request.url, error = %e, "fetch failed, dropping branch");
                    stats.fetch_errors += 1;
                    continue;
                }
            };
            stats.pages_fetched += 1;

            let visit = match self.handle(&request, &html) {
                Ok(visit) => visit,
                Err(e) => {
                    tracing::warn!(url = %request.url, error = %e, "failed to parse page");
                    stats.parse_errors += 1;
                    continue;
                }
            };

            tracing::debug!(
                url = %request.url,
                kind = ?request.kind,
                requests = visit.requests.len(),
                records = visit.records.len(),
                "visited"
            );

            for record in visit.records {
                emitter.emit(record)?;
                stats.records += 1;
            }

            for next in visit.requests {
                if seen.insert(next.url.clone()) {
                    pending.push_back(next);
                }
            }
        }

        emitter.finish()?;

        tracing::info!(
            pages = stats.pages_fetched,
            records = stats.records,
            fetch_errors = stats.fetch_errors,
            parse_errors = stats.parse_errors,
            unvisited = pending.len(),
            "crawl finished"
        );

        Ok(stats)
    }

    /// Crawl and return all records in memory.
    pub async fn collect(&self) -> Result<Vec<ArtworkRecord>> {
        let mut emitter = VecEmitter::new();
        self.run(&mut emitter).await?;
        Ok(emitter.into_records())
    }
}
