//! Command-line crawler for the art catalog
//!
//! Crawls the allow-listed categories and writes one JSON record per line
//! to stdout or a file. Logs go to stderr; set `RUST_LOG` to adjust.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use artworks_core::crawler::{DEFAULT_CATEGORIES, DEFAULT_START_URL};
use artworks_core::{ClientConfig, CrawlConfig, Crawler, JsonLinesEmitter};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "artworks", about = "Crawl the art catalog into JSON Lines records")]
struct Cli {
    /// Browse page to start from
    #[arg(long, default_value = DEFAULT_START_URL)]
    start_url: String,

    /// Site origin for image URLs (default: origin of --start-url)
    #[arg(long)]
    base_url: Option<String>,

    /// Top-level category to enter; repeat for several
    #[arg(short, long = "category")]
    categories: Vec<String>,

    /// Maximum concurrent fetches
    #[arg(long, default_value = "8")]
    concurrency: usize,

    /// Stop after this many fetched pages
    #[arg(long)]
    max_pages: Option<usize>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Retries for 429/5xx responses
    #[arg(long, default_value = "3")]
    retries: u32,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Cli {
    fn crawl_config(&self) -> anyhow::Result<CrawlConfig> {
        let start_url = self
            .start_url
            .parse()
            .with_context(|| format!("invalid --start-url {}", self.start_url))?;
        let mut config = CrawlConfig::new(start_url);

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url
                .parse()
                .with_context(|| format!("invalid --base-url {}", base_url))?;
        }

        config.allowed_categories = if self.categories.is_empty() {
            DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
        } else {
            self.categories.clone()
        };
        config.concurrency = self.concurrency;
        config.max_pages = self.max_pages;

        Ok(config)
    }

    fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout_secs: self.timeout,
            max_retries: self.retries,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let crawler = Crawler::with_client_config(cli.crawl_config()?, cli.client_config())
        .context("failed to build HTTP client")?;

    let writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut emitter = JsonLinesEmitter::new(writer);
    let stats = crawler.run(&mut emitter).await.context("crawl aborted")?;

    tracing::info!(
        records = stats.records,
        pages = stats.pages_fetched,
        errors = stats.fetch_errors + stats.parse_errors,
        "done"
    );

    Ok(())
}
