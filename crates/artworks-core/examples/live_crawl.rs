use artworks_core::{CrawlConfig, Crawler};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CrawlConfig::site_default()?;
    config.max_pages = Some(40);

    println!("Crawling {} ({:?})...\n", config.start_url, config.allowed_categories);

    let crawler = Crawler::new(config)?;
    let records = crawler.collect().await?;

    println!("Collected {} artworks:", records.len());
    for (i, record) in records.iter().enumerate() {
        let size = record
            .dimensions
            .map(|d| format!("{} x {} cm", d.height, d.width))
            .unwrap_or_else(|| "—".to_string());
        println!(
            "  {}. {} by {} [{}] in {}",
            i + 1,
            record.title.as_deref().unwrap_or("(untitled)"),
            if record.artists.is_empty() {
                "unknown".to_string()
            } else {
                record.artists.join(", ")
            },
            size,
            record.categories.labels().join(" > ")
        );
    }

    Ok(())
}
