//! Artworks Crawler Core Library
//!
//! This crate provides the crawling and extraction logic for an art-catalog
//! site made of nested category browse pages, paginated item listings and
//! artwork detail pages.
//!
//! # Features
//! - Walk the category tree from an allow-list, tracking the category path
//! - Follow listing pagination through the `page=` query parameter
//! - Extract title, artists, description, image and dimensions per artwork
//! - Concurrent crawling through a pluggable [`Fetcher`]

pub mod client;
pub mod crawler;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod sink;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, Fetcher, HttpFetcher};
pub use crawler::{CrawlConfig, CrawlStats, Crawler};
pub use error::{ArtworksError, Result};
pub use sink::{JsonLinesEmitter, RecordEmitter, VecEmitter};
pub use types::{ArtworkRecord, CategoryPath, Dimensions, Request, Visit, VisitKind};
