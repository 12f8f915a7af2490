//! HTML parsers for the art-catalog pages
//!
//! This module contains parsers for the three page shapes of the site:
//! - `category`: Browse pages listing subcategories
//! - `listing`: Paginated item listings
//! - `item`: Artwork detail pages

pub mod category;
pub mod item;
pub mod listing;

use scraper::{ElementRef, Html, Selector};

use crate::error::{ArtworksError, Result};

// Re-export main parsing functions
pub use category::{find_subcategories, should_enter, walk_category, CategoryLink};
pub use item::{build_record, extract_item, parse_item, RawItem};
pub use listing::{
    extract_item_links, next_page_url, next_page_value, paginate_document, parse_listing,
};

/// Compile a CSS selector, mapping failures to `ParseError`.
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ArtworksError::ParseError(format!("Invalid selector {}: {:?}", css, e)))
}

/// Text content of an element with runs of whitespace collapsed.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapsed text of the first element matching `css`, if non-empty.
pub(crate) fn first_text(document: &Html, css: &str) -> Result<Option<String>> {
    let selector = selector(css)?;
    let text = document
        .select(&selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty());
    Ok(text)
}
