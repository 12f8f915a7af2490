//! Artwork detail page parser
//!
//! Pulls the raw heading, credit, paragraph, dimension and image values out
//! of an item page and hands them to [`crate::normalize`].

use scraper::{ElementRef, Html};
use url::Url;

use crate::error::Result;
use crate::normalize::{merge_description, parse_artists, parse_dimensions, split_title};
use crate::types::{ArtworkRecord, CategoryPath};

use super::{element_text, first_text, selector};

/// Label of the attribute-table row holding the size text
const DIMENSIONS_LABEL: &str = "Dimensions";

/// Unprocessed values of one item page; every field may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawItem {
    /// Primary heading, source of title and bracketed description
    pub heading: Option<String>,
    /// Secondary heading with `role: name` credits
    pub artist_credits: Option<String>,
    /// First body paragraph
    pub paragraph: Option<String>,
    /// Value cell next to the "Dimensions" label
    pub dimensions_text: Option<String>,
    /// Primary image resolved against the site origin
    pub image_url: Option<Url>,
}

/// Extract raw fields from an item detail page.
///
/// # Arguments
/// * `html` - Raw HTML content of the item page
/// * `base_url` - Site origin used to absolutize the image source
///
/// # Returns
/// * `Ok(RawItem)` with whatever fields the page has
/// * `Err(ArtworksError::ParseError)` only if a built-in selector is invalid
pub fn extract_item(html: &str, base_url: &Url) -> Result<RawItem> {
    let document = Html::parse_document(html);

    Ok(RawItem {
        heading: first_text(&document, "h1")?,
        artist_credits: first_text(&document, "h2")?,
        paragraph: first_text(&document, "p")?,
        dimensions_text: extract_dimensions_text(&document)?,
        image_url: extract_image_url(&document, base_url)?,
    })
}

/// Text of the `td.value` cell following the `td.key` labeled "Dimensions".
fn extract_dimensions_text(document: &Html) -> Result<Option<String>> {
    let key_selector = selector("td.key")?;

    let value = document
        .select(&key_selector)
        .find(|key| element_text(key) == DIMENSIONS_LABEL)
        .and_then(|key| {
            key.next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|cell| {
                    cell.value().name() == "td" && cell.value().classes().any(|c| c == "value")
                })
        })
        .map(|cell| element_text(&cell))
        .filter(|text| !text.is_empty());

    Ok(value)
}

fn extract_image_url(document: &Html, base_url: &Url) -> Result<Option<Url>> {
    let img_selector = selector("img[src]")?;

    let src = match document
        .select(&img_selector)
        .next()
        .and_then(|img| img.value().attr("src"))
    {
        Some(src) if !src.trim().is_empty() => src.trim(),
        _ => return Ok(None),
    };

    match base_url.join(src) {
        Ok(url) => Ok(Some(url)),
        Err(e) => {
            tracing::debug!(src, error = %e, "unresolvable image source");
            Ok(None)
        }
    }
}

/// Normalize raw fields into a finished record.
///
/// # Arguments
/// * `raw` - Values from [`extract_item`]
/// * `source_url` - URL the item page was fetched from
/// * `categories` - Path of the branch that reached the item
pub fn build_record(raw: RawItem, source_url: &Url, categories: CategoryPath) -> ArtworkRecord {
    let title = raw
        .heading
        .as_deref()
        .map(split_title)
        .unwrap_or_default();

    let description = merge_description(raw.paragraph.as_deref(), title.description.as_deref());

    let artists = raw
        .artist_credits
        .as_deref()
        .map(parse_artists)
        .unwrap_or_default();

    let dimensions = raw.dimensions_text.as_deref().and_then(parse_dimensions);

    ArtworkRecord {
        title: title.title,
        artists,
        description,
        image_url: raw.image_url.map(String::from),
        source_url: source_url.to_string(),
        dimensions,
        categories,
    }
}

/// Parse an item page straight into a record.
pub fn parse_item(
    html: &str,
    source_url: &Url,
    base_url: &Url,
    categories: CategoryPath,
) -> Result<ArtworkRecord> {
    let raw = extract_item(html, base_url)?;
    Ok(build_record(raw, source_url, categories))
}
