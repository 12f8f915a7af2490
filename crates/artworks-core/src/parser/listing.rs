//! Paginated listing parser
//!
//! A listing page links to item detail pages and carries a "next" control
//! whose hidden `page` input holds the number of the following page.

use scraper::Html;
use url::Url;

use crate::error::Result;
use crate::types::{CategoryPath, Request, Visit, VisitKind};

use super::selector;

/// Item detail links inside the listing body
const ITEM_LINK_SELECTOR: &str = "#body a[href*='/item']";

/// Hidden input of the "next page" form
const NEXT_PAGE_SELECTOR: &str = ".nav.next [name='page']";

/// Query parameter carrying the page number
const PAGE_PARAM: &str = "page";

/// Parse a listing page into item requests plus the next-page request.
///
/// # Arguments
/// * `html` - Raw HTML content of the listing page
/// * `page_url` - URL the page was fetched from
/// * `categories` - Path of the branch that reached this listing
pub fn parse_listing(html: &str, page_url: &Url, categories: &CategoryPath) -> Result<Visit> {
    let document = Html::parse_document(html);
    paginate_document(&document, page_url, categories)
}

/// Listing step over an already parsed document.
///
/// Every item link becomes an `Item` request carrying `categories`. When the
/// page has no item links the branch ends here and no next page is looked
/// up; when it has items but no usable "next" control pagination also ends.
pub fn paginate_document(
    document: &Html,
    page_url: &Url,
    categories: &CategoryPath,
) -> Result<Visit> {
    let mut visit = Visit::new();

    let links = extract_item_links(document, page_url)?;
    if links.is_empty() {
        tracing::debug!(url = %page_url, "listing has no items, pagination done");
        return Ok(visit);
    }

    tracing::debug!(url = %page_url, items = links.len(), "listing page");
    visit.follow_all(links, VisitKind::Item, categories);

    match next_page_value(document)? {
        Some(next_page) => visit.follow(Request::new(
            next_page_url(page_url, next_page),
            VisitKind::Listing,
            categories.clone(),
        )),
        None => {
            tracing::debug!(url = %page_url, "listing has no next control");
        }
    }

    Ok(visit)
}

/// Absolute URLs of the item links on a listing page, in page order.
pub fn extract_item_links(document: &Html, page_url: &Url) -> Result<Vec<Url>> {
    let link_selector = selector(ITEM_LINK_SELECTOR)?;
    let mut links: Vec<Url> = Vec::new();

    for element in document.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        match page_url.join(href) {
            Ok(url) => {
                if !links.contains(&url) {
                    links.push(url);
                }
            }
            Err(e) => tracing::debug!(href, error = %e, "skipping unresolvable item link"),
        }
    }

    Ok(links)
}

/// Page number held by the "next" control, if present and numeric.
pub fn next_page_value(document: &Html) -> Result<Option<u32>> {
    let next_selector = selector(NEXT_PAGE_SELECTOR)?;

    let value = document
        .select(&next_selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .and_then(|value| value.trim().parse::<u32>().ok());

    Ok(value)
}

/// URL of the page after `current`.
///
/// A URL that already carries `page=` gets that value replaced with
/// `next_page`. A bare category URL is the implicit first page and is given
/// an explicit `page=1` marker instead; the page read from that one then
/// advances normally.
///
/// # Examples
/// ```
/// use artworks_core::parser::next_page_url;
/// use url::Url;
///
/// let bare = Url::parse("http://example.com/browse/oils").unwrap();
/// assert_eq!(next_page_url(&bare, 2).as_str(), "http://example.com/browse/oils?page=1");
///
/// let third = Url::parse("http://example.com/browse/oils?page=3").unwrap();
/// assert_eq!(next_page_url(&third, 4).as_str(), "http://example.com/browse/oils?page=4");
/// ```
pub fn next_page_url(current: &Url, next_page: u32) -> Url {
    let mut next = current.clone();

    if current.query_pairs().any(|(key, _)| key == PAGE_PARAM) {
        // Rewrite only the page pair; other pairs keep their original encoding.
        let page_pair = format!("{PAGE_PARAM}={next_page}");
        let query = current
            .query()
            .unwrap_or_default()
            .split('&')
            .map(|pair| {
                let key = pair.split_once('=').map_or(pair, |(key, _)| key);
                if key == PAGE_PARAM {
                    page_pair.as_str()
                } else {
                    pair
                }
            })
            .collect::<Vec<_>>()
            .join("&");
        next.set_query(Some(&query));
    } else {
        next.query_pairs_mut().append_pair(PAGE_PARAM, "1");
    }

    next
}
