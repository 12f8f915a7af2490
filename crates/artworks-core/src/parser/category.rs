//! Category browse page parser
//!
//! Browse pages list subcategories as links wrapping an `h3` label. A page
//! without any such link is a listing and goes to the paginator.

use scraper::Html;
use url::Url;

use crate::error::Result;
use crate::types::{CategoryPath, Request, Visit, VisitKind};

use super::{element_text, listing, selector};

/// Subcategory anchors on a browse page
const SUBCATEGORY_SELECTOR: &str = "#subcats a";

/// A subcategory link and its heading label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLink {
    pub label: String,
    pub url: Url,
}

/// Find subcategory links on a browse page.
///
/// Only anchors containing a non-empty `h3` count. Hrefs are resolved
/// against `page_url`.
pub fn find_subcategories(document: &Html, page_url: &Url) -> Result<Vec<CategoryLink>> {
    let link_selector = selector(SUBCATEGORY_SELECTOR)?;
    let heading_selector = selector("h3")?;
    let mut links = Vec::new();

    for anchor in document.select(&link_selector) {
        let Some(label) = anchor
            .select(&heading_selector)
            .next()
            .map(|h3| element_text(&h3))
            .filter(|label| !label.is_empty())
        else {
            continue;
        };

        let Some(href) = anchor.value().attr("href") else {
            continue;
        };

        match page_url.join(href) {
            Ok(url) => links.push(CategoryLink { label, url }),
            Err(e) => tracing::debug!(href, error = %e, "skipping unresolvable category link"),
        }
    }

    Ok(links)
}

/// Whether the walker descends into a subcategory.
///
/// At the root only allow-listed labels are entered. Once inside any
/// category every descendant is entered regardless of its label.
pub fn should_enter(label: &str, current: &CategoryPath, allowed: &[String]) -> bool {
    allowed.iter().any(|entry| entry == label) || !current.is_root()
}

/// Walk one browse page.
///
/// Each entered subcategory becomes a `Category` request with its own copy
/// of the path extended by the label. With no subcategory links at all the
/// document is handled as a listing under the current path.
///
/// # Arguments
/// * `html` - Raw HTML content of the page
/// * `page_url` - URL the page was fetched from
/// * `categories` - Path accumulated so far
/// * `allowed` - Top-level labels eligible to be entered
pub fn walk_category(
    html: &str,
    page_url: &Url,
    categories: &CategoryPath,
    allowed: &[String],
) -> Result<Visit> {
    let document = Html::parse_document(html);
    let subcategories = find_subcategories(&document, page_url)?;

    if subcategories.is_empty() {
        return listing::paginate_document(&document, page_url, categories);
    }

    let mut visit = Visit::new();
    for link in subcategories {
        if !should_enter(&link.label, categories, allowed) {
            tracing::debug!(label = %link.label, "skipping category outside allow-list");
            continue;
        }
        let path = categories.child(link.label);
        visit.follow(Request::new(link.url, VisitKind::Category, path));
    }

    Ok(visit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browse_html(categories: &[(&str, &str)]) -> String {
        let divs: String = categories
            .iter()
            .map(|(href, label)| {
                format!(
                    r#"<div><a href="{}"><img src="/c.jpg"><h3>{}</h3></a></div>"#,
                    href, label
                )
            })
            .collect();
        format!(
            r#"<html><body><div id="subcats">{}</div></body></html>"#,
            divs
        )
    }

    fn allowed() -> Vec<String> {
        vec!["In Sunsh".to_string(), "Summertime".to_string()]
    }

    fn root_url() -> Url {
        Url::parse("http://example.com/browse/").unwrap()
    }

    #[test]
    fn test_find_subcategories() {
        let html = browse_html(&[("/browse/in-sunsh", "In Sunsh"), ("winter", "Winter")]);
        let document = Html::parse_document(&html);
        let links = find_subcategories(&document, &root_url()).unwrap();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label, "In Sunsh");
        assert_eq!(links[0].url.as_str(), "http://example.com/browse/in-sunsh");
        assert_eq!(links[1].url.as_str(), "http://example.com/browse/winter");
    }

    #[test]
    fn test_find_subcategories_requires_heading() {
        let html = r#"<div id="subcats"><div><a href="/browse/x">No heading</a></div></div>"#;
        let document = Html::parse_document(html);
        assert!(find_subcategories(&document, &root_url()).unwrap().is_empty());
    }

    #[test]
    fn test_should_enter() {
        let root = CategoryPath::root();
        assert!(should_enter("Summertime", &root, &allowed()));
        assert!(!should_enter("Winter", &root, &allowed()));

        let inside = root.child("Summertime");
        assert!(should_enter("Anything", &inside, &allowed()));
    }

    #[test]
    fn test_walk_root_enters_allowed_only() {
        let html = browse_html(&[
            ("/browse/in-sunsh", "In Sunsh"),
            ("/browse/winter", "Winter"),
            ("/browse/summertime", "Summertime"),
        ]);
        let visit = walk_category(&html, &root_url(), &CategoryPath::root(), &allowed()).unwrap();

        let labels: Vec<&[String]> = visit.requests.iter().map(|r| r.categories.labels()).collect();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0], ["In Sunsh"]);
        assert_eq!(labels[1], ["Summertime"]);
        assert!(visit.requests.iter().all(|r| r.kind == VisitKind::Category));
    }

    #[test]
    fn test_walk_inside_category_enters_every_child() {
        let parent = CategoryPath::root().child("In Sunsh");
        let html = browse_html(&[("/browse/a", "Oils"), ("/browse/b", "Prints")]);
        let url = Url::parse("http://example.com/browse/in-sunsh").unwrap();

        let visit = walk_category(&html, &url, &parent, &allowed()).unwrap();

        assert_eq!(visit.requests.len(), 2);
        assert_eq!(visit.requests[0].categories.labels(), ["In Sunsh", "Oils"]);
        assert_eq!(visit.requests[1].categories.labels(), ["In Sunsh", "Prints"]);
        // siblings got their own copies
        assert_eq!(parent.labels(), ["In Sunsh"]);
    }

    #[test]
    fn test_walk_without_subcategories_paginates() {
        let path = CategoryPath::root().child("A").child("B");
        let html = r#"
            <html><body><div id="body">
                <form class="nav next"><input type="hidden" name="page" value="2"></form>
                <div><a href="/item/1">One</a><a href="/item/2">Two</a></div>
            </div></body></html>
        "#;
        let url = Url::parse("http://example.com/browse/b").unwrap();

        let visit = walk_category(html, &url, &path, &allowed()).unwrap();

        let items: Vec<&Request> = visit
            .requests
            .iter()
            .filter(|r| r.kind == VisitKind::Item)
            .collect();
        assert_eq!(items.len(), 2);
        assert!(items.iter().all(|r| r.categories.labels() == ["A", "B"]));

        let next = visit
            .requests
            .iter()
            .find(|r| r.kind == VisitKind::Listing)
            .unwrap();
        assert_eq!(next.url.as_str(), "http://example.com/browse/b?page=1");
    }

    #[test]
    fn test_walk_root_nothing_allowed() {
        let html = browse_html(&[("/browse/winter", "Winter")]);
        let visit = walk_category(&html, &root_url(), &CategoryPath::root(), &allowed()).unwrap();
        assert!(visit.is_empty());
    }
}
