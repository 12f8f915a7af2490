//! Data types for the artworks crawler
//!
//! This module contains the core data structures used throughout the library:
//! the emitted [`ArtworkRecord`], the [`CategoryPath`] threaded through the
//! traversal, and the [`Request`]/[`Visit`] pair that connects the walker to
//! whatever schedules the fetches.

use serde::{Deserialize, Serialize};
use url::Url;

/// Ordered category labels from the browse root down to the current page.
///
/// A path is a value: descending into a subcategory produces a new path via
/// [`CategoryPath::child`] and leaves the parent untouched, so sibling
/// branches never observe each other's labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryPath(Vec<String>);

impl CategoryPath {
    /// The empty path of the browse root
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Copy of this path with `label` appended
    pub fn child(&self, label: impl Into<String>) -> Self {
        let mut labels = self.0.clone();
        labels.push(label.into());
        Self(labels)
    }

    /// Whether no category has been entered yet
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for CategoryPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Physical size of an artwork in centimeters.
///
/// Height and width only ever travel together; a record either has both or
/// neither.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
}

/// One scraped artwork, ready for a sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkRecord {
    /// Cleaned title, None for untitled works
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Credited artists in page order
    #[serde(rename = "artist")]
    pub artists: Vec<String>,
    /// Body paragraph merged with any bracketed heading text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absolute URL of the primary image
    #[serde(rename = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Absolute URL of the item detail page
    #[serde(rename = "url")]
    pub source_url: String,
    /// Serialized as top-level `height` and `width`
    #[serde(flatten)]
    pub dimensions: Option<Dimensions>,
    /// Category labels of the branch that reached this item
    pub categories: CategoryPath,
}

/// Which walker step should handle a fetched document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitKind {
    /// Browse page that may list subcategories
    Category,
    /// Paginated item listing
    Listing,
    /// Single artwork detail page
    Item,
}

/// A page to fetch plus the context to resume with once it arrives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: Url,
    pub kind: VisitKind,
    pub categories: CategoryPath,
}

impl Request {
    pub fn new(url: Url, kind: VisitKind, categories: CategoryPath) -> Self {
        Self {
            url,
            kind,
            categories,
        }
    }
}

/// Result of handling one document: follow-up requests and finished records
#[derive(Debug, Clone, Default)]
pub struct Visit {
    pub requests: Vec<Request>,
    pub records: Vec<ArtworkRecord>,
}

impl Visit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn follow(&mut self, request: Request) {
        self.requests.push(request);
    }

    /// Queue every URL with the same kind and a clone of `categories`
    pub fn follow_all<I>(&mut self, urls: I, kind: VisitKind, categories: &CategoryPath)
    where
        I: IntoIterator<Item = Url>,
    {
        self.requests.extend(
            urls.into_iter()
                .map(|url| Request::new(url, kind, categories.clone())),
        );
    }

    pub fn emit(&mut self, record: ArtworkRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty() && self.records.is_empty()
    }
}
