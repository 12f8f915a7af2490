//! Error types for the artworks crawler
//!
//! This module defines all error types used throughout the library.
//! Missing optional page content is never an error; these variants cover
//! transport failures, broken configuration and sink I/O.

use thiserror::Error;

/// Error type for artworks crawler operations
#[derive(Error, Debug)]
pub enum ArtworksError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to parse HTML content or a CSS selector
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Server answered with a status that is neither success nor error
    #[error("Unexpected HTTP status {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// URL string failed to parse
    #[error("Malformed URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Requested page was not found (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Writing records failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a record failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for artworks crawler operations
pub type Result<T> = std::result::Result<T, ArtworksError>;
