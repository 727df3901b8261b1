//! Folio: a catalog harvester for online book libraries
//!
//! This crate walks the paginated listing pages of a book catalog, fetches
//! every book's detail page, downloads the cover image and plain-text body,
//! and assembles the results into a single JSON dataset that can be rendered
//! into a set of static browsing pages.

pub mod config;
pub mod crawler;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Folio operations
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Malformed page at {url}: {message}")]
    MalformedPage { url: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FolioError {
    /// Builds a malformed-page error for the given URL
    pub fn malformed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedPage {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("URL cannot be used as a base: {0}")]
    CannotBeBase(String),

    #[error("File name is empty after sanitizing: {0:?}")]
    EmptyFileName(String),
}

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{harvest, BookId, Harvester};
pub use storage::{BookCollection, BookRecord};
pub use crate::url::{sanitize_filename, Endpoints};
