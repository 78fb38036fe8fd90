//! Quote-Ripple: a paginated quote harvester
//!
//! This crate fetches the paginated listings of a quotes site, extracts
//! structured records (quote text, author, tags) from every page, and writes
//! the aggregated records to a spreadsheet or CSV file.

pub mod config;
pub mod crawler;
pub mod logging;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Quote-Ripple operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Persist error: {0}")]
    Persist(#[from] output::PersistError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
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

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Page-level fetch failures
///
/// Every variant is recoverable at page granularity: the caller logs it and
/// treats the page as unreachable.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },
}

impl FetchError {
    /// The URL the failed request targeted
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url } | Self::Network { url, .. } | Self::HttpStatus { url, .. } => url,
        }
    }
}

/// A required field of a quote container was absent or empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseFieldError {
    #[error("missing quote text")]
    MissingText,

    #[error("missing author")]
    MissingAuthor,

    #[error("missing tag list")]
    MissingTags,
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Cannot resolve '{reference}' against {base}")]
    Unresolvable { base: String, reference: String },
}

/// Result type alias for Quote-Ripple operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::{Config, CrawlStrategy};
pub use crawler::{Fetcher, PageParser, Pipeline};
pub use output::{persist, PersistStatus};
pub use state::{CrawlOutcome, CrawlState, PageResult, Record};
