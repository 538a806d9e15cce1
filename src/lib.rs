//! Radiodex: a resumable radio directory scraper
//!
//! This crate crawls a directory-style radio website into a persisted set of
//! genre categories with their stations and playlists. Crawls are resumable:
//! the full result set is rewritten after every successfully fetched
//! category, so an interrupted run loses at most the category in flight and
//! a re-run fetches only what is still missing.

pub mod config;
pub mod crawl;
pub mod discover;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod storage;

use thiserror::Error;

/// Main error type for Radiodex operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Page has no '{container}' element")]
    Discovery { container: &'static str },

    #[error("Menu item has no usable label")]
    MalformedMenuItem,

    #[error("Menu entry not found: {0}")]
    NotFound(String),

    #[error("Failed to extract category '{name}': {message}")]
    Extraction { name: String, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

/// Result type alias for Radiodex operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{Category, MenuGroup, Station};
