//! Configuration module for Radiodex
//!
//! Handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use radiodex::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Crawling {}", config.site.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, SiteConfig, StorageConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
