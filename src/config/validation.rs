//! Configuration validation
//!
//! Catches misconfigurations at load time rather than mid-crawl.

use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// Checks:
/// - the base URL parses and uses http/https
/// - the stations path is absolute (starts with '/')
/// - the request timeout is non-zero
/// - the storage directory, when configured, is non-empty
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let base = Url::parse(&config.site.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.site.base_url, e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url must be http or https, got '{}'",
            base.scheme()
        )));
    }

    if !config.site.stations_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "stations-path must start with '/', got '{}'",
            config.site.stations_path
        )));
    }

    if config.crawler.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be greater than 0".to_string(),
        ));
    }

    if config.crawler.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }

    if let Some(storage) = &config.storage {
        if storage.base_directory.trim().is_empty() {
            return Err(ConfigError::Validation(
                "storage base-directory must not be empty".to_string(),
            ));
        }
    }

    Ok(())
}
