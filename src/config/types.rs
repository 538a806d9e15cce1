use serde::Deserialize;

/// Main configuration structure for Radiodex
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub storage: Option<StorageConfig>,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the radio directory site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the flat category index, relative to the base URL
    #[serde(rename = "stations-path", default = "default_stations_path")]
    pub stations_path: String,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Fixed delay before each category download (milliseconds)
    #[serde(rename = "delay-between-downloads-ms", default = "default_delay_ms")]
    pub delay_between_downloads_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// User agent string sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Storage configuration
///
/// When the whole section is absent the crawl runs purely in memory: every
/// invocation starts from an empty result set and nothing is persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the category database and downloaded playlists
    #[serde(rename = "base-directory")]
    pub base_directory: String,
}

fn default_stations_path() -> String {
    "/stations/".to_string()
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("radiodex/{}", env!("CARGO_PKG_VERSION"))
}
