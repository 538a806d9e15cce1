//! Page fetching
//!
//! The [`PageSource`] trait is the seam between the crawl logic and the
//! network. Production code uses [`HttpPageSource`] backed by reqwest; tests
//! substitute canned implementations.

use crate::config::CrawlerConfig;
use crate::ScrapeError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// A source of fetched page bodies
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the body of the page at `url`
    ///
    /// Fails with [`ScrapeError::Fetch`] on transport errors and
    /// [`ScrapeError::HttpStatus`] on non-2xx responses.
    async fn fetch_page(&self, url: &str) -> Result<String, ScrapeError>;
}

/// reqwest-backed page source
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    /// Creates a page source with a client built from the crawler config
    pub fn new(config: &CrawlerConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch_page(&self, url: &str) -> Result<String, ScrapeError> {
        tracing::debug!("Fetching page: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        })
    }
}

/// Builds an HTTP client with the configured user agent and timeouts
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}
