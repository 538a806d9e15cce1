//! Flat "all categories" crawl
//!
//! Fetches the site's category index page, discovers the genre listing, and
//! runs the resumable merge over it.

use crate::config::Config;
use crate::crawl::merge;
use crate::discover;
use crate::extract::HttpCategoryExtractor;
use crate::fetch::{HttpPageSource, PageSource};
use crate::model::Category;
use crate::storage::{CategoryStore, SqliteStore};
use crate::Result;
use scraper::Html;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Crawler for the flat category index
pub struct CategoryCrawler<P: PageSource + Clone, S: CategoryStore> {
    source: P,
    store: Option<S>,
    base_url: Url,
    stations_path: String,
    delay: Duration,
}

impl CategoryCrawler<HttpPageSource, SqliteStore> {
    /// Builds a crawler with HTTP source and SQLite store from the config
    pub fn from_config(config: &Config) -> Result<Self> {
        let source = HttpPageSource::new(&config.crawler)?;
        let store = match &config.storage {
            Some(storage) => Some(SqliteStore::open(Path::new(&storage.base_directory))?),
            None => None,
        };
        Ok(Self::new(
            source,
            store,
            Url::parse(&config.site.base_url)?,
            config.site.stations_path.clone(),
            Duration::from_millis(config.crawler.delay_between_downloads_ms),
        ))
    }
}

impl<P: PageSource + Clone, S: CategoryStore> CategoryCrawler<P, S> {
    pub fn new(
        source: P,
        store: Option<S>,
        base_url: Url,
        stations_path: String,
        delay: Duration,
    ) -> Self {
        Self {
            source,
            store,
            base_url,
            stations_path,
            delay,
        }
    }

    /// Crawls every category on the index page, resuming from stored state
    ///
    /// Only categories whose names are not already persisted are fetched;
    /// the full collection is rewritten after each fetch.
    pub async fn all_categories(&mut self) -> Result<Vec<Category>> {
        let index_url = self.base_url.join(&self.stations_path)?;
        let body = self.source.fetch_page(index_url.as_str()).await?;
        let links = {
            let doc = Html::parse_document(&body);
            discover::station_index(&doc)?
        };
        tracing::info!("Discovered {} categories on {}", links.len(), index_url);

        let extractor = HttpCategoryExtractor::new(
            self.source.clone(),
            self.base_url.clone(),
            links.names_by_length_desc(),
            self.delay,
        );
        merge::fetch_missing(&links, &extractor, self.store.as_mut()).await
    }
}
