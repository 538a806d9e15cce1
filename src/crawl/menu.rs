//! Navigation-menu crawl
//!
//! Walks the site's top-level navigation into one [`MenuGroup`] per entry.
//! Only the distinguished "Listen" entry resolves its subcategories through
//! the crawl-and-merge machinery; every other group carries whatever the
//! store currently holds.

use crate::config::Config;
use crate::crawl::merge;
use crate::discover::{self, MenuEntry};
use crate::extract::HttpCategoryExtractor;
use crate::fetch::{HttpPageSource, PageSource};
use crate::model::MenuGroup;
use crate::storage::{CategoryStore, SqliteStore};
use crate::{Result, ScrapeError};
use scraper::Html;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Label of the menu entry whose sublinks are crawled into categories
const LISTEN_LABEL: &str = "Listen";

/// Crawler for the top-level navigation menu
pub struct MenuCrawler<P: PageSource + Clone, S: CategoryStore> {
    source: P,
    store: Option<S>,
    base_url: Url,
    delay: Duration,
}

impl MenuCrawler<HttpPageSource, SqliteStore> {
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
            Duration::from_millis(config.crawler.delay_between_downloads_ms),
        ))
    }
}

impl<P: PageSource + Clone, S: CategoryStore> MenuCrawler<P, S> {
    pub fn new(source: P, store: Option<S>, base_url: Url, delay: Duration) -> Self {
        Self {
            source,
            store,
            base_url,
            delay,
        }
    }

    /// Produces one group per top-level menu entry
    ///
    /// The navigation page is fetched once. A malformed menu item aborts the
    /// crawl with [`ScrapeError::MalformedMenuItem`].
    pub async fn all_categories(&mut self) -> Result<Vec<MenuGroup>> {
        let entries = self.fetch_menu_entries().await?;
        tracing::info!("Menu has {} top-level entries", entries.len());

        let mut groups = Vec::with_capacity(entries.len());
        for entry in &entries {
            groups.push(self.resolve_entry(entry).await?);
        }
        Ok(groups)
    }

    /// Returns only the "Listen" group
    ///
    /// Fails with [`ScrapeError::NotFound`] when the menu has no such entry.
    pub async fn listen_group(&mut self) -> Result<MenuGroup> {
        let entries = self.fetch_menu_entries().await?;
        let entry = entries
            .iter()
            .find(|e| e.label.eq_ignore_ascii_case(LISTEN_LABEL))
            .ok_or_else(|| ScrapeError::NotFound(LISTEN_LABEL.to_string()))?;
        self.resolve_entry(entry).await
    }

    async fn fetch_menu_entries(&self) -> Result<Vec<MenuEntry>> {
        let body = self.source.fetch_page(self.base_url.as_str()).await?;
        let doc = Html::parse_document(&body);
        discover::menu_entries(&doc)
    }

    /// Builds the group for one menu entry
    ///
    /// "Listen" gets the merge treatment over its sublinks; all other labels
    /// are handed the currently stored categories without any fetching.
    async fn resolve_entry(&mut self, entry: &MenuEntry) -> Result<MenuGroup> {
        let categories = if entry.label.eq_ignore_ascii_case(LISTEN_LABEL) {
            let extractor = HttpCategoryExtractor::new(
                self.source.clone(),
                self.base_url.clone(),
                entry.links.names_by_length_desc(),
                self.delay,
            );
            merge::merge_listen(&entry.links, &extractor, self.store.as_mut()).await?
        } else {
            match &self.store {
                Some(store) => store.load()?,
                None => Vec::new(),
            }
        };

        Ok(MenuGroup {
            name: entry.label.clone(),
            categories,
        })
    }
}
