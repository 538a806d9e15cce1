//! Category extraction
//!
//! Fetches one genre page and turns it into a populated [`Category`]. The
//! HTTP implementation paces itself with a fixed delay before every
//! download; that delay is the only wait time in a crawl.

use crate::fetch::PageSource;
use crate::model::{Category, Station};
use crate::ScrapeError;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

/// Produces a fully populated category from its name and link
#[async_trait]
pub trait CategoryExtractor: Send + Sync {
    /// Fetches and parses the category behind `href`
    async fn extract(&self, name: &str, href: &str) -> Result<Category, ScrapeError>;
}

/// HTTP-backed category extractor
///
/// Constructed once per crawl with the full list of discovered genre names
/// sorted by descending length. The ordering matters: station rows carry
/// free-text genre tags, and a longer genre name ("Smooth Jazz") must claim
/// its text before a shorter genre ("Jazz") that is one of its substrings.
pub struct HttpCategoryExtractor<P: PageSource> {
    source: P,
    base_url: Url,
    genres: Vec<String>,
    delay: Duration,
}

impl<P: PageSource> HttpCategoryExtractor<P> {
    /// Creates an extractor
    ///
    /// `genres` must already be sorted longest first;
    /// [`crate::discover::CategoryLinks::names_by_length_desc`] produces the
    /// expected order.
    pub fn new(source: P, base_url: Url, genres: Vec<String>, delay: Duration) -> Self {
        Self {
            source,
            base_url,
            genres,
            delay,
        }
    }
}

#[async_trait]
impl<P: PageSource> CategoryExtractor for HttpCategoryExtractor<P> {
    async fn extract(&self, name: &str, href: &str) -> Result<Category, ScrapeError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let url = self.base_url.join(href)?;
        let body = self.source.fetch_page(url.as_str()).await?;
        let stations = parse_stations(&body, &self.genres);

        if stations.is_empty() {
            tracing::warn!("No stations found on category page for '{}'", name);
        } else {
            tracing::debug!("Extracted {} stations for '{}'", stations.len(), name);
        }

        Ok(Category {
            name: name.to_string(),
            stations,
        })
    }
}

/// Parses the station rows of a category page
///
/// Each `ul.stations li` row yields one station: the first anchor child is
/// the station name and page link, an anchor flagged `playlist` (or linking
/// straight to a playlist file) is the playlist link, and the row's
/// `span.genres` text is resolved into genre tags. Rows without a name
/// anchor are skipped.
pub fn parse_stations(html: &str, genres: &[String]) -> Vec<Station> {
    let doc = Html::parse_document(html);
    let mut stations = Vec::new();

    for row in doc.select(&selector("ul.stations li")) {
        let anchor = match first_anchor(row) {
            Some(a) => a,
            None => continue,
        };
        let name = clean_text(anchor);
        if name.is_empty() {
            continue;
        }

        let page_url = anchor.value().attr("href").map(str::to_string);
        let playlist_url = playlist_link(row);
        let tag_text = row
            .select(&selector("span.genres"))
            .next()
            .map(|e| e.text().collect::<String>())
            .unwrap_or_default();

        stations.push(Station {
            name,
            page_url,
            playlist_url,
            local_playlist: None,
            genres: match_genres(&tag_text, genres),
        });
    }

    stations
}

/// Finds a row's playlist link: an `a.playlist` anchor, or failing that any
/// anchor whose href ends in a playlist extension
fn playlist_link(row: ElementRef) -> Option<String> {
    if let Some(a) = row.select(&selector("a.playlist")).next() {
        if let Some(href) = a.value().attr("href") {
            return Some(href.to_string());
        }
    }

    row.select(&selector("a[href]"))
        .filter_map(|a| a.value().attr("href"))
        .find(|href| {
            let lower = href.to_lowercase();
            lower.ends_with(".pls") || lower.ends_with(".m3u") || lower.ends_with(".m3u8")
        })
        .map(str::to_string)
}

/// Resolves free-text genre tags against the known genre names
///
/// `genres` is scanned in the given order and each match blanks out its text
/// so a shorter name cannot re-match inside a longer one already claimed.
/// With the names sorted longest first, "Smooth Jazz Jazz" resolves to both
/// genres and "Smooth Jazz" alone never produces a spurious "Jazz".
pub fn match_genres(text: &str, genres: &[String]) -> Vec<String> {
    let mut remaining = text.to_lowercase();
    let mut found = Vec::new();

    for genre in genres {
        let needle = genre.to_lowercase();
        if needle.is_empty() {
            continue;
        }
        if let Some(pos) = remaining.find(&needle) {
            found.push(genre.clone());
            remaining.replace_range(pos..pos + needle.len(), &" ".repeat(needle.len()));
        }
    }

    found
}

fn first_anchor(el: ElementRef) -> Option<ElementRef> {
    el.children()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "a")
}

fn clean_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .replace(['\t', '\n', '\r'], "")
        .trim()
        .to_string()
}

// Selector strings in this module are literals; parsing them cannot fail.
fn selector(s: &'static str) -> Selector {
    Selector::parse(s).unwrap()
}
