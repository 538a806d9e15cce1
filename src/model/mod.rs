//! Data model for the scraped directory
//!
//! Categories are the unit of crawl work: one genre with its populated
//! station list. Category identity, everywhere a merge or membership check
//! happens, is the name compared case-insensitively; the display name is
//! kept as-is for output.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One radio station (or playlist entry) inside a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Display name of the station
    pub name: String,

    /// Link to the station's own page, relative to the site root
    pub page_url: Option<String>,

    /// Link to the station's playlist file, if the row carried one
    pub playlist_url: Option<String>,

    /// Path to a previously downloaded playlist file, attached by storage
    /// enrichment when the artifact exists on disk
    pub local_playlist: Option<PathBuf>,

    /// Genre tags resolved from the row's tag text
    pub genres: Vec<String>,
}

/// One genre category with its stations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Canonical display name of the genre
    pub name: String,

    /// Stations in page order
    pub stations: Vec<Station>,
}

impl Category {
    /// Creates an empty category with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stations: Vec::new(),
        }
    }

    /// Whether this category's name matches `name` case-insensitively
    pub fn matches_name(&self, name: &str) -> bool {
        names_equal(&self.name, name)
    }
}

/// A top-level navigation group
///
/// Every menu entry becomes one group. Only the "Listen" group resolves its
/// sublinks into freshly crawled categories; other groups carry whatever the
/// store currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuGroup {
    /// Label of the menu entry
    pub name: String,

    /// Categories attached to this group
    pub categories: Vec<Category>,
}

/// Case-insensitive name comparison used for category identity
pub fn names_equal(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Finds a category by case-insensitive name
pub fn find_by_name<'a>(categories: &'a [Category], name: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.matches_name(name))
}

/// Whether any category in the slice has this case-insensitive name
pub fn contains_name(categories: &[Category], name: &str) -> bool {
    find_by_name(categories, name).is_some()
}
