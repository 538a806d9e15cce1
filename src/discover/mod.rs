//! Listing-page discovery
//!
//! Turns one fetched listing page into an ordered name → link mapping,
//! whether the page is the flat category index or a navigation menu. Only a
//! completely missing container element is an error; individual elements
//! without a usable anchor are silently skipped.

use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};

/// Ordered name → href mapping discovered on one listing page
///
/// Insertion order is preserved. Inserting a name that is already present
/// replaces its href in place (last seen wins) rather than failing; the
/// directory repeats some labels and the crawl tolerates that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryLinks {
    entries: Vec<(String, String)>,
}

impl CategoryLinks {
    /// Inserts a (name, href) pair, overwriting the href of an existing name
    pub fn insert(&mut self, name: String, href: String) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = href;
        } else {
            self.entries.push((name, href));
        }
    }

    /// Iterates entries in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, h)| (n.as_str(), h.as_str()))
    }

    /// Looks up the href for an exact name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, h)| h.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All names sorted by descending length
    ///
    /// This is the ordering the category extractor is constructed with: a
    /// longer genre name must be matched before a shorter name that is one
    /// of its substrings. Equal lengths keep discovery order.
    pub fn names_by_length_desc(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|(n, _)| n.clone()).collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()));
        names
    }
}

/// One top-level navigation entry: its label and nested sublinks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Label text of the entry's anchor
    pub label: String,

    /// Links of the nested sublist; empty when the entry has none
    pub links: CategoryLinks,
}

/// Parses the flat category index page
///
/// Category labels are definition terms flagged with `text-capitalize`; the
/// link is each term's first anchor child. Fails with
/// [`ScrapeError::Discovery`] when the page has no definition list at all.
pub fn station_index(doc: &Html) -> Result<CategoryLinks, ScrapeError> {
    if doc.select(&selector("dl")).next().is_none() {
        return Err(ScrapeError::Discovery { container: "dl" });
    }

    let mut links = CategoryLinks::default();
    for dt in doc.select(&selector("dt.text-capitalize")) {
        if let Some(anchor) = first_anchor(dt) {
            links.insert(clean_text(anchor), href_of(anchor));
        }
    }
    Ok(links)
}

/// Parses the top-level navigation menu into its entries
///
/// Fails with [`ScrapeError::Discovery`] when the primary navigation list is
/// absent, and with [`ScrapeError::MalformedMenuItem`] when a list item has
/// no non-empty anchor label among its direct children.
pub fn menu_entries(doc: &Html) -> Result<Vec<MenuEntry>, ScrapeError> {
    let nav = doc
        .select(&selector("ul.nav.navbar-nav"))
        .next()
        .ok_or(ScrapeError::Discovery {
            container: "ul.nav.navbar-nav",
        })?;

    let mut entries = Vec::new();
    for li in child_elements(nav, "li") {
        entries.push(menu_entry(li)?);
    }
    Ok(entries)
}

/// Extracts one menu entry's label and sublinks from its list item
fn menu_entry(li: ElementRef) -> Result<MenuEntry, ScrapeError> {
    let mut label = None;
    let mut links = CategoryLinks::default();

    for child in li.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "a" if label.is_none() => {
                let text = clean_text(child);
                if !text.is_empty() {
                    label = Some(text);
                }
            }
            "ul" => links = sublist_links(child),
            _ => {}
        }
    }

    let label = label.ok_or(ScrapeError::MalformedMenuItem)?;
    Ok(MenuEntry { label, links })
}

/// Parses the list items of a nested sublist into links
///
/// Entries whose text contains "more genres" (any case) are navigation aids,
/// not categories, and are excluded.
fn sublist_links(ul: ElementRef) -> CategoryLinks {
    let mut links = CategoryLinks::default();
    for li in child_elements(ul, "li") {
        if let Some(anchor) = first_anchor(li) {
            let text = clean_text(anchor);
            if text.to_lowercase().contains("more genres") {
                continue;
            }
            links.insert(text, href_of(anchor));
        }
    }
    links
}

/// Direct element children of `el` with the given tag name
fn child_elements<'a>(
    el: ElementRef<'a>,
    name: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(move |e| e.value().name() == name)
}

/// First anchor among the direct children of `el`
fn first_anchor(el: ElementRef) -> Option<ElementRef> {
    el.children()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "a")
}

/// Visible text of an element with tabs/newlines stripped and ends trimmed
fn clean_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .replace(['\t', '\n', '\r'], "")
        .trim()
        .to_string()
}

fn href_of(anchor: ElementRef) -> String {
    anchor.value().attr("href").unwrap_or("").to_string()
}

// Selector strings in this module are literals; parsing them cannot fail.
fn selector(s: &'static str) -> Selector {
    Selector::parse(s).unwrap()
}
