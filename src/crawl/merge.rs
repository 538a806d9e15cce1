//! Resumable crawl-and-merge policies
//!
//! Both crawl entry points reconcile a freshly discovered name → link
//! mapping against previously persisted categories and persist after every
//! successfully fetched unit, so an interrupted run loses at most the
//! category in flight and the next invocation picks up where it stopped.
//!
//! [`fetch_missing`] is the flat-crawl policy: a name already present (by
//! case-insensitive comparison) is skipped outright. [`merge_listen`] is the
//! Listen-branch variant: a name already present is reused instead of
//! fetched, but still appended to the list again before saving.

use crate::discover::CategoryLinks;
use crate::extract::CategoryExtractor;
use crate::model::{contains_name, find_by_name, Category};
use crate::storage::CategoryStore;
use crate::Result;

/// Fetches and persists every discovered category not already present
///
/// Loads prior state from the store (empty without one), walks `links` in
/// discovery order, skips names already present case-insensitively, and for
/// each missing name extracts the category, runs it through storage
/// enrichment, appends it, and rewrites the full collection before moving
/// on. A run with nothing missing performs zero extractions and zero writes.
pub async fn fetch_missing<E, S>(
    links: &CategoryLinks,
    extractor: &E,
    mut store: Option<&mut S>,
) -> Result<Vec<Category>>
where
    E: CategoryExtractor,
    S: CategoryStore,
{
    let mut categories = match store.as_deref() {
        Some(store) => store.load()?,
        None => Vec::new(),
    };
    let total = links.len();
    tracing::debug!("Loaded categories: {}/{}", categories.len(), total);

    for (name, href) in links.iter() {
        if contains_name(&categories, name) {
            continue;
        }

        tracing::debug!(
            "Retrieving category {}/{}: {}",
            categories.len() + 1,
            total,
            name
        );
        let mut category = extractor.extract(name, href).await?;
        if let Some(store) = store.as_deref_mut() {
            category = store.attach_playlists(category)?;
        }
        categories.push(category);

        // Full-state write per fetched category, not per run
        if let Some(store) = store.as_deref_mut() {
            store.save(&categories)?;
        }
    }

    Ok(categories)
}

/// Listen-branch merge: reuse loaded entries, fetch the rest
///
/// For each discovered name an already-loaded entry is reused rather than
/// fetched; only missing names hit the extractor. Either way the resolved
/// category is enriched, appended to the loaded list, and the whole list is
/// saved (appended without saving when no store is configured).
///
/// Note the difference from [`fetch_missing`]: an entry found in the loaded
/// list is appended to it a second time here, so the saved list can end up
/// holding duplicates. Callers that need set semantics must dedupe
/// themselves; this module does not correct the behavior silently.
pub async fn merge_listen<E, S>(
    links: &CategoryLinks,
    extractor: &E,
    mut store: Option<&mut S>,
) -> Result<Vec<Category>>
where
    E: CategoryExtractor,
    S: CategoryStore,
{
    let mut categories = match store.as_deref() {
        Some(store) => store.load()?,
        None => Vec::new(),
    };

    for (name, href) in links.iter() {
        let category = match find_by_name(&categories, name) {
            Some(existing) => existing.clone(),
            None => extractor.extract(name, href).await?,
        };

        match store.as_deref_mut() {
            Some(store) => {
                let category = store.attach_playlists(category)?;
                categories.push(category);
                store.save(&categories)?;
            }
            None => categories.push(category),
        }
    }

    Ok(categories)
}
