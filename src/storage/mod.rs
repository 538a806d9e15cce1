//! Persistence for crawled categories
//!
//! The [`CategoryStore`] trait is the boundary the crawl logic writes
//! through; [`SqliteStore`] is the production backend. A crawl without a
//! configured store simply runs without one (`Option<S>` at the call sites)
//! and keeps its results in memory only.

pub mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{CategoryStore, StorageError, StorageResult};
