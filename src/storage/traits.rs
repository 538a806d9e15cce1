//! Storage trait and error types

use crate::model::Category;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persisted, ordered set of crawled categories
///
/// `save` is a full overwrite: the store always holds exactly the collection
/// it was last given, in that order. The crawl calls it after every newly
/// fetched category, which bounds crash loss to the category in flight.
pub trait CategoryStore {
    /// Loads the persisted categories in saved order
    fn load(&self) -> StorageResult<Vec<Category>>;

    /// Replaces the persisted set with `categories`
    fn save(&mut self, categories: &[Category]) -> StorageResult<()>;

    /// Storage enrichment: attaches previously downloaded playlist files to
    /// the category's stations and returns it
    fn attach_playlists(&self, category: Category) -> StorageResult<Category>;

    /// Removes all persisted categories
    fn clear(&mut self) -> StorageResult<()>;
}
