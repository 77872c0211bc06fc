//! Persistence boundary for the cached search batch.
//!
//! A store holds at most one [`CachedBatch`]. Three backends are provided:
//!
//! - [`SqliteCacheStore`]: SQLite via tokio-rusqlite, WAL mode, versioned migrations
//! - [`JsonFileCacheStore`]: one JSON document on disk, written atomically
//! - [`InMemoryCacheStore`]: process-local, for tests and throwaway sessions
//!
//! Every backend runs its writes (`delete`, `insert`) in submission order.

pub mod json_file;
pub mod memory;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod contract;
#[cfg(test)]
pub(crate) mod spy;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::model::{CachedBatch, SearchResult};

pub use json_file::JsonFileCacheStore;
pub use memory::InMemoryCacheStore;
pub use sqlite::SqliteCacheStore;

/// Single-slot storage for a search batch.
///
/// Implementations may complete on any thread. Writes issued concurrently
/// against the same store must take effect in the order they were issued.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Remove the stored batch. Succeeds when nothing is stored.
    async fn delete(&self) -> Result<(), StoreError>;

    /// Replace the stored batch with `results` stamped at `timestamp`.
    async fn insert(&self, results: Vec<SearchResult>, timestamp: DateTime<Utc>) -> Result<(), StoreError>;

    /// Read the stored batch.
    ///
    /// Returns `Ok(None)` when empty and [`StoreError::Corrupt`] when the
    /// stored representation cannot be decoded. Never modifies the store.
    async fn retrieve(&self) -> Result<Option<CachedBatch>, StoreError>;
}
