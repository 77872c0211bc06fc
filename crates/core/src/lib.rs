//! Core types and shared functionality for kjv-search.
//!
//! This crate provides:
//! - Search result data model and the `SearchLoader` contract
//! - `LocalSearchCache`, the save/load/validate orchestrator
//! - Cache store backends (SQLite, JSON file, in-memory)
//! - Unified error types
//! - Configuration structures

pub mod config;
pub mod error;
pub mod loader;
pub mod local;
pub mod model;
pub mod policy;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{AppConfig, ConfigError, StoreBackend};
pub use error::{CacheError, LoadError, StoreError};
pub use loader::SearchLoader;
pub use local::{Clock, LocalSearchCache};
pub use model::{CachedBatch, DEFAULT_LIMIT, MAX_LIMIT, SearchQuery, SearchResult};
pub use policy::MAX_CACHE_AGE_DAYS;
pub use store::{CacheStore, InMemoryCacheStore, JsonFileCacheStore, SqliteCacheStore};
