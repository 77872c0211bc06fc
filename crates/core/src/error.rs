//! Unified error types for kjv-search.
//!
//! Store errors are opaque to the cache orchestrator: it forwards them
//! without interpreting their cause. Loader errors distinguish transport
//! failures from bad payloads so callers can decide whether to retry.

use tokio_rusqlite::rusqlite;

/// Errors raised by a [`CacheStore`](crate::store::CacheStore) implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Filesystem operation failed.
    #[error("STORE_ERROR: {0}")]
    Io(#[from] std::io::Error),

    /// The stored batch exists but cannot be decoded.
    #[error("STORE_CORRUPT: {0}")]
    Corrupt(String),

    /// The batch could not be encoded for storage.
    #[error("STORE_ERROR: encode failed: {0}")]
    Encode(String),
}

impl From<tokio_rusqlite::Error<StoreError>> for StoreError {
    fn from(err: tokio_rusqlite::Error<StoreError>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => StoreError::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => StoreError::Database(tokio_rusqlite::Error::Close(c)),
            _ => StoreError::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for StoreError {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        StoreError::Database(err)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Database(tokio_rusqlite::Error::Error(err))
    }
}

/// Errors delivered by [`LocalSearchCache`](crate::LocalSearchCache).
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors delivered by a [`SearchLoader`](crate::SearchLoader).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The request could not be completed (network unreachable, timeout).
    #[error("CONNECTIVITY: {0}")]
    Connectivity(String),

    /// The response arrived but had a non-success status or an unexpected shape.
    #[error("INVALID_DATA: {0}")]
    InvalidData(String),

    /// The query was rejected before any request was made.
    #[error("INVALID_QUERY: {0}")]
    InvalidQuery(String),

    /// Reading the local cache failed.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl LoadError {
    /// Whether retrying the same load could reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LoadError::Connectivity(_) | LoadError::Cache(_))
    }
}
