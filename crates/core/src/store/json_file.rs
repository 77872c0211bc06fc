//! Store that keeps the batch as a single JSON document on disk.
//!
//! A missing file reads as an empty cache. Writes go to a sibling temp file
//! that is then renamed over the target, so a reader never sees a partial
//! document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::CacheStore;
use crate::error::StoreError;
use crate::model::{CachedBatch, SearchResult};

/// JSON file store.
#[derive(Debug)]
pub struct JsonFileCacheStore {
    path: PathBuf,
    /// Held for the whole of each write; the fair mutex keeps writes in call order.
    write_lock: Mutex<()>,
}

impl JsonFileCacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl CacheStore for JsonFileCacheStore {
    async fn delete(&self) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn insert(&self, results: Vec<SearchResult>, timestamp: DateTime<Utc>) -> Result<(), StoreError> {
        let encoded = serde_json::to_vec(&CachedBatch { results, timestamp })
            .map_err(|e| StoreError::Encode(e.to_string()))?;

        let _guard = self.write_lock.lock().await;
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, &encoded).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn retrieve(&self) -> Result<Option<CachedBatch>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| StoreError::Corrupt(e.to_string()))
    }
}
