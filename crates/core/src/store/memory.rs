//! Process-local store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::CacheStore;
use crate::error::StoreError;
use crate::model::{CachedBatch, SearchResult};

/// Store that keeps the batch in memory.
///
/// The async mutex is fair, so concurrent writes apply in the order they queued.
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    batch: Mutex<Option<CachedBatch>>,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn delete(&self) -> Result<(), StoreError> {
        self.batch.lock().await.take();
        Ok(())
    }

    async fn insert(&self, results: Vec<SearchResult>, timestamp: DateTime<Utc>) -> Result<(), StoreError> {
        *self.batch.lock().await = Some(CachedBatch { results, timestamp });
        Ok(())
    }

    async fn retrieve(&self) -> Result<Option<CachedBatch>, StoreError> {
        Ok(self.batch.lock().await.clone())
    }
}
