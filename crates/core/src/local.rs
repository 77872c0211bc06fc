//! Local search cache: save, load and validate over a [`CacheStore`].
//!
//! The cache keeps no results of its own. Each call is a round trip to the
//! store, sequenced as follows:
//!
//! - `save`: delete, then insert stamped with the injected clock. Insert only
//!   runs if the delete succeeded.
//! - `load`: retrieve. A stale batch yields no results but is left in place.
//! - `validate_cache`: retrieve, then delete if the batch is stale or unreadable.
//!   Errors are logged and swallowed.
//!
//! The `*_with` / `spawn_*` variants run detached on the Tokio runtime. They
//! hold only a weak liveness token for the cache, so once the cache is dropped
//! any result that arrives afterwards is discarded instead of reaching the
//! completion.

use std::sync::{Arc, Weak};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use crate::error::{CacheError, LoadError, StoreError};
use crate::loader::SearchLoader;
use crate::model::{CachedBatch, SearchQuery, SearchResult};
use crate::policy::CachePolicy;
use crate::store::CacheStore;

/// Source of the current instant.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Orchestrates the single cached search batch held by a store.
pub struct LocalSearchCache<S: ?Sized = dyn CacheStore> {
    store: Arc<S>,
    clock: Clock,
    alive: Arc<()>,
}

impl<S: CacheStore + ?Sized> LocalSearchCache<S> {
    pub fn new(store: Arc<S>, clock: Clock) -> Self {
        Self { store, clock, alive: Arc::new(()) }
    }

    /// Cache reading the wall clock.
    pub fn with_system_clock(store: Arc<S>) -> Self {
        Self::new(store, Arc::new(Utc::now))
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Replace the stored batch with `items`.
    pub async fn save(&self, items: &[SearchResult]) -> Result<(), CacheError> {
        self.store.delete().await?;
        self.store.insert(items.to_vec(), (self.clock)()).await?;
        tracing::debug!("cached {} search results", items.len());
        Ok(())
    }

    /// The stored results, or none if the store is empty or the batch is stale.
    pub async fn load(&self) -> Result<Vec<SearchResult>, CacheError> {
        let batch = self.store.retrieve().await?;
        Ok(fresh_results(batch, (self.clock)()))
    }

    /// Delete the stored batch if it is stale or cannot be read.
    pub async fn validate_cache(&self) {
        let retrieval = self.store.retrieve().await;
        if needs_deletion(&retrieval, (self.clock)()) {
            delete_invalid(&*self.store).await;
        }
    }

    fn operation(&self) -> Operation<S> {
        Operation { store: self.store.clone(), clock: self.clock.clone(), owner: Arc::downgrade(&self.alive) }
    }
}

impl<S: CacheStore + ?Sized + 'static> LocalSearchCache<S> {
    /// Detached [`save`](Self::save). `completion` is skipped if the cache is dropped first.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn save_with<F>(&self, items: Vec<SearchResult>, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<(), CacheError>) + Send + 'static,
    {
        let operation = self.operation();
        tokio::spawn(async move {
            if let Some(result) = operation.save(items).await {
                completion(result);
            }
        })
    }

    /// Detached [`load`](Self::load). `completion` is skipped if the cache is dropped first.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn load_with<F>(&self, completion: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Vec<SearchResult>, CacheError>) + Send + 'static,
    {
        let operation = self.operation();
        tokio::spawn(async move {
            if let Some(result) = operation.load().await {
                completion(result);
            }
        })
    }

    /// Detached [`validate_cache`](Self::validate_cache).
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn_validate_cache(&self) -> JoinHandle<()> {
        let operation = self.operation();
        tokio::spawn(async move { operation.validate().await })
    }
}

#[async_trait]
impl<S: CacheStore + ?Sized> SearchLoader for LocalSearchCache<S> {
    /// Single-slot cache: the query does not select a batch.
    async fn load(&self, _query: &SearchQuery) -> Result<Vec<SearchResult>, LoadError> {
        LocalSearchCache::load(self).await.map_err(LoadError::from)
    }
}

/// One in-flight call. Owns what it needs from the cache except the cache itself.
struct Operation<S: ?Sized> {
    store: Arc<S>,
    clock: Clock,
    owner: Weak<()>,
}

impl<S: CacheStore + ?Sized> Operation<S> {
    fn owner_alive(&self) -> bool {
        self.owner.strong_count() > 0
    }

    /// `None` means the cache was dropped mid-flight and nobody should hear back.
    async fn save(&self, items: Vec<SearchResult>) -> Option<Result<(), CacheError>> {
        let deletion = self.store.delete().await;
        if !self.owner_alive() {
            return None;
        }
        if let Err(e) = deletion {
            tracing::debug!("cache deletion failed, skipping insert: {}", e);
            return Some(Err(e.into()));
        }

        let count = items.len();
        let insertion = self.store.insert(items, (self.clock)()).await;
        if !self.owner_alive() {
            return None;
        }

        tracing::debug!("cached {} search results: ok={}", count, insertion.is_ok());
        Some(insertion.map_err(CacheError::from))
    }

    async fn load(&self) -> Option<Result<Vec<SearchResult>, CacheError>> {
        let retrieval = self.store.retrieve().await;
        if !self.owner_alive() {
            return None;
        }

        Some(retrieval.map(|batch| fresh_results(batch, (self.clock)())).map_err(CacheError::from))
    }

    async fn validate(&self) {
        let retrieval = self.store.retrieve().await;
        if !self.owner_alive() {
            return;
        }

        if needs_deletion(&retrieval, (self.clock)()) {
            delete_invalid(&*self.store).await;
        }
    }
}

fn fresh_results(batch: Option<CachedBatch>, now: DateTime<Utc>) -> Vec<SearchResult> {
    match batch {
        Some(batch) if CachePolicy::validate(batch.timestamp, now) => batch.results,
        Some(batch) => {
            tracing::debug!("cached batch from {} is stale", batch.timestamp);
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Stale and unreadable batches are deleted; an empty store is left alone.
fn needs_deletion(retrieval: &Result<Option<CachedBatch>, StoreError>, now: DateTime<Utc>) -> bool {
    match retrieval {
        Err(e) => {
            tracing::debug!("cache retrieval failed during validation: {}", e);
            true
        }
        Ok(Some(batch)) => !CachePolicy::validate(batch.timestamp, now),
        Ok(None) => false,
    }
}

async fn delete_invalid<S: CacheStore + ?Sized>(store: &S) {
    if let Err(e) = store.delete().await {
        tracing::warn!("failed to delete invalid cache: {}", e);
    }
}
