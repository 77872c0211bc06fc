//! Store double that records calls and lets the test decide when each one completes.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use super::CacheStore;
use crate::error::StoreError;
use crate::model::{CachedBatch, SearchResult};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ReceivedMessage {
    Delete,
    Insert(Vec<SearchResult>, DateTime<Utc>),
    Retrieve,
}

type Pending<T> = Mutex<Vec<Option<oneshot::Sender<Result<T, StoreError>>>>>;

#[derive(Default)]
pub(crate) struct StoreSpy {
    messages: Mutex<Vec<ReceivedMessage>>,
    deletions: Pending<()>,
    insertions: Pending<()>,
    retrievals: Pending<Option<CachedBatch>>,
}

impl StoreSpy {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn received_messages(&self) -> Vec<ReceivedMessage> {
        self.messages.lock().unwrap().clone()
    }

    /// Yield to spawned tasks until at least `count` calls have reached the store.
    pub(crate) async fn wait_for_messages(&self, count: usize) {
        for _ in 0..10_000 {
            if self.messages.lock().unwrap().len() >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("expected {count} store messages, got {:?}", self.received_messages());
    }

    pub(crate) fn complete_deletion(&self, result: Result<(), StoreError>, index: usize) {
        Self::complete(&self.deletions, result, index);
    }

    pub(crate) fn complete_insertion(&self, result: Result<(), StoreError>, index: usize) {
        Self::complete(&self.insertions, result, index);
    }

    pub(crate) fn complete_retrieval(&self, result: Result<Option<CachedBatch>, StoreError>, index: usize) {
        Self::complete(&self.retrievals, result, index);
    }

    fn complete<T>(pending: &Pending<T>, result: Result<T, StoreError>, index: usize) {
        let sender = pending.lock().unwrap()[index]
            .take()
            .expect("store call already completed");
        // The caller may have gone away; that is exactly what some tests check.
        let _ = sender.send(result);
    }

    async fn record<T>(&self, message: ReceivedMessage, pending: &Pending<T>) -> Result<T, StoreError> {
        let (tx, rx) = oneshot::channel();
        pending.lock().unwrap().push(Some(tx));
        self.messages.lock().unwrap().push(message);
        rx.await
            .unwrap_or_else(|_| Err(StoreError::Io(std::io::Error::other("store call never completed"))))
    }
}

#[async_trait]
impl CacheStore for StoreSpy {
    async fn delete(&self) -> Result<(), StoreError> {
        self.record(ReceivedMessage::Delete, &self.deletions).await
    }

    async fn insert(&self, results: Vec<SearchResult>, timestamp: DateTime<Utc>) -> Result<(), StoreError> {
        self.record(ReceivedMessage::Insert(results, timestamp), &self.insertions)
            .await
    }

    async fn retrieve(&self) -> Result<Option<CachedBatch>, StoreError> {
        self.record(ReceivedMessage::Retrieve, &self.retrievals).await
    }
}
