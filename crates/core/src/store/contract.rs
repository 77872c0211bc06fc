//! Behaviour every [`CacheStore`] backend must share.
//!
//! Backends call these from their own test modules so the same expectations
//! run against SQLite, the JSON file, and the in-memory store.

use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};

use super::CacheStore;
use crate::model::{CachedBatch, SearchResult};
use crate::test_support::unique_results;

/// Run the full single-slot contract against an empty store.
pub(crate) async fn assert_behaves_as_cache_store<S: CacheStore + ?Sized>(store: &S) {
    assert_retrieve_delivers_empty_on_empty_cache(store).await;
    assert_delete_has_no_side_effects_on_empty_cache(store).await;
    assert_retrieve_delivers_found_values_on_non_empty_cache(store).await;
    assert_insert_overrides_previously_inserted_values(store).await;
    assert_delete_empties_previously_inserted_cache(store).await;
}

async fn assert_retrieve_delivers_empty_on_empty_cache<S: CacheStore + ?Sized>(store: &S) {
    assert_eq!(store.retrieve().await.unwrap(), None);
    assert_eq!(store.retrieve().await.unwrap(), None, "retrieve must not have side effects");
}

async fn assert_delete_has_no_side_effects_on_empty_cache<S: CacheStore + ?Sized>(store: &S) {
    store.delete().await.expect("deleting an empty cache should succeed");
    assert_eq!(store.retrieve().await.unwrap(), None);
}

async fn assert_retrieve_delivers_found_values_on_non_empty_cache<S: CacheStore + ?Sized>(store: &S) {
    let mut results = unique_results();
    results.push(SearchResult::new("sample_zero", -0.0, "john/11/35", "Jesus wept."));
    let timestamp = Utc::now();

    store.insert(results.clone(), timestamp).await.expect("insert into empty cache should succeed");

    let expected = Some(CachedBatch { results, timestamp });
    assert_eq!(store.retrieve().await.unwrap(), expected);
    assert_eq!(store.retrieve().await.unwrap(), expected, "retrieve must not have side effects");
}

async fn assert_insert_overrides_previously_inserted_values<S: CacheStore + ?Sized>(store: &S) {
    store.insert(unique_results(), Utc::now() - Duration::hours(1)).await.unwrap();

    let latest = unique_results();
    let latest_timestamp = Utc::now();
    store
        .insert(latest.clone(), latest_timestamp)
        .await
        .expect("insert into non-empty cache should succeed");

    assert_eq!(
        store.retrieve().await.unwrap(),
        Some(CachedBatch { results: latest, timestamp: latest_timestamp })
    );
}

async fn assert_delete_empties_previously_inserted_cache<S: CacheStore + ?Sized>(store: &S) {
    store.insert(unique_results(), Utc::now()).await.unwrap();

    store.delete().await.expect("deleting a non-empty cache should succeed");

    assert_eq!(store.retrieve().await.unwrap(), None);
}

/// Insert, delete and insert issued back to back must complete in that order.
pub(crate) async fn assert_side_effects_run_serially<S: CacheStore + ?Sized + 'static>(store: Arc<S>) {
    let completed = Arc::new(Mutex::new(Vec::new()));
    let last = unique_results();

    let first_insert = {
        let (store, completed) = (store.clone(), completed.clone());
        tokio::spawn(async move {
            let _ = store.insert(unique_results(), Utc::now()).await;
            completed.lock().unwrap().push(1);
        })
    };
    let deletion = {
        let (store, completed) = (store.clone(), completed.clone());
        tokio::spawn(async move {
            let _ = store.delete().await;
            completed.lock().unwrap().push(2);
        })
    };
    let last_insert = {
        let (store, completed, last) = (store.clone(), completed.clone(), last.clone());
        tokio::spawn(async move {
            let _ = store.insert(last, Utc::now()).await;
            completed.lock().unwrap().push(3);
        })
    };

    for op in [first_insert, deletion, last_insert] {
        op.await.unwrap();
    }

    assert_eq!(*completed.lock().unwrap(), vec![1, 2, 3]);
    assert_eq!(store.retrieve().await.unwrap().map(|batch| batch.results), Some(last));
}
