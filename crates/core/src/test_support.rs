//! Fixtures shared by the unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Duration, Utc};

use crate::error::StoreError;
use crate::local::Clock;
use crate::model::SearchResult;
use crate::policy::MAX_CACHE_AGE_DAYS;

static NEXT_SAMPLE: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn unique_result() -> SearchResult {
    let n = NEXT_SAMPLE.fetch_add(1, Ordering::Relaxed);
    SearchResult::new(
        format!("sample_{n}"),
        0.1 + n as f64 / 1000.0,
        format!("psalms/{}/1", n + 1),
        format!("verse text {n}"),
    )
}

pub(crate) fn unique_results() -> Vec<SearchResult> {
    vec![unique_result(), unique_result()]
}

pub(crate) fn any_store_error() -> StoreError {
    StoreError::Io(std::io::Error::other("any error"))
}

pub(crate) fn fixed_clock(now: DateTime<Utc>) -> Clock {
    Arc::new(move || now)
}

/// Save time of a batch that turns stale exactly at `now`.
pub(crate) fn cache_expiration(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(MAX_CACHE_AGE_DAYS)
}
