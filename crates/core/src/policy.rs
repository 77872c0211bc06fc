//! Cache freshness policy.

use chrono::{DateTime, Duration, Utc};

/// Number of days a saved batch stays valid.
pub const MAX_CACHE_AGE_DAYS: i64 = 30;

/// Decides whether a batch saved at some instant is still fresh.
pub(crate) struct CachePolicy;

impl CachePolicy {
    fn max_age() -> Duration {
        Duration::days(MAX_CACHE_AGE_DAYS)
    }

    /// Fresh iff `now < timestamp + max_age`. The boundary itself is stale.
    pub(crate) fn validate(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match timestamp.checked_add_signed(Self::max_age()) {
            Some(expires_at) => now < expires_at,
            None => false,
        }
    }
}
