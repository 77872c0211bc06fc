//! Integrity digest over a stored batch.

use sha2::{Digest, Sha256};

use crate::model::SearchResult;

/// SHA-256 over every field of every result, in order.
///
/// SQLite stores a REAL `-0.0` as `0.0`, so zero distances hash as `0.0`.
pub(super) fn results_digest(results: &[SearchResult]) -> String {
    let mut hasher = Sha256::new();
    for result in results {
        hasher.update(result.sample_id.as_bytes());
        hasher.update(b"\n");
        let distance = if result.distance == 0.0 { 0.0_f64 } else { result.distance };
        hasher.update(distance.to_le_bytes());
        hasher.update(b"\n");
        hasher.update(result.external_id.as_bytes());
        hasher.update(b"\n");
        hasher.update(result.data.as_bytes());
        hasher.update(b"\x1e");
    }
    hex::encode(hasher.finalize())
}
