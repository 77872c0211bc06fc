//! Batch operations: the [`CacheStore`] implementation for SQLite.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use tokio_rusqlite::{params, rusqlite};

use super::SqliteCacheStore;
use super::digest::results_digest;
use crate::error::StoreError;
use crate::model::{CachedBatch, SearchResult};
use crate::store::CacheStore;

const BATCH_ID: i64 = 1;

fn clear(conn: &rusqlite::Connection) -> Result<(), StoreError> {
    conn.execute("DELETE FROM search_batch_results", [])?;
    conn.execute("DELETE FROM search_batch", [])?;
    Ok(())
}

#[async_trait]
impl CacheStore for SqliteCacheStore {
    async fn delete(&self) -> Result<(), StoreError> {
        self.conn
            .call(|conn| -> Result<(), StoreError> {
                let tx = conn.transaction()?;
                clear(&tx)?;
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(StoreError::from)
    }

    /// Replace the batch inside one transaction; a failed insert leaves the previous batch intact.
    async fn insert(&self, results: Vec<SearchResult>, timestamp: DateTime<Utc>) -> Result<(), StoreError> {
        let digest = results_digest(&results);
        let timestamp = timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true);

        self.conn
            .call(move |conn| -> Result<(), StoreError> {
                let tx = conn.transaction()?;
                clear(&tx)?;
                tx.execute(
                    "INSERT INTO search_batch (id, timestamp, results_digest) VALUES (?1, ?2, ?3)",
                    params![BATCH_ID, timestamp, digest],
                )?;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO search_batch_results (position, batch_id, sample_id, distance, external_id, data)
                        VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    )?;
                    for (position, result) in results.iter().enumerate() {
                        stmt.execute(params![
                            position as i64,
                            BATCH_ID,
                            result.sample_id,
                            result.distance,
                            result.external_id,
                            result.data,
                        ])?;
                    }
                }
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(StoreError::from)
    }

    async fn retrieve(&self) -> Result<Option<CachedBatch>, StoreError> {
        self.conn
            .call(|conn| -> Result<Option<CachedBatch>, StoreError> {
                let header = conn.query_row(
                    "SELECT timestamp, results_digest FROM search_batch WHERE id = ?1",
                    params![BATCH_ID],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
                );

                let (timestamp, digest) = match header {
                    Ok(header) => header,
                    Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
                    Err(e) => return Err(e.into()),
                };

                let timestamp = DateTime::parse_from_rfc3339(&timestamp)
                    .map_err(|e| StoreError::Corrupt(format!("invalid timestamp {:?}: {}", timestamp, e)))?
                    .with_timezone(&Utc);

                let mut stmt = conn.prepare(
                    "SELECT sample_id, distance, external_id, data FROM search_batch_results
                    WHERE batch_id = ?1 ORDER BY position",
                )?;
                let results = stmt
                    .query_map(params![BATCH_ID], |row| {
                        Ok(SearchResult {
                            sample_id: row.get(0)?,
                            distance: row.get(1)?,
                            external_id: row.get(2)?,
                            data: row.get(3)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| StoreError::Corrupt(e.to_string()))?;

                if results_digest(&results) != digest {
                    return Err(StoreError::Corrupt("results digest mismatch".to_string()));
                }

                Ok(Some(CachedBatch { results, timestamp }))
            })
            .await
            .map_err(StoreError::from)
    }
}
