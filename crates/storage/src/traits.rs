use async_trait::async_trait;

use crate::error::StorageError;
use crate::record::{Record, Snapshot};

/// The storage trait for whole-collection backends.
///
/// A `CollectionStore` owns the persisted representation of exactly one
/// collection. It has no per-record addressing: reads return every record and
/// writes replace every record.
///
/// ## Snapshot Semantics
///
/// Mutations go through a [`Snapshot`]:
///
/// 1. `begin_snapshot()`: take the collection's write lock and load it
/// 2. Change the records through the snapshot
/// 3. `commit_snapshot(snapshot)`: write the records back, then release
///    OR `abort_snapshot(snapshot)`: release without writing
///
/// Only one snapshot per store can be alive at a time, so two overlapping
/// read-modify-write cycles cannot silently discard each other's changes.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` to be used in axum
/// application state and across async task boundaries.
#[async_trait]
pub trait CollectionStore<T: Record>: Send + Sync + 'static {
    // ── Whole-collection access ──────────────────────────────────────────────

    /// Load every record, in stored order.
    async fn load_all(&self) -> Result<Vec<T>, StorageError>;

    /// Replace the stored collection with `records`.
    ///
    /// Waits for any in-progress snapshot to finish first.
    async fn save_all(&self, records: &[T]) -> Result<(), StorageError>;

    // ── Snapshot lifecycle ────────────────────────────────────────────────────

    /// Take the write lock and load the collection into a new snapshot.
    async fn begin_snapshot(&self) -> Result<Snapshot<T>, StorageError>;

    /// Persist the snapshot's records, then release the write lock.
    ///
    /// A snapshot begun on another store fails with
    /// [`StorageError::ForeignSnapshot`] and writes nothing.
    async fn commit_snapshot(&self, snapshot: Snapshot<T>) -> Result<(), StorageError>;

    /// Release the write lock without persisting anything.
    async fn abort_snapshot(&self, snapshot: Snapshot<T>) {
        drop(snapshot);
    }

    // ── Convenience compositions ──────────────────────────────────────────────

    /// Remove every record with the given id and persist the result.
    ///
    /// Returns the number of removed records. Nothing is written when no
    /// record matched.
    async fn delete_by_id(&self, id: i64) -> Result<usize, StorageError> {
        let mut snapshot = self.begin_snapshot().await?;
        let removed = snapshot.remove_all(id);
        if removed == 0 {
            self.abort_snapshot(snapshot).await;
            return Ok(0);
        }
        self.commit_snapshot(snapshot).await?;
        Ok(removed)
    }
}
