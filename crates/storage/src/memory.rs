//! In-memory backend with the same whole-collection semantics as the file
//! backend. Nothing survives the process.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::record::{Record, Snapshot};
use crate::traits::CollectionStore;

/// A collection held in process memory.
///
/// `lock` serializes writers exactly like [`JsonFileStore`](crate::JsonFileStore);
/// `records` is only ever touched for the instant of a copy in or out.
pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
    lock: Arc<Mutex<()>>,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a store pre-seeded with `records`.
    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Mutex::new(records),
            lock: Arc::new(Mutex::new(())),
        }
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> CollectionStore<T> for MemoryStore<T> {
    async fn load_all(&self) -> Result<Vec<T>, StorageError> {
        Ok(self.records.lock().await.clone())
    }

    async fn save_all(&self, records: &[T]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        *self.records.lock().await = records.to_vec();
        Ok(())
    }

    async fn begin_snapshot(&self) -> Result<Snapshot<T>, StorageError> {
        let guard = self.lock.clone().lock_owned().await;
        let records = self.records.lock().await.clone();
        Ok(Snapshot::new(records, guard))
    }

    async fn commit_snapshot(&self, snapshot: Snapshot<T>) -> Result<(), StorageError> {
        if !snapshot.is_guarded_by(&self.lock) {
            return Err(StorageError::ForeignSnapshot);
        }
        let (records, _guard) = snapshot.into_parts();
        *self.records.lock().await = records;
        Ok(())
    }
}
