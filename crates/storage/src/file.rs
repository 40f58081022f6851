//! Flat-file backend: one JSON array per collection, rewritten in full.

use std::io::{ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::StorageError;
use crate::record::{Record, Snapshot};
use crate::traits::CollectionStore;

/// A collection persisted as indented JSON text in a single file.
///
/// - A missing or blank file is an empty collection.
/// - Writes go to a temporary sibling file which is then renamed over the
///   target, so readers see either the old or the new collection in full.
pub struct JsonFileStore<T> {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
            _record: PhantomData,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> JsonFileStore<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    async fn read_records(&self) -> Result<Vec<T>, StorageError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "collection file missing, starting empty");
                return Ok(Vec::new());
            }
            Err(source) => {
                tracing::warn!(path = %self.path.display(), error = %source, "collection read failed");
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<T> = serde_json::from_str(&text).map_err(|source| {
            tracing::warn!(path = %self.path.display(), error = %source, "collection parse failed");
            StorageError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "collection loaded");
        Ok(records)
    }

    /// Caller must hold `self.lock`.
    async fn write_records(&self, records: &[T]) -> Result<(), StorageError> {
        let text = serde_json::to_string_pretty(records).map_err(StorageError::Serialize)?;
        let path = self.path.clone();
        let count = records.len();

        let written = tokio::task::spawn_blocking(move || replace_file(&path, text.as_bytes()))
            .await
            .map_err(|e| StorageError::Backend(format!("write task failed: {e}")))?;

        match written {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), count, "collection saved");
                Ok(())
            }
            Err(source) => {
                tracing::warn!(path = %self.path.display(), error = %source, "collection write failed");
                Err(StorageError::Write {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

/// Write `bytes` to a temp file next to `path`, then rename it into place.
fn replace_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl<T> CollectionStore<T> for JsonFileStore<T>
where
    T: Record + Serialize + DeserializeOwned,
{
    async fn load_all(&self) -> Result<Vec<T>, StorageError> {
        self.read_records().await
    }

    async fn save_all(&self, records: &[T]) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        self.write_records(records).await
    }

    async fn begin_snapshot(&self) -> Result<Snapshot<T>, StorageError> {
        let guard = self.lock.clone().lock_owned().await;
        let records = self.read_records().await?;
        Ok(Snapshot::new(records, guard))
    }

    async fn commit_snapshot(&self, snapshot: Snapshot<T>) -> Result<(), StorageError> {
        if !snapshot.is_guarded_by(&self.lock) {
            return Err(StorageError::ForeignSnapshot);
        }
        let (records, _guard) = snapshot.into_parts();
        self.write_records(&records).await
    }
}
