use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// An entity that can live in a collection.
///
/// The id is caller-supplied and not guaranteed unique at the storage layer;
/// uniqueness is a service-level rule.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> i64;
}

/// An in-progress read-modify-write over one collection.
///
/// A snapshot owns the collection's write lock for as long as it lives. It is
/// consumed by [`commit_snapshot`](crate::CollectionStore::commit_snapshot) or
/// [`abort_snapshot`](crate::CollectionStore::abort_snapshot); dropping it
/// without committing discards the changes.
pub struct Snapshot<T> {
    records: Vec<T>,
    _guard: OwnedMutexGuard<()>,
}

impl<T: Record> Snapshot<T> {
    /// Wrap a freshly loaded collection together with the lock guarding it.
    ///
    /// Backends call this from `begin_snapshot` after acquiring the guard.
    pub fn new(records: Vec<T>, guard: OwnedMutexGuard<()>) -> Self {
        Self {
            records,
            _guard: guard,
        }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut Vec<T> {
        &mut self.records
    }

    /// First record whose id equals `id`.
    pub fn find_mut(&mut self, id: i64) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    /// Remove every record whose id equals `id`, returning how many went.
    pub fn remove_all(&mut self, id: i64) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        before - self.records.len()
    }

    /// Whether this snapshot holds `lock`, i.e. was begun on the store that
    /// owns it.
    pub fn is_guarded_by(&self, lock: &Arc<Mutex<()>>) -> bool {
        Arc::ptr_eq(OwnedMutexGuard::mutex(&self._guard), lock)
    }

    /// Split into the records and the still-held guard.
    ///
    /// Backends use this in `commit_snapshot` so the lock stays held until the
    /// write has finished.
    pub fn into_parts(self) -> (Vec<T>, OwnedMutexGuard<()>) {
        (self.records, self._guard)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Snapshot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}
