//! mvc-storage: whole-collection persistence for mvc-api entities.
//!
//! A collection is the complete ordered sequence of one entity kind. Stores
//! never address single records on disk: every mutation loads the whole
//! collection, changes it in memory, and writes the whole collection back.
//! [`Snapshot`] holds the per-collection write lock across that cycle so
//! concurrent writers are serialized instead of overwriting each other.

mod error;
mod file;
mod memory;
mod record;
mod traits;

pub mod conformance;

pub use error::StorageError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use record::{Record, Snapshot};
pub use traits::CollectionStore;
