use std::path::PathBuf;

/// All errors that can be returned by a CollectionStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing file exists but could not be read.
    #[error("failed to read collection {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The backing file is not a JSON array of records of the expected shape.
    #[error("collection {} is not a valid JSON array: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The collection could not be written back in full.
    #[error("failed to write collection {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A record could not be encoded as JSON.
    #[error("failed to serialize collection: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A snapshot begun on one store was handed to another.
    #[error("snapshot belongs to a different collection")]
    ForeignSnapshot,

    /// A backend-specific storage error (worker panic, connection loss, etc.).
    #[error("storage backend error: {0}")]
    Backend(String),
}
