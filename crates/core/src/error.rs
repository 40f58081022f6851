//! Service-level error types.

use mvc_storage::StorageError;

/// Errors from task operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// The task failed a model rule; nothing was written.
    #[error("{0}")]
    Validation(String),

    /// A task with this id is already stored; nothing was written.
    #[error("ya existe una tarea con el id {0}")]
    DuplicateId(i64),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors from superhero queries.
#[derive(Debug, thiserror::Error)]
pub enum HeroError {
    /// The attribute name is not one a hero can be searched by.
    #[error("atributo desconocido: {0}")]
    UnknownAttribute(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
