use mvc_storage::Record;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TaskError;

/// Validation message for a blank task title.
pub const TITLE_REQUIRED: &str = "El título de la tarea es obligatorio.";

/// A to-do item. Serialized with the Spanish keys of the tasks data file.
///
/// Any other key found on a stored task is kept in `extra` and written back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "completado", default)]
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        description: impl Into<String>,
        completed: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed,
            extra: Map::new(),
        }
    }

    pub fn complete(&mut self) {
        self.completed = true;
    }

    /// The title must contain something other than whitespace.
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.title.trim().is_empty() {
            return Err(TaskError::Validation(TITLE_REQUIRED.to_string()));
        }
        Ok(())
    }
}

impl Record for Task {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Body of a create request: `{id, titulo, descripcion, completado}`.
///
/// A missing title deserializes as empty so it fails validation rather than
/// parsing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTask {
    pub id: i64,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "completado", default)]
    pub completed: bool,
    /// Further keys of the body, stored with the task.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NewTask {
    pub fn new(id: i64, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed: false,
            extra: Map::new(),
        }
    }
}

impl From<NewTask> for Task {
    fn from(n: NewTask) -> Self {
        Task {
            id: n.id,
            title: n.title,
            description: n.description,
            completed: n.completed,
            extra: n.extra,
        }
    }
}
