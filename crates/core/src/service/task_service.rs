//! Task use cases: list, list completed, create, complete, delete.
//!
//! # Invariants
//! - A task that fails validation never reaches storage.
//! - Mutations run inside one store snapshot, so concurrent requests against
//!   the same collection are applied one after another.

use std::sync::Arc;

use mvc_storage::CollectionStore;

use crate::error::TaskError;
use crate::model::{NewTask, Task};

/// Use-case service for the tasks collection.
pub struct TaskService<S> {
    store: Arc<S>,
}

impl<S> Clone for TaskService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: CollectionStore<Task>> TaskService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Every stored task, in stored order.
    pub async fn list_all(&self) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.load_all().await?)
    }

    /// Only the tasks with `completed == true`, relative order kept.
    pub async fn list_completed(&self) -> Result<Vec<Task>, TaskError> {
        let mut tasks = self.store.load_all().await?;
        tasks.retain(|t| t.completed);
        Ok(tasks)
    }

    /// Validate and append a new task.
    ///
    /// Fails with [`TaskError::Validation`] for a blank title and
    /// [`TaskError::DuplicateId`] when the id is taken; neither writes.
    pub async fn create(&self, new_task: NewTask) -> Result<Task, TaskError> {
        let task = Task::from(new_task);
        task.validate()?;

        let mut snapshot = self.store.begin_snapshot().await?;
        if snapshot.records().iter().any(|t| t.id == task.id) {
            self.store.abort_snapshot(snapshot).await;
            return Err(TaskError::DuplicateId(task.id));
        }
        snapshot.records_mut().push(task.clone());
        self.store.commit_snapshot(snapshot).await?;

        tracing::info!(id = task.id, title = %task.title, "task created");
        Ok(task)
    }

    /// Mark the first task with `id` as completed.
    ///
    /// Returns `false`, without writing, when no task has that id.
    pub async fn complete(&self, id: i64) -> Result<bool, TaskError> {
        let mut snapshot = self.store.begin_snapshot().await?;
        let found = match snapshot.find_mut(id) {
            Some(task) => {
                task.complete();
                true
            }
            None => false,
        };
        if !found {
            self.store.abort_snapshot(snapshot).await;
            tracing::debug!(id, "complete: no task with this id");
            return Ok(false);
        }
        self.store.commit_snapshot(snapshot).await?;
        tracing::info!(id, "task completed");
        Ok(true)
    }

    /// Remove every task with `id`. Returns how many were removed.
    pub async fn delete(&self, id: i64) -> Result<usize, TaskError> {
        let removed = self.store.delete_by_id(id).await?;
        if removed == 0 {
            tracing::debug!(id, "delete: no task with this id");
        } else {
            tracing::info!(id, removed, "task deleted");
        }
        Ok(removed)
    }
}
