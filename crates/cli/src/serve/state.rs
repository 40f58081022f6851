//! Application state shared across request handlers.

use mvc_core::model::{Hero, Task};
use mvc_core::{HeroService, TaskService};
use mvc_storage::JsonFileStore;

pub(crate) type TaskStore = JsonFileStore<Task>;
pub(crate) type HeroStore = JsonFileStore<Hero>;

/// State for the tasks server.
pub(crate) struct TasksState {
    pub(crate) tasks: TaskService<TaskStore>,
}

/// State for the superheroes server.
pub(crate) struct HeroesState {
    pub(crate) heroes: HeroService<HeroStore>,
}
