//! Stateless services over injected collection stores.
//!
//! Neither service caches anything: every call reloads the collection, so two
//! services sharing one store always agree.

mod hero_service;
mod task_service;

pub use hero_service::{HeroService, EARTH_NAMES};
pub use task_service::TaskService;
