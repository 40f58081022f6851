//! mvc-core: entities, services, and views for the tasks and superheroes APIs.
//!
//! # Layers
//!
//! - [`model`] -- plain records ([`Task`], [`Hero`]) and the little behavior
//!   tasks carry
//! - [`service`] -- stateless operations that reload the collection from an
//!   injected [`mvc_storage::CollectionStore`] on every call
//! - [`view`] -- JSON text bodies for entities, lists, and message envelopes
//!
//! HTTP wiring lives in the `mvc-cli` crate.

pub mod error;
pub mod model;
pub mod service;
pub mod view;

// ── Convenience re-exports: key types ────────────────────────────────

pub use error::{HeroError, TaskError};
pub use model::{Hero, HeroAttribute, NewTask, Task};
pub use service::{HeroService, TaskService};
