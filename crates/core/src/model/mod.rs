//! Entity records stored in the flat-file collections.

mod hero;
mod lenient;
mod task;

pub use hero::{Hero, HeroAttribute};
pub use task::{NewTask, Task, TITLE_REQUIRED};
