//! JSON text bodies for responses.
//!
//! Every renderer produces 2-space indented JSON. Message bodies use the
//! `{"mensaje": ...}` envelope for both success and error notices.

use serde::Serialize;

use crate::model::{Hero, Task};

pub const TASK_CREATED: &str = "Tarea creada con éxito";
pub const TASK_COMPLETED: &str = "Tarea marcada como completada";
pub const TASK_DELETED: &str = "Tarea eliminada con éxito";
pub const HERO_NOT_FOUND: &str = "Superhéroe no encontrado";
pub const NO_HEROES_WITH_ATTRIBUTE: &str = "No se encontraron superhéroes con ese atributo";
pub const NO_HEROES_FOUND: &str = "No se encontraron superhéroes";
pub const ROUTE_NOT_FOUND: &str = "Ruta no encontrada";
pub const METHOD_NOT_ALLOWED: &str = "Método no permitido";
pub const INTERNAL_ERROR: &str = "Error interno del servidor";

#[derive(Serialize)]
struct Message<'a> {
    mensaje: &'a str,
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> String {
    // Plain structs of strings, numbers, and bools always serialize.
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

pub fn render_task(task: &Task) -> String {
    pretty(task)
}

pub fn render_tasks(tasks: &[Task]) -> String {
    pretty(tasks)
}

pub fn render_hero(hero: &Hero) -> String {
    pretty(hero)
}

pub fn render_heroes(heroes: &[Hero]) -> String {
    pretty(heroes)
}

pub fn render_message(message: &str) -> String {
    pretty(&Message { mensaje: message })
}
