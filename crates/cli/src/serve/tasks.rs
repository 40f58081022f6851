//! Task route handlers.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use mvc_core::{view, NewTask};

use super::handlers::{
    bad_body, bad_path, handle_method_not_allowed, handle_not_found, health, task_error,
};
use super::state::TasksState;
use super::{json_message, json_text};

pub(crate) fn router(state: Arc<TasksState>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/tareas", get(handle_list).post(handle_create))
        .route("/tareas/completadas", get(handle_list_completed))
        .route("/tareas/{id}/completar", put(handle_complete))
        .route("/tareas/{id}", delete(handle_delete))
        .fallback(handle_not_found)
        .method_not_allowed_fallback(handle_method_not_allowed)
        .with_state(state)
}

async fn handle_health() -> Response {
    health("tasks")
}

/// GET /tareas
async fn handle_list(State(state): State<Arc<TasksState>>) -> Response {
    match state.tasks.list_all().await {
        Ok(tasks) => json_text(StatusCode::OK, view::render_tasks(&tasks)),
        Err(e) => task_error(e),
    }
}

/// GET /tareas/completadas
async fn handle_list_completed(State(state): State<Arc<TasksState>>) -> Response {
    match state.tasks.list_completed().await {
        Ok(tasks) => json_text(StatusCode::OK, view::render_tasks(&tasks)),
        Err(e) => task_error(e),
    }
}

/// POST /tareas
async fn handle_create(
    State(state): State<Arc<TasksState>>,
    body: Result<Json<NewTask>, JsonRejection>,
) -> Response {
    let Json(new_task) = match body {
        Ok(b) => b,
        Err(rejection) => return bad_body(rejection),
    };
    match state.tasks.create(new_task).await {
        Ok(_) => json_message(StatusCode::OK, view::TASK_CREATED),
        Err(e) => task_error(e),
    }
}

/// PUT /tareas/{id}/completar
///
/// An unknown id is not an error: the response is the same as for a hit.
async fn handle_complete(
    State(state): State<Arc<TasksState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(p) => p,
        Err(rejection) => return bad_path(rejection),
    };
    match state.tasks.complete(id).await {
        Ok(_) => json_message(StatusCode::OK, view::TASK_COMPLETED),
        Err(e) => task_error(e),
    }
}

/// DELETE /tareas/{id}
async fn handle_delete(
    State(state): State<Arc<TasksState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(p) => p,
        Err(rejection) => return bad_path(rejection),
    };
    match state.tasks.delete(id).await {
        Ok(_) => json_message(StatusCode::OK, view::TASK_DELETED),
        Err(e) => task_error(e),
    }
}
