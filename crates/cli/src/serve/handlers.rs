//! Handlers and error mappings shared by both servers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::Response;
use mvc_core::{view, HeroError, TaskError};

use super::{json_message, json_text};

/// Fallback handler for unmatched routes.
pub(crate) async fn handle_not_found() -> Response {
    json_message(StatusCode::NOT_FOUND, view::ROUTE_NOT_FOUND)
}

/// Fallback for a known path requested with a method it does not serve.
pub(crate) async fn handle_method_not_allowed() -> Response {
    json_message(StatusCode::METHOD_NOT_ALLOWED, view::METHOD_NOT_ALLOWED)
}

/// GET /health
pub(crate) fn health(service: &str) -> Response {
    let response = serde_json::json!({
        "status": "ok",
        "service": service,
        "version": env!("CARGO_PKG_VERSION"),
    });
    json_text(StatusCode::OK, response.to_string())
}

/// Map a path extraction failure (e.g. `/tareas/abc`) to a 400 envelope.
pub(crate) fn bad_path(rejection: PathRejection) -> Response {
    tracing::debug!(error = %rejection.body_text(), "rejected path");
    json_message(StatusCode::BAD_REQUEST, "El id debe ser un número entero")
}

/// Map a JSON body failure to a 400 envelope carrying axum's reason.
pub(crate) fn bad_body(rejection: JsonRejection) -> Response {
    let message = format!("Cuerpo de la solicitud inválido: {}", rejection.body_text());
    json_message(StatusCode::BAD_REQUEST, &message)
}

pub(crate) fn task_error(err: TaskError) -> Response {
    match err {
        TaskError::Validation(msg) => json_message(StatusCode::BAD_REQUEST, &msg),
        e @ TaskError::DuplicateId(_) => json_message(StatusCode::CONFLICT, &e.to_string()),
        TaskError::Storage(e) => {
            tracing::error!(error = %e, "tasks storage failure");
            json_message(StatusCode::INTERNAL_SERVER_ERROR, view::INTERNAL_ERROR)
        }
    }
}

pub(crate) fn hero_error(err: HeroError) -> Response {
    match err {
        e @ HeroError::UnknownAttribute(_) => {
            json_message(StatusCode::BAD_REQUEST, &e.to_string())
        }
        HeroError::Storage(e) => {
            tracing::error!(error = %e, "superheroes storage failure");
            json_message(StatusCode::INTERNAL_SERVER_ERROR, view::INTERNAL_ERROR)
        }
    }
}
