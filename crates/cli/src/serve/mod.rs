//! `mvc-api tasks` / `mvc-api heroes` -- HTTP JSON API servers.
//!
//! Each subcommand serves one collection on its own port using `axum` +
//! `tokio`. Handlers extract parameters, call exactly one service operation,
//! and hand the outcome to the `mvc_core::view` renderers.
//!
//! Tasks endpoints:
//! - GET    /tareas                  - All tasks
//! - GET    /tareas/completadas      - Completed tasks
//! - POST   /tareas                  - Create a task
//! - PUT    /tareas/{id}/completar   - Mark a task completed
//! - DELETE /tareas/{id}             - Delete a task
//!
//! Heroes endpoints:
//! - GET /superheroes/id/{id}                    - One hero, or 404
//! - GET /superheroes/atributo/{atributo}/{valor} - Attribute search, or 404
//! - GET /superheroes/edad/mayorA30              - Age/planet/powers query, or 404
//!
//! Both serve GET /health. All responses use Content-Type: application/json.

mod handlers;
mod heroes;
mod middleware;
mod state;
mod tasks;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{middleware as axum_middleware, Router};
use mvc_core::model::{Hero, Task};
use mvc_core::{view, HeroService, TaskService};
use mvc_storage::JsonFileStore;
use tower_http::cors::{Any, CorsLayer};

use self::middleware::log_requests;
use self::state::{HeroesState, TasksState};
use crate::config::ServiceSettings;

/// Maximum request body size: 1 MB.
const MAX_BODY_SIZE: usize = 1024 * 1024;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Respond with an already rendered JSON body.
fn json_text(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response()
}

/// Respond with a `{"mensaje": ...}` envelope.
fn json_message(status: StatusCode, message: &str) -> Response {
    json_text(status, view::render_message(message))
}

/// Serve the tasks collection stored at `settings.data_file`.
pub async fn serve_tasks(
    bind: &str,
    settings: ServiceSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(data_file = %settings.data_file.display(), "tasks collection");
    let store = Arc::new(JsonFileStore::<Task>::new(&settings.data_file));
    let state = Arc::new(TasksState {
        tasks: TaskService::new(store),
    });
    run("tasks", tasks::router(state), bind, settings.port).await
}

/// Serve the superheroes collection stored at `settings.data_file`.
pub async fn serve_heroes(
    bind: &str,
    settings: ServiceSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(data_file = %settings.data_file.display(), "superheroes collection");
    let store = Arc::new(JsonFileStore::<Hero>::new(&settings.data_file));
    let state = Arc::new(HeroesState {
        heroes: HeroService::new(store),
    });
    run("heroes", heroes::router(state), bind, settings.port).await
}

/// Wrap `app` in the shared layers and serve it until Ctrl+C.
///
/// CORS is permissive (`Any` origin); these APIs carry no credentials.
async fn run(
    service: &'static str,
    app: Router,
    bind: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let app = app
        .layer(axum_middleware::from_fn(log_requests))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE));

    let addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(service, "listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(service, "server shut down");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received shutdown signal"),
        Err(e) => {
            // Without a signal handler the server can only be killed.
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
