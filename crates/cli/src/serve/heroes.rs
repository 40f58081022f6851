//! Superhero route handlers. Every route is a read.

use std::sync::Arc;

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use mvc_core::view;

use super::handlers::{
    bad_path, handle_method_not_allowed, handle_not_found, health, hero_error,
};
use super::state::HeroesState;
use super::{json_message, json_text};

pub(crate) fn router(state: Arc<HeroesState>) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/superheroes/id/{id}", get(handle_get_by_id))
        .route(
            "/superheroes/atributo/{atributo}/{valor}",
            get(handle_find_by_attribute),
        )
        .route("/superheroes/edad/mayorA30", get(handle_older_than_30))
        .fallback(handle_not_found)
        .method_not_allowed_fallback(handle_method_not_allowed)
        .with_state(state)
}

async fn handle_health() -> Response {
    health("heroes")
}

/// GET /superheroes/id/{id}
async fn handle_get_by_id(
    State(state): State<Arc<HeroesState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(p) => p,
        Err(rejection) => return bad_path(rejection),
    };
    match state.heroes.get_by_id(id).await {
        Ok(Some(hero)) => json_text(StatusCode::OK, view::render_hero(&hero)),
        Ok(None) => json_message(StatusCode::NOT_FOUND, view::HERO_NOT_FOUND),
        Err(e) => hero_error(e),
    }
}

/// GET /superheroes/atributo/{atributo}/{valor}
async fn handle_find_by_attribute(
    State(state): State<Arc<HeroesState>>,
    Path((attribute, value)): Path<(String, String)>,
) -> Response {
    match state.heroes.find_by_attribute(&attribute, &value).await {
        Ok(heroes) if heroes.is_empty() => {
            json_message(StatusCode::NOT_FOUND, view::NO_HEROES_WITH_ATTRIBUTE)
        }
        Ok(heroes) => json_text(StatusCode::OK, view::render_heroes(&heroes)),
        Err(e) => hero_error(e),
    }
}

/// GET /superheroes/edad/mayorA30
async fn handle_older_than_30(State(state): State<Arc<HeroesState>>) -> Response {
    match state
        .heroes
        .older_than_30_earth_heroes_with_multiple_powers()
        .await
    {
        Ok(heroes) if heroes.is_empty() => {
            json_message(StatusCode::NOT_FOUND, view::NO_HEROES_FOUND)
        }
        Ok(heroes) => json_text(StatusCode::OK, view::render_heroes(&heroes)),
        Err(e) => hero_error(e),
    }
}
