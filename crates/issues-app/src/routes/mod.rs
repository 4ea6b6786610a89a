//! Route definitions
//!
//! Paths are relative to the mount; an embedder nests this router under
//! its base URI.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{actions, health, mock, pages};
use crate::state::AppState;

/// Create the tracker router. Mock preview routes are added only when
/// `enable_mock` is set.
pub fn create_router(enable_mock: bool) -> Router<AppState> {
    let router = Router::new().merge(page_routes()).merge(action_routes());
    if enable_mock {
        router.merge(mock_routes())
    } else {
        router
    }
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

/// Full pages, plus issue creation which shares the `/new` path
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/new", get(pages::new_issue).post(actions::create_issue))
        .route("/:id", get(pages::issue))
}

/// Mutations issued by the browser script
fn action_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/edit", post(actions::edit_issue))
        .route("/:id/comment", post(actions::post_comment))
        .route("/:id/comment/:comment_id", post(actions::edit_comment))
        .route("/:id/comment/:comment_id/react", post(actions::toggle_reaction))
}

/// Template previews
fn mock_routes() -> Router<AppState> {
    Router::new().route("/mock/:template", get(mock::preview))
}
