//! Search API routes

use crate::api::handlers::search;
use crate::state::AppState;
use axum::{routing::get, Router};

/// Both the unversioned and the `v1` path serve the same handler.
pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/api/search", get(search::search))
        .route("/api/v1/search", get(search::search))
}
