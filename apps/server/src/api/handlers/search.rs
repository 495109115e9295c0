//! Search endpoint handler
//!
//! `GET /api/search?q=...&category=...&limit=...&sortBy=...&sortOrder=...`
//!
//! The query string is taken as ordered key/value pairs so repeated keys reach
//! the validator intact.

use axum::{
    extract::{Query, State},
    Json,
};

use crate::{metrics, models::SearchResponse, state::AppState, Result};

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>> {
    let result = state.search_service.search(&params).await;

    let status = match &result {
        Ok(_) => 200,
        Err(e) => e.status_code().as_u16(),
    };
    metrics::SEARCH_REQUESTS_TOTAL
        .with_label_values(&[metrics::outcome_label(status)])
        .inc();

    result.map(Json)
}
