//! Prometheus scrape endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use prometheus::{Encoder, TextEncoder};

use crate::{metrics, state::AppState};

/// Render every registered metric in the Prometheus text format.
///
/// Pool gauges are sampled at scrape time.
pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    metrics::DB_CONNECTIONS_ACTIVE.set(i64::from(state.store.pool_size()));
    metrics::DB_CONNECTIONS_IDLE.set(state.store.num_idle() as i64);

    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    match encoder.encode(&prometheus::gather(), &mut buffer) {
        Ok(()) => (
            StatusCode::OK,
            [("Content-Type", "text/plain; version=0.0.4; charset=utf-8")],
            buffer,
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [("Content-Type", "text/plain")],
                b"Failed to encode metrics".to_vec(),
            )
        }
    }
}
