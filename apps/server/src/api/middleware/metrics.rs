//! HTTP metrics middleware

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{
    sanitize_path, HTTP_REQUESTS_IN_FLIGHT, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS,
};

/// Decrements the in-flight gauge even if the inner service panics.
struct InFlight {
    method: String,
    path: String,
}

impl InFlight {
    fn enter(method: String, path: String) -> Self {
        HTTP_REQUESTS_IN_FLIGHT
            .with_label_values(&[&method, &path])
            .inc();
        Self { method, path }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        HTTP_REQUESTS_IN_FLIGHT
            .with_label_values(&[&self.method, &self.path])
            .dec();
    }
}

/// Count requests and observe latency by method and sanitized path.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = sanitize_path(req.uri().path());

    let _in_flight = InFlight::enter(method.clone(), path.clone());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[&method, &path])
        .observe(start.elapsed().as_secs_f64());

    response
}
