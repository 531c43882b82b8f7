//! Access log.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Writes one `http` line per request: method, path, status, latency and
/// the `x-request-id` assigned by the outer layer. Server errors log at
/// warn.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis();
    let request_id = request_id.as_deref().unwrap_or("-");

    if response.status().is_server_error() {
        warn!(target: "http", %method, %path, status, elapsed_ms, request_id, "request failed");
    } else {
        info!(target: "http", %method, %path, status, elapsed_ms, request_id, "request served");
    }

    response
}
