//! Probes and metrics.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `"mock"` when fixtures stand in for the delivery API.
    pub upstream: &'static str,
}

/// `/health`, `/ready` and `/live`; all public.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(probe_ok))
        .route("/live", get(probe_ok))
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        upstream: if state.config.upstream.mock { "mock" } else { "http" },
    })
}

/// The gateway keeps no connections of its own; serving means ready.
async fn probe_ok() -> StatusCode {
    StatusCode::OK
}

/// Prometheus text exposition; 404 when no recorder is installed.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
