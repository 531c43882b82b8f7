//! Configuration, upstream status and cache endpoints.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use courier_cache::CacheStats;
use courier_service::UpstreamStatus;
use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

/// Browser-facing settings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfigResponse {
    pub google_maps_api_key: Option<String>,
    pub tinymce_api_key: Option<String>,
    pub mock_api: bool,
}

#[derive(Debug, Serialize)]
pub struct CacheFlushResponse {
    pub cleared: usize,
}

/// Creates the router; paths are relative to `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/public-config", get(public_config))
        .route("/upstream-status", get(upstream_status))
        .route("/cache/stats", get(cache_stats))
        .route("/cache", delete(flush_cache))
}

async fn public_config(State(state): State<AppState>) -> Json<PublicConfigResponse> {
    let config = &state.config;
    Json(PublicConfigResponse {
        google_maps_api_key: config.public.google_maps_api_key.clone(),
        tinymce_api_key: config.public.tinymce_api_key.clone(),
        mock_api: config.upstream.mock,
    })
}

/// Never fails; an unreachable API reports `online: false`.
async fn upstream_status(State(state): State<AppState>) -> Json<UpstreamStatus> {
    Json(state.status_service.probe().await)
}

async fn cache_stats(State(state): State<AppState>) -> ApiResult<CacheStats> {
    ok(state.client.cache().stats())
}

async fn flush_cache(State(state): State<AppState>) -> ApiResult<CacheFlushResponse> {
    let cache = state.client.cache();
    let cleared = cache.len();
    cache.clear();
    info!(cleared, "Response cache flushed");
    ok(CacheFlushResponse { cleared })
}
