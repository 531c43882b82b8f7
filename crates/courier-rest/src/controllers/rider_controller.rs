//! Rider controller.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, ApiResult},
    state::AppState,
};
use courier_core::CourierError;
use courier_service::{BulkDeleteRequest, BulkDeleteResponse};
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;
use tracing::debug;

/// Creates the rider router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_riders).delete(delete_riders))
        .route("/:id", get(get_rider).put(update_rider))
        .route("/:id/activate", put(activate_rider))
        .route("/:id/deactivate", put(deactivate_rider))
}

async fn list_riders(State(state): State<AppState>) -> ApiResult<Value> {
    ok(state.rider_service.list_riders().await?)
}

/// Bulk delete; per-ID failures are reported, not raised.
async fn delete_riders(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<BulkDeleteRequest>,
) -> ApiResult<BulkDeleteResponse> {
    debug!("Bulk delete of {} riders", request.ids.len());
    ok(state.rider_service.delete_riders(request).await?)
}

async fn get_rider(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    ok(state.rider_service.get_rider(&id).await?)
}

async fn update_rider(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Value> {
    debug!("Update rider request: {}", id);

    if !body.is_object() {
        return Err(CourierError::validation("Rider update must be a JSON object").into());
    }

    ok(state.rider_service.update_rider(&id, body).await?)
}

async fn activate_rider(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    debug!("Activate rider request: {}", id);
    ok(state.rider_service.set_rider_active(&id, true).await?)
}

async fn deactivate_rider(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    debug!("Deactivate rider request: {}", id);
    ok(state.rider_service.set_rider_active(&id, false).await?)
}
