//! Delivery controller.

use crate::{
    extractors::ValidatedJson,
    responses::{ok, ApiResult},
    state::AppState,
};
use courier_service::{DeliveryQuery, RefreshQuery, UpdatePaymentStatusRequest};
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::Value;
use tracing::debug;

/// Creates the delivery router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_deliveries))
        .route("/deleted", get(list_deleted_deliveries))
        .route("/:id/delete", delete(soft_delete))
        .route("/:id/restore", post(restore))
        .route("/:id/permanent-delete", delete(permanent_delete))
        .route("/:id/transaction", put(update_payment_status))
}

/// Deliveries joined with their user and rider.
async fn list_deliveries(
    State(state): State<AppState>,
    Query(query): Query<DeliveryQuery>,
) -> ApiResult<Vec<Value>> {
    ok(state.delivery_service.list_deliveries(query).await?)
}

async fn list_deleted_deliveries(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> ApiResult<Vec<Value>> {
    ok(state.delivery_service.list_deleted_deliveries(query.refresh).await?)
}

async fn soft_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    debug!("Soft delete delivery: {}", id);
    ok(state.delivery_service.soft_delete(&id).await?)
}

async fn restore(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    debug!("Restore delivery: {}", id);
    ok(state.delivery_service.restore(&id).await?)
}

async fn permanent_delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    debug!("Permanently delete delivery: {}", id);
    ok(state.delivery_service.permanent_delete(&id).await?)
}

async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePaymentStatusRequest>,
) -> ApiResult<Value> {
    debug!("Payment status of delivery {} -> {}", id, request.payment_status);
    ok(state.delivery_service.update_payment_status(&id, request).await?)
}
