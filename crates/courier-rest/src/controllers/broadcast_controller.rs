//! Broadcast recipients controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use courier_service::{BroadcastRecipient, RefreshQuery};
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};

/// Creates the broadcast router.
pub fn router() -> Router<AppState> {
    Router::new().route("/recipients", get(recipients))
}

async fn recipients(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> ApiResult<Vec<BroadcastRecipient>> {
    ok(state.broadcast_service.recipients(query.refresh).await?)
}
