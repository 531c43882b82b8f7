//! Transaction controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use courier_service::RefreshQuery;
use axum::{
    extract::{Query, State},
    routing::get,
    Router,
};
use serde_json::Value;

/// Creates the transaction router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_transactions))
}

async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> ApiResult<Vec<Value>> {
    ok(state.transaction_service.list_transactions(query.refresh).await?)
}
