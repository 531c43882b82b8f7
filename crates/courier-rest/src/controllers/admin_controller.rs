//! Admin account controller.

use crate::{
    extractors::{Session, ValidatedJson},
    responses::{created, ok, ApiResult, AppError},
    state::AppState,
};
use courier_service::{ChangeRoleRequest, CreateAdminRequest, RefreshQuery, UpdateAdminRequest};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::{debug, info};

/// Creates the admin router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_admins).post(create_admin))
        .route("/:id", get(get_admin))
        .route("/:id/change-role", post(change_role))
        .route("/:id/update", post(update_admin))
        .route("/:id/delete", post(delete_admin))
}

async fn list_admins(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> ApiResult<Value> {
    ok(state.admin_service.list_admins(query.refresh).await?)
}

async fn get_admin(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Value> {
    ok(state.admin_service.get_admin(&id).await?)
}

async fn create_admin(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(request): ValidatedJson<CreateAdminRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    info!(by = %session.email, email = %request.email, role = %request.role, "Creating admin");

    let response = state.admin_service.create_admin(request).await?;
    Ok(created(response))
}

async fn change_role(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ChangeRoleRequest>,
) -> ApiResult<Value> {
    info!(by = %session.email, admin = %id, role = %request.role, "Changing admin role");
    ok(state.admin_service.change_role(&id, request).await?)
}

async fn update_admin(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateAdminRequest>,
) -> ApiResult<Value> {
    debug!("Update admin request: {}", id);
    ok(state.admin_service.update_admin(&id, request).await?)
}

async fn delete_admin(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> ApiResult<Value> {
    info!(by = %session.email, admin = %id, "Deleting admin");
    ok(state.admin_service.delete_admin(&id).await?)
}
