//! Admin account service trait definition.

use crate::dto::{ChangeRoleRequest, CreateAdminRequest, UpdateAdminRequest};
use async_trait::async_trait;
use courier_core::CourierResult;
use serde_json::Value;

/// Admin account service trait.
#[async_trait]
pub trait AdminService: Send + Sync {
    async fn list_admins(&self, refresh: bool) -> CourierResult<Value>;

    async fn get_admin(&self, id: &str) -> CourierResult<Value>;

    async fn create_admin(&self, request: CreateAdminRequest) -> CourierResult<Value>;

    async fn change_role(&self, id: &str, request: ChangeRoleRequest) -> CourierResult<Value>;

    async fn update_admin(&self, id: &str, request: UpdateAdminRequest) -> CourierResult<Value>;

    async fn delete_admin(&self, id: &str) -> CourierResult<Value>;
}
