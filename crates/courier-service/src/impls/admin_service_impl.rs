//! Admin account service implementation.

use crate::admin_service::AdminService;
use crate::dto::{ChangeRoleRequest, CreateAdminRequest, UpdateAdminRequest};
use crate::resources::{item_path, ADMINS, ADMIN_MUTATION};
use async_trait::async_trait;
use courier_config::CacheConfig;
use courier_core::{CourierResult, ValidateExt};
use courier_upstream::{ApiClient, FetchOptions, UpstreamRequest};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Admin account service over the upstream API.
pub struct AdminServiceImpl {
    client: Arc<ApiClient>,
    cache: CacheConfig,
}

impl AdminServiceImpl {
    /// Creates a new admin service.
    pub fn new(client: Arc<ApiClient>, cache: CacheConfig) -> Self {
        Self { client, cache }
    }

    async fn mutate(&self, request: UpstreamRequest) -> CourierResult<Value> {
        let result = self.client.send(request).await?;
        self.client.invalidate(ADMIN_MUTATION);
        Ok(result)
    }
}

#[async_trait]
impl AdminService for AdminServiceImpl {
    async fn list_admins(&self, refresh: bool) -> CourierResult<Value> {
        debug!("Listing admins");
        self.client
            .fetch_with_cache(
                UpstreamRequest::get(format!("/{}", ADMINS)),
                FetchOptions::ttl(self.cache.admins_ttl()).bypass(refresh),
            )
            .await
    }

    async fn get_admin(&self, id: &str) -> CourierResult<Value> {
        debug!("Getting admin: {}", id);
        self.client
            .fetch_with_cache(
                UpstreamRequest::get(item_path(ADMINS, id)?),
                FetchOptions::ttl(self.cache.admins_ttl()),
            )
            .await
    }

    async fn create_admin(&self, request: CreateAdminRequest) -> CourierResult<Value> {
        request.validate_request()?;
        debug!("Creating admin: {}", request.email);

        let body = serde_json::to_value(&request)?;
        let result = self.mutate(UpstreamRequest::post(format!("/{}", ADMINS)).json(body)).await?;

        info!("Admin created: {}", request.email);
        Ok(result)
    }

    async fn change_role(&self, id: &str, request: ChangeRoleRequest) -> CourierResult<Value> {
        request.validate_request()?;
        debug!("Changing role of admin {} -> {}", id, request.role);

        let result = self
            .mutate(UpstreamRequest::put(format!("{}/role", item_path(ADMINS, id)?)).json(json!({ "role": request.role })))
            .await?;

        info!("Admin role changed: {}", id);
        Ok(result)
    }

    async fn update_admin(&self, id: &str, request: UpdateAdminRequest) -> CourierResult<Value> {
        request.validate_request()?;
        debug!("Updating admin: {}", id);

        let body = serde_json::to_value(&request)?;
        let result = self
            .mutate(UpstreamRequest::put(item_path(ADMINS, id)?).json(body))
            .await?;

        info!("Admin updated: {}", id);
        Ok(result)
    }

    async fn delete_admin(&self, id: &str) -> CourierResult<Value> {
        debug!("Deleting admin: {}", id);

        let result = self
            .mutate(UpstreamRequest::delete(item_path(ADMINS, id)?).with_admin_key())
            .await?;

        info!("Admin deleted: {}", id);
        Ok(result)
    }
}
