//! Rider service trait definition.

use crate::dto::{BulkDeleteRequest, BulkDeleteResponse};
use async_trait::async_trait;
use courier_core::CourierResult;
use serde_json::Value;

/// Rider service trait.
#[async_trait]
pub trait RiderService: Send + Sync {
    /// Lists riders straight from the upstream API.
    async fn list_riders(&self) -> CourierResult<Value>;

    /// Gets one rider.
    async fn get_rider(&self, id: &str) -> CourierResult<Value>;

    /// Replaces a rider's profile.
    async fn update_rider(&self, id: &str, body: Value) -> CourierResult<Value>;

    /// Activates or deactivates a rider.
    async fn set_rider_active(&self, id: &str, active: bool) -> CourierResult<Value>;

    /// Deletes several riders; individual failures are reported, not raised.
    async fn delete_riders(&self, request: BulkDeleteRequest) -> CourierResult<BulkDeleteResponse>;
}
