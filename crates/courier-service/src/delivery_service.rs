//! Delivery service trait definition.

use crate::dto::{DeliveryQuery, UpdatePaymentStatusRequest};
use async_trait::async_trait;
use courier_core::CourierResult;
use serde_json::Value;

/// Delivery service trait.
#[async_trait]
pub trait DeliveryService: Send + Sync {
    /// Lists deliveries joined with their user and rider.
    async fn list_deliveries(&self, query: DeliveryQuery) -> CourierResult<Vec<Value>>;

    /// Lists soft-deleted deliveries, joined the same way.
    async fn list_deleted_deliveries(&self, refresh: bool) -> CourierResult<Vec<Value>>;

    /// Soft-deletes a delivery.
    async fn soft_delete(&self, id: &str) -> CourierResult<Value>;

    /// Restores a soft-deleted delivery.
    async fn restore(&self, id: &str) -> CourierResult<Value>;

    /// Removes a delivery for good.
    async fn permanent_delete(&self, id: &str) -> CourierResult<Value>;

    /// Updates the payment status of a delivery's transaction.
    async fn update_payment_status(&self, id: &str, request: UpdatePaymentStatusRequest) -> CourierResult<Value>;
}
