//! Transaction service trait definition.

use async_trait::async_trait;
use courier_core::CourierResult;
use serde_json::Value;

/// Transaction service trait.
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Lists transactions joined with their user and rider.
    async fn list_transactions(&self, refresh: bool) -> CourierResult<Vec<Value>>;
}
