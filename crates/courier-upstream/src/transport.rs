//! Transport seam between the client and the wire.

use crate::UpstreamRequest;
use async_trait::async_trait;
use courier_core::CourierResult;
use serde_json::Value;

/// Executes one upstream request and returns its decoded JSON body.
///
/// Implementations turn non-2xx responses into [`courier_core::CourierError::Upstream`]
/// and decode empty success bodies as `Value::Null`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `url` is the fully resolved URL, query string included.
    async fn execute(&self, url: &str, request: &UpstreamRequest) -> CourierResult<Value>;
}
