//! Timeout wrapper for upstream calls.

use courier_core::CourierError;
use std::time::Duration;

/// Wraps an async operation with a timeout.
pub async fn with_timeout<F, Fut, T>(duration: Duration, f: F) -> Result<T, CourierError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<T, CourierError>>,
{
    tokio::time::timeout(duration, f())
        .await
        .map_err(|_| CourierError::Timeout(format!("Operation timed out after {:?}", duration)))?
}
