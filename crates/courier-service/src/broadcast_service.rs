//! Broadcast recipient service trait definition.

use crate::dto::BroadcastRecipient;
use async_trait::async_trait;
use courier_core::CourierResult;

/// Broadcast recipient service trait.
#[async_trait]
pub trait BroadcastService: Send + Sync {
    /// Users and riders with an e-mail address, deduplicated and sorted.
    ///
    /// A list the upstream fails to serve is treated as empty.
    async fn recipients(&self, refresh: bool) -> CourierResult<Vec<BroadcastRecipient>>;
}
