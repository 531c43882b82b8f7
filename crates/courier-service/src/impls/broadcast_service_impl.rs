//! Broadcast recipient service implementation.

use crate::broadcast_service::BroadcastService;
use crate::dto::BroadcastRecipient;
use crate::mappers::{merge_recipients, records};
use crate::resources::{RIDERS, USERS};
use async_trait::async_trait;
use courier_config::CacheConfig;
use courier_core::CourierResult;
use courier_upstream::{ApiClient, FetchOptions, UpstreamRequest};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Broadcast recipient service over the upstream API.
pub struct BroadcastServiceImpl {
    client: Arc<ApiClient>,
    cache: CacheConfig,
}

impl BroadcastServiceImpl {
    /// Creates a new broadcast service.
    pub fn new(client: Arc<ApiClient>, cache: CacheConfig) -> Self {
        Self { client, cache }
    }

    async fn list_or_empty(&self, resource: &str, options: FetchOptions) -> Vec<Value> {
        match self
            .client
            .fetch_with_cache(UpstreamRequest::get(format!("/{}", resource)), options)
            .await
        {
            Ok(value) => records(value),
            Err(e) => {
                warn!("Could not load {} for broadcast, continuing without them: {}", resource, e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl BroadcastService for BroadcastServiceImpl {
    async fn recipients(&self, refresh: bool) -> CourierResult<Vec<BroadcastRecipient>> {
        let (users, riders) = tokio::join!(
            self.list_or_empty(USERS, FetchOptions::ttl(self.cache.users_ttl()).bypass(refresh)),
            self.list_or_empty(RIDERS, FetchOptions::ttl(self.cache.riders_ttl()).bypass(refresh)),
        );

        let recipients = merge_recipients(&users, &riders);
        debug!(
            "Broadcast recipients: {} from {} users and {} riders",
            recipients.len(),
            users.len(),
            riders.len()
        );
        Ok(recipients)
    }
}
