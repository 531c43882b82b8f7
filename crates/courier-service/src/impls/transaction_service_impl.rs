//! Transaction service implementation.

use crate::mappers::join_with_parties;
use crate::resources::{RIDERS, TRANSACTIONS, USERS};
use crate::transaction_service::TransactionService;
use async_trait::async_trait;
use courier_config::CacheConfig;
use courier_core::CourierResult;
use courier_upstream::{ApiClient, FetchOptions, UpstreamRequest};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Transaction service over the upstream API.
pub struct TransactionServiceImpl {
    client: Arc<ApiClient>,
    cache: CacheConfig,
}

impl TransactionServiceImpl {
    /// Creates a new transaction service.
    pub fn new(client: Arc<ApiClient>, cache: CacheConfig) -> Self {
        Self { client, cache }
    }
}

#[async_trait]
impl TransactionService for TransactionServiceImpl {
    async fn list_transactions(&self, refresh: bool) -> CourierResult<Vec<Value>> {
        debug!("Listing transactions, refresh: {}", refresh);

        let (items, users, riders) = tokio::try_join!(
            self.client.fetch_with_cache(
                UpstreamRequest::get(format!("/{}", TRANSACTIONS)),
                FetchOptions::ttl(self.cache.transactions_ttl()).bypass(refresh)
            ),
            self.client.fetch_with_cache(
                UpstreamRequest::get(format!("/{}", USERS)),
                FetchOptions::ttl(self.cache.users_ttl()).bypass(refresh)
            ),
            self.client.fetch_with_cache(
                UpstreamRequest::get(format!("/{}", RIDERS)),
                FetchOptions::ttl(self.cache.riders_ttl()).bypass(refresh)
            ),
        )?;

        Ok(join_with_parties(items, users, riders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::test_support::mock_client;

    #[tokio::test]
    async fn test_transactions_are_joined_and_cached() {
        let (client, transport) = mock_client();
        let service = TransactionServiceImpl::new(client, CacheConfig::default());

        let transactions = service.list_transactions(false).await.unwrap();
        service.list_transactions(false).await.unwrap();

        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[1]["user"]["email"], "kwame@customers.test");
        assert_eq!(transactions[1]["rider"]["phone"], "+233200000002");
        assert!(transactions[2]["user"].is_null());
        assert_eq!(transport.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_transactions_are_refetched() {
        let (client, transport) = mock_client();
        let cache = CacheConfig::default();
        let service = TransactionServiceImpl::new(client, cache.clone());

        service.list_transactions(false).await.unwrap();
        tokio::time::advance(cache.transactions_ttl() + std::time::Duration::from_secs(1)).await;
        service.list_transactions(false).await.unwrap();

        assert_eq!(transport.calls(), 4, "only transactions expired");
    }
}
