//! Rider service implementation.

use crate::dto::{BulkDeleteFailure, BulkDeleteRequest, BulkDeleteResponse};
use crate::resources::{item_path, RIDERS, RIDER_MUTATION};
use crate::rider_service::RiderService;
use async_trait::async_trait;
use courier_config::CacheConfig;
use courier_core::{CourierResult, ValidateExt};
use courier_upstream::{ApiClient, FetchOptions, UpstreamRequest};
use futures::future::join_all;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Rider service over the upstream API.
pub struct RiderServiceImpl {
    client: Arc<ApiClient>,
    cache: CacheConfig,
}

impl RiderServiceImpl {
    /// Creates a new rider service.
    pub fn new(client: Arc<ApiClient>, cache: CacheConfig) -> Self {
        Self { client, cache }
    }

    fn invalidate(&self) {
        self.client.invalidate(RIDER_MUTATION);
    }
}

#[async_trait]
impl RiderService for RiderServiceImpl {
    async fn list_riders(&self) -> CourierResult<Value> {
        debug!("Listing riders");
        self.client.send(UpstreamRequest::get(format!("/{}", RIDERS))).await
    }

    async fn get_rider(&self, id: &str) -> CourierResult<Value> {
        debug!("Getting rider: {}", id);
        self.client
            .fetch_with_cache(
                UpstreamRequest::get(item_path(RIDERS, id)?),
                FetchOptions::ttl(self.cache.riders_ttl()),
            )
            .await
    }

    async fn update_rider(&self, id: &str, body: Value) -> CourierResult<Value> {
        debug!("Updating rider: {}", id);

        let result = self
            .client
            .send(UpstreamRequest::put(item_path(RIDERS, id)?).json(body))
            .await?;
        self.invalidate();

        info!("Rider updated: {}", id);
        Ok(result)
    }

    async fn set_rider_active(&self, id: &str, active: bool) -> CourierResult<Value> {
        let action = if active { "activate" } else { "deactivate" };
        debug!("Rider {}: {}", action, id);

        let result = self
            .client
            .send(UpstreamRequest::put(format!("{}/{}", item_path(RIDERS, id)?, action)))
            .await?;
        self.invalidate();

        info!("Rider {}d: {}", action, id);
        Ok(result)
    }

    async fn delete_riders(&self, request: BulkDeleteRequest) -> CourierResult<BulkDeleteResponse> {
        request.validate_request()?;
        debug!("Deleting {} riders", request.ids.len());

        let paths = request
            .ids
            .iter()
            .map(|id| item_path(RIDERS, &id.to_string()))
            .collect::<CourierResult<Vec<_>>>()?;

        let outcomes = join_all(request.ids.into_iter().zip(paths).map(|(id, path)| async move {
            let result = self.client.send(UpstreamRequest::delete(path).with_admin_key()).await;
            (id, result)
        }))
        .await;

        let mut response = BulkDeleteResponse::default();
        for (id, result) in outcomes {
            match result {
                Ok(_) => response.deleted.push(id),
                Err(e) => {
                    warn!("Failed to delete rider {}: {}", id, e);
                    response.failed.push(BulkDeleteFailure {
                        id,
                        error: e.to_string(),
                    });
                }
            }
        }

        if !response.deleted.is_empty() {
            self.invalidate();
        }

        info!("Deleted {} riders, {} failed", response.deleted.len(), response.failed.len());
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::ResourceId;
    use crate::impls::test_support::{http_client, mock_client};
    use courier_core::CourierError;
    use courier_upstream::ADMIN_KEY_HEADER;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_is_not_cached() {
        let (client, transport) = mock_client();
        let service = RiderServiceImpl::new(client.clone(), CacheConfig::default());

        service.list_riders().await.unwrap();
        service.list_riders().await.unwrap();

        assert_eq!(transport.calls(), 2);
        assert!(client.cache().is_empty());
    }

    #[tokio::test]
    async fn test_get_rider_is_cached() {
        let (client, transport) = mock_client();
        let service = RiderServiceImpl::new(client, CacheConfig::default());

        let first = service.get_rider("1").await.unwrap();
        let second = service.get_rider("1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_status_change_clears_riders_and_deliveries() {
        let (client, transport) = mock_client();
        let service = RiderServiceImpl::new(client.clone(), CacheConfig::default());
        let ttl = FetchOptions::ttl(CacheConfig::default().deliveries_ttl());

        service.get_rider("2").await.unwrap();
        client.fetch_with_cache(UpstreamRequest::get("/deliveries"), ttl).await.unwrap();
        client.fetch_with_cache(UpstreamRequest::get("/users"), ttl).await.unwrap();
        assert_eq!(client.cache().len(), 3);

        service.set_rider_active("2", false).await.unwrap();

        assert_eq!(client.cache().len(), 1, "only users stays cached");
        service.get_rider("2").await.unwrap();
        assert_eq!(transport.calls(), 5, "rider refetched after invalidation");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/riders/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 4})))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/riders/4"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({"detail": "bad phone"})))
            .mount(&server)
            .await;

        let client = http_client(&server.uri());
        let service = RiderServiceImpl::new(client.clone(), CacheConfig::default());
        service.get_rider("4").await.unwrap();

        let err = service.update_rider("4", json!({"phone": "x"})).await.unwrap_err();

        assert_eq!(err.status_code(), 422);
        assert_eq!(client.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_bulk_delete_reports_partial_failure() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/riders/1"))
            .and(header(ADMIN_KEY_HEADER, "admin-secret"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/riders/2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let service = RiderServiceImpl::new(http_client(&server.uri()), CacheConfig::default());
        let response = service
            .delete_riders(BulkDeleteRequest {
                ids: vec![ResourceId::Number(1), ResourceId::from("2")],
            })
            .await
            .unwrap();

        assert_eq!(response.deleted, vec![ResourceId::Number(1)]);
        assert_eq!(response.failed.len(), 1);
        assert_eq!(response.failed[0].id, ResourceId::from("2"));
        assert!(response.failed[0].error.contains("404"));
    }

    #[tokio::test]
    async fn test_ids_outside_riders_never_reach_upstream() {
        let (client, transport) = mock_client();
        let service = RiderServiceImpl::new(client, CacheConfig::default());

        let err = service.get_rider("../admins").await.unwrap_err();
        assert!(matches!(err, CourierError::Validation(_)));
        let err = service.set_rider_active("../admins/1", true).await.unwrap_err();
        assert!(matches!(err, CourierError::Validation(_)));

        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_bulk_delete_requires_ids() {
        let (client, transport) = mock_client();
        let service = RiderServiceImpl::new(client, CacheConfig::default());

        let err = service.delete_riders(BulkDeleteRequest { ids: Vec::new() }).await.unwrap_err();

        assert!(matches!(err, CourierError::Validation(_)));
        assert_eq!(transport.calls(), 0);
    }
}
