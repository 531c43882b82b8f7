//! Delivery service implementation.

use crate::delivery_service::DeliveryService;
use crate::dto::{DeliveryQuery, UpdatePaymentStatusRequest};
use crate::mappers::join_with_parties;
use crate::resources::{item_path, DELIVERIES, DELIVERY_MUTATION, RIDERS, USERS};
use async_trait::async_trait;
use courier_config::CacheConfig;
use courier_core::{CourierResult, ValidateExt};
use courier_upstream::{ApiClient, FetchOptions, UpstreamRequest};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Delivery service over the upstream API.
pub struct DeliveryServiceImpl {
    client: Arc<ApiClient>,
    cache: CacheConfig,
    transaction_timeout: Duration,
}

impl DeliveryServiceImpl {
    /// Creates a new delivery service.
    pub fn new(client: Arc<ApiClient>, cache: CacheConfig, transaction_timeout: Duration) -> Self {
        Self {
            client,
            cache,
            transaction_timeout,
        }
    }

    /// Fetches `deliveries` together with users and riders and joins them.
    /// Any failing fetch fails the whole read.
    async fn joined(&self, deliveries: UpstreamRequest, refresh: bool) -> CourierResult<Vec<Value>> {
        let (items, users, riders) = tokio::try_join!(
            self.client.fetch_with_cache(
                deliveries,
                FetchOptions::ttl(self.cache.deliveries_ttl()).bypass(refresh)
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

    async fn mutate(&self, request: UpstreamRequest) -> CourierResult<Value> {
        let result = self.client.send(request).await?;
        self.client.invalidate(DELIVERY_MUTATION);
        Ok(result)
    }
}

#[async_trait]
impl DeliveryService for DeliveryServiceImpl {
    async fn list_deliveries(&self, query: DeliveryQuery) -> CourierResult<Vec<Value>> {
        debug!("Listing deliveries, status: {:?}", query.status);

        let mut request = UpstreamRequest::get(format!("/{}", DELIVERIES));
        if let Some(status) = query.status.filter(|s| !s.is_empty()) {
            request = request.query("status", status);
        }

        self.joined(request, query.refresh).await
    }

    async fn list_deleted_deliveries(&self, refresh: bool) -> CourierResult<Vec<Value>> {
        debug!("Listing deleted deliveries");
        self.joined(UpstreamRequest::get(format!("/{}/deleted", DELIVERIES)), refresh)
            .await
    }

    async fn soft_delete(&self, id: &str) -> CourierResult<Value> {
        debug!("Soft-deleting delivery: {}", id);
        let result = self
            .mutate(UpstreamRequest::delete(item_path(DELIVERIES, id)?))
            .await?;
        info!("Delivery soft-deleted: {}", id);
        Ok(result)
    }

    async fn restore(&self, id: &str) -> CourierResult<Value> {
        debug!("Restoring delivery: {}", id);
        let result = self
            .mutate(UpstreamRequest::post(format!("{}/restore", item_path(DELIVERIES, id)?)).with_admin_key())
            .await?;
        info!("Delivery restored: {}", id);
        Ok(result)
    }

    async fn permanent_delete(&self, id: &str) -> CourierResult<Value> {
        debug!("Permanently deleting delivery: {}", id);
        let result = self
            .mutate(UpstreamRequest::delete(format!("{}/permanent", item_path(DELIVERIES, id)?)).with_admin_key())
            .await?;
        info!("Delivery permanently deleted: {}", id);
        Ok(result)
    }

    async fn update_payment_status(&self, id: &str, request: UpdatePaymentStatusRequest) -> CourierResult<Value> {
        request.validate_request()?;
        debug!("Updating payment status of delivery {} -> {}", id, request.payment_status);

        let result = self
            .mutate(
                UpstreamRequest::put(format!("{}/transaction", item_path(DELIVERIES, id)?))
                    .json(json!({ "payment_status": request.payment_status }))
                    .timeout(self.transaction_timeout),
            )
            .await?;

        info!("Payment status updated for delivery {}", id);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::test_support::{http_client, mock_client};
    use courier_core::CourierError;
    use courier_upstream::ADMIN_KEY_HEADER;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(client: Arc<ApiClient>) -> DeliveryServiceImpl {
        DeliveryServiceImpl::new(client, CacheConfig::default(), Duration::from_secs(8))
    }

    #[tokio::test]
    async fn test_list_joins_user_and_rider() {
        let (client, _) = mock_client();
        let deliveries = service(client).list_deliveries(DeliveryQuery::default()).await.unwrap();

        assert_eq!(deliveries.len(), 4);
        assert_eq!(deliveries[0]["user"]["name"], "Esi Asante");
        assert_eq!(deliveries[0]["rider"]["name"], "Kofi Mensah");
        assert!(deliveries[2]["rider"].is_null());
        assert!(deliveries[3]["user"].is_null());
    }

    #[tokio::test]
    async fn test_list_uses_cache_unless_refresh() {
        let (client, transport) = mock_client();
        let service = service(client);

        service.list_deliveries(DeliveryQuery::default()).await.unwrap();
        service.list_deliveries(DeliveryQuery::default()).await.unwrap();
        assert_eq!(transport.calls(), 3);

        service
            .list_deliveries(DeliveryQuery {
                status: None,
                refresh: true,
            })
            .await
            .unwrap();
        assert_eq!(transport.calls(), 6);
    }

    #[tokio::test]
    async fn test_status_filter_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/deliveries"))
            .and(query_param("status", "pending"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1, "user_id": 5}])))
            .expect(1)
            .mount(&server)
            .await;
        for list in ["/users", "/riders"] {
            Mock::given(method("GET"))
                .and(path(list))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
                .mount(&server)
                .await;
        }

        let deliveries = service(http_client(&server.uri()))
            .list_deliveries(DeliveryQuery {
                status: Some("pending".to_string()),
                refresh: false,
            })
            .await
            .unwrap();

        assert_eq!(deliveries.len(), 1);
        assert!(deliveries[0]["user"].is_null());
    }

    #[tokio::test]
    async fn test_any_failing_fetch_fails_the_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/deliveries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/riders"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let err = service(http_client(&server.uri()))
            .list_deliveries(DeliveryQuery::default())
            .await
            .unwrap_err();

        assert_eq!(err.upstream_status(), Some(500));
    }

    #[tokio::test]
    async fn test_deleted_list_is_joined() {
        let (client, _) = mock_client();
        let deleted = service(client).list_deleted_deliveries(false).await.unwrap();

        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0]["rider"]["name"], "Ama Owusu");
    }

    #[tokio::test]
    async fn test_restore_and_permanent_delete_send_admin_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/deliveries/3/restore"))
            .and(header(ADMIN_KEY_HEADER, "admin-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"restored": true})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/deliveries/3/permanent"))
            .and(header(ADMIN_KEY_HEADER, "admin-secret"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let service = service(http_client(&server.uri()));
        assert_eq!(service.restore("3").await.unwrap()["restored"], true);
        assert!(service.permanent_delete("3").await.unwrap().is_null());
    }

    #[tokio::test]
    async fn test_mutations_clear_deliveries_and_transactions() {
        let (client, _) = mock_client();
        let service = service(client.clone());
        let options = FetchOptions::ttl(Duration::from_secs(120));

        service.list_deliveries(DeliveryQuery::default()).await.unwrap();
        client.fetch_with_cache(UpstreamRequest::get("/transactions"), options).await.unwrap();
        assert_eq!(client.cache().len(), 4);

        service.soft_delete("100").await.unwrap();

        assert_eq!(client.cache().len(), 2, "users and riders stay cached");
    }

    #[tokio::test]
    async fn test_payment_status_is_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/deliveries/7/transaction"))
            .and(body_json(json!({"payment_status": "refunded"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "payment_status": "refunded"})))
            .expect(1)
            .mount(&server)
            .await;

        let result = service(http_client(&server.uri()))
            .update_payment_status(
                "7",
                UpdatePaymentStatusRequest {
                    payment_status: "refunded".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(result["payment_status"], "refunded");
    }

    #[tokio::test]
    async fn test_payment_status_failure_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/deliveries/7/transaction"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let service = DeliveryServiceImpl::new(
            http_client(&server.uri()),
            CacheConfig::default(),
            Duration::from_millis(100),
        );
        let err = service
            .update_payment_status(
                "7",
                UpdatePaymentStatusRequest {
                    payment_status: "paid".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, CourierError::Timeout(_)));
    }

    #[tokio::test]
    async fn test_invalid_payment_status_never_reaches_upstream() {
        let (client, transport) = mock_client();
        let err = service(client)
            .update_payment_status(
                "7",
                UpdatePaymentStatusRequest {
                    payment_status: "settled".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(transport.calls(), 0);
    }
}
