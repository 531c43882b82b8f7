//! Upstream reachability probe.

use crate::status_service::{StatusService, UpstreamStatus};
use async_trait::async_trait;
use courier_core::CourierError;
use courier_upstream::{ApiClient, UpstreamRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Probes the upstream base URL.
pub struct StatusServiceImpl {
    client: Arc<ApiClient>,
    timeout: Duration,
}

impl StatusServiceImpl {
    /// Creates a new status service.
    pub fn new(client: Arc<ApiClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl StatusService for StatusServiceImpl {
    async fn probe(&self) -> UpstreamStatus {
        let started = Instant::now();
        let result = self.client.send(UpstreamRequest::get("/").timeout(self.timeout)).await;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        // Any HTTP answer means the API is up, including error statuses
        // and bodies that are not JSON.
        let online = match result {
            Ok(_) | Err(CourierError::Upstream { .. } | CourierError::Decode(_)) => true,
            Err(e) => {
                warn!("Upstream probe failed: {}", e);
                false
            }
        };

        debug!("Upstream online: {}, latency {}ms", online, latency_ms);
        UpstreamStatus { online, latency_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::test_support::{http_client, mock_client};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_reachable_api_is_online() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let status = StatusServiceImpl::new(http_client(&server.uri()), Duration::from_secs(5))
            .probe()
            .await;

        assert!(status.online);
    }

    #[tokio::test]
    async fn test_html_landing_page_is_online() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("<html>API</html>", "text/html"))
            .mount(&server)
            .await;

        let status = StatusServiceImpl::new(http_client(&server.uri()), Duration::from_secs(5))
            .probe()
            .await;

        assert!(status.online);
    }

    #[tokio::test]
    async fn test_slow_api_is_offline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let status = StatusServiceImpl::new(http_client(&server.uri()), Duration::from_millis(100))
            .probe()
            .await;

        assert!(!status.online);
    }

    #[tokio::test]
    async fn test_unreachable_api_is_offline() {
        let status = StatusServiceImpl::new(http_client("http://127.0.0.1:9"), Duration::from_secs(1))
            .probe()
            .await;

        assert!(!status.online);
    }

    #[tokio::test]
    async fn test_mock_api_is_online() {
        let (client, _) = mock_client();
        assert!(StatusServiceImpl::new(client, Duration::from_secs(1)).probe().await.online);
    }
}
