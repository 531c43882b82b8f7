//! Shared fixtures for service tests.

use courier_cache::ResponseCache;
use courier_upstream::{ApiClient, HttpTransport, MockTransport};
use std::sync::Arc;
use std::time::Duration;

pub const BASE_URL: &str = "http://api.local";

/// Client over the built-in fixtures, plus the transport to count calls.
pub fn mock_client() -> (Arc<ApiClient>, Arc<MockTransport>) {
    let transport = Arc::new(MockTransport::new());
    let client = ApiClient::new(transport.clone(), Arc::new(ResponseCache::new()), BASE_URL);
    (Arc::new(client), transport)
}

/// Client talking HTTP to a wiremock server.
pub fn http_client(base_url: &str) -> Arc<ApiClient> {
    let transport = HttpTransport::new("admin-secret", Duration::from_secs(5)).unwrap();
    Arc::new(ApiClient::new(Arc::new(transport), Arc::new(ResponseCache::new()), base_url))
}
