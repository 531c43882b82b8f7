//! Cached client for the external delivery API.

use crate::{HttpTransport, MockTransport, Transport, UpstreamRequest};
use courier_cache::{keys, ResponseCache};
use courier_config::{CacheConfig, UpstreamConfig};
use courier_core::CourierResult;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Per-call cache options.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// How old a cached body may be.
    pub ttl: Duration,
    /// Skip the lookup; the fresh result is still stored.
    pub bypass_cache: bool,
}

impl FetchOptions {
    #[must_use]
    pub const fn ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            bypass_cache: false,
        }
    }

    #[must_use]
    pub const fn bypass(mut self, bypass: bool) -> Self {
        self.bypass_cache = bypass;
        self
    }
}

/// Client over a [`Transport`] with the response cache in front of reads.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    cache: Arc<ResponseCache>,
    base_url: String,
    cache_enabled: bool,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("cache_enabled", &self.cache_enabled)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client. `base_url` is used for request URLs and cache keys.
    pub fn new(transport: Arc<dyn Transport>, cache: Arc<ResponseCache>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            cache,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache_enabled: true,
        }
    }

    /// Turns every cached read into a bypass when `enabled` is false.
    #[must_use]
    pub fn with_cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Builds the client from configuration, picking the fixture transport
    /// when `upstream.mock` is set.
    pub fn from_config(
        upstream: &UpstreamConfig,
        cache_config: &CacheConfig,
        cache: Arc<ResponseCache>,
    ) -> CourierResult<Self> {
        let transport: Arc<dyn Transport> = if upstream.mock {
            info!("MOCK_API enabled, serving fixtures instead of {}", upstream.base_url);
            Arc::new(MockTransport::new())
        } else {
            Arc::new(HttpTransport::new(upstream.admin_key.clone(), upstream.request_timeout())?)
        };

        Ok(Self::new(transport, cache, upstream.base_url.clone()).with_cache_enabled(cache_config.enabled))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// Returns the cached body for `request` if fresh, else performs the call
    /// and stores the result.
    ///
    /// Errors are never cached.
    pub async fn fetch_with_cache(&self, request: UpstreamRequest, options: FetchOptions) -> CourierResult<Value> {
        let url = request.url(&self.base_url);
        let key = keys::request_key(&url, request.body.as_json());

        if self.cache_enabled && !options.bypass_cache {
            if let Some(data) = self.cache.get(&key, options.ttl) {
                return Ok(data);
            }
        }

        let data = self.transport.execute(&url, &request).await?;
        if self.cache_enabled {
            self.cache.set(key, data.clone());
        }
        Ok(data)
    }

    /// Performs the call without touching the cache.
    pub async fn send(&self, request: UpstreamRequest) -> CourierResult<Value> {
        let url = request.url(&self.base_url);
        self.transport.execute(&url, &request).await
    }

    /// The cache key prefix shared by every request for `path`.
    #[must_use]
    pub fn resource_prefix(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Drops every cached entry under each resource path. Returns the total
    /// number of entries removed.
    pub fn invalidate(&self, paths: &[&str]) -> usize {
        let removed = paths
            .iter()
            .map(|path| self.cache.clear_by_prefix(&self.resource_prefix(path)))
            .sum();
        debug!("Invalidated {:?}: {} entries", paths, removed);
        removed
    }
}
