//! Application builder.

use courier_cache::ResponseCache;
use courier_config::AppConfig;
use courier_core::{CourierError, CourierResult};
use courier_rest::{create_router, AppState};
use courier_upstream::ApiClient;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
    metrics: Option<PrometheusHandle>,
}

impl AppBuilder {
    /// Creates a new application builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: None,
            metrics: None,
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Serves this handle's output at the metrics path.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Builds the shared state: one response cache, one upstream client.
    pub fn build_state(&self) -> CourierResult<AppState> {
        let config = Arc::new(self.config.clone().unwrap_or_default());
        let cache = Arc::new(ResponseCache::new());
        let client = ApiClient::from_config(&config.upstream, &config.cache, cache)?;

        info!(
            base_url = %client.base_url(),
            mock = config.upstream.mock,
            cache_enabled = config.cache.enabled,
            "Upstream client ready"
        );

        let state = AppState::from_config(config, Arc::new(client));
        Ok(match &self.metrics {
            Some(handle) => state.with_metrics(handle.clone()),
            None => state,
        })
    }

    /// Builds the router.
    pub fn build(&self) -> CourierResult<axum::Router> {
        Ok(create_router(self.build_state()?))
    }

    /// Binds the configured address and serves until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> CourierResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.config.as_ref().map(|c| c.server.addr()).unwrap_or_else(|| AppConfig::default().server.addr());
        let router = self.build()?;

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| CourierError::Internal(format!("Failed to bind {}: {}", addr, e)))?;
        info!("Listening on http://{}", addr);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| CourierError::Internal(format!("Server error: {}", e)))?;

        info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
