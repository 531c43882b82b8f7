//! Application state for Axum handlers.

use courier_config::AppConfig;
use courier_security::{RouteAccessPolicy, SessionTokenProvider};
use courier_service::{
    AdminService, AdminServiceImpl, AuthService, AuthServiceImpl, BroadcastService, BroadcastServiceImpl,
    DeliveryService, DeliveryServiceImpl, EmailService, EmailServiceImpl, RiderService, RiderServiceImpl,
    StatusService, StatusServiceImpl, TransactionService, TransactionServiceImpl,
};
use courier_upstream::ApiClient;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub rider_service: Arc<dyn RiderService>,
    pub delivery_service: Arc<dyn DeliveryService>,
    pub transaction_service: Arc<dyn TransactionService>,
    pub admin_service: Arc<dyn AdminService>,
    pub broadcast_service: Arc<dyn BroadcastService>,
    pub email_service: Arc<dyn EmailService>,
    pub auth_service: Arc<dyn AuthService>,
    pub status_service: Arc<dyn StatusService>,
    /// Upstream client; owns the response cache.
    pub client: Arc<ApiClient>,
    pub token_provider: Arc<SessionTokenProvider>,
    pub access_policy: Arc<RouteAccessPolicy>,
    pub config: Arc<AppConfig>,
    /// Present when the Prometheus recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Wires every service against one upstream client.
    #[must_use]
    pub fn from_config(config: Arc<AppConfig>, client: Arc<ApiClient>) -> Self {
        let upstream = &config.upstream;
        let cache = &config.cache;

        let token_provider = Arc::new(SessionTokenProvider::new(Arc::new(config.security.clone())));
        let access_policy = Arc::new(RouteAccessPolicy::new(
            &config.access,
            &config.security,
            &config.observability.metrics_path,
        ));

        Self {
            rider_service: Arc::new(RiderServiceImpl::new(client.clone(), cache.clone())),
            delivery_service: Arc::new(DeliveryServiceImpl::new(
                client.clone(),
                cache.clone(),
                upstream.transaction_timeout(),
            )),
            transaction_service: Arc::new(TransactionServiceImpl::new(client.clone(), cache.clone())),
            admin_service: Arc::new(AdminServiceImpl::new(client.clone(), cache.clone())),
            broadcast_service: Arc::new(BroadcastServiceImpl::new(client.clone(), cache.clone())),
            email_service: Arc::new(EmailServiceImpl::new(client.clone(), upstream.email_timeout())),
            auth_service: Arc::new(AuthServiceImpl::new(client.clone(), token_provider.clone())),
            status_service: Arc::new(StatusServiceImpl::new(client.clone(), upstream.status_probe_timeout())),
            client,
            token_provider,
            access_policy,
            config,
            metrics: None,
        }
    }

    /// Attaches the Prometheus handle served at the metrics path.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
