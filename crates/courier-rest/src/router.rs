//! Main application router.

use crate::{
    controllers::{
        admin_controller, auth_controller, broadcast_controller, delivery_controller, email_controller,
        health_controller, rider_controller, system_controller, transaction_controller,
    },
    middleware::{access_middleware, logging_middleware},
    state::AppState,
};
use courier_core::{CourierError, ErrorResponse};
use courier_config::ServerConfig;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{self, AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

/// Creates the main application router.
///
/// Every route, the health probes included, passes through the access
/// middleware; the route table decides which paths need a session.
pub fn create_router(state: AppState) -> Router {
    let server_config = &state.config.server;
    let cors = create_cors_layer(server_config);
    let body_limit = server_config.max_body_size;

    let api_router = Router::new()
        .nest("/riders", rider_controller::router())
        .nest("/deliveries", delivery_controller::router())
        .nest("/transactions", transaction_controller::router())
        .nest("/admins", admin_controller::router())
        .nest("/broadcast", broadcast_controller::router())
        .nest("/send-email", email_controller::router())
        .nest("/auth", auth_controller::router())
        .merge(system_controller::router());

    let mut router = Router::new()
        .merge(health_controller::router())
        .nest("/api", api_router);

    if state.config.observability.metrics_enabled {
        router = router.route(&state.config.observability.metrics_path, get(health_controller::metrics));
    }

    let router = router
        .layer(middleware::from_fn_with_state(state.clone(), access_middleware))
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(logging_middleware))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        );

    info!("Router created with proxy, auth and ops endpoints");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
}

/// Renders a handler panic as a 500 JSON body.
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", detail);

    let body = ErrorResponse::from_error(&CourierError::internal("Internal server error"));
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
