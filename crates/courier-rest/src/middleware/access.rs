//! Role-gated access middleware.

use crate::{extractors::session_token, responses::AppError, state::AppState};
use courier_core::CourierError;
use courier_security::AccessDecision;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;
use url::form_urlencoded;

/// Resolves the session and applies the route table.
///
/// Valid claims are stored in the request extensions for the `Session`
/// extractor. An invalid or expired token counts as no session. API paths
/// answer 401/403 JSON; page paths are redirected to the login or
/// unauthorized page.
pub async fn access_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = session_token(request.headers(), state.token_provider.cookie_name())
        .and_then(|token| match state.auth_service.validate_session(&token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!("Ignoring session token: {}", e);
                None
            }
        });

    let path = request.uri().path().to_string();
    let decision = state.access_policy.evaluate(&path, claims.as_ref());

    if let Some(claims) = claims {
        request.extensions_mut().insert(claims);
    }

    let is_api = path == "/api" || path.starts_with("/api/");
    let security = &state.config.security;

    match decision {
        AccessDecision::Public | AccessDecision::Allow => next.run(request).await,
        AccessDecision::Login if is_api => {
            AppError(CourierError::unauthorized("Authentication required")).into_response()
        }
        AccessDecision::Login => {
            let callback = request
                .uri()
                .path_and_query()
                .map_or(path.as_str(), |pq| pq.as_str());
            Redirect::temporary(&login_redirect(&security.login_path, callback)).into_response()
        }
        AccessDecision::Denied { prefix, role } => {
            debug!(prefix = %prefix, role = %role, "Role not allowed");
            if is_api {
                AppError(CourierError::forbidden(format!("Role '{}' may not access '{}'", role, prefix)))
                    .into_response()
            } else {
                Redirect::temporary(&security.unauthorized_path).into_response()
            }
        }
    }
}

/// `login_path?callbackUrl=<url-encoded target>`
#[must_use]
pub fn login_redirect(login_path: &str, callback: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(callback.as_bytes()).collect();
    format!("{}?callbackUrl={}", login_path, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_encodes_callback() {
        assert_eq!(
            login_redirect("/login", "/deliveries?status=paid"),
            "/login?callbackUrl=%2Fdeliveries%3Fstatus%3Dpaid"
        );
    }
}
