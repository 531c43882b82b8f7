//! Authentication service implementation.

use crate::auth_service::AuthService;
use crate::dto::{LoginRequest, LoginResponse};
use crate::mappers::{display_name, id_key};
use async_trait::async_trait;
use courier_core::{CourierError, CourierResult, ValidateExt};
use courier_security::{SessionClaims, SessionTokenProvider};
use courier_upstream::{ApiClient, UpstreamRequest};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

const LOGIN_PATH: &str = "/admin/login";

/// Authentication service: the upstream checks credentials, this service
/// issues the session.
pub struct AuthServiceImpl {
    client: Arc<ApiClient>,
    token_provider: Arc<SessionTokenProvider>,
}

impl AuthServiceImpl {
    /// Creates a new auth service.
    pub fn new(client: Arc<ApiClient>, token_provider: Arc<SessionTokenProvider>) -> Self {
        Self {
            client,
            token_provider,
        }
    }
}

/// The admin record in a login answer, which is either `{admin: {...}}` or
/// the record itself.
fn admin_record(body: Value) -> Value {
    match body {
        Value::Object(mut object) if object.contains_key("admin") => object.remove("admin").unwrap_or(Value::Null),
        other => other,
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, request: LoginRequest) -> CourierResult<LoginResponse> {
        request.validate_request()?;
        debug!("Login attempt for {}", request.email);

        let body = self
            .client
            .send(UpstreamRequest::post(LOGIN_PATH).json(json!({
                "email": request.email,
                "password": request.password,
            })))
            .await
            .map_err(|e| match e.upstream_status() {
                Some(400 | 401 | 403 | 404) => {
                    warn!("Login rejected for {}", request.email);
                    CourierError::InvalidCredentials
                }
                _ => e,
            })?;

        let admin = admin_record(body);
        let id = admin
            .get("id")
            .and_then(id_key)
            .ok_or_else(|| CourierError::internal("Login response carries no admin id"))?;
        let role = admin
            .get("role")
            .and_then(Value::as_str)
            .filter(|r| !r.is_empty())
            .ok_or_else(|| CourierError::forbidden("Account has no role"))?;
        let email = admin
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or(request.email.as_str());
        let name = display_name(&admin).unwrap_or_else(|| email.to_string());

        let session = self.token_provider.issue(&id, email, &name, role)?;

        info!("Admin {} logged in as {}", id, role);
        Ok(LoginResponse {
            admin,
            token: session.token,
            expires_at: session.expires_at,
        })
    }

    fn validate_session(&self, token: &str) -> CourierResult<SessionClaims> {
        self.token_provider.validate(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::test_support::{http_client, mock_client};
    use courier_config::SecurityConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider() -> Arc<SessionTokenProvider> {
        Arc::new(SessionTokenProvider::new(Arc::new(SecurityConfig {
            session_secret: "test-secret-key-for-testing-only-0123".to_string(),
            ..Default::default()
        })))
    }

    fn login(email: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_session() {
        let (client, _) = mock_client();
        let service = AuthServiceImpl::new(client, provider());

        let response = service.login(login("root@courier.test")).await.unwrap();
        let claims = service.validate_session(&response.token).unwrap();

        assert_eq!(response.admin["name"], "Root Admin");
        assert_eq!(claims.role, "super_admin");
        assert_eq!(claims.sub, "1");
        assert_eq!(claims.exp, response.expires_at.timestamp());
    }

    #[tokio::test]
    async fn test_rejected_credentials() {
        let (client, _) = mock_client();
        let service = AuthServiceImpl::new(client, provider());

        let err = service.login(login("nobody@courier.test")).await.unwrap_err();

        assert!(matches!(err, CourierError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_bare_admin_record_accepted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "a-9", "first_name": "Fin", "last_name": "Lead", "role": "finance"
            })))
            .mount(&server)
            .await;

        let service = AuthServiceImpl::new(http_client(&server.uri()), provider());
        let response = service.login(login("fin@courier.test")).await.unwrap();
        let claims = service.validate_session(&response.token).unwrap();

        assert_eq!(claims.sub, "a-9");
        assert_eq!(claims.name, "Fin Lead");
        assert_eq!(claims.email, "fin@courier.test");
    }

    #[tokio::test]
    async fn test_account_without_role_is_forbidden() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"admin": {"id": 3}})))
            .mount(&server)
            .await;

        let service = AuthServiceImpl::new(http_client(&server.uri()), provider());
        let err = service.login(login("x@courier.test")).await.unwrap_err();

        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_upstream_outage_is_not_a_credential_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(LOGIN_PATH))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let service = AuthServiceImpl::new(http_client(&server.uri()), provider());
        let err = service.login(login("x@courier.test")).await.unwrap_err();

        assert_eq!(err.upstream_status(), Some(503));
    }
}
