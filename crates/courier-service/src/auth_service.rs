//! Authentication service trait definition.

use crate::dto::{LoginRequest, LoginResponse};
use async_trait::async_trait;
use courier_core::CourierResult;
use courier_security::SessionClaims;

/// Authentication service trait.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Checks credentials with the upstream API and issues a session.
    async fn login(&self, request: LoginRequest) -> CourierResult<LoginResponse>;

    /// Resolves a session token to its claims.
    fn validate_session(&self, token: &str) -> CourierResult<SessionClaims>;
}
