//! Session token provider for issuing and validating tokens.

use super::SessionClaims;
use chrono::{DateTime, Duration, Utc};
use courier_config::SecurityConfig;
use courier_core::{CourierError, CourierResult};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, warn};

/// A signed session token and its expiry.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub claims: SessionClaims,
}

/// Issues and validates HS256 session tokens.
#[derive(Clone)]
pub struct SessionTokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl SessionTokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.session_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.session_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.validate_exp = true;
        validation.validate_aud = false;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Name of the cookie that carries the token.
    #[must_use]
    pub fn cookie_name(&self) -> &str {
        &self.config.session_cookie
    }

    #[must_use]
    pub fn config(&self) -> &SecurityConfig {
        &self.config
    }

    /// Issues a session token for an authenticated admin.
    pub fn issue(&self, sub: &str, email: &str, name: &str, role: &str) -> CourierResult<IssuedSession> {
        let ttl = i64::try_from(self.config.session_ttl_secs).unwrap_or(i64::MAX);
        let expires_at = Utc::now() + Duration::seconds(ttl);

        let claims = SessionClaims::new(
            sub.to_string(),
            email.to_string(),
            name.to_string(),
            role.to_string(),
            self.config.issuer.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| CourierError::Internal(format!("Failed to issue session token: {}", e)))?;

        debug!("Issued session token for admin {} ({})", sub, role);
        Ok(IssuedSession {
            token,
            expires_at,
            claims,
        })
    }

    /// Validates a token and returns the claims.
    pub fn validate(&self, token: &str) -> CourierResult<SessionClaims> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            warn!("Session token rejected: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => CourierError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken | jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    CourierError::InvalidToken("Invalid token signature".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    CourierError::InvalidToken("Invalid token issuer".to_string())
                }
                _ => CourierError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for SessionTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokenProvider")
            .field("issuer", &self.config.issuer)
            .field("cookie", &self.config.session_cookie)
            .finish_non_exhaustive()
    }
}
