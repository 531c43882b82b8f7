//! Session token claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by a dashboard session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (upstream admin ID).
    pub sub: String,

    /// Admin's email.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Admin role as reported by the upstream API.
    pub role: String,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,

    /// Issuer.
    pub iss: String,

    /// Token ID.
    pub jti: String,
}

impl SessionClaims {
    /// Creates claims for a freshly authenticated admin.
    #[must_use]
    pub fn new(
        sub: String,
        email: String,
        name: String,
        role: String,
        issuer: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub,
            email,
            name,
            role,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer,
            jti: Uuid::now_v7().to_string(),
        }
    }

    /// Checks if the token is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Returns the expiration time.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks the role against an allow-list.
    #[must_use]
    pub fn has_any_role(&self, allowed: &[String]) -> bool {
        allowed.iter().any(|role| role == &self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(role: &str, expires_at: DateTime<Utc>) -> SessionClaims {
        SessionClaims::new(
            "7".to_string(),
            "ops@courier.test".to_string(),
            "Ops Lead".to_string(),
            role.to_string(),
            "courier-console".to_string(),
            expires_at,
        )
    }

    #[test]
    fn test_new_claims_are_live() {
        let claims = claims("operations", Utc::now() + Duration::hours(1));
        assert!(!claims.is_expired());
        assert_eq!(claims.expires_at().timestamp(), claims.exp);
    }

    #[test]
    fn test_past_expiry_is_expired() {
        let claims = claims("operations", Utc::now() - Duration::minutes(5));
        assert!(claims.is_expired());
    }

    #[test]
    fn test_has_any_role() {
        let claims = claims("finance", Utc::now() + Duration::hours(1));
        let allowed = vec!["super_admin".to_string(), "finance".to_string()];

        assert!(claims.has_any_role(&allowed));
        assert!(!claims.has_any_role(&["super_admin".to_string()]));
        assert!(!claims.has_any_role(&[]));
    }
}
