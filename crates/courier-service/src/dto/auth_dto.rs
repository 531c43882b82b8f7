//! Authentication-related DTOs.

use chrono::{DateTime, Utc};
use courier_security::SessionClaims;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Login request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Successful login: the upstream admin record and a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub admin: Value,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Current session as exposed to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub expires_at: DateTime<Utc>,
}

impl From<&SessionClaims> for SessionResponse {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            id: claims.sub.clone(),
            email: claims.email.clone(),
            name: claims.name.clone(),
            role: claims.role.clone(),
            expires_at: claims.expires_at(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_valid() {
        let request = LoginRequest {
            email: "root@courier.test".to_string(),
            password: "pw".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_login_request_missing_password() {
        let request = LoginRequest {
            email: "root@courier.test".to_string(),
            password: String::new(),
        };
        assert!(request.validate().is_err());
    }
}
