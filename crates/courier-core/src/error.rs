//! Unified error types for all layers of the gateway.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for Courier Console.
///
/// Covers local validation, session/role checks, failures reported by the
/// upstream delivery API and transport problems reaching it.
#[derive(Error, Debug)]
pub enum CourierError {
    // ============ Request Errors ============
    /// Resource not found
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g., duplicate entry)
    #[error("Conflict: {0}")]
    Conflict(String),

    // ============ Authentication/Authorization Errors ============
    /// Missing session
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Role not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Invalid session token
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Session token expired
    #[error("Token expired")]
    TokenExpired,

    /// Credentials rejected by the upstream API
    #[error("Invalid credentials")]
    InvalidCredentials,

    // ============ Upstream Errors ============
    /// Non-2xx response from the upstream API.
    #[error("Upstream request failed: {status} {status_text}")]
    Upstream {
        status: u16,
        status_text: String,
        details: Option<Value>,
    },

    /// The upstream API could not be reached.
    #[error("Upstream unreachable: {0}")]
    Network(String),

    /// The upstream body could not be decoded.
    #[error("Upstream response could not be decoded: {0}")]
    Decode(String),

    /// Timeout error
    #[error("Operation timed out: {0}")]
    Timeout(String),

    // ============ Infrastructure Errors ============
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CourierError {
    /// Returns the HTTP status code for this error.
    ///
    /// Upstream failures mirror the upstream status when it is an error
    /// status, and map to 502 otherwise.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Unauthorized(_) | Self::InvalidToken(_) | Self::TokenExpired | Self::InvalidCredentials => 401,
            Self::Forbidden(_) => 403,
            Self::Upstream { status, .. } => {
                if *status >= 400 && *status <= 599 {
                    *status
                } else {
                    502
                }
            }
            Self::Network(_) | Self::Decode(_) => 502,
            Self::Timeout(_) => 503,
            Self::Configuration(_) | Self::Internal(_) | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::Network(_) => "UPSTREAM_UNREACHABLE",
            Self::Decode(_) => "UPSTREAM_DECODE_ERROR",
            Self::Timeout(_) => "TIMEOUT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a forbidden error.
    #[must_use]
    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::Forbidden(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Creates an upstream error from a status line and optional body.
    #[must_use]
    pub fn upstream(status: u16, status_text: impl Into<String>, details: Option<Value>) -> Self {
        Self::Upstream {
            status,
            status_text: status_text.into(),
            details,
        }
    }

    /// Upstream body attached to this error, if any.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        match self {
            Self::Upstream { details, .. } => details.as_ref(),
            _ => None,
        }
    }

    /// Status reported by the upstream API, if this error came from one.
    #[must_use]
    pub const fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CourierError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Serializable error body returned by every route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error code
    pub code: String,
    /// Upstream body or field-level errors
    pub details: Option<Value>,
}

/// Field-level validation error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
}

impl ErrorResponse {
    /// Creates a new error response from a `CourierError`.
    #[must_use]
    pub fn from_error(error: &CourierError) -> Self {
        Self {
            error: error.to_string(),
            code: error.error_code().to_string(),
            details: error.details().cloned(),
        }
    }

    /// Sets field-level validation errors.
    #[must_use]
    pub fn with_field_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.details = serde_json::to_value(errors).ok();
        self
    }
}

impl From<&CourierError> for ErrorResponse {
    fn from(error: &CourierError) -> Self {
        Self::from_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(CourierError::not_found("Rider", 1).status_code(), 404);
        assert_eq!(CourierError::validation("missing ids").status_code(), 400);
        assert_eq!(CourierError::unauthorized("no session").status_code(), 401);
        assert_eq!(CourierError::forbidden("role").status_code(), 403);
        assert_eq!(CourierError::TokenExpired.status_code(), 401);
        assert_eq!(CourierError::Timeout("slow".to_string()).status_code(), 503);
        assert_eq!(CourierError::Network("refused".to_string()).status_code(), 502);
        assert_eq!(CourierError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_upstream_status_is_mirrored() {
        assert_eq!(CourierError::upstream(404, "Not Found", None).status_code(), 404);
        assert_eq!(CourierError::upstream(422, "Unprocessable Entity", None).status_code(), 422);
        assert_eq!(CourierError::upstream(503, "Service Unavailable", None).status_code(), 503);
    }

    #[test]
    fn test_upstream_non_error_status_maps_to_bad_gateway() {
        assert_eq!(CourierError::upstream(302, "Found", None).status_code(), 502);
        assert_eq!(CourierError::upstream(0, "", None).status_code(), 502);
    }

    #[test]
    fn test_upstream_message_contains_status() {
        let err = CourierError::upstream(500, "Internal Server Error", None);
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("Internal Server Error"));
        assert_eq!(err.upstream_status(), Some(500));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CourierError::not_found("Rider", 1).error_code(), "NOT_FOUND");
        assert_eq!(CourierError::validation("x").error_code(), "VALIDATION_ERROR");
        assert_eq!(CourierError::upstream(400, "Bad Request", None).error_code(), "UPSTREAM_ERROR");
        assert_eq!(CourierError::Timeout("t".to_string()).error_code(), "TIMEOUT");
        assert_eq!(CourierError::InvalidCredentials.error_code(), "INVALID_CREDENTIALS");
    }

    #[test]
    fn test_error_response_carries_upstream_details() {
        let err = CourierError::upstream(409, "Conflict", Some(json!({"detail": "already active"})));
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.code, "UPSTREAM_ERROR");
        assert_eq!(response.details, Some(json!({"detail": "already active"})));
    }

    #[test]
    fn test_error_response_serializes_null_details() {
        let response = ErrorResponse::from(&CourierError::validation("ids must not be empty"));
        let body = serde_json::to_value(&response).unwrap();
        assert!(body["error"].as_str().unwrap().contains("ids must not be empty"));
        assert!(body["details"].is_null());
    }

    #[test]
    fn test_error_response_with_field_errors() {
        let response = ErrorResponse::from(&CourierError::validation("bad input")).with_field_errors(vec![FieldError {
            field: "email".to_string(),
            message: "Invalid email".to_string(),
            code: "email".to_string(),
        }]);
        let details = response.details.unwrap();
        assert_eq!(details[0]["field"], "email");
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let err: CourierError = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err().into();
        assert_eq!(err.error_code(), "UPSTREAM_DECODE_ERROR");
        assert_eq!(err.status_code(), 502);
    }
}
