//! Delivery and transaction DTOs.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Payment states accepted by the upstream API.
pub const PAYMENT_STATUSES: &[&str] = &["pending", "paid", "failed", "refunded"];

/// Query string of `GET /api/deliveries`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveryQuery {
    /// Forwarded to the upstream list as `?status=`.
    pub status: Option<String>,
    #[serde(default)]
    pub refresh: bool,
}

/// Body of `PUT /api/deliveries/{id}/transaction`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdatePaymentStatusRequest {
    #[validate(custom(function = "validate_payment_status"))]
    pub payment_status: String,
}

fn validate_payment_status(value: &str) -> Result<(), ValidationError> {
    if PAYMENT_STATUSES.contains(&value) {
        Ok(())
    } else {
        let mut error = ValidationError::new("payment_status");
        error.message = Some("Must be one of pending, paid, failed, refunded".into());
        Err(error)
    }
}

/// `{id, name, email, phone}` attached to joined deliveries and
/// transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyView {
    pub id: serde_json::Value,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_payment_statuses() {
        for status in PAYMENT_STATUSES {
            let request = UpdatePaymentStatusRequest {
                payment_status: (*status).to_string(),
            };
            assert!(request.validate().is_ok(), "{}", status);
        }
    }

    #[test]
    fn test_unknown_payment_status() {
        let request = UpdatePaymentStatusRequest {
            payment_status: "settled".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
