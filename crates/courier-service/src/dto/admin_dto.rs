//! Admin account DTOs.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Roles an admin account may hold.
pub const ADMIN_ROLES: &[&str] = &["super_admin", "admin", "operations", "finance", "support"];

fn validate_role(value: &str) -> Result<(), ValidationError> {
    if ADMIN_ROLES.contains(&value) {
        Ok(())
    } else {
        let mut error = ValidationError::new("role");
        error.message = Some(format!("Unknown role '{}'", value).into());
        Err(error)
    }
}

/// Request to create an admin account.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(length(min = 1, max = 128, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(custom(function = "validate_role"))]
    pub role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Request to change an admin's role.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangeRoleRequest {
    #[validate(custom(function = "validate_role"))]
    pub role: String,
}

/// Partial profile update; at least one field must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_not_empty"))]
pub struct UpdateAdminRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 128))]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 32))]
    pub phone: Option<String>,
}

fn validate_not_empty(request: &UpdateAdminRequest) -> Result<(), ValidationError> {
    if request.name.is_none() && request.email.is_none() && request.phone.is_none() {
        let mut error = ValidationError::new("empty_update");
        error.message = Some("Provide at least one of name, email, phone".into());
        return Err(error);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_admin_valid() {
        let request = CreateAdminRequest {
            name: "Ops".to_string(),
            email: "ops@courier.test".to_string(),
            password: "correct-horse".to_string(),
            role: "operations".to_string(),
            phone: None,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_create_admin_rejects_unknown_role_and_short_password() {
        let request = CreateAdminRequest {
            name: "Ops".to_string(),
            email: "ops@courier.test".to_string(),
            password: "short".to_string(),
            role: "owner".to_string(),
            phone: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
        assert!(errors.field_errors().contains_key("role"));
    }

    #[test]
    fn test_update_requires_a_field() {
        assert!(UpdateAdminRequest::default().validate().is_err());

        let request: UpdateAdminRequest = serde_json::from_value(json!({"phone": "+233"})).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let request = UpdateAdminRequest {
            name: Some("New".to_string()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({"name": "New"}));
    }
}
