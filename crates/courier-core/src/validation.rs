//! Validation utilities.

use crate::{CourierError, FieldError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `CourierError` on failure.
    fn validate_request(&self) -> Result<(), CourierError> {
        self.validate().map_err(|e| CourierError::Validation(summarize(&field_errors(&e))))
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator` errors into field errors.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();
    fields.sort_by(|a, b| a.field.cmp(&b.field));
    fields
}

/// Joins field errors into one message.
#[must_use]
pub fn summarize(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checks that `id` can be placed into an upstream URL as exactly one
/// path segment.
pub fn ensure_path_segment(id: &str) -> Result<&str, CourierError> {
    rules::path_segment(id).map_err(|_| CourierError::validation(format!("Invalid resource id '{}'", id)))?;
    Ok(id)
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Rejects empty ids, `.`/`..` and anything carrying a path separator,
    /// query, fragment or percent escape.
    pub fn path_segment(value: &str) -> Result<(), ValidationError> {
        let unsafe_char = |c: char| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_control();
        if value.is_empty() || value == "." || value == ".." || value.chars().any(unsafe_char) {
            let mut error = ValidationError::new("path_segment");
            error.message = Some(format!("Invalid resource id '{}'", value).into());
            return Err(error);
        }
        Ok(())
    }

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "Subject is required"))]
        subject: String,
        #[validate(email(message = "Invalid email address"))]
        email: String,
    }

    #[test]
    fn test_valid_passes() {
        let form = Form {
            subject: "Hi".to_string(),
            email: "a@b.co".to_string(),
        };
        assert!(form.validate_request().is_ok());
    }

    #[test]
    fn test_errors_are_summarized_by_field() {
        let form = Form {
            subject: String::new(),
            email: "nope".to_string(),
        };
        let err = form.validate_request().unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.to_string(),
            "Validation error: email: Invalid email address; subject: Subject is required"
        );
    }

    #[test]
    fn test_not_blank() {
        assert!(rules::not_blank("x").is_ok());
        assert!(rules::not_blank("  ").is_err());
    }

    #[test]
    fn test_path_segment() {
        for id in ["7", "rider-9", "a.b", "A_1"] {
            assert_eq!(ensure_path_segment(id).unwrap(), id);
        }
        for id in ["", ".", "..", "../admins", "1/role", "a\\b", "1?x=1", "1#f", "..%2Fadmins", "1\n"] {
            let err = ensure_path_segment(id).unwrap_err();
            assert_eq!(err.status_code(), 400, "{:?} must be rejected", id);
        }
    }
}
