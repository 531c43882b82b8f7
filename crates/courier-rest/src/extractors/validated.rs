//! Validated JSON extractor.
//!
//! Deserializes the body and runs its `validator` rules before the handler
//! sees it. Both malformed JSON and rule failures answer 400, the latter
//! with field-level details, so no invalid body ever reaches the upstream.

use courier_core::{field_errors, summarize, CourierError, ErrorResponse};
use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

/// JSON extractor that validates the deserialized value.
///
/// ```ignore
/// async fn change_role(ValidatedJson(request): ValidatedJson<ChangeRoleRequest>) {
///     // request.role is one of the known roles here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Rejection type for validated JSON extraction.
pub enum ValidatedJsonRejection {
    /// Body is not JSON or does not match the target type.
    JsonError(JsonRejection),
    /// Rule failures.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let body = match self {
            Self::JsonError(rejection) => ErrorResponse {
                error: format!("Invalid JSON: {}", rejection.body_text()),
                code: "INVALID_JSON".to_string(),
                details: None,
            },
            Self::ValidationError(errors) => {
                let fields = field_errors(&errors);
                let error = CourierError::validation(summarize(&fields));
                ErrorResponse::from_error(&error).with_field_errors(fields)
            }
        };

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}
