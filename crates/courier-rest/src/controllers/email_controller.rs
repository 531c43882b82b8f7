//! Broadcast e-mail controller.

use crate::{
    responses::{ok, ApiResult},
    state::AppState,
};
use courier_core::{CourierError, CourierResult};
use courier_service::{parse_recipients, EmailMessage, SendEmailJson, SendEmailResponse};
use courier_upstream::FilePart;
use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::{header::CONTENT_TYPE, HeaderMap},
    routing::post,
    Json, Router,
};
use tracing::debug;

/// Creates the e-mail router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(send_email))
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"))
}

/// Accepts `multipart/form-data` with image attachments, or plain JSON.
async fn send_email(State(state): State<AppState>, request: Request) -> ApiResult<SendEmailResponse> {
    let message = if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, &state)
            .await
            .map_err(|e| CourierError::validation(format!("Invalid form data: {}", e.body_text())))?;
        read_form(multipart).await?
    } else {
        let Json(body) = Json::<SendEmailJson>::from_request(request, &state)
            .await
            .map_err(|e| CourierError::validation(format!("Invalid JSON: {}", e.body_text())))?;
        EmailMessage::try_from(body)?
    };

    ok(state.email_service.send(message).await?)
}

async fn read_form(mut multipart: Multipart) -> CourierResult<EmailMessage> {
    let mut recipients = Vec::new();
    let mut subject = None;
    let mut html = None;
    let mut images = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "recipients" => recipients = parse_recipients(&field.text().await.map_err(form_error)?),
            "subject" => subject = Some(field.text().await.map_err(form_error)?),
            "html" => html = Some(field.text().await.map_err(form_error)?),
            "images" | "images[]" => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(form_error)?;
                if !bytes.is_empty() {
                    images.push(FilePart {
                        field: "images".to_string(),
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            other => debug!("Ignoring form field '{}'", other),
        }
    }

    EmailMessage::new(recipients, subject, html, images)
}

fn form_error(error: axum::extract::multipart::MultipartError) -> CourierError {
    CourierError::validation(format!("Invalid form data: {}", error.body_text()))
}
