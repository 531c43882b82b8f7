//! E-mail relay implementation.

use crate::dto::{EmailMessage, SendEmailResponse};
use crate::email_service::EmailService;
use async_trait::async_trait;
use courier_core::{CourierError, CourierResult};
use courier_upstream::{ApiClient, MultipartBody, UpstreamRequest};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const SEND_PATH: &str = "/email/send";

/// Statuses meaning the mailer refused the payload shape, which a retry
/// without attachments may fix.
const PAYLOAD_REJECTED: &[u16] = &[400, 415, 422];

/// Relays broadcast e-mails to the upstream mailer.
pub struct EmailServiceImpl {
    client: Arc<ApiClient>,
    timeout: Duration,
}

impl EmailServiceImpl {
    /// Creates a new e-mail service.
    pub fn new(client: Arc<ApiClient>, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    fn multipart(message: &EmailMessage) -> CourierResult<MultipartBody> {
        let recipients = serde_json::to_string(&message.recipients)?;
        let body = MultipartBody::new()
            .text("recipients", recipients)
            .text("subject", message.subject.clone())
            .text("html", message.html.clone());

        Ok(message.images.iter().cloned().fold(body, MultipartBody::file))
    }

    async fn relay_multipart(&self, message: &EmailMessage) -> CourierResult<Value> {
        let request = UpstreamRequest::post(SEND_PATH)
            .multipart(Self::multipart(message)?)
            .timeout(self.timeout);
        self.client.send(request).await
    }

    /// Multipart relay, sent a second time after a network failure or
    /// timeout. The form is rebuilt for each attempt.
    async fn relay_multipart_with_retry(&self, message: &EmailMessage) -> CourierResult<Value> {
        match self.relay_multipart(message).await {
            Err(e) if transient(&e) => {
                warn!("E-mail relay failed ({}), retrying once", e);
                self.relay_multipart(message).await
            }
            other => other,
        }
    }

    async fn relay_json(&self, message: &EmailMessage) -> CourierResult<Value> {
        let request = UpstreamRequest::post(SEND_PATH)
            .json(message.json_body())
            .timeout(self.timeout);
        self.client.send(request).await
    }
}

fn transient(error: &CourierError) -> bool {
    matches!(error, CourierError::Network(_) | CourierError::Timeout(_))
}

fn payload_rejected(error: &CourierError) -> bool {
    error
        .upstream_status()
        .is_some_and(|status| PAYLOAD_REJECTED.contains(&status))
}

#[async_trait]
impl EmailService for EmailServiceImpl {
    async fn send(&self, message: EmailMessage) -> CourierResult<SendEmailResponse> {
        debug!(
            "Relaying e-mail '{}' to {} recipients with {} images",
            message.subject,
            message.recipients.len(),
            message.images.len()
        );

        let (result, images_dropped) = match self.relay_multipart_with_retry(&message).await {
            Ok(result) => (result, false),
            Err(e) if !message.images.is_empty() && payload_rejected(&e) => {
                warn!("Mailer rejected attachments ({}), resending without images", e);
                (self.relay_json(&message).await?, true)
            }
            Err(e) => return Err(e),
        };

        info!("E-mail relayed to {} recipients", message.recipients.len());
        Ok(SendEmailResponse {
            success: true,
            recipient_count: message.recipients.len(),
            images_dropped,
            result,
        })
    }
}
