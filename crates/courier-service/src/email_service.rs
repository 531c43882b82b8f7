//! E-mail relay service trait definition.

use crate::dto::{EmailMessage, SendEmailResponse};
use async_trait::async_trait;
use courier_core::CourierResult;

/// E-mail relay service trait.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Relays a broadcast e-mail to the upstream mailer.
    async fn send(&self, message: EmailMessage) -> CourierResult<SendEmailResponse>;
}
