//! Broadcast e-mail DTOs.

use courier_core::{CourierError, CourierResult};
use courier_upstream::FilePart;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Recipients as sent by the dashboard: a JSON array or a comma list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecipientsField {
    List(Vec<String>),
    Text(String),
}

impl RecipientsField {
    #[must_use]
    pub fn into_list(self) -> Vec<String> {
        match self {
            Self::List(list) => clean(list),
            Self::Text(text) => parse_recipients(&text),
        }
    }
}

impl Default for RecipientsField {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

/// JSON body of `POST /api/send-email`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendEmailJson {
    #[serde(default)]
    pub recipients: RecipientsField,
    pub subject: Option<String>,
    pub html: Option<String>,
}

/// Parses a recipients form field: a JSON array of strings, else a comma
/// separated list.
#[must_use]
pub fn parse_recipients(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        if let Ok(list) = serde_json::from_str::<Vec<String>>(trimmed) {
            return clean(list);
        }
    }
    clean(trimmed.split(',').map(str::to_string).collect())
}

fn clean(list: Vec<String>) -> Vec<String> {
    list.into_iter()
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .collect()
}

/// A validated broadcast e-mail ready to relay.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub recipients: Vec<String>,
    pub subject: String,
    pub html: String,
    pub images: Vec<FilePart>,
}

impl EmailMessage {
    /// Builds a message; recipients and subject are required.
    pub fn new(recipients: Vec<String>, subject: Option<String>, html: Option<String>, images: Vec<FilePart>) -> CourierResult<Self> {
        if recipients.is_empty() {
            return Err(CourierError::validation("At least one recipient is required"));
        }
        let subject = subject.map(|s| s.trim().to_string()).unwrap_or_default();
        if subject.is_empty() {
            return Err(CourierError::validation("Subject is required"));
        }

        Ok(Self {
            recipients,
            subject,
            html: html.unwrap_or_default(),
            images,
        })
    }

    /// The message without attachments, as a JSON body.
    #[must_use]
    pub fn json_body(&self) -> Value {
        serde_json::json!({
            "recipients": self.recipients,
            "subject": self.subject,
            "html": self.html,
        })
    }
}

impl TryFrom<SendEmailJson> for EmailMessage {
    type Error = CourierError;

    fn try_from(body: SendEmailJson) -> CourierResult<Self> {
        Self::new(body.recipients.into_list(), body.subject, body.html, Vec::new())
    }
}

/// Where a broadcast recipient came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientKind {
    User,
    Rider,
}

/// One entry of `GET /api/broadcast/recipients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastRecipient {
    pub id: Value,
    pub name: String,
    pub email: String,
    pub kind: RecipientKind,
}

/// Result of a relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub success: bool,
    pub recipient_count: usize,
    /// Set when the upstream rejected the attachments and the message was
    /// resent without them.
    pub images_dropped: bool,
    pub result: Value,
}
