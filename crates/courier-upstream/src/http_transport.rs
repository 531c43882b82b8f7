//! reqwest-backed transport.

use crate::timeout::with_timeout;
use crate::{RequestBody, Transport, UpstreamRequest, ADMIN_KEY_HEADER};
use async_trait::async_trait;
use courier_core::{CourierError, CourierResult};
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP transport to the external delivery API.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    admin_key: String,
    default_timeout: Duration,
}

impl HttpTransport {
    /// Creates a transport with a pooled client.
    pub fn new(admin_key: impl Into<String>, default_timeout: Duration) -> CourierResult<Self> {
        let client = Client::builder()
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(concat!("courier-console/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CourierError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, admin_key, default_timeout))
    }

    /// Creates a transport around an existing client.
    #[must_use]
    pub fn with_client(client: Client, admin_key: impl Into<String>, default_timeout: Duration) -> Self {
        Self {
            client,
            admin_key: admin_key.into(),
            default_timeout,
        }
    }

    async fn send(&self, url: &str, request: &UpstreamRequest) -> CourierResult<Value> {
        let mut builder = self.client.request(request.method.clone(), url);

        if request.admin_key {
            if self.admin_key.is_empty() {
                warn!("Admin key requested for {} but none is configured", request.path);
            }
            builder = builder.header(ADMIN_KEY_HEADER, &self.admin_key);
        }

        builder = match &request.body {
            RequestBody::None => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(body) => {
                let form = body
                    .to_form()
                    .map_err(|e| CourierError::validation(format!("Invalid attachment: {}", e)))?;
                builder.multipart(form)
            }
        };

        let response = builder.send().await.map_err(map_send_error)?;
        decode_response(response).await
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, url: &str, request: &UpstreamRequest) -> CourierResult<Value> {
        debug!("HTTP {} {}", request.method, url);

        let timeout = request.timeout.unwrap_or(self.default_timeout);
        with_timeout(timeout, || self.send(url, request)).await
    }
}

/// Decodes a response: non-2xx becomes [`CourierError::Upstream`], an empty
/// success body becomes `Value::Null`.
async fn decode_response(response: Response) -> CourierResult<Value> {
    let status = response.status();
    metrics::counter!("courier_upstream_requests_total", "status" => status.as_u16().to_string()).increment(1);

    let text = response.text().await.map_err(map_send_error)?;

    if !status.is_success() {
        let details = if text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        };
        debug!("Upstream answered {}", status);
        return Err(CourierError::upstream(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            details,
        ));
    }

    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_str(&text)?)
}

fn map_send_error(err: reqwest::Error) -> CourierError {
    if err.is_timeout() {
        CourierError::Timeout(err.to_string())
    } else {
        CourierError::Network(err.to_string())
    }
}
