//! Cache key generators.

use serde_json::Value;

/// Builds the cache key for a request: the full URL followed by the
/// serialized request body (empty when there is none).
///
/// Keys always start with the URL, so every key for a resource shares the
/// resource URL as its prefix.
#[must_use]
pub fn request_key(url: &str, body: Option<&Value>) -> String {
    let body = body.map(Value::to_string).unwrap_or_default();
    format!("{}|{}", url, body)
}
