//! Upstream request model.

use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use url::form_urlencoded;

/// Header carrying `NEXT_ADMIN_DELETE_KEY` on privileged operations.
pub const ADMIN_KEY_HEADER: &str = "X-Admin-Key";

/// A file attached to a multipart body.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A multipart body kept in owned parts so it can be rebuilt for a retry.
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<FilePart>,
}

impl MultipartBody {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn file(mut self, file: FilePart) -> Self {
        self.files.push(file);
        self
    }

    /// Builds the reqwest form for one send attempt.
    pub fn to_form(&self) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in &self.fields {
            form = form.text(name.clone(), value.clone());
        }
        for file in &self.files {
            let part = reqwest::multipart::Part::bytes(file.bytes.clone())
                .file_name(file.file_name.clone())
                .mime_str(&file.content_type)?;
            form = form.part(file.field.clone(), part);
        }
        Ok(form)
    }
}

/// Request body variants.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    None,
    Json(Value),
    Multipart(MultipartBody),
}

impl RequestBody {
    /// The JSON body, if this is one.
    #[must_use]
    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }
}

/// One call to the upstream API, relative to its base URL.
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Attach [`ADMIN_KEY_HEADER`].
    pub admin_key: bool,
    /// Overrides the transport's default timeout.
    pub timeout: Option<Duration>,
}

impl UpstreamRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::None,
            admin_key: false,
            timeout: None,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn multipart(mut self, body: MultipartBody) -> Self {
        self.body = RequestBody::Multipart(body);
        self
    }

    #[must_use]
    pub const fn with_admin_key(mut self) -> Self {
        self.admin_key = true;
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolves the request against `base_url`, query string included.
    #[must_use]
    pub fn url(&self, base_url: &str) -> String {
        let mut url = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter())
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joins_base_and_path() {
        let request = UpstreamRequest::get("/riders/7");
        assert_eq!(request.url("http://api.local/"), "http://api.local/riders/7");
        assert_eq!(request.url("http://api.local"), "http://api.local/riders/7");
    }

    #[test]
    fn test_url_encodes_query() {
        let request = UpstreamRequest::get("/deliveries").query("status", "in transit");
        assert_eq!(request.url("http://api.local"), "http://api.local/deliveries?status=in+transit");
    }

    #[test]
    fn test_builder_flags() {
        let request = UpstreamRequest::delete("/deliveries/3/permanent")
            .with_admin_key()
            .timeout(Duration::from_secs(8));
        assert_eq!(request.method, Method::DELETE);
        assert!(request.admin_key);
        assert_eq!(request.timeout, Some(Duration::from_secs(8)));
    }

    #[test]
    fn test_json_body_accessor() {
        let request = UpstreamRequest::put("/riders/1").json(json!({"name": "Ada"}));
        assert_eq!(request.body.as_json(), Some(&json!({"name": "Ada"})));
        assert!(UpstreamRequest::get("/riders").body.as_json().is_none());
    }

    #[test]
    fn test_multipart_builds_form() {
        let body = MultipartBody::new().text("subject", "Hello").file(FilePart {
            field: "images".to_string(),
            file_name: "banner.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        });
        assert!(body.to_form().is_ok());
        assert_eq!(body.fields.len(), 1);
        assert_eq!(body.files.len(), 1);
    }
}
