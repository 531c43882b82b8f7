//! Fixture-backed transport used when `MOCK_API` is set.

use crate::{RequestBody, Transport, UpstreamRequest};
use async_trait::async_trait;
use courier_core::{CourierError, CourierResult};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Serves canned riders, users, deliveries, transactions and admins.
///
/// Reads resolve against the fixtures; writes are acknowledged without
/// changing them.
#[derive(Debug)]
pub struct MockTransport {
    fixtures: Value,
    calls: AtomicUsize,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    /// Creates a transport over the built-in fixtures.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fixtures(default_fixtures())
    }

    /// Creates a transport over custom fixtures keyed by collection name.
    #[must_use]
    pub fn with_fixtures(fixtures: Value) -> Self {
        Self {
            fixtures,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests executed so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn collection(&self, name: &str) -> Option<&Value> {
        self.fixtures.get(name)
    }

    fn find(&self, collection: &str, id: &str) -> Option<Value> {
        self.collection(collection)?
            .as_array()?
            .iter()
            .find(|item| id_matches(item, id))
            .cloned()
    }

    fn read(&self, segments: &[&str]) -> CourierResult<Value> {
        match segments {
            [collection] => self.collection(collection).cloned().ok_or_else(not_found),
            ["deliveries", "deleted"] => Ok(self.collection("deleted_deliveries").cloned().unwrap_or_else(|| json!([]))),
            [collection, id] => self.find(collection, id).ok_or_else(not_found),
            _ => Err(not_found()),
        }
    }

    fn write(&self, request: &UpstreamRequest, segments: &[&str]) -> CourierResult<Value> {
        match segments {
            ["admin", "login"] => self.login(request),
            ["email", "send"] => Ok(json!({ "success": true, "mock": true })),
            _ => {
                let echo = request.body.as_json().cloned().unwrap_or(Value::Null);
                Ok(json!({
                    "success": true,
                    "mock": true,
                    "method": request.method.as_str(),
                    "path": request.path,
                    "data": echo,
                }))
            }
        }
    }

    fn login(&self, request: &UpstreamRequest) -> CourierResult<Value> {
        let email = request
            .body
            .as_json()
            .and_then(|body| body.get("email"))
            .and_then(Value::as_str)
            .unwrap_or_default();

        self.collection("admins")
            .and_then(Value::as_array)
            .and_then(|admins| {
                admins
                    .iter()
                    .find(|a| a.get("email").and_then(Value::as_str).is_some_and(|e| e.eq_ignore_ascii_case(email)))
            })
            .map(|admin| json!({ "admin": admin }))
            .ok_or_else(|| CourierError::upstream(401, "Unauthorized", Some(json!({"detail": "Invalid credentials"}))))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, url: &str, request: &UpstreamRequest) -> CourierResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!("MOCK {} {}", request.method, url);

        let segments: Vec<&str> = request.path.split('/').filter(|s| !s.is_empty()).collect();

        if request.method == Method::GET {
            self.read(&segments)
        } else {
            if let RequestBody::Multipart(body) = &request.body {
                debug!("MOCK multipart with {} files", body.files.len());
            }
            self.write(request, &segments)
        }
    }
}

fn id_matches(item: &Value, id: &str) -> bool {
    match item.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

fn not_found() -> CourierError {
    CourierError::upstream(404, "Not Found", Some(json!({"detail": "Not found"})))
}

fn default_fixtures() -> Value {
    json!({
        "riders": [
            {"id": 1, "name": "Kofi Mensah", "email": "kofi@riders.test", "phone": "+233200000001", "status": "active", "vehicle": "motorbike"},
            {"id": 2, "name": "Ama Owusu", "email": "ama@riders.test", "phone": "+233200000002", "status": "active", "vehicle": "bicycle"},
            {"id": 3, "name": "Yaw Boateng", "email": null, "phone": "+233200000003", "status": "inactive", "vehicle": "van"}
        ],
        "users": [
            {"id": 10, "first_name": "Esi", "last_name": "Asante", "email": "esi@customers.test", "phone": "+233240000010"},
            {"id": 11, "first_name": "Kwame", "last_name": "Darko", "email": "kwame@customers.test", "phone": "+233240000011"},
            {"id": 12, "full_name": "Abena Ofori", "email": "ama@riders.test", "phone": "+233240000012"}
        ],
        "deliveries": [
            {"id": 100, "user_id": 10, "rider_id": 1, "status": "delivered", "pickup_address": "Osu", "dropoff_address": "Labone", "price": 35.0, "payment_status": "paid"},
            {"id": 101, "user_id": 11, "rider_id": 2, "status": "in_transit", "pickup_address": "Madina", "dropoff_address": "Legon", "price": 20.0, "payment_status": "pending"},
            {"id": 102, "user_id": 12, "rider_id": null, "status": "pending", "pickup_address": "Tema", "dropoff_address": "Spintex", "price": 50.0, "payment_status": "pending"},
            {"id": 103, "user_id": 99, "rider_id": 3, "status": "cancelled", "pickup_address": "Kasoa", "dropoff_address": "Dansoman", "price": 42.5, "payment_status": "refunded"}
        ],
        "deleted_deliveries": [
            {"id": 90, "user_id": 10, "rider_id": 2, "status": "cancelled", "pickup_address": "Achimota", "dropoff_address": "Dzorwulu", "price": 18.0, "payment_status": "failed", "deleted": true}
        ],
        "transactions": [
            {"id": 500, "delivery_id": 100, "user_id": 10, "rider_id": 1, "amount": 35.0, "status": "paid", "method": "momo"},
            {"id": 501, "delivery_id": 101, "user_id": 11, "rider_id": 2, "amount": 20.0, "status": "pending", "method": "card"},
            {"id": 502, "delivery_id": 103, "user_id": 99, "rider_id": 3, "amount": 42.5, "status": "refunded", "method": "cash"}
        ],
        "admins": [
            {"id": 1, "name": "Root Admin", "email": "root@courier.test", "role": "super_admin"},
            {"id": 2, "name": "Ops Lead", "email": "ops@courier.test", "role": "operations"}
        ]
    })
}
