//! Join of deliveries and transactions with their user and rider.

use crate::dto::PartyView;
use serde_json::Value;
use std::collections::HashMap;

/// Unwraps an upstream list. The API answers either a bare array or an
/// object wrapping it under `data`, `items` or `results`.
#[must_use]
pub fn records(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut object) => ["data", "items", "results"]
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Normalizes a numeric or string ID for lookups.
#[must_use]
pub fn id_key(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn text(record: &Value, field: &str) -> Option<String> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Best display name: `name`, then `full_name`, then first and last name.
#[must_use]
pub fn display_name(record: &Value) -> Option<String> {
    text(record, "name").or_else(|| text(record, "full_name")).or_else(|| {
        let parts: Vec<String> = ["first_name", "last_name"]
            .iter()
            .filter_map(|field| text(record, field))
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    })
}

impl PartyView {
    /// Projects a user or rider record.
    #[must_use]
    pub fn from_record(record: &Value) -> Self {
        Self {
            id: record.get("id").cloned().unwrap_or(Value::Null),
            name: display_name(record),
            email: text(record, "email"),
            phone: text(record, "phone"),
        }
    }
}

/// Users or riders indexed by ID.
#[derive(Debug, Default)]
pub struct Directory {
    by_id: HashMap<String, PartyView>,
}

impl Directory {
    #[must_use]
    pub fn new(list: &[Value]) -> Self {
        let by_id = list
            .iter()
            .filter_map(|record| {
                let key = id_key(record.get("id")?)?;
                Some((key, PartyView::from_record(record)))
            })
            .collect();
        Self { by_id }
    }

    /// The party referenced by `id`, or `null` when unknown or absent.
    #[must_use]
    pub fn lookup(&self, id: Option<&Value>) -> Value {
        id.and_then(id_key)
            .and_then(|key| self.by_id.get(&key))
            .and_then(|party| serde_json::to_value(party).ok())
            .unwrap_or(Value::Null)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Adds `user` and `rider` objects to every record, resolved from
/// `user_id` and `rider_id`.
///
/// Records that are not JSON objects are passed through unchanged.
#[must_use]
pub fn attach_parties(items: Vec<Value>, users: &Directory, riders: &Directory) -> Vec<Value> {
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(mut object) => {
                let user = users.lookup(object.get("user_id"));
                let rider = riders.lookup(object.get("rider_id"));
                object.insert("user".to_string(), user);
                object.insert("rider".to_string(), rider);
                Value::Object(object)
            }
            other => other,
        })
        .collect()
}

/// Joins a raw upstream list with raw user and rider lists.
#[must_use]
pub fn join_with_parties(items: Value, users: Value, riders: Value) -> Vec<Value> {
    let users = Directory::new(&records(users));
    let riders = Directory::new(&records(riders));
    attach_parties(records(items), &users, &riders)
}
