//! Broadcast recipient merge.

use super::display_name;
use crate::dto::{BroadcastRecipient, RecipientKind};
use serde_json::Value;
use std::collections::HashSet;

fn to_recipient(record: &Value, kind: RecipientKind) -> Option<BroadcastRecipient> {
    let email = record
        .get("email")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|e| !e.is_empty())?
        .to_string();

    Some(BroadcastRecipient {
        id: record.get("id").cloned().unwrap_or(Value::Null),
        name: display_name(record).unwrap_or_else(|| email.clone()),
        email,
        kind,
    })
}

/// Merges users and riders into one mailing list.
///
/// Records without an e-mail are dropped. Addresses are compared
/// case-insensitively and the first occurrence wins, users before riders.
/// The result is sorted by name.
#[must_use]
pub fn merge_recipients(users: &[Value], riders: &[Value]) -> Vec<BroadcastRecipient> {
    let mut seen = HashSet::new();

    let mut merged: Vec<BroadcastRecipient> = users
        .iter()
        .filter_map(|u| to_recipient(u, RecipientKind::User))
        .chain(riders.iter().filter_map(|r| to_recipient(r, RecipientKind::Rider)))
        .filter(|recipient| seen.insert(recipient.email.to_lowercase()))
        .collect();

    merged.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_drops_missing_email_and_dedupes() {
        let users = vec![
            json!({"id": 1, "name": "Zed", "email": "Zed@x.io"}),
            json!({"id": 2, "name": "NoMail"}),
            json!({"id": 3, "name": "Blank", "email": " "}),
        ];
        let riders = vec![
            json!({"id": 7, "name": "Zed Rider", "email": "zed@X.io"}),
            json!({"id": 8, "first_name": "Ama", "email": "ama@x.io"}),
        ];

        let merged = merge_recipients(&users, &riders);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].name, "Ama");
        assert_eq!(merged[0].kind, RecipientKind::Rider);
        assert_eq!(merged[1].name, "Zed");
        assert_eq!(merged[1].kind, RecipientKind::User, "first occurrence wins");
    }

    #[test]
    fn test_name_falls_back_to_email() {
        let merged = merge_recipients(&[json!({"id": 1, "email": "anon@x.io"})], &[]);
        assert_eq!(merged[0].name, "anon@x.io");
    }

    #[test]
    fn test_serialized_kind() {
        let merged = merge_recipients(&[], &[json!({"id": 1, "name": "R", "email": "r@x.io"})]);
        assert_eq!(
            serde_json::to_value(&merged).unwrap(),
            json!([{"id": 1, "name": "R", "email": "r@x.io", "kind": "rider"}])
        );
    }
}
