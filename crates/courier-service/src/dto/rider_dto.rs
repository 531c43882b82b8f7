//! Rider DTOs.

use super::ResourceId;
use courier_core::rules;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn validate_ids(ids: &[ResourceId]) -> Result<(), ValidationError> {
    ids.iter().try_for_each(|id| match id {
        ResourceId::Number(_) => Ok(()),
        ResourceId::Text(text) => rules::path_segment(text),
    })
}

/// Body of `DELETE /api/riders`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    #[validate(
        length(min = 1, message = "At least one rider id is required"),
        custom(function = "validate_ids")
    )]
    pub ids: Vec<ResourceId>,
}

/// One rider the upstream refused to delete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkDeleteFailure {
    pub id: ResourceId,
    pub error: String,
}

/// Outcome of a bulk delete; partial failure is not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkDeleteResponse {
    pub deleted: Vec<ResourceId>,
    pub failed: Vec<BulkDeleteFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_ids_rejected() {
        let request: BulkDeleteRequest = serde_json::from_value(json!({"ids": []})).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_mixed_ids_accepted() {
        let request: BulkDeleteRequest = serde_json::from_value(json!({"ids": [1, "2"]})).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.ids.len(), 2);
    }

    #[test]
    fn test_ids_must_be_single_segments() {
        for bad in [json!(["../admins/1"]), json!([1, "2/role"]), json!([".."])] {
            let request: BulkDeleteRequest = serde_json::from_value(json!({ "ids": bad })).unwrap();
            assert!(request.validate().is_err(), "{} must be rejected", bad);
        }
    }
}
