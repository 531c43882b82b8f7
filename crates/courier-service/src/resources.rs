//! Upstream resource paths. Each is also the cache invalidation prefix
//! for that resource.

use courier_core::{ensure_path_segment, CourierResult};

pub const RIDERS: &str = "riders";
pub const USERS: &str = "users";
pub const DELIVERIES: &str = "deliveries";
pub const TRANSACTIONS: &str = "transactions";
pub const ADMINS: &str = "admins";

/// Cleared after rider updates, status changes and deletes.
pub const RIDER_MUTATION: &[&str] = &[RIDERS, DELIVERIES];
/// Cleared after delivery soft delete, restore, permanent delete and
/// payment status updates.
pub const DELIVERY_MUTATION: &[&str] = &[DELIVERIES, TRANSACTIONS];
/// Cleared after any admin account change.
pub const ADMIN_MUTATION: &[&str] = &[ADMINS];

/// Path of one item of `resource`, e.g. `/riders/7`. Fails before any
/// outbound call when `id` is not a single safe path segment.
pub fn item_path(resource: &str, id: &str) -> CourierResult<String> {
    Ok(format!("/{}/{}", resource, ensure_path_segment(id)?))
}
