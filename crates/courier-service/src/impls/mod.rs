//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `rider_service.rs`).

pub mod admin_service_impl;
pub mod auth_service_impl;
pub mod broadcast_service_impl;
pub mod delivery_service_impl;
pub mod email_service_impl;
pub mod rider_service_impl;
pub mod status_service_impl;
pub mod transaction_service_impl;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin_service_impl::AdminServiceImpl;
pub use auth_service_impl::AuthServiceImpl;
pub use broadcast_service_impl::BroadcastServiceImpl;
pub use delivery_service_impl::DeliveryServiceImpl;
pub use email_service_impl::EmailServiceImpl;
pub use rider_service_impl::RiderServiceImpl;
pub use status_service_impl::StatusServiceImpl;
pub use transaction_service_impl::TransactionServiceImpl;
