//! # Courier Service
//!
//! Service layer over the upstream delivery API. Each service forwards to
//! the API through the cached client, reshapes responses and clears the
//! cache prefixes a mutation makes stale.

pub mod dto;
pub mod mappers;
pub mod resources;

pub mod admin_service;
pub mod auth_service;
pub mod broadcast_service;
pub mod delivery_service;
pub mod email_service;
pub mod rider_service;
pub mod status_service;
pub mod transaction_service;

pub mod impls;

pub use admin_service::*;
pub use auth_service::*;
pub use broadcast_service::*;
pub use delivery_service::*;
pub use dto::*;
pub use email_service::*;
pub use impls::*;
pub use rider_service::*;
pub use status_service::*;
pub use transaction_service::*;
