//! Data Transfer Objects (DTOs).

mod admin_dto;
mod auth_dto;
mod common;
mod delivery_dto;
mod email_dto;
mod rider_dto;

pub use admin_dto::*;
pub use auth_dto::*;
pub use common::*;
pub use delivery_dto::*;
pub use email_dto::*;
pub use rider_dto::*;
