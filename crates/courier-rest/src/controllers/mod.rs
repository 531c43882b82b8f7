//! REST controllers.

pub mod admin_controller;
pub mod auth_controller;
pub mod broadcast_controller;
pub mod delivery_controller;
pub mod email_controller;
pub mod health_controller;
pub mod rider_controller;
pub mod system_controller;
pub mod transaction_controller;
