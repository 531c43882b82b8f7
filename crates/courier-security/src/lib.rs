//! # Courier Security
//!
//! Session tokens issued after a successful upstream login, and the
//! role-gated route table checked on every request.

pub mod access;
pub mod session;

pub use access::*;
pub use session::*;
