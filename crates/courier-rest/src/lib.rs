//! # Courier REST
//!
//! HTTP layer of the admin console: the role-gated router, the proxy
//! routes over the upstream delivery API and the ops endpoints.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
