//! Custom extractors for Axum handlers.

mod session;
mod validated;

pub use session::*;
pub use validated::*;
