//! Custom middleware.

mod access;
mod logging;

pub use access::*;
pub use logging::*;
