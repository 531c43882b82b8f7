//! Reshaping of upstream JSON.

mod join;
mod recipients;

pub use join::*;
pub use recipients::*;
