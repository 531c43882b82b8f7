//! Role-gated route access.

mod policy;

pub use policy::*;
