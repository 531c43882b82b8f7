//! # Courier Core
//!
//! Error, result and validation types shared by every layer of the Courier Console
//! gateway.

pub mod error;
pub mod result;
pub mod validation;

pub use error::*;
pub use result::*;
pub use validation::*;
