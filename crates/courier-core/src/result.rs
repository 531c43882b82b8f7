//! Result type aliases for Courier Console.

use crate::CourierError;

/// A specialized `Result` type for gateway operations.
pub type CourierResult<T> = Result<T, CourierError>;
