//! # Courier Upstream
//!
//! Everything that talks to the external delivery API: the request model,
//! the [`Transport`] seam with its HTTP and fixture implementations, and the
//! [`ApiClient`] that puts the response cache in front of reads.

mod client;
mod http_transport;
mod mock_transport;
mod request;
pub mod timeout;
mod transport;

pub use client::*;
pub use http_transport::*;
pub use mock_transport::*;
pub use request::*;
pub use transport::*;
