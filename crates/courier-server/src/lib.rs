//! # Courier Server Library
//!
//! Wiring of configuration, upstream client and router, plus the
//! process-level setup used by the binary.

pub mod app;
pub mod startup;
