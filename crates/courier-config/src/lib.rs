//! # Courier Config
//!
//! Configuration management for the Courier Console gateway.
//! Supports layered configuration from files, prefixed environment
//! variables and the dashboard's legacy variable names.

mod app_config;
mod loader;
mod validation;

pub use app_config::*;
pub use loader::*;
pub use validation::*;
