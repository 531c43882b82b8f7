//! # Courier Cache
//!
//! Process-wide response cache consulted before calling the upstream API.
//! Entries carry the time they were stored; the TTL is chosen by each
//! reader, and mutating routes drop whole resource families by key prefix.

mod entry;
pub mod keys;
mod response_cache;

pub use entry::CacheEntry;
pub use response_cache::{CacheStats, ResponseCache};
