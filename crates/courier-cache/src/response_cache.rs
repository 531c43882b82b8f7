//! In-memory response cache.

use crate::CacheEntry;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Key to (body, timestamp) map shared by every request in the process.
///
/// All operations are synchronous; the lock is never held across an await.
/// Two requests missing on the same key may both fetch and both `set`; the
/// last writer wins.
#[derive(Debug, Default)]
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ResponseCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached body if it is no older than `ttl`.
    ///
    /// A stale entry is removed before returning `None`.
    pub fn get(&self, key: &str, ttl: Duration) -> Option<Value> {
        {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.is_fresh(ttl) => {
                    debug!("Cache hit for key '{}'", key);
                    self.record_hit();
                    return Some(entry.data().clone());
                }
                Some(_) => {}
                None => {
                    debug!("Cache miss for key '{}'", key);
                    self.record_miss();
                    return None;
                }
            }
        }

        let mut entries = self.entries.write();
        // Another writer may have refreshed the entry between the two locks.
        if let Some(entry) = entries.get(key) {
            if entry.is_fresh(ttl) {
                self.record_hit();
                return Some(entry.data().clone());
            }
            entries.remove(key);
            debug!("Evicted stale key '{}'", key);
        }
        self.record_miss();
        None
    }

    /// Stores `data` under `key`, replacing any previous entry.
    pub fn set(&self, key: impl Into<String>, data: Value) {
        let key = key.into();
        debug!("Cached key '{}'", key);
        self.entries.write().insert(key, CacheEntry::new(data));
    }

    /// Removes one entry. Returns `true` if the key existed.
    pub fn delete(&self, key: &str) -> bool {
        let removed = self.entries.write().remove(key).is_some();
        debug!("Deleted key '{}': {}", key, removed);
        removed
    }

    /// Removes every entry whose key starts with `prefix`.
    ///
    /// Returns the number of entries removed.
    pub fn clear_by_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - entries.len();
        debug!("Deleted {} keys with prefix '{}'", removed, prefix);
        removed
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
        debug!("Cache cleared");
    }

    /// Number of stored entries, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns the current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("courier_cache_hits_total").increment(1);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        metrics::counter!("courier_cache_misses_total").increment(1);
    }
}
