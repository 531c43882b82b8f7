//! Cache entry.

use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;

/// A cached upstream body and the instant it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    data: Value,
    stored_at: Instant,
}

impl CacheEntry {
    /// Creates an entry stamped with the current instant.
    #[must_use]
    pub fn new(data: Value) -> Self {
        Self {
            data,
            stored_at: Instant::now(),
        }
    }

    /// The cached body.
    #[must_use]
    pub const fn data(&self) -> &Value {
        &self.data
    }

    /// Time elapsed since the entry was stored.
    #[must_use]
    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }

    /// An entry is fresh while its age does not exceed `ttl`.
    #[must_use]
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        self.age() <= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test(start_paused = true)]
    async fn test_entry_freshness_boundary() {
        let entry = CacheEntry::new(json!([1, 2, 3]));
        let ttl = Duration::from_secs(60);

        assert!(entry.is_fresh(ttl));

        tokio::time::advance(ttl).await;
        assert!(entry.is_fresh(ttl), "age == ttl is still fresh");

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!entry.is_fresh(ttl));
        assert_eq!(entry.data(), &json!([1, 2, 3]));
    }
}
