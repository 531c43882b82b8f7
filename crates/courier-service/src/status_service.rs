//! Upstream reachability service trait definition.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a reachability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamStatus {
    pub online: bool,
    pub latency_ms: u64,
}

/// Upstream reachability service trait.
#[async_trait]
pub trait StatusService: Send + Sync {
    /// Probes the upstream API. Never fails; an unreachable API reports
    /// `online: false`.
    async fn probe(&self) -> UpstreamStatus;
}
