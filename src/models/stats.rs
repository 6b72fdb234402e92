// Observed request samples and point-in-time aggregate snapshots

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Targets;

/// One observed request, as fed to the monitor by the ingestion path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestSample {
    pub latency: Duration,
    /// Response payload size in bytes.
    pub bytes: u64,
    pub is_error: bool,
}

impl RequestSample {
    pub fn ok(latency: Duration, bytes: u64) -> Self {
        Self {
            latency,
            bytes,
            is_error: false,
        }
    }

    pub fn error(latency: Duration) -> Self {
        Self {
            latency,
            bytes: 0,
            is_error: true,
        }
    }
}

/// Latency distribution over the rolling window, in milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub samples: u64,
    pub avg_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub p50_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
}

/// Immutable point-in-time aggregate returned by `GET /api/v1/performance/stats`.
///
/// Lifetime counters (`total_*`) run since construction or the last reset;
/// rates and the latency distribution cover the rolling window only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub timestamp: String,
    pub uptime_secs: u64,
    pub total_requests: u64,
    pub total_errors: u64,
    pub total_bytes: u64,
    pub requests_per_second: f64,
    /// Errors / requests in the window; 0 when the window is empty.
    pub error_rate: f64,
    /// Megabytes per second in the window.
    pub throughput: f64,
    pub latency: LatencyStats,
    pub targets: Targets,
}
