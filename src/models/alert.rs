// Alerts raised when observed performance breaches a target

use serde::{Deserialize, Serialize};

/// Which target was breached; serializes to snake_case (e.g. "high_latency").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    HighLatency,
    HighErrorRate,
    LowRps,
    LowThroughput,
}

impl AlertKind {
    /// Name of the metric compared against the target.
    pub fn metric(&self) -> &'static str {
        match self {
            AlertKind::HighLatency => "latency_ms",
            AlertKind::HighErrorRate => "error_rate",
            AlertKind::LowRps => "requests_per_second",
            AlertKind::LowThroughput => "throughput",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Monotonic per monitor; never reused, even across resets.
    pub id: u64,
    pub kind: AlertKind,
    pub severity: AlertSeverity,
    pub metric: String,
    /// Observed value that breached the target.
    pub value: f64,
    pub threshold: f64,
    pub message: String,
    pub timestamp: String,
}
