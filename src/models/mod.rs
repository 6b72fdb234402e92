// Domain models: stats snapshots, alerts, targets and API payloads

mod alert;
mod api;
mod stats;
mod targets;

pub use alert::{Alert, AlertKind, AlertSeverity};
pub use api::{ErrorResponse, HealthResponse, MessageResponse, SampleRequest, TargetsRequest};
pub use stats::{LatencyStats, RequestSample, StatsSnapshot};
pub use targets::Targets;

/// Current wall-clock time as an RFC 3339 string (UTC, millisecond precision).
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
