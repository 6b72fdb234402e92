// Request and response bodies for the performance HTTP API

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/performance/targets`. All four fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetsRequest {
    pub rps: f64,
    /// Duration string, e.g. "150ms".
    pub latency: String,
    pub error_rate: f64,
    pub throughput: f64,
}

/// One element of the `POST /api/v1/performance/samples` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleRequest {
    /// Duration string, e.g. "35ms".
    pub latency: String,
    #[serde(default)]
    pub bytes: u64,
    #[serde(default)]
    pub error: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub timestamp: String,
}

impl MessageResponse {
    pub fn now(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            timestamp: super::now_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: bool,
    pub message: String,
}
