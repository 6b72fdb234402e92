// Operator-configured thresholds used for health and alert evaluation

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::monitor::MonitorError;

/// Thresholds replaced as one unit by `set_targets`; never touched by reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    /// Minimum expected requests per second (0 disables the shortfall alert).
    pub rps: f64,
    /// Maximum acceptable latency; serialized as a duration string ("200ms").
    #[serde(with = "crate::duration::serde_str")]
    pub latency: Duration,
    /// Maximum acceptable error rate in [0, 1].
    pub error_rate: f64,
    /// Minimum expected throughput in MB/s (0 disables the shortfall alert).
    pub throughput: f64,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            rps: 0.0,
            latency: Duration::from_secs(1),
            error_rate: 0.05,
            throughput: 0.0,
        }
    }
}

impl Targets {
    /// Build validated targets; all four values are checked before anything is returned.
    pub fn new(
        rps: f64,
        latency: Duration,
        error_rate: f64,
        throughput: f64,
    ) -> Result<Self, MonitorError> {
        let targets = Self {
            rps,
            latency,
            error_rate,
            throughput,
        };
        targets.validate()?;
        Ok(targets)
    }

    pub fn validate(&self) -> Result<(), MonitorError> {
        if !self.rps.is_finite() || self.rps < 0.0 {
            return Err(MonitorError::invalid_target("rps", "must be >= 0", self.rps));
        }
        if self.latency.is_zero() {
            return Err(MonitorError::invalid_target("latency", "must be > 0", 0.0));
        }
        if !self.error_rate.is_finite() || !(0.0..=1.0).contains(&self.error_rate) {
            return Err(MonitorError::invalid_target(
                "error_rate",
                "must be between 0 and 1",
                self.error_rate,
            ));
        }
        if !self.throughput.is_finite() || self.throughput < 0.0 {
            return Err(MonitorError::invalid_target(
                "throughput",
                "must be >= 0",
                self.throughput,
            ));
        }
        Ok(())
    }
}
