use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MonitorError {
    #[error("invalid target {field}: {reason} (got {value})")]
    InvalidTarget {
        field: &'static str,
        reason: &'static str,
        value: f64,
    },
}

impl MonitorError {
    pub(crate) fn invalid_target(field: &'static str, reason: &'static str, value: f64) -> Self {
        MonitorError::InvalidTarget {
            field,
            reason,
            value,
        }
    }
}
