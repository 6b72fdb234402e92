// Human-readable duration strings ("150ms", "1.5s", "1m30s") for targets and config

use std::time::Duration;

use thiserror::Error;

/// Suffix to nanoseconds multiplier (order matters: longer suffixes first)
const UNITS: &[(&str, f64)] = &[
    ("ns", 1.0),
    ("µs", 1_000.0),
    ("μs", 1_000.0),
    ("us", 1_000.0),
    ("ms", 1_000_000.0),
    ("s", 1_000_000_000.0),
    ("m", 60_000_000_000.0),
    ("h", 3_600_000_000_000.0),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,
    #[error("negative duration: {0}")]
    Negative(String),
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),
    #[error("unknown unit in duration {0:?}")]
    UnknownUnit(String),
    #[error("invalid number in duration {0:?}")]
    InvalidNumber(String),
    #[error("duration {0:?} is out of range")]
    Overflow(String),
}

/// Parse a sequence of `<number><unit>` terms, e.g. "200ms", "1.5s", "1h30m", "16.958µs".
/// A bare "0" is accepted as zero.
pub fn parse_duration(s: &str) -> Result<Duration, DurationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DurationError::Empty);
    }
    if s.starts_with('-') {
        return Err(DurationError::Negative(s.to_string()));
    }
    let body = s.strip_prefix('+').unwrap_or(s);
    if body == "0" {
        return Ok(Duration::ZERO);
    }

    let mut total_nanos = 0f64;
    let mut rest = body;
    while !rest.is_empty() {
        let num_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        if num_len == 0 {
            return Err(DurationError::InvalidNumber(s.to_string()));
        }
        let (num_str, after) = rest.split_at(num_len);
        let value: f64 = num_str
            .parse()
            .map_err(|_| DurationError::InvalidNumber(s.to_string()))?;
        if after.is_empty() {
            return Err(DurationError::MissingUnit(s.to_string()));
        }
        let unit_len = after
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after.len());
        let (unit, tail) = after.split_at(unit_len);
        let multiplier = UNITS
            .iter()
            .find(|(suffix, _)| *suffix == unit)
            .map(|(_, m)| *m)
            .ok_or_else(|| DurationError::UnknownUnit(s.to_string()))?;
        total_nanos += value * multiplier;
        rest = tail;
    }

    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        return Err(DurationError::Overflow(s.to_string()));
    }
    Ok(Duration::from_nanos(total_nanos.round() as u64))
}

/// Format a duration compactly for display and JSON ("200ms", "1.5s", "16.958µs").
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        "0s".to_string()
    } else if nanos < 1_000 {
        format!("{}ns", nanos)
    } else if nanos < 1_000_000 {
        trim_float(nanos as f64 / 1_000.0, "µs")
    } else if nanos < 1_000_000_000 {
        trim_float(nanos as f64 / 1_000_000.0, "ms")
    } else {
        trim_float(d.as_secs_f64(), "s")
    }
}

fn trim_float(value: f64, unit: &str) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    format!("{}{}", s, unit)
}

/// Serde adapter storing a `Duration` as a duration string ("200ms").
pub mod serde_str {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_duration(*d))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let s = String::deserialize(deserializer)?;
        super::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_milliseconds() {
        assert_eq!(parse_duration("150ms").unwrap(), Duration::from_millis(150));
    }

    #[test]
    fn test_parse_fractional_seconds() {
        assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("1h2m").unwrap(), Duration::from_secs(3720));
    }

    #[test]
    fn test_parse_microseconds() {
        assert_eq!(parse_duration("16.958µs").unwrap().as_nanos(), 16958);
        assert_eq!(parse_duration("250us").unwrap(), Duration::from_micros(250));
    }

    #[test]
    fn test_parse_zero() {
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            parse_duration("notaduration"),
            Err(DurationError::InvalidNumber("notaduration".into()))
        );
        assert_eq!(parse_duration(""), Err(DurationError::Empty));
        assert!(matches!(parse_duration("100"), Err(DurationError::MissingUnit(_))));
        assert!(matches!(parse_duration("10d"), Err(DurationError::UnknownUnit(_))));
        assert!(matches!(parse_duration("-5ms"), Err(DurationError::Negative(_))));
        assert!(matches!(parse_duration("1..5s"), Err(DurationError::InvalidNumber(_))));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(200)), "200ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_nanos(16958)), "16.958µs");
        assert_eq!(format_duration(Duration::ZERO), "0s");
    }
}
