// Time- and count-bounded rolling window of request samples

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::models::{LatencyStats, RequestSample};

#[derive(Debug, Clone, Copy)]
struct Entry {
    at: Instant,
    latency: Duration,
    bytes: u64,
    is_error: bool,
}

/// Holds at most `max_entries` samples no older than `span`.
/// Error and byte totals are kept in step with the entries so rate reads are O(1).
#[derive(Debug)]
pub(crate) struct RollingWindow {
    entries: VecDeque<Entry>,
    span: Duration,
    max_entries: usize,
    errors: u64,
    bytes: u64,
}

impl RollingWindow {
    pub(crate) fn new(span: Duration, max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries.min(4096)),
            span,
            max_entries,
            errors: 0,
            bytes: 0,
        }
    }

    pub(crate) fn span(&self) -> Duration {
        self.span
    }

    pub(crate) fn push(&mut self, sample: &RequestSample, at: Instant) {
        self.evict_expired(at);
        while !self.entries.is_empty() && self.entries.len() >= self.max_entries {
            self.pop_front();
        }
        self.entries.push_back(Entry {
            at,
            latency: sample.latency,
            bytes: sample.bytes,
            is_error: sample.is_error,
        });
        self.bytes = self.bytes.saturating_add(sample.bytes);
        if sample.is_error {
            self.errors += 1;
        }
    }

    /// Drops entries older than the window span as of `now`.
    pub(crate) fn evict_expired(&mut self, now: Instant) {
        while let Some(front) = self.entries.front() {
            if now.saturating_duration_since(front.at) > self.span {
                self.pop_front();
            } else {
                break;
            }
        }
    }

    fn pop_front(&mut self) {
        if let Some(e) = self.entries.pop_front() {
            self.bytes = self.bytes.saturating_sub(e.bytes);
            if e.is_error {
                self.errors -= 1;
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn errors(&self) -> u64 {
        self.errors
    }

    pub(crate) fn bytes(&self) -> u64 {
        self.bytes
    }

    pub(crate) fn error_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.errors as f64 / self.entries.len() as f64
    }

    /// Nearest-rank percentile (`p` in 0.0..=1.0); zero when empty.
    pub(crate) fn latency_percentile(&self, p: f64) -> Duration {
        let sorted = self.sorted_latencies();
        percentile(&sorted, p)
    }

    pub(crate) fn latency_stats(&self) -> LatencyStats {
        let sorted = self.sorted_latencies();
        if sorted.is_empty() {
            return LatencyStats::default();
        }
        let sum: Duration = sorted.iter().sum();
        LatencyStats {
            samples: sorted.len() as u64,
            avg_ms: as_ms(sum) / sorted.len() as f64,
            min_ms: as_ms(sorted[0]),
            max_ms: as_ms(sorted[sorted.len() - 1]),
            p50_ms: as_ms(percentile(&sorted, 0.50)),
            p95_ms: as_ms(percentile(&sorted, 0.95)),
            p99_ms: as_ms(percentile(&sorted, 0.99)),
        }
    }

    fn sorted_latencies(&self) -> Vec<Duration> {
        let mut latencies: Vec<Duration> = self.entries.iter().map(|e| e.latency).collect();
        latencies.sort_unstable();
        latencies
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.errors = 0;
        self.bytes = 0;
    }
}

fn percentile(sorted: &[Duration], p: f64) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let p = p.clamp(0.0, 1.0);
    let idx = ((sorted.len() as f64 * p).ceil() as usize)
        .saturating_sub(1)
        .min(sorted.len() - 1);
    sorted[idx]
}

pub(crate) fn as_ms(d: Duration) -> f64 {
    d.as_nanos() as f64 / 1_000_000.0
}
