// Performance monitor: request counters, rolling-window statistics, targets and alerts.
// All mutable state sits behind one mutex so every read sees a consistent snapshot.

mod alerts;
mod error;
mod window;

pub use error::MonitorError;

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::config::MonitorConfig;
use crate::duration::format_duration;
use crate::models::{Alert, AlertKind, AlertSeverity, RequestSample, StatsSnapshot, Targets};
use alerts::{AlertBook, Breach};
use window::{RollingWindow, as_ms};

/// Lower bound on the rate denominator right after start or reset.
const MIN_RATE_WINDOW: Duration = Duration::from_secs(1);

const BYTES_PER_MB: f64 = 1_000_000.0;

/// Process-wide monitor shared by the HTTP handlers, the recording middleware and the
/// evaluation worker (wrap in `Arc`).
pub struct PerformanceMonitor {
    state: Mutex<MonitorState>,
    /// Window size below which rate-based alerts are not evaluated.
    min_samples: usize,
}

struct MonitorState {
    started_at: Instant,
    total_requests: u64,
    total_errors: u64,
    total_bytes: u64,
    window: RollingWindow,
    alerts: AlertBook,
    targets: Targets,
}

impl MonitorState {
    fn rate_window(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
            .min(self.window.span())
            .max(MIN_RATE_WINDOW)
    }

    fn requests_per_second(&self, now: Instant) -> f64 {
        self.window.len() as f64 / self.rate_window(now).as_secs_f64()
    }

    fn throughput(&self, now: Instant) -> f64 {
        self.window.bytes() as f64 / BYTES_PER_MB / self.rate_window(now).as_secs_f64()
    }

    fn is_healthy(&self) -> bool {
        if self.window.is_empty() {
            return true;
        }
        self.window.error_rate() <= self.targets.error_rate
            && self.window.latency_percentile(0.95) <= self.targets.latency
    }

    fn record(&mut self, sample: &RequestSample, now: Instant, min_samples: usize) -> Vec<Alert> {
        self.total_requests += 1;
        if sample.is_error {
            self.total_errors += 1;
        }
        self.total_bytes = self.total_bytes.saturating_add(sample.bytes);
        self.window.push(sample, now);

        let mut raised = Vec::new();
        let target_latency = self.targets.latency;
        if sample.latency > target_latency {
            let severity = if sample.latency > target_latency * 2 {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Warning
            };
            raised.extend(self.alerts.raise(Breach {
                kind: AlertKind::HighLatency,
                severity,
                value: as_ms(sample.latency),
                threshold: as_ms(target_latency),
                message: format!(
                    "request latency {} exceeds target {}",
                    format_duration(sample.latency),
                    format_duration(target_latency)
                ),
            }));
        }

        let error_rate = self.window.error_rate();
        if self.window.len() >= min_samples && error_rate > self.targets.error_rate {
            raised.extend(self.alerts.raise(Breach {
                kind: AlertKind::HighErrorRate,
                severity: AlertSeverity::Critical,
                value: error_rate,
                threshold: self.targets.error_rate,
                message: format!(
                    "error rate {:.2}% exceeds target {:.2}%",
                    error_rate * 100.0,
                    self.targets.error_rate * 100.0
                ),
            }));
        }
        raised
    }

    fn evaluate(&mut self, now: Instant, min_samples: usize) -> Vec<Alert> {
        self.window.evict_expired(now);
        if self.window.len() < min_samples {
            return Vec::new();
        }

        let mut raised = Vec::new();
        let rps = self.requests_per_second(now);
        if self.targets.rps > 0.0 && rps < self.targets.rps {
            raised.extend(self.alerts.raise(Breach {
                kind: AlertKind::LowRps,
                severity: AlertSeverity::Warning,
                value: rps,
                threshold: self.targets.rps,
                message: format!(
                    "request rate {:.2}/s below target {:.2}/s",
                    rps, self.targets.rps
                ),
            }));
        }
        let throughput = self.throughput(now);
        if self.targets.throughput > 0.0 && throughput < self.targets.throughput {
            raised.extend(self.alerts.raise(Breach {
                kind: AlertKind::LowThroughput,
                severity: AlertSeverity::Warning,
                value: throughput,
                threshold: self.targets.throughput,
                message: format!(
                    "throughput {:.3} MB/s below target {:.3} MB/s",
                    throughput, self.targets.throughput
                ),
            }));
        }
        raised
    }
}

impl PerformanceMonitor {
    pub fn new(config: &MonitorConfig, targets: Targets) -> Self {
        Self::new_at(config, targets, Instant::now())
    }

    /// Like `new`, with an explicit start instant for the uptime and rate clock.
    pub fn new_at(config: &MonitorConfig, targets: Targets, started_at: Instant) -> Self {
        Self {
            state: Mutex::new(MonitorState {
                started_at,
                total_requests: 0,
                total_errors: 0,
                total_bytes: 0,
                window: RollingWindow::new(
                    Duration::from_secs(config.window_secs),
                    config.max_samples,
                ),
                alerts: AlertBook::new(config.max_alerts),
                targets,
            }),
            min_samples: config.min_samples,
        }
    }

    // Poison is ignored so every operation stays total.
    fn lock(&self) -> MutexGuard<'_, MonitorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ingests one observed request and raises per-sample alerts.
    pub fn record(&self, sample: RequestSample) {
        self.record_at(sample, Instant::now());
    }

    pub fn record_at(&self, sample: RequestSample, now: Instant) {
        let raised = self.lock().record(&sample, now, self.min_samples);
        log_raised(&raised);
    }

    pub fn get_stats(&self) -> StatsSnapshot {
        self.stats_at(Instant::now())
    }

    pub fn stats_at(&self, now: Instant) -> StatsSnapshot {
        let mut state = self.lock();
        state.window.evict_expired(now);
        StatsSnapshot {
            timestamp: crate::models::now_rfc3339(),
            uptime_secs: now.saturating_duration_since(state.started_at).as_secs(),
            total_requests: state.total_requests,
            total_errors: state.total_errors,
            total_bytes: state.total_bytes,
            requests_per_second: state.requests_per_second(now),
            error_rate: state.window.error_rate(),
            throughput: state.throughput(now),
            latency: state.window.latency_stats(),
            targets: state.targets,
        }
    }

    /// Error rate and p95 latency of the window against the targets; an idle window is healthy.
    pub fn is_healthy(&self) -> bool {
        self.healthy_at(Instant::now())
    }

    pub fn healthy_at(&self, now: Instant) -> bool {
        let mut state = self.lock();
        state.window.evict_expired(now);
        state.is_healthy()
    }

    /// Active alerts in the order they were raised.
    pub fn get_alerts(&self) -> Vec<Alert> {
        self.lock().alerts.snapshot()
    }

    pub fn clear_alerts(&self) {
        self.lock().alerts.clear();
    }

    /// Drops counters, window and alerts. Targets are kept.
    pub fn reset(&self) {
        self.reset_at(Instant::now());
    }

    pub fn reset_at(&self, now: Instant) {
        let mut state = self.lock();
        state.started_at = now;
        state.total_requests = 0;
        state.total_errors = 0;
        state.total_bytes = 0;
        state.window.clear();
        state.alerts.clear();
    }

    /// Replaces all four targets at once. On error the previous targets stay in place.
    pub fn set_targets(
        &self,
        rps: f64,
        latency: Duration,
        error_rate: f64,
        throughput: f64,
    ) -> Result<(), MonitorError> {
        let targets = Targets::new(rps, latency, error_rate, throughput)?;
        self.lock().targets = targets;
        Ok(())
    }

    pub fn targets(&self) -> Targets {
        self.lock().targets
    }

    /// Evaluates the rate-based rules (request rate and throughput shortfall).
    /// Returns the alerts raised by this pass.
    pub fn evaluate(&self) -> Vec<Alert> {
        self.evaluate_at(Instant::now())
    }

    pub fn evaluate_at(&self, now: Instant) -> Vec<Alert> {
        let raised = self.lock().evaluate(now, self.min_samples);
        log_raised(&raised);
        raised
    }
}

fn log_raised(raised: &[Alert]) {
    for alert in raised {
        tracing::warn!(
            alert_id = alert.id,
            kind = ?alert.kind,
            severity = ?alert.severity,
            value = alert.value,
            threshold = alert.threshold,
            "alert raised: {}",
            alert.message
        );
    }
}
