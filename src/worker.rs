// Background evaluation worker.
// Runs the rate-based alert rules on a fixed interval and periodically logs monitor stats.

use crate::monitor::PerformanceMonitor;
use std::sync::Arc;
use tokio::time::{Duration, interval};
use tracing::Instrument;

/// Monitor and shutdown signal for the worker.
pub struct WorkerDeps {
    pub monitor: Arc<PerformanceMonitor>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

/// Worker timing. Both intervals are real time, independent of the monitor window.
pub struct WorkerTimings {
    pub evaluation_interval_ms: u64,
    /// How often to log monitor stats (real seconds).
    pub stats_log_interval_secs: u64,
}

impl From<&crate::config::WorkerConfig> for WorkerTimings {
    fn from(config: &crate::config::WorkerConfig) -> Self {
        Self {
            evaluation_interval_ms: config.evaluation_interval_ms,
            stats_log_interval_secs: config.stats_log_interval_secs,
        }
    }
}

pub fn spawn(deps: WorkerDeps, timings: WorkerTimings) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        monitor,
        mut shutdown_rx,
    } = deps;
    let WorkerTimings {
        evaluation_interval_ms,
        stats_log_interval_secs,
    } = timings;

    let worker_span = tracing::span!(tracing::Level::DEBUG, "worker", evaluation_interval_ms);
    tokio::spawn(
        async move {
            let mut eval_tick = interval(Duration::from_millis(evaluation_interval_ms));
            eval_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
            stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            let mut alerts_raised_total: u64 = 0;

            loop {
                tokio::select! {
                    _ = eval_tick.tick() => {
                        let raised = monitor.evaluate();
                        alerts_raised_total += raised.len() as u64;
                        tracing::debug!(
                            operation = "evaluate",
                            raised = raised.len(),
                            "Rate rules evaluated"
                        );
                    }
                    _ = stats_log_tick.tick() => {
                        let stats = monitor.get_stats();
                        tracing::info!(
                            total_requests = stats.total_requests,
                            total_errors = stats.total_errors,
                            requests_per_second = stats.requests_per_second,
                            error_rate = stats.error_rate,
                            p95_ms = stats.latency.p95_ms,
                            active_alerts = monitor.get_alerts().len(),
                            alerts_raised_total,
                            "monitor stats"
                        );
                    }
                    _ = &mut shutdown_rx => {
                        tracing::debug!("Worker shutting down");
                        break;
                    }
                }
            }
        }
        .instrument(worker_span),
    )
}
