// Shared test helpers

#![allow(dead_code)]

use perfwatch::config::{AppConfig, MonitorConfig};
use perfwatch::models::Targets;
use perfwatch::monitor::PerformanceMonitor;
use std::sync::Arc;
use std::time::Duration;

pub const TEST_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[monitor]
window_secs = 60
max_samples = 1000
max_alerts = 50
min_samples = 5

[targets]
rps = 0.0
latency = "500ms"
error_rate = 0.05
throughput = 0.0

[publishing]
stats_frequency_ms = 100

[worker]
evaluation_interval_ms = 50
stats_log_interval_secs = 60
"#;

pub fn test_app_config() -> AppConfig {
    AppConfig::load_from_str(TEST_CONFIG).unwrap()
}

pub fn test_app() -> (axum::Router, Arc<PerformanceMonitor>) {
    let config = test_app_config();
    let monitor = Arc::new(PerformanceMonitor::new(&config.monitor, config.targets));
    let app = perfwatch::routes::app(monitor.clone(), config);
    (app, monitor)
}

pub fn monitor_config(min_samples: usize) -> MonitorConfig {
    MonitorConfig {
        window_secs: 60,
        max_samples: 10_000,
        max_alerts: 50,
        min_samples,
    }
}

pub fn targets(rps: f64, latency_ms: u64, error_rate: f64, throughput: f64) -> Targets {
    Targets::new(
        rps,
        Duration::from_millis(latency_ms),
        error_rate,
        throughput,
    )
    .unwrap()
}
