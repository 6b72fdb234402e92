// Config loading and validation tests

use perfwatch::config::AppConfig;
use std::time::Duration;

const VALID_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[monitor]
window_secs = 30
max_samples = 500
max_alerts = 20
min_samples = 3

[targets]
rps = 100.0
latency = "200ms"
error_rate = 0.01
throughput = 50.0

[publishing]
stats_frequency_ms = 1000

[worker]
evaluation_interval_ms = 5000
stats_log_interval_secs = 60
"#;

const MINIMAL_CONFIG: &str = r#"
[server]
port = 9000
host = "127.0.0.1"
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.monitor.window_secs, 30);
    assert_eq!(config.monitor.max_samples, 500);
    assert_eq!(config.monitor.min_samples, 3);
    assert_eq!(config.targets.rps, 100.0);
    assert_eq!(config.targets.latency, Duration::from_millis(200));
    assert_eq!(config.targets.error_rate, 0.01);
    assert_eq!(config.targets.throughput, 50.0);
    assert_eq!(config.worker.evaluation_interval_ms, 5000);
}

#[test]
fn test_config_defaults_when_sections_omitted() {
    let config = AppConfig::load_from_str(MINIMAL_CONFIG).expect("minimal");
    assert_eq!(config.monitor.window_secs, 60);
    assert_eq!(config.monitor.max_samples, 10_000);
    assert_eq!(config.monitor.max_alerts, 100);
    assert_eq!(config.monitor.min_samples, 10);
    assert_eq!(config.targets.latency, Duration::from_secs(1));
    assert_eq!(config.targets.error_rate, 0.05);
    assert_eq!(config.publishing.stats_frequency_ms, 1000);
    assert_eq!(config.worker.stats_log_interval_secs, 60);
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_window_zero() {
    let bad = VALID_CONFIG.replace("window_secs = 30", "window_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("window_secs"));
}

#[test]
fn test_config_validation_rejects_max_samples_zero() {
    let bad = VALID_CONFIG.replace("max_samples = 500", "max_samples = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_samples"));
}

#[test]
fn test_config_validation_rejects_max_alerts_zero() {
    let bad = VALID_CONFIG.replace("max_alerts = 20", "max_alerts = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_alerts"));
}

#[test]
fn test_config_validation_rejects_negative_target_rps() {
    let bad = VALID_CONFIG.replace("rps = 100.0", "rps = -1.0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("rps"));
}

#[test]
fn test_config_validation_rejects_error_rate_above_one() {
    let bad = VALID_CONFIG.replace("error_rate = 0.01", "error_rate = 1.5");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("error_rate"));
}

#[test]
fn test_config_validation_rejects_zero_latency() {
    let bad = VALID_CONFIG.replace("latency = \"200ms\"", "latency = \"0\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("latency"));
}

#[test]
fn test_config_rejects_unparsable_latency() {
    let bad = VALID_CONFIG.replace("latency = \"200ms\"", "latency = \"soon\"");
    assert!(AppConfig::load_from_str(&bad).is_err());
}

#[test]
fn test_config_validation_rejects_stats_frequency_zero() {
    let bad = VALID_CONFIG.replace("stats_frequency_ms = 1000", "stats_frequency_ms = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("stats_frequency_ms"));
}

#[test]
fn test_config_validation_rejects_evaluation_interval_zero() {
    let bad = VALID_CONFIG.replace(
        "evaluation_interval_ms = 5000",
        "evaluation_interval_ms = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("evaluation_interval_ms"));
}

#[test]
fn test_config_validation_rejects_stats_log_interval_zero() {
    let bad = VALID_CONFIG.replace(
        "stats_log_interval_secs = 60",
        "stats_log_interval_secs = 0",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("stats_log_interval_secs"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.targets.latency, Duration::from_millis(200));
}
