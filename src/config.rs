use serde::Deserialize;

use crate::models::Targets;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Initial targets; replaced at runtime via POST /api/v1/performance/targets.
    #[serde(default)]
    pub targets: Targets,
    #[serde(default)]
    pub publishing: PublishingConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// Rolling window for rates, error rate and latency percentiles.
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
    #[serde(default = "default_max_alerts")]
    pub max_alerts: usize,
    /// Samples required in the window before error-rate and rate alerts fire.
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
}

fn default_window_secs() -> u64 {
    60
}

fn default_max_samples() -> usize {
    10_000
}

fn default_max_alerts() -> usize {
    100
}

fn default_min_samples() -> usize {
    10
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            max_samples: default_max_samples(),
            max_alerts: default_max_alerts(),
            min_samples: default_min_samples(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishingConfig {
    /// How often /ws/performance pushes a stats snapshot.
    #[serde(default = "default_stats_frequency_ms")]
    pub stats_frequency_ms: u64,
}

fn default_stats_frequency_ms() -> u64 {
    1000
}

impl Default for PublishingConfig {
    fn default() -> Self {
        Self {
            stats_frequency_ms: default_stats_frequency_ms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerConfig {
    /// How often rate-based alert rules run.
    #[serde(default = "default_evaluation_interval_ms")]
    pub evaluation_interval_ms: u64,
    /// How often to log monitor stats at INFO level.
    #[serde(default = "default_stats_log_interval_secs")]
    pub stats_log_interval_secs: u64,
}

fn default_evaluation_interval_ms() -> u64 {
    5000
}

fn default_stats_log_interval_secs() -> u64 {
    60
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            evaluation_interval_ms: default_evaluation_interval_ms(),
            stats_log_interval_secs: default_stats_log_interval_secs(),
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.monitor.window_secs > 0,
            "monitor.window_secs must be > 0, got {}",
            self.monitor.window_secs
        );
        anyhow::ensure!(
            self.monitor.max_samples > 0,
            "monitor.max_samples must be > 0, got {}",
            self.monitor.max_samples
        );
        anyhow::ensure!(
            self.monitor.max_alerts > 0,
            "monitor.max_alerts must be > 0, got {}",
            self.monitor.max_alerts
        );
        self.targets
            .validate()
            .map_err(|e| anyhow::anyhow!("targets: {}", e))?;
        anyhow::ensure!(
            self.publishing.stats_frequency_ms > 0,
            "publishing.stats_frequency_ms must be > 0, got {}",
            self.publishing.stats_frequency_ms
        );
        anyhow::ensure!(
            self.worker.evaluation_interval_ms > 0,
            "worker.evaluation_interval_ms must be > 0, got {}",
            self.worker.evaluation_interval_ms
        );
        anyhow::ensure!(
            self.worker.stats_log_interval_secs > 0,
            "worker.stats_log_interval_secs must be > 0, got {}",
            self.worker.stats_log_interval_secs
        );
        Ok(())
    }
}
