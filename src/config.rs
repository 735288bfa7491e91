use serde::Deserialize;

use crate::cpu_usage::CpuUsageMode;
use crate::rate::SMOOTHING_ALPHA;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub sampling: SamplingConfig,
    pub publishing: PublishingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplingConfig {
    /// Per-tier budget for one counter acquisition (command or file read).
    #[serde(default = "default_command_timeout_ms")]
    pub command_timeout_ms: u64,
    /// Weight of the newest interval in the network rate EMA.
    #[serde(default = "default_smoothing_alpha")]
    pub smoothing_alpha: f64,
    #[serde(default)]
    pub cpu_usage: CpuUsageMode,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            command_timeout_ms: default_command_timeout_ms(),
            smoothing_alpha: default_smoothing_alpha(),
            cpu_usage: CpuUsageMode::default(),
        }
    }
}

fn default_command_timeout_ms() -> u64 {
    1500
}

fn default_smoothing_alpha() -> f64 {
    SMOOTHING_ALPHA
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishingConfig {
    /// Push interval for /ws/metrics.
    pub metrics_frequency_ms: u64,
    /// Snapshots buffered per subscriber before a slow client starts lagging.
    #[serde(default = "default_broadcast_capacity")]
    pub broadcast_capacity: usize,
}

fn default_broadcast_capacity() -> usize {
    16
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
            !self.server.host.is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            self.sampling.command_timeout_ms > 0,
            "sampling.command_timeout_ms must be > 0, got {}",
            self.sampling.command_timeout_ms
        );
        anyhow::ensure!(
            self.sampling.smoothing_alpha > 0.0 && self.sampling.smoothing_alpha <= 1.0,
            "sampling.smoothing_alpha must be in (0, 1], got {}",
            self.sampling.smoothing_alpha
        );
        anyhow::ensure!(
            self.publishing.metrics_frequency_ms > 0,
            "publishing.metrics_frequency_ms must be > 0, got {}",
            self.publishing.metrics_frequency_ms
        );
        anyhow::ensure!(
            self.publishing.broadcast_capacity > 0,
            "publishing.broadcast_capacity must be > 0, got {}",
            self.publishing.broadcast_capacity
        );
        Ok(())
    }
}
