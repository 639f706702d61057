// File: summary/src/config/mod.rs
pub mod manager;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::defaults;

pub use manager::ConfigManager;

/// Settings for one summary run, threaded explicitly through the collectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_seed_host")]
    pub seed_host: String,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "default_sample_count")]
    pub sample_count: u32,
    #[serde(default = "default_sample_interval_seconds")]
    pub sample_interval_seconds: u64,
    #[serde(default = "default_max_concurrent_hosts")]
    pub max_concurrent_hosts: usize,
    #[serde(default = "default_connect_timeout_seconds")]
    pub connect_timeout_seconds: u64,
    #[serde(default = "default_server_selection_timeout_seconds")]
    pub server_selection_timeout_seconds: u64,
    #[serde(default)]
    pub average_mode: AverageMode,
}

fn default_seed_host() -> String {
    defaults::SEED_HOST.to_string()
}

fn default_sample_count() -> u32 {
    defaults::SAMPLE_COUNT
}

fn default_sample_interval_seconds() -> u64 {
    defaults::SAMPLE_INTERVAL_SECONDS
}

fn default_max_concurrent_hosts() -> usize {
    defaults::MAX_CONCURRENT_HOSTS
}

fn default_connect_timeout_seconds() -> u64 {
    defaults::CONNECT_TIMEOUT_SECONDS
}

fn default_server_selection_timeout_seconds() -> u64 {
    defaults::SERVER_SELECTION_TIMEOUT_SECONDS
}

/// Divisor used when averaging sampled operation counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AverageMode {
    /// Divide by the configured sample count, even when some reads failed
    #[default]
    Configured,
    /// Divide by the number of readings that succeeded
    Successful,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed_host: default_seed_host(),
            debug: false,
            sample_count: default_sample_count(),
            sample_interval_seconds: default_sample_interval_seconds(),
            max_concurrent_hosts: default_max_concurrent_hosts(),
            connect_timeout_seconds: default_connect_timeout_seconds(),
            server_selection_timeout_seconds: default_server_selection_timeout_seconds(),
            average_mode: AverageMode::default(),
        }
    }
}

impl RunConfig {
    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.sample_interval_seconds)
    }

    /// Wall-clock time covered by the operation sampler
    pub fn sampling_window(&self) -> Duration {
        self.sample_interval()
            .checked_mul(self.sample_count.saturating_sub(1))
            .unwrap_or(Duration::MAX)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.seed_host.trim().is_empty() {
            anyhow::bail!("seed_host must not be empty");
        }
        if self.sample_count == 0 {
            anyhow::bail!("sample_count must be at least 1");
        }
        if self.sample_interval_seconds > defaults::MAX_SAMPLE_INTERVAL_SECONDS {
            anyhow::bail!(
                "sample_interval_seconds must be at most {}, got {}",
                defaults::MAX_SAMPLE_INTERVAL_SECONDS,
                self.sample_interval_seconds
            );
        }
        if self.max_concurrent_hosts == 0 {
            anyhow::bail!("max_concurrent_hosts must be at least 1");
        }
        Ok(())
    }
}
