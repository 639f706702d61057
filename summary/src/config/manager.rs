// File: summary/src/config/manager.rs
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use super::RunConfig;

/// Command line values that take precedence over the configuration file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub seed_host: Option<String>,
    pub debug: bool,
    pub sample_count: Option<u32>,
    pub sample_interval_seconds: Option<u64>,
}

pub struct ConfigManager;

impl ConfigManager {
    /// Build the run configuration: defaults, then the optional TOML file,
    /// then command line overrides.
    pub async fn load(path: Option<&Path>, overrides: ConfigOverrides) -> Result<RunConfig> {
        let mut config = match path {
            Some(path) => Self::load_file(path).await?,
            None => {
                debug!("No configuration file given, using defaults");
                RunConfig::default()
            }
        };

        Self::apply_overrides(&mut config, overrides);
        config.validate()?;

        Ok(config)
    }

    async fn load_file(path: &Path) -> Result<RunConfig> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: RunConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn apply_overrides(config: &mut RunConfig, overrides: ConfigOverrides) {
        if let Some(host) = overrides.seed_host {
            config.seed_host = host;
        }
        if overrides.debug {
            config.debug = true;
        }
        if let Some(count) = overrides.sample_count {
            config.sample_count = count;
        }
        if let Some(seconds) = overrides.sample_interval_seconds {
            config.sample_interval_seconds = seconds;
        }
    }
}
