use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::AppConfig;
use crate::domain::errors::SweepError;
use crate::infrastructure::logging::parse_log_level;

/// Project configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "bifurcate.yaml";

/// Prefix for environment overrides, e.g. `BIFURCATE_SWEEP__MAX_CONCURRENCY=8`
pub const ENV_PREFIX: &str = "BIFURCATE_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid sweep configuration: {0}")]
    Sweep(#[from] SweepError),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid display size: {width}x{height}. Both dimensions must be at least 1")]
    InvalidDisplaySize { width: u32, height: u32 },

    #[error("Configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. `bifurcate.yaml` in the working directory (optional)
    /// 3. `explicit` file passed with `--config` (must exist)
    /// 4. Environment variables (`BIFURCATE_*` prefix, `__` separates sections)
    pub fn load(explicit: Option<&Path>) -> Result<AppConfig> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_path_buf()).into());
            }
        }

        let config: AppConfig = Self::figment(explicit)
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file, without environment overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<AppConfig> {
        let path = path.as_ref();
        let config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::file(path))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// The layered provider stack used by [`ConfigLoader::load`]
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::file(DEFAULT_CONFIG_FILE));

        if let Some(path) = explicit {
            figment = figment.merge(Yaml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
        config.sweep.validate()?;

        if parse_log_level(&config.logging.level).is_err() {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.display.width == 0 || config.display.height == 0 {
            return Err(ConfigError::InvalidDisplaySize {
                width: config.display.width,
                height: config.display.height,
            });
        }

        Ok(())
    }
}
