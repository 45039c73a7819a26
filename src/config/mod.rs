// Configuration module
// Author: kelexine (https://github.com/kelexine)

mod models;

pub use models::*;

use crate::error::{Result, SentinelError};
use config::{Config, Environment, File};
use std::path::{Path, PathBuf};

impl AppConfig {
    /// Load configuration from the default config file location.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (`SENTINEL_SECTION__FIELD`)
    /// 2. Config file (`path`, or `~/.sentinel/config.toml`)
    /// 3. Defaults (lowest)
    ///
    /// CLI flags are applied on top by the caller.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        // An explicitly requested file must exist
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::default_config_path()).required(false),
        };

        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix("SENTINEL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| SentinelError::Config(e.to_string()))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| SentinelError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the services cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.retry.max_attempts == 0 {
            return Err(SentinelError::Config(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        if self.retry.initial_delay_ms == 0 {
            return Err(SentinelError::Config(
                "retry.initial_delay_ms must be positive".to_string(),
            ));
        }
        if self.cache.max_entries == 0 {
            return Err(SentinelError::Config(
                "cache.max_entries must be at least 1".to_string(),
            ));
        }
        if self.server.workers == 0 {
            return Err(SentinelError::Config(
                "server.workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SentinelError::Config(e.to_string()))
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".sentinel")
            .join("config.toml")
    }
}
