// CLI module for sentinel
// Author: kelexine (https://github.com/kelexine)

use crate::config::AppConfig;
use clap::Parser;
use std::path::PathBuf;

/// sentinel - error-tracking integration service
#[derive(Parser, Debug)]
#[command(name = "sentinel", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.sentinel/config.toml)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Deployment environment reported with every event
    #[arg(long, env = "SENTINEL_ENV")]
    pub environment: Option<String>,

    /// Project DSN; telemetry stays disabled without one
    #[arg(long, env = "SENTINEL_DSN")]
    pub dsn: Option<String>,

    /// Capture the division-by-zero sample event and exit
    #[arg(long)]
    pub demo: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Apply CLI overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(environment) = &self.environment {
            config.telemetry.environment = environment.clone();
        }
        if let Some(dsn) = &self.dsn {
            config.telemetry.dsn = Some(dsn.clone());
        }
    }
}
