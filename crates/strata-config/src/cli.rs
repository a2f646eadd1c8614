//! Command-line argument parsing for the `strata` driver.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, ConfigError};

/// Strata command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "strata", about = "Headless biome shifter")]
pub struct CliArgs {
    /// Milliseconds between shifter ticks.
    #[arg(long)]
    pub period_ms: Option<u64>,

    /// Sea level used for ocean/beach classification.
    #[arg(long)]
    pub sea_level: Option<i32>,

    /// Seed for climate fields, demo terrain and discovery offsets.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of shifter ticks to simulate before exiting.
    #[arg(long, default_value_t = 200)]
    pub ticks: u32,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Directory `config.ron` is read from: `--config` if given, else the platform default.
    pub fn config_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.config {
            Some(dir) => Ok(dir.clone()),
            None => default_config_dir(),
        }
    }
}

/// Per-user configuration directory, e.g. `~/.config/strata` on Linux.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("strata"))
        .ok_or(ConfigError::NoConfigDir)
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(period) = args.period_ms {
            self.shifter.period_ms = period;
        }
        if let Some(sea_level) = args.sea_level {
            self.shifter.sea_level = sea_level;
            self.climate.temperature.sea_level = f64::from(sea_level);
            self.climate.humidity.sea_level = f64::from(sea_level);
        }
        if let Some(seed) = args.seed {
            self.shifter.seed = seed;
            self.climate.seed = seed;
            self.world.seed = seed;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
