//! Configuration system for the Strata biome shifter.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, default_config_dir};
pub use config::{
    ClassifyAt, ClimateConfig, Config, Curve, DebugConfig, FieldConfig, PaletteConfig,
    ShifterConfig, WorldConfig,
};
pub use error::ConfigError;
