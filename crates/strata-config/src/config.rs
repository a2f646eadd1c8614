//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain shifter and discovery settings.
    pub shifter: ShifterConfig,
    /// Temperature and humidity field settings.
    pub climate: ClimateConfig,
    /// Block names resolved against the block registry at startup.
    pub palette: PaletteConfig,
    /// Demo world seeding used by the headless driver.
    pub world: WorldConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Where the shifter samples temperature and humidity while rewriting a column.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClassifyAt {
    /// At the surface y recorded when the column was discovered.
    #[default]
    Surface,
    /// At the y currently being rewritten.
    Cursor,
}

/// Terrain shifter configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShifterConfig {
    /// Elevation at or below which a column is ocean.
    pub sea_level: i32,
    /// Period between shifter ticks, in milliseconds.
    pub period_ms: u64,
    /// Maximum horizontal offset from the observer when picking a new column.
    pub sample_radius: f64,
    /// Combined step budget for the surface search.
    pub surface_search_limit: u32,
    /// Columns are retired once they have written a block deeper than this.
    pub max_depth: u32,
    /// Lowest y the host world stores. Columns never write below it.
    pub min_world_y: i32,
    /// Upper bound on simultaneously tracked columns.
    pub max_tracked: usize,
    /// Columns farther than this (horizontally) from the observer are dropped.
    /// `0.0` disables radius eviction.
    pub retire_radius: f64,
    /// Field sampling height used when re-classifying tracked columns.
    pub classify_at: ClassifyAt,
    /// Seed for the discovery offset RNG.
    pub seed: u64,
}

/// Response curve applied to a normalized field value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub enum Curve {
    /// Pass the value through unchanged.
    #[default]
    Identity,
    /// Raise the value to the given power.
    Power(f64),
}

/// Shape of one continuous climate field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    /// Height above which the field starts to fall off.
    pub sea_level: f64,
    /// Height span over which `scale` is fully applied.
    pub amplitude: f64,
    /// Total falloff across `amplitude` blocks above `sea_level`.
    pub scale: f64,
    /// Response curve applied after altitude falloff.
    pub curve: Curve,
    /// Added after the curve.
    pub offset: f64,
    /// Multiplies the curved value before `offset` is added.
    pub gain: f64,
    /// Horizontal noise frequency.
    pub frequency: f64,
}

/// Climate configuration: one [`FieldConfig`] per field plus a shared seed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClimateConfig {
    /// World seed the noise fields are derived from.
    pub seed: u64,
    /// Temperature field.
    pub temperature: FieldConfig,
    /// Humidity field.
    pub humidity: FieldConfig,
}

/// Names of the blocks the shifter reads and writes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub air: String,
    pub stone: String,
    pub water: String,
    pub ice: String,
    pub sand: String,
    pub grass: String,
    pub snow: String,
    pub dirt: String,
}

/// Demo world generated by the headless driver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the terrain heightmap.
    pub seed: u64,
    /// Terrain height at zero noise.
    pub base_height: f64,
    /// Amplitude of the first heightmap octave.
    pub height_amplitude: f64,
    /// Columns below this height are flooded up to it.
    pub water_level: i32,
    /// Half-width of the seeded square, in blocks.
    pub extent: i32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Write a JSON log file next to the config.
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for ShifterConfig {
    fn default() -> Self {
        Self {
            sea_level: 32,
            period_ms: 6000,
            sample_radius: 10.0,
            surface_search_limit: 40,
            max_depth: 64,
            min_world_y: 0,
            max_tracked: 4096,
            retire_radius: 128.0,
            classify_at: ClassifyAt::Surface,
            seed: 0,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            sea_level: 32.0,
            amplitude: 1000.0,
            scale: 0.5,
            curve: Curve::Identity,
            offset: 0.0,
            gain: 1.0,
            frequency: 0.002,
        }
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            temperature: FieldConfig::default(),
            humidity: FieldConfig {
                frequency: 0.0025,
                ..FieldConfig::default()
            },
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            air: "engine:air".to_string(),
            stone: "core:stone".to_string(),
            water: "core:water".to_string(),
            ice: "core:ice".to_string(),
            sand: "core:sand".to_string(),
            grass: "core:grass".to_string(),
            snow: "core:snow".to_string(),
            dirt: "core:dirt".to_string(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            base_height: 48.0,
            height_amplitude: 24.0,
            water_level: 32,
            extent: 64,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(config_dir)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::WriteError {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::WriteError {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(config_dir)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents =
            std::fs::read_to_string(&config_path).map_err(|source| ConfigError::ReadError {
                path: config_path.clone(),
                source,
            })?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("sea_level: 32"));
        assert!(ron_str.contains("period_ms: 6000"));
        assert!(ron_str.contains("\"core:stone\""));
    }

    #[test]
    fn test_defaults_match_reference_shifter() {
        let config = Config::default();
        assert_eq!(config.shifter.surface_search_limit, 40);
        assert_eq!(config.shifter.sample_radius, 10.0);
        assert_eq!(config.shifter.classify_at, ClassifyAt::Surface);
        assert_eq!(config.climate.temperature.curve, Curve::Identity);
        assert_eq!(config.climate.temperature.amplitude, 1000.0);
        assert_eq!(config.climate.humidity.gain, 1.0);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(shifter: (), climate: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.palette, PaletteConfig::default());
        assert_eq!(config.world, WorldConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let ron_str = "(shifter: (sea_level: 64, classify_at: Cursor))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.shifter.sea_level, 64);
        assert_eq!(config.shifter.classify_at, ClassifyAt::Cursor);
        assert_eq!(config.shifter.period_ms, 6000);
    }

    #[test]
    fn test_power_curve_parses() {
        let ron_str = "(climate: (humidity: (curve: Power(2.0), gain: 0.8)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.climate.humidity.curve, Curve::Power(2.0));
        assert_eq!(config.climate.humidity.gain, 0.8);
        assert_eq!(config.climate.temperature, FieldConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.shifter.max_tracked = 16;
        config.palette.snow = "mymod:powder".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.shifter.period_ms = 1000;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().shifter.period_ms, 1000);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_reload_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::default().reload(dir.path());
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }
}
