//! Configuration system for the ocean simulation.
//!
//! Supports YAML configuration files with sensible defaults. Every section
//! falls back to its `Default` when omitted from the file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Fallback world width when a non-positive width is requested
pub const DEFAULT_WIDTH: f64 = 1600.0;
/// Fallback world height when a non-positive height is requested
pub const DEFAULT_HEIGHT: f64 = 900.0;

/// Errors raised while loading or validating a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub fish: FishConfig,
    #[serde(default)]
    pub sharks: SharkConfig,
    #[serde(default)]
    pub plankton: PlanktonConfig,
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub obstacles: ObstacleConfig,
    #[serde(default)]
    pub fisherman: FishermanConfig,
    #[serde(default)]
    pub day_night: DayNightConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// World dimensions and spatial index resolution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// World width in pixels
    pub width: f64,
    /// World height in pixels
    pub height: f64,
    /// Side length of a spatial grid bucket
    pub grid_cell_size: f64,
}

/// Fish population and energy budget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FishConfig {
    /// Number of fish at start
    pub initial_count: usize,
    /// Hard population cap
    pub max_fish: usize,
    /// Below this count the ocean tops the population up from the edges
    pub min_population: usize,
    /// Maximum fish spawned per tick by the population floor
    pub floor_spawn_per_tick: usize,
    /// Starting energy for new fish
    pub base_energy: f64,
    /// Energy lost every tick
    pub energy_decay: f64,
    /// Energy requested from a plankton patch per feed
    pub feed_gain: f64,
    /// Energy above which a fish reproduces
    pub reproduction_threshold: f64,
    /// Energy deducted from the parent on reproduction
    pub reproduction_cost: f64,
    /// Standard deviation of the newborn position jitter
    pub birth_jitter: f64,
    /// Weight of the environmental current on fish heading
    pub current_influence: f64,
}

/// Predator limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SharkConfig {
    /// Maximum number of sharks
    pub max_sharks: usize,
    /// Maximum number of drifting creatures (jellyfish and turtles)
    pub max_drifters: usize,
}

/// Plankton food web
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanktonConfig {
    /// Patches seeded at start; the ocean keeps up to twice this many
    pub initial_patches: usize,
    /// Biomass cap per patch
    pub max_biomass: f64,
    /// Biomass regrown per tick
    pub regen_rate: f64,
    /// Radius within which fish can feed
    pub feed_radius: f64,
    /// Biomass at or below which a patch is removed
    pub depletion_threshold: f64,
    /// Per-tick probability of spawning a replacement patch
    pub spawn_chance: f64,
}

/// Environmental current field
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Cells per axis
    pub cells: usize,
    /// Global time advance per tick before the animation multiplier
    pub time_scale: f64,
}

/// User-placed obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleConfig {
    /// Radius used when the caller does not provide one
    pub default_radius: f64,
    /// Lifetime in ticks
    pub lifetime: u32,
}

/// Fisherman hook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FishermanConfig {
    /// Vertical hook speed per tick
    pub speed: f64,
    /// Catch radius around the hook
    pub catch_radius: f64,
    /// Target depth as a fraction of world height
    pub depth_ratio: f64,
}

/// Day/night timer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DayNightConfig {
    pub enabled: bool,
    /// Ticks per full day
    pub cycle_ticks: u32,
}

/// Worker pool sizing and shutdown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Worker threads for the fish phase (0 = available parallelism)
    pub workers: usize,
    /// How long shutdown waits for workers to exit, in milliseconds
    pub shutdown_grace_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Ticks between stats history records and summary log lines
    pub stats_interval: u64,
    /// Default log filter of the CLI (off, error, warn, info, debug, trace);
    /// `RUST_LOG` overrides it
    pub log_level: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            grid_cell_size: 100.0,
        }
    }
}

impl Default for FishConfig {
    fn default() -> Self {
        Self {
            initial_count: 500,
            max_fish: 1800,
            min_population: 40,
            floor_spawn_per_tick: 5,
            base_energy: 1200.0,
            energy_decay: 0.35,
            feed_gain: 180.0,
            reproduction_threshold: 1400.0,
            reproduction_cost: 600.0,
            birth_jitter: 4.0,
            current_influence: 0.35,
        }
    }
}

impl Default for SharkConfig {
    fn default() -> Self {
        Self {
            max_sharks: 35,
            max_drifters: 40,
        }
    }
}

impl Default for PlanktonConfig {
    fn default() -> Self {
        Self {
            initial_patches: 15,
            max_biomass: 400.0,
            regen_rate: 0.8,
            feed_radius: 28.0,
            depletion_threshold: 2.0,
            spawn_chance: 0.02,
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            cells: 32,
            time_scale: 0.0015,
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            default_radius: 30.0,
            lifetime: 500,
        }
    }
}

impl Default for FishermanConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            catch_radius: 20.0,
            depth_ratio: 0.8,
        }
    }
}

impl Default for DayNightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cycle_ticks: 36_000,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            shutdown_grace_ms: 500,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 100,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values.
    ///
    /// World dimensions are not checked here: the ocean substitutes the
    /// default window size for non-positive values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.grid_cell_size <= 0.0 {
            return Err(ConfigError::Invalid("grid_cell_size must be > 0".into()));
        }
        if self.fish.max_fish == 0 {
            return Err(ConfigError::Invalid("max_fish must be > 0".into()));
        }
        if self.fish.initial_count > self.fish.max_fish {
            return Err(ConfigError::Invalid(
                "initial_count cannot exceed max_fish".into(),
            ));
        }
        if self.fish.min_population > self.fish.max_fish {
            return Err(ConfigError::Invalid(
                "min_population cannot exceed max_fish".into(),
            ));
        }
        if self.field.cells == 0 {
            return Err(ConfigError::Invalid("field cells must be > 0".into()));
        }
        if self.plankton.max_biomass <= 0.0 {
            return Err(ConfigError::Invalid("max_biomass must be > 0".into()));
        }
        if self.day_night.cycle_ticks == 0 {
            return Err(ConfigError::Invalid("cycle_ticks must be > 0".into()));
        }
        if self.logging.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "unknown log_level '{}'",
                self.logging.log_level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_checked() {
        let mut config = Config::default();
        config.logging.log_level = "debug".into();
        assert!(config.validate().is_ok());

        config.logging.log_level = "chatty".into();
        match config.validate() {
            Err(ConfigError::Invalid(msg)) => assert!(msg.contains("chatty")),
            other => panic!("expected invalid log level, got {:?}", other),
        }
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.fish.max_fish, loaded.fish.max_fish);
        assert_eq!(config.world.width, loaded.world.width);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "fish:\n  initial_count: 10\n  max_fish: 20\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.fish.max_fish, 20);
        assert_eq!(config.fish.base_energy, 1200.0);
        assert_eq!(config.sharks.max_sharks, 35);
        assert_eq!(config.field.cells, 32);
    }

    #[test]
    fn test_invalid_population() {
        let mut config = Config::default();
        config.fish.initial_count = config.fish.max_fish + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reef.yaml");

        let mut config = Config::default();
        config.fish.initial_count = 123;
        config.save(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.fish.initial_count, 123);
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/nonexistent/reef.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
