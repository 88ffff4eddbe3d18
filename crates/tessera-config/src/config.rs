//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use glam::DVec2;
use serde::{Deserialize, Serialize};
use tessera_terrain::{NoiseSettings, TerrainParams, TerrainSeed};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain generation settings.
    pub terrain: TerrainConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Terrain generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Number of elevation layers (1-16).
    pub layer_count: u32,
    /// Spatial frequency of the sampled noise.
    pub noise_scale: f64,
    /// Contrast exponent applied to normalized noise.
    pub noise_power: f64,
    /// Horizontal shift of the sampling window.
    pub offset_x: f64,
    /// Vertical shift of the sampling window.
    pub offset_y: f64,
    /// Fixed seed. `None` draws a fresh one on every run.
    pub seed: Option<u64>,
    /// Noise source settings.
    pub noise: NoiseConfig,
}

/// Noise source settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NoiseConfig {
    /// Use fractal (multi-octave) noise instead of plain simplex.
    pub fractal: bool,
    /// Octave count for fractal noise.
    pub octaves: u32,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
}

/// Debug/development settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files in debug builds.
    pub log_dir: Option<PathBuf>,
    /// Print the per-layer cell histogram after each generation.
    pub show_layer_histogram: bool,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 60,
            layer_count: 3,
            noise_scale: 0.05,
            noise_power: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            seed: None,
            noise: NoiseConfig::default(),
        }
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            fractal: false,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
            show_layer_histogram: true,
        }
    }
}

// --- Conversion ---

impl NoiseConfig {
    /// The noise source these settings select.
    pub fn to_settings(&self) -> NoiseSettings {
        if self.fractal {
            NoiseSettings::Fractal {
                octaves: self.octaves,
                persistence: self.persistence,
                lacunarity: self.lacunarity,
            }
        } else {
            NoiseSettings::Simplex
        }
    }
}

impl TerrainConfig {
    /// Build validated generation parameters.
    ///
    /// An absent seed is resolved here, once, by drawing a random one, so
    /// the generator itself never holds hidden randomness.
    pub fn to_params(&self) -> Result<TerrainParams, ConfigError> {
        let seed = self.seed.map_or_else(TerrainSeed::random, TerrainSeed);
        let params = TerrainParams {
            width: self.width,
            height: self.height,
            layer_count: self.layer_count,
            noise_scale: self.noise_scale,
            noise_power: self.noise_power,
            offset: DVec2::new(self.offset_x, self.offset_y),
            seed,
            noise: self.noise.to_settings(),
        };
        params.validate()?;
        Ok(params)
    }
}

// --- Load / Save / Reload ---

/// Platform config directory for Tessera, e.g. `~/.config/tessera`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tessera"))
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
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
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let contents =
            std::fs::read_to_string(config_dir.join(CONFIG_FILE)).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
