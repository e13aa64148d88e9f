//! Configuration structs with sensible defaults and RON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level sandbox configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World generation settings.
    pub world: WorldConfig,
    /// Ray and prefilter settings.
    pub raycast: RaycastConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Scripted camera for the headless session.
    pub camera: CameraConfig,
    /// Headless session settings.
    pub session: SessionConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// World generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// Chunk footprint along X and Z, in blocks.
    pub chunk_width: usize,
    /// Number of vertical layers per chunk.
    pub chunk_height: usize,
    /// Chunks generated on each side of the origin chunk.
    pub radius: u32,
    /// World units per unit of noise input.
    pub noise_scale: f64,
    /// Terrain seed. `None` picks one at startup.
    pub seed: Option<u32>,
    /// Noise octaves layered into the terrain.
    pub octaves: u32,
}

/// Raycast configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RaycastConfig {
    /// Reach of the targeting ray.
    pub max_distance: f32,
    /// Scale of the look vector per ray sample.
    pub step_length: f32,
    /// Samples in the candidate-chunk vote.
    pub prefilter_steps: u32,
    /// Scale of the horizontal look vector per vote sample.
    pub prefilter_step_length: f32,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Minimum gap between repeated clicks while a button is held.
    pub click_debounce_ms: u64,
}

/// Camera configuration for the scripted session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// World position the camera starts at.
    pub start_position: [f32; 3],
    /// Initial heading in degrees, 0 looking along +X.
    pub yaw_degrees: f32,
    /// Pitch in degrees, negative looking down.
    pub pitch_degrees: f32,
    /// Heading change per second, in degrees.
    pub turn_rate_degrees: f32,
}

/// Block type chosen for added blocks.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlacementMode {
    /// Seeded uniform draw over the solid materials.
    #[default]
    Random,
    /// Always the named material, e.g. `Fixed("stone")`.
    Fixed(String),
}

/// Headless play session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulation frames to run before exiting.
    pub frames: u32,
    /// Material policy for added blocks.
    pub placement: PlacementMode,
    /// The scripted clicker alternates remove/add every this many frames.
    /// Zero disables clicking.
    pub click_period: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            chunk_width: 16,
            chunk_height: 16,
            radius: 1,
            noise_scale: 200.0,
            seed: None,
            octaves: 1,
        }
    }
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            max_distance: 8.0,
            step_length: 0.1,
            prefilter_steps: 10,
            prefilter_step_length: 0.1,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            click_debounce_ms: 100,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, 12.0, 0.0],
            yaw_degrees: 0.0,
            pitch_degrees: -35.0,
            turn_rate_degrees: 45.0,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frames: 240,
            placement: PlacementMode::Random,
            click_period: 30,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save / Reload ---

const CONFIG_FILE_NAME: &str = "config.ron";

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = Self::read_file(&config_path)?;
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
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(|source| ConfigError::Serialize {
                path: config_path.clone(),
                source,
            })?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Re-reads `config.ron`. Returns `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read_file(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
