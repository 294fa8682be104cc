//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object (or no file at all) yields a
//! playable setup. Partial files override only the keys they name.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rendering::AtlasLayout;
use super::voxels::generation::{GenerationMethod, DEFAULT_HEIGHT_CACHE_CAPACITY};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Streaming parameters of the [`World`](super::voxels::world::World).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Horizontal radius, in chunks, of the region kept loaded around the reference.
    pub render_distance: i32,
    /// Vertical radius, in chunks, of the loaded region.
    pub render_distance_y: i32,
    /// Chunks materialized per update.
    pub loads_per_update: usize,
    /// Chunk meshes rebuilt per update.
    pub meshes_per_update: usize,
    pub generation: GenerationMethod,
}

impl Default for WorldConfig {
    fn default() -> Self {
        WorldConfig {
            render_distance: 4,
            render_distance_y: 2,
            loads_per_update: 1,
            meshes_per_update: 2,
            generation: GenerationMethod::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub seed: u32,
    /// Column height maps retained between chunk generations.
    pub height_cache_capacity: usize,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        TerrainConfig {
            seed: 0,
            height_cache_capacity: DEFAULT_HEIGHT_CACHE_CAPACITY,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration in blocks per second squared.
    pub gravity: f32,
    pub body_radius: f32,
    pub body_height: f32,
    /// Height of the targeting ray origin above the body's feet.
    pub eye_height: f32,
    /// Maximum distance at which blocks can be targeted.
    pub reach: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            gravity: 25.0,
            body_radius: 0.3,
            body_height: 1.8,
            eye_height: 1.6,
            reach: 5.0,
        }
    }
}

/// Top-level configuration read by the native driver.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub world: WorldConfig,
    pub terrain: TerrainConfig,
    pub physics: PhysicsConfig,
    pub atlas: AtlasLayout,
    pub driver: DriverConfig,
}

/// How long and how fast the headless driver runs.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub ticks: u32,
    pub ticks_per_second: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            ticks: 600,
            ticks_per_second: 60,
        }
    }
}

impl EngineConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Parses and validates a JSON config document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let world = &self.world;
        if world.render_distance < 0 || world.render_distance_y < 0 {
            return Err(ConfigError::Invalid(format!(
                "render distances must be non-negative, got {} and {}",
                world.render_distance, world.render_distance_y
            )));
        }
        if world.loads_per_update == 0 {
            return Err(ConfigError::Invalid(
                "loads_per_update must be at least 1".to_string(),
            ));
        }
        if self.atlas.tiles_per_row == 0 {
            return Err(ConfigError::Invalid(
                "atlas.tiles_per_row must be at least 1".to_string(),
            ));
        }
        if self.atlas.padding < 0.0 || self.atlas.padding * 2.0 >= 1.0 / self.atlas.tiles_per_row as f32 {
            return Err(ConfigError::Invalid(format!(
                "atlas.padding {} does not fit inside a tile",
                self.atlas.padding
            )));
        }
        let physics = &self.physics;
        if physics.body_radius <= 0.0 || physics.body_height <= 0.0 {
            return Err(ConfigError::Invalid(
                "body dimensions must be positive".to_string(),
            ));
        }
        if self.driver.ticks_per_second == 0 {
            return Err(ConfigError::Invalid(
                "driver.ticks_per_second must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.world.render_distance, 4);
        assert_eq!(config.world.meshes_per_update, 2);
        assert_eq!(config.physics.gravity, 25.0);
        assert_eq!(config.atlas.tiles_per_row, 16);
    }

    #[test]
    fn partial_documents_override_named_keys() {
        let config = EngineConfig::from_json(
            r#"{
                "world": { "render_distance": 2, "generation": { "method": "flat", "height": 5 } },
                "terrain": { "seed": 99 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.world.render_distance, 2);
        assert_eq!(config.world.render_distance_y, 2);
        assert_eq!(config.world.generation, GenerationMethod::Flat { height: 5 });
        assert_eq!(config.terrain.seed, 99);
        assert_eq!(config.terrain.height_cache_capacity, 1024);
    }

    #[test]
    fn zero_load_budget_is_rejected() {
        let error = EngineConfig::from_json(r#"{"world":{"loads_per_update":0}}"#).unwrap_err();
        assert!(matches!(error, ConfigError::Invalid(_)));
    }

    #[test]
    fn oversized_padding_is_rejected() {
        let error = EngineConfig::from_json(r#"{"atlas":{"padding":0.05}}"#).unwrap_err();
        assert!(matches!(error, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let error = EngineConfig::from_json("{ world: ").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let error = EngineConfig::load("/nonexistent/voxel-world.json").unwrap_err();
        assert!(matches!(error, ConfigError::Io(_)));
    }
}
