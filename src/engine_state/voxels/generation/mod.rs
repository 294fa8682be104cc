//! # Chunk Generation
//!
//! Fills freshly allocated chunks with blocks. Every generator is a deterministic function
//! of the chunk coordinate and its own configuration, so unloading and reloading a chunk
//! always reproduces the same voxels.
//!
//! Multiple generation strategies are supported:
//! - `Terrain`: noise-driven heightmap with layered soil, ores, beaches and vegetation
//! - `Flat`: bedrock floor under a uniform stone fill
//! - `Empty`: all blocks air

use serde::{Deserialize, Serialize};

use super::block::block_type::BlockType;
use super::chunk::{Chunk, CHUNK_DIMENSION};
use crate::engine_state::config::TerrainConfig;

mod terrain;

pub use terrain::{TerrainGenerator, DEFAULT_HEIGHT_CACHE_CAPACITY};

/// Populates the voxels of a chunk that was just allocated.
pub trait ChunkGenerator {
    /// Writes every non-air cell of `chunk` based on its position.
    fn generate_chunk(&mut self, chunk: &mut Chunk);
}

/// The method used to generate new chunks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum GenerationMethod {
    #[default]
    Terrain,
    Flat {
        height: i32,
    },
    Empty,
}

impl GenerationMethod {
    /// Instantiates the generator this method names.
    pub fn build(self, terrain: &TerrainConfig) -> Box<dyn ChunkGenerator> {
        match self {
            GenerationMethod::Terrain => Box::new(TerrainGenerator::with_cache_capacity(
                terrain.seed,
                terrain.height_cache_capacity,
            )),
            GenerationMethod::Flat { height } => Box::new(FlatGenerator { height }),
            GenerationMethod::Empty => Box::new(EmptyGenerator),
        }
    }
}

/// Bedrock at world `y = 0` and stone everywhere below `height`.
#[derive(Copy, Clone, Debug)]
pub struct FlatGenerator {
    pub height: i32,
}

impl ChunkGenerator for FlatGenerator {
    fn generate_chunk(&mut self, chunk: &mut Chunk) {
        let origin = chunk.origin();
        for y in 0..CHUNK_DIMENSION {
            let world_y = origin.y + y;
            let block_type = if world_y == 0 {
                BlockType::BEDROCK
            } else if world_y < self.height {
                BlockType::STONE
            } else {
                continue;
            };
            for z in 0..CHUNK_DIMENSION {
                for x in 0..CHUNK_DIMENSION {
                    chunk.set_local(x, y, z, block_type);
                }
            }
        }
    }
}

/// Leaves chunks untouched.
#[derive(Copy, Clone, Debug, Default)]
pub struct EmptyGenerator;

impl ChunkGenerator for EmptyGenerator {
    fn generate_chunk(&mut self, _chunk: &mut Chunk) {}
}

#[cfg(test)]
mod tests {
    use cgmath::Point3;

    use super::*;

    #[test]
    fn flat_floor_is_bedrock_under_stone() {
        let mut generator = FlatGenerator { height: 4 };
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        generator.generate_chunk(&mut chunk);

        assert_eq!(chunk.get_voxel(3, 0, 9), BlockType::BEDROCK);
        assert_eq!(chunk.get_voxel(3, 3, 9), BlockType::STONE);
        assert_eq!(chunk.get_voxel(3, 4, 9), BlockType::AIR);
    }

    #[test]
    fn flat_fills_chunks_below_the_floor() {
        let mut generator = FlatGenerator { height: 4 };
        let mut chunk = Chunk::empty(Point3::new(0, -1, 0));
        generator.generate_chunk(&mut chunk);

        assert!(chunk.voxels().iter().all(|&id| id == BlockType::STONE.id()));
    }

    #[test]
    fn methods_deserialize_by_tag() {
        let flat: GenerationMethod = serde_json::from_str(r#"{"method":"flat","height":8}"#).unwrap();
        assert_eq!(flat, GenerationMethod::Flat { height: 8 });

        let empty: GenerationMethod = serde_json::from_str(r#"{"method":"empty"}"#).unwrap();
        assert_eq!(empty, GenerationMethod::Empty);
    }

    #[test]
    fn empty_method_builds_a_generator_that_writes_nothing() {
        let mut generator = GenerationMethod::Empty.build(&TerrainConfig::default());
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        generator.generate_chunk(&mut chunk);

        assert!(chunk.is_empty());
    }
}
