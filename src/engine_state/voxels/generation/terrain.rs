//! # Terrain Generator
//!
//! Noise-driven terrain. Each column gets a height from two octaves of Perlin noise: a
//! rolling base and a sparse mountain term. Cells are then layered bottom to top as
//! bedrock, stone with ore veins, soil, and a surface cap that may carry vegetation.
//!
//! ## Determinism
//!
//! Noise is seeded once per generator. All other randomness (beach gravel, decorations,
//! tree shapes) comes from an RNG seeded by mixing the world seed with the chunk
//! coordinate, so a chunk regenerates bit-identically no matter when or how often it is
//! loaded.
//!
//! ## Height Cache
//!
//! Vertically stacked chunks share column heights. The height map of each `(cx, cz)`
//! column is memoized in a bounded LRU cache; evicted columns are simply recomputed.

use std::num::NonZeroUsize;

use lru::LruCache;
use noise::{NoiseFn, Perlin};

use super::ChunkGenerator;
use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::chunk::{Chunk, ChunkKey, CHUNK_DIMENSION, CHUNK_PLANE_SIZE};

/// Number of column height maps kept when no capacity is configured.
pub const DEFAULT_HEIGHT_CACHE_CAPACITY: usize = 1024;

/// Scale of the rolling base terrain noise.
const BASE_SCALE: f64 = 0.02;
/// Scale of the mountain noise.
const MOUNTAIN_SCALE: f64 = 0.01;
/// Peak extra height contributed by mountains.
const MOUNTAIN_AMPLITUDE: f64 = 20.0;
/// Scale of the ore vein noise.
const ORE_SCALE: f64 = 0.1;
/// Ore noise above this value replaces stone.
const ORE_THRESHOLD: f64 = 0.8;
/// Columns lower than this are beaches.
const BEACH_HEIGHT: i32 = 12;
/// Chance that a grass cap carries a decoration roll.
const DECORATION_CHANCE: f64 = 0.1;

/// Surface heights of one chunk column, indexed `z * CHUNK_DIMENSION + x`.
type ColumnHeights = [i32; CHUNK_PLANE_SIZE as usize];

/// The default procedural terrain generator.
pub struct TerrainGenerator {
    seed: u32,
    perlin: Perlin,
    heights: LruCache<(i32, i32), ColumnHeights>,
}

impl TerrainGenerator {
    pub fn new(seed: u32) -> Self {
        Self::with_cache_capacity(seed, DEFAULT_HEIGHT_CACHE_CAPACITY)
    }

    /// Creates a generator whose height cache holds at most `capacity` columns.
    /// A capacity of zero is raised to one.
    pub fn with_cache_capacity(seed: u32, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        TerrainGenerator {
            seed,
            perlin: Perlin::new(seed),
            heights: LruCache::new(capacity),
        }
    }

    /// Surface height of the world column `(world_x, world_z)`: the lowest `y` that is
    /// above the column's topmost terrain block.
    pub fn column_height(&self, world_x: i32, world_z: i32) -> i32 {
        Self::sample_height(&self.perlin, world_x, world_z)
    }

    fn sample_height(perlin: &Perlin, world_x: i32, world_z: i32) -> i32 {
        let (x, z) = (world_x as f64, world_z as f64);
        let base = perlin.get([x * BASE_SCALE, z * BASE_SCALE]);
        let mountain = perlin.get([x * MOUNTAIN_SCALE, z * MOUNTAIN_SCALE]).max(0.0);
        let mountain = mountain * mountain * MOUNTAIN_AMPLITUDE;

        ((base + 1.0) * 5.0).floor() as i32 + 10 + mountain.floor() as i32
    }

    fn column_heights(&mut self, chunk_x: i32, chunk_z: i32) -> ColumnHeights {
        let perlin = &self.perlin;
        *self.heights.get_or_insert((chunk_x, chunk_z), || {
            let mut heights = [0; CHUNK_PLANE_SIZE as usize];
            for z in 0..CHUNK_DIMENSION {
                for x in 0..CHUNK_DIMENSION {
                    heights[(z * CHUNK_DIMENSION + x) as usize] = Self::sample_height(
                        perlin,
                        chunk_x * CHUNK_DIMENSION + x,
                        chunk_z * CHUNK_DIMENSION + z,
                    );
                }
            }
            heights
        })
    }

    /// Stone, or an ore whose kind depends on depth.
    fn underground(&self, world_x: i32, world_y: i32, world_z: i32) -> BlockType {
        let vein = self.perlin.get([
            world_x as f64 * ORE_SCALE,
            world_y as f64 * ORE_SCALE + world_z as f64 * ORE_SCALE,
        ]);
        if vein <= ORE_THRESHOLD {
            return BlockType::STONE;
        }
        match world_y {
            y if y < 5 => BlockType::DIAMOND_ORE,
            y if y < 10 => BlockType::GOLD_ORE,
            y if y < 15 => BlockType::IRON_ORE,
            _ => BlockType::COAL_ORE,
        }
    }
}

impl ChunkGenerator for TerrainGenerator {
    fn generate_chunk(&mut self, chunk: &mut Chunk) {
        let key = chunk.position;
        let origin = chunk.origin();
        let heights = self.column_heights(key.x, key.z);
        let mut rng = fastrand::Rng::with_seed(chunk_seed(self.seed, key));

        for x in 0..CHUNK_DIMENSION {
            for z in 0..CHUNK_DIMENSION {
                let height = heights[(z * CHUNK_DIMENSION + x) as usize];
                let beach = height < BEACH_HEIGHT;
                let (world_x, world_z) = (origin.x + x, origin.z + z);

                for y in 0..CHUNK_DIMENSION {
                    let world_y = origin.y + y;

                    let block_type = if world_y == 0 {
                        BlockType::BEDROCK
                    } else if world_y < height - 4 {
                        self.underground(world_x, world_y, world_z)
                    } else if world_y < height - 1 {
                        if beach {
                            BlockType::SAND
                        } else {
                            BlockType::DIRT
                        }
                    } else if world_y == height - 1 {
                        let cap = match (beach, rng.f64() > 0.1) {
                            (true, true) => BlockType::SAND,
                            (true, false) => BlockType::GRAVEL,
                            (false, _) => BlockType::GRASS,
                        };
                        chunk.set_local(x, y, z, cap);
                        if cap == BlockType::GRASS
                            && y + 1 < CHUNK_DIMENSION
                            && rng.f64() < DECORATION_CHANCE
                        {
                            decorate(chunk, &mut rng, x, y + 1, z);
                        }
                        continue;
                    } else {
                        continue;
                    };

                    chunk.set_local(x, y, z, block_type);
                }
            }
        }
    }
}

/// Places a tree or a plant on the empty cell `(x, y, z)` above a grass cap.
fn decorate(chunk: &mut Chunk, rng: &mut fastrand::Rng, x: i32, y: i32, z: i32) {
    let roll = rng.f64();
    let plant = if roll < 0.01 {
        plant_tree(chunk, rng, x, y, z);
        return;
    } else if roll < 0.08 {
        BlockType::TALL_GRASS
    } else if roll < 0.09 {
        BlockType::DANDELION
    } else if roll < 0.1 {
        BlockType::ROSE
    } else {
        return;
    };
    chunk.set_local(x, y, z, plant);
}

/// Grows an oak whose trunk starts at `(x, y, z)`. Everything outside the chunk is
/// clipped, and leaves never replace existing blocks.
fn plant_tree(chunk: &mut Chunk, rng: &mut fastrand::Rng, x: i32, y: i32, z: i32) {
    let trunk = 4 + rng.i32(0..2);

    for i in 0..trunk {
        chunk.set_local(x, y + i, z, BlockType::OAK_LOG);
    }

    for layer in (trunk - 2)..=(trunk + 1) {
        let radius: i32 = if layer > trunk { 1 } else { 2 };
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                if dx.abs() == radius && dz.abs() == radius && rng.f64() > 0.5 {
                    continue;
                }
                let (leaf_x, leaf_y, leaf_z) = (x + dx, y + layer, z + dz);
                if chunk.get_local(leaf_x, leaf_y, leaf_z) == Some(BlockType::AIR) {
                    chunk.set_local(leaf_x, leaf_y, leaf_z, BlockType::OAK_LEAVES);
                }
            }
        }
    }
}

/// Mixes the world seed with a chunk coordinate into a per-chunk RNG seed.
fn chunk_seed(seed: u32, key: ChunkKey) -> u64 {
    let mut hash = seed as u64 ^ 0x9E37_79B9_7F4A_7C15;
    for component in [key.x, key.y, key.z] {
        hash ^= component as u32 as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01B3);
        hash ^= hash >> 29;
    }
    hash
}
