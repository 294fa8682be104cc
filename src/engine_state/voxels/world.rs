//! # World Module
//!
//! This module provides the `World` struct which manages the collection of chunks in the
//! voxel world. It is the central coordinator for chunk loading, unloading, meshing and
//! voxel access.
//!
//! ## Architecture
//!
//! The world uses sparse storage: only chunks inside a box around a reference position are
//! kept in memory. Each [`World::update`] performs a bounded amount of work:
//!
//! 1. Missing chunks of the required box are queued for loading, nearest first
//! 2. Up to `loads_per_update` chunks are generated and inserted
//! 3. Up to `meshes_per_update` dirty chunks get their geometry rebuilt
//! 4. Chunks that left the box are dropped together with their geometry
//!
//! Reading a voxel from a chunk that is not loaded yet loads it synchronously, bypassing
//! the queue. Writes never load chunks.
//!
//! ## Chunk Generation
//!
//! Generation is delegated to a [`ChunkGenerator`], chosen through
//! [`GenerationMethod`](super::generation::GenerationMethod) in the world configuration.

use std::collections::{HashMap, HashSet, VecDeque};

use cgmath::Point3;
use log::{debug, trace};
use web_time::Instant;

use super::block::block_type::BlockType;
use super::chunk::{
    chunk_coordinates::{self, ChunkKey},
    Chunk, CHUNK_DIMENSION,
};
use super::generation::ChunkGenerator;
use crate::engine_state::config::{EngineConfig, WorldConfig};
use crate::engine_state::rendering::{AtlasLayout, MeshExtractor};

/// Height from which [`World::highest_solid_block`] starts scanning down.
pub const DEFAULT_SURFACE_SCAN_START: i32 = 64;

/// Represents a voxel world composed of multiple chunks.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::{EngineConfig, World};
///
/// let mut world = World::from_config(&EngineConfig::default());
/// world.update(Point3::new(0.0, 20.0, 0.0));
/// assert_eq!(world.chunk_count(), 1);
/// ```
pub struct World {
    /// Loaded chunks keyed by chunk coordinate.
    chunks: HashMap<ChunkKey, Chunk>,
    /// Chunks waiting to be generated, sorted nearest first on every update.
    load_queue: Vec<ChunkKey>,
    /// Membership of `load_queue`.
    queued: HashSet<ChunkKey>,
    /// Loaded chunks whose geometry is stale, oldest first.
    dirty_queue: VecDeque<ChunkKey>,
    /// Membership of `dirty_queue`.
    dirty: HashSet<ChunkKey>,
    generator: Box<dyn ChunkGenerator>,
    atlas: AtlasLayout,
    config: WorldConfig,
}

impl World {
    /// Creates a new, empty world.
    ///
    /// # Arguments
    /// * `config` - Streaming radii and per-update budgets
    /// * `generator` - Fills newly loaded chunks
    /// * `atlas` - Texture layout used when meshing
    pub fn new(config: WorldConfig, generator: Box<dyn ChunkGenerator>, atlas: AtlasLayout) -> Self {
        World {
            chunks: HashMap::new(),
            load_queue: Vec::new(),
            queued: HashSet::new(),
            dirty_queue: VecDeque::new(),
            dirty: HashSet::new(),
            generator,
            atlas,
            config,
        }
    }

    /// Creates an empty world using the generator named by `config.world.generation`.
    pub fn from_config(config: &EngineConfig) -> Self {
        let generator = config.world.generation.build(&config.terrain);
        Self::new(config.world, generator, config.atlas)
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn atlas(&self) -> &AtlasLayout {
        &self.atlas
    }

    /// Advances streaming by one step around `reference`.
    pub fn update(&mut self, reference: Point3<f32>) {
        let start = Instant::now();
        let center = chunk_coordinates::chunk_key_at(reference);

        self.enqueue_required(center);
        self.load_queue
            .sort_by_key(|&key| chunk_coordinates::distance_squared(key, center));

        let loads = self.config.loads_per_update.min(self.load_queue.len());
        let batch: Vec<ChunkKey> = self.load_queue.drain(..loads).collect();
        for key in batch {
            self.queued.remove(&key);
            self.load_chunk(key);
        }

        self.rebuild_dirty(self.config.meshes_per_update);
        self.unload_outside(center);

        trace!(
            "World update around {:?} took {:?} ({} loaded, {} queued, {} dirty)",
            center,
            start.elapsed(),
            self.chunks.len(),
            self.load_queue.len(),
            self.dirty_queue.len()
        );
    }

    /// Whether `key` lies inside the box kept loaded around `center`.
    fn is_required(&self, center: ChunkKey, key: ChunkKey) -> bool {
        (key.x - center.x).abs() <= self.config.render_distance
            && (key.y - center.y).abs() <= self.config.render_distance_y
            && (key.z - center.z).abs() <= self.config.render_distance
    }

    /// Queues every missing chunk of the required box and drops queued chunks outside it.
    fn enqueue_required(&mut self, center: ChunkKey) {
        let horizontal = self.config.render_distance;
        let vertical = self.config.render_distance_y;

        for dx in -horizontal..=horizontal {
            for dy in -vertical..=vertical {
                for dz in -horizontal..=horizontal {
                    let key = Point3::new(center.x + dx, center.y + dy, center.z + dz);
                    if self.chunks.contains_key(&key) || self.queued.contains(&key) {
                        continue;
                    }
                    self.queued.insert(key);
                    self.load_queue.push(key);
                }
            }
        }

        let before = self.load_queue.len();
        let mut pruned = Vec::new();
        self.load_queue.retain(|&key| {
            let keep = (key.x - center.x).abs() <= horizontal
                && (key.y - center.y).abs() <= vertical
                && (key.z - center.z).abs() <= horizontal;
            if !keep {
                pruned.push(key);
            }
            keep
        });
        for key in &pruned {
            self.queued.remove(key);
        }
        if before != self.load_queue.len() {
            trace!("Pruned {} stale load requests", before - self.load_queue.len());
        }
    }

    /// Generates and inserts the chunk at `key`, then marks it and its loaded face
    /// neighbors for remeshing.
    fn load_chunk(&mut self, key: ChunkKey) {
        if self.chunks.contains_key(&key) {
            return;
        }

        let mut chunk = Chunk::empty(key);
        self.generator.generate_chunk(&mut chunk);
        self.chunks.insert(key, chunk);

        self.mark_dirty(key);
        for neighbor in chunk_coordinates::face_neighbors(key) {
            self.mark_dirty(neighbor);
        }
        debug!("Loaded chunk {:?}", key);
    }

    /// Rebuilds the geometry of up to `budget` dirty chunks, oldest first.
    fn rebuild_dirty(&mut self, budget: usize) {
        let mut rebuilt = 0;
        while rebuilt < budget {
            let Some(key) = self.dirty_queue.pop_front() else {
                break;
            };
            self.dirty.remove(&key);

            let Some(chunk) = self.chunks.get(&key) else {
                continue;
            };
            let origin = chunk.origin();
            let geometry = MeshExtractor::extract(chunk, &self.atlas, |x, y, z| {
                self.peek_voxel(origin.x + x, origin.y + y, origin.z + z)
                    .unwrap_or(BlockType::AIR)
            });
            if let Some(chunk) = self.chunks.get_mut(&key) {
                chunk.set_geometry(geometry);
            }
            rebuilt += 1;
        }
    }

    /// Drops every loaded chunk outside the required box around `center`.
    fn unload_outside(&mut self, center: ChunkKey) {
        let stale: Vec<ChunkKey> = self
            .chunks
            .keys()
            .copied()
            .filter(|&key| !self.is_required(center, key))
            .collect();

        for key in stale {
            if let Some(mut chunk) = self.chunks.remove(&key) {
                chunk.release_geometry();
            }
            if self.dirty.remove(&key) {
                self.dirty_queue.retain(|&queued| queued != key);
            }
            debug!("Unloaded chunk {:?}", key);
        }
    }

    /// Queues `key` for a geometry rebuild if it is loaded. Re-marking is a no-op.
    pub fn mark_dirty(&mut self, key: ChunkKey) {
        if self.chunks.contains_key(&key) && self.dirty.insert(key) {
            self.dirty_queue.push_back(key);
        }
    }

    /// Reads a voxel at world coordinates, loading its chunk synchronously if needed.
    pub fn get_voxel(&mut self, x: i32, y: i32, z: i32) -> BlockType {
        let (key, local) = chunk_coordinates::split_world(x, y, z);
        if !self.chunks.contains_key(&key) {
            let start = Instant::now();
            if self.queued.remove(&key) {
                self.load_queue.retain(|&queued| queued != key);
            }
            self.load_chunk(key);
            debug!("Synchronously loaded chunk {:?} in {:?}", key, start.elapsed());
        }

        self.chunks
            .get(&key)
            .map(|chunk| chunk.get_voxel(local.x, local.y, local.z))
            .unwrap_or(BlockType::AIR)
    }

    /// Reads a voxel without loading anything. Returns `None` when its chunk is not loaded.
    pub fn peek_voxel(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        let (key, local) = chunk_coordinates::split_world(x, y, z);
        self.chunks
            .get(&key)
            .map(|chunk| chunk.get_voxel(local.x, local.y, local.z))
    }

    /// Writes a voxel at world coordinates.
    ///
    /// The owning chunk is marked for remeshing, along with each loaded neighbor the voxel
    /// borders. Returns `false` and does nothing when the chunk is not loaded.
    pub fn set_voxel(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> bool {
        let (key, local) = chunk_coordinates::split_world(x, y, z);
        let Some(chunk) = self.chunks.get_mut(&key) else {
            return false;
        };
        chunk.set_voxel(local.x, local.y, local.z, block_type);

        self.mark_dirty(key);
        let edge = CHUNK_DIMENSION as usize - 1;
        let position = [local.x, local.y, local.z];
        for axis in 0..3 {
            let mut step = [0; 3];
            if position[axis] == 0 {
                step[axis] = -1;
            } else if position[axis] == edge {
                step[axis] = 1;
            } else {
                continue;
            }
            self.mark_dirty(Point3::new(key.x + step[0], key.y + step[1], key.z + step[2]));
        }
        true
    }

    /// One above the topmost solid voxel of column `(x, z)` at or below
    /// [`DEFAULT_SURFACE_SCAN_START`], or 0 if the column is empty down to `y = 0`.
    pub fn highest_solid_block(&mut self, x: i32, z: i32) -> i32 {
        self.highest_solid_block_from(x, z, DEFAULT_SURFACE_SCAN_START)
    }

    /// Like [`World::highest_solid_block`] with an explicit starting height.
    pub fn highest_solid_block_from(&mut self, x: i32, z: i32, start_y: i32) -> i32 {
        (0..=start_y)
            .rev()
            .find(|&y| self.get_voxel(x, y, z).is_solid())
            .map_or(0, |y| y + 1)
    }

    pub fn chunk(&self, key: ChunkKey) -> Option<&Chunk> {
        self.chunks.get(&key)
    }

    pub fn chunk_keys(&self) -> impl Iterator<Item = ChunkKey> + '_ {
        self.chunks.keys().copied()
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> + '_ {
        self.chunks.values()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_loaded(&self, key: ChunkKey) -> bool {
        self.chunks.contains_key(&key)
    }

    /// Chunks queued for loading.
    pub fn pending_loads(&self) -> usize {
        self.load_queue.len()
    }

    /// Loaded chunks whose geometry is stale.
    pub fn pending_meshes(&self) -> usize {
        self.dirty_queue.len()
    }

    pub fn is_dirty(&self, key: ChunkKey) -> bool {
        self.dirty.contains(&key)
    }

    /// Whether the last update left no loads or rebuilds behind.
    pub fn is_idle(&self) -> bool {
        self.load_queue.is_empty() && self.dirty_queue.is_empty()
    }
}
