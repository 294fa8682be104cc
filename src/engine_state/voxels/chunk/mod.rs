//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a dense 16x16x16 grid of block ids plus the
//! render geometry derived from it.
//!
//! ## Memory Layout
//!
//! Voxels are stored one byte per cell in a flat array indexed `y * L² + z * L + x`
//! (`L` = [`CHUNK_DIMENSION`]). Horizontal planes are contiguous, which matches the
//! bottom-to-top order terrain generation and meshing walk the grid in.
//!
//! ## Geometry
//!
//! The geometry buffer is always rebuilt from scratch by the mesh extractor; edits never
//! patch it incrementally.

use cgmath::Point3;

use super::block::block_type::BlockType;
use super::block::BlockTypeSize;
use crate::engine_state::rendering::atlas::AtlasLayout;
use crate::engine_state::rendering::meshing::{ChunkGeometry, MeshExtractor};

pub mod chunk_coordinates;

pub use chunk_coordinates::ChunkKey;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

const _: () = assert!(CHUNK_DIMENSION > 0, "chunk edge length must be positive");

/// Represents a 16x16x16 collection of voxel blocks in the world.
pub struct Chunk {
    /// The position of this chunk in chunk coordinates (not block coordinates).
    pub position: ChunkKey,

    /// One block id per cell, indexed `y * CHUNK_PLANE_SIZE + z * CHUNK_DIMENSION + x`.
    voxels: Box<[BlockTypeSize]>,

    /// Render geometry derived from `voxels` and the neighboring chunks' borders.
    geometry: ChunkGeometry,
}

impl Chunk {
    /// Creates a new, completely empty chunk (all blocks are air).
    pub fn empty(position: ChunkKey) -> Self {
        Chunk {
            position,
            voxels: vec![BlockType::AIR.id(); CHUNK_SIZE as usize].into_boxed_slice(),
            geometry: ChunkGeometry::default(),
        }
    }

    /// Flat index of a local position, or `None` when outside the chunk.
    #[inline]
    fn index_of(x: usize, y: usize, z: usize) -> Option<usize> {
        let dimension = CHUNK_DIMENSION as usize;
        if x >= dimension || y >= dimension || z >= dimension {
            return None;
        }
        Some(y * CHUNK_PLANE_SIZE as usize + z * dimension + x)
    }

    /// Reads the block at chunk-local coordinates. Out-of-range reads return `AIR`.
    pub fn get_voxel(&self, x: usize, y: usize, z: usize) -> BlockType {
        Self::index_of(x, y, z)
            .map(|index| BlockType::from_id(self.voxels[index]))
            .unwrap_or(BlockType::AIR)
    }

    /// Writes the block at chunk-local coordinates. Out-of-range writes are ignored.
    ///
    /// This does not touch the geometry; the owner decides when to rebuild.
    pub fn set_voxel(&mut self, x: usize, y: usize, z: usize, block_type: BlockType) {
        if let Some(index) = Self::index_of(x, y, z) {
            self.voxels[index] = block_type.id();
        }
    }

    /// Reads a cell given signed local coordinates, as used by neighbor lookups.
    ///
    /// Returns `None` when the coordinate falls outside this chunk.
    pub fn get_local(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        if x < 0 || y < 0 || z < 0 {
            return None;
        }
        Self::index_of(x as usize, y as usize, z as usize)
            .map(|index| BlockType::from_id(self.voxels[index]))
    }

    /// Writes a cell given signed local coordinates. Returns `false` when the coordinate
    /// falls outside this chunk and nothing was written.
    pub fn set_local(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> bool {
        if x < 0 || y < 0 || z < 0 {
            return false;
        }
        match Self::index_of(x as usize, y as usize, z as usize) {
            Some(index) => {
                self.voxels[index] = block_type.id();
                true
            }
            None => false,
        }
    }

    /// The raw voxel bytes, in storage order.
    pub fn voxels(&self) -> &[BlockTypeSize] {
        &self.voxels
    }

    /// Whether every cell is air.
    pub fn is_empty(&self) -> bool {
        self.voxels.iter().all(|&id| id == BlockType::AIR.id())
    }

    /// World coordinate of this chunk's `(0, 0, 0)` voxel.
    pub fn origin(&self) -> Point3<i32> {
        chunk_coordinates::chunk_origin(self.position)
    }

    pub fn geometry(&self) -> &ChunkGeometry {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: ChunkGeometry) {
        self.geometry = geometry;
    }

    /// Drops the render geometry, e.g. when the chunk is unloaded.
    pub fn release_geometry(&mut self) {
        self.geometry = ChunkGeometry::default();
    }

    /// Rebuilds this chunk's geometry from scratch.
    ///
    /// # Arguments
    /// * `atlas` - The atlas layout used to turn tile coordinates into UVs
    /// * `neighbor_lookup` - Resolves cells outside this chunk, given chunk-local
    ///   coordinates that may be `-1` or `CHUNK_DIMENSION` on any axis
    pub fn rebuild_mesh<F>(&mut self, atlas: &AtlasLayout, neighbor_lookup: F)
    where
        F: Fn(i32, i32, i32) -> BlockType,
    {
        let geometry = MeshExtractor::extract(self, atlas, neighbor_lookup);
        self.geometry = geometry;
    }
}
