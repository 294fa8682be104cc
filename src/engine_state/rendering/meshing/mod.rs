//! Mesh extraction for voxel chunks.
//!
//! Converts a chunk's voxel grid into a single triangle list. Faces between a block and an
//! occluding neighbor are culled, every remaining cube face gets per-vertex ambient
//! occlusion, and plant-like blocks become two crossed quads.
//!
//! # Architecture
//! - `MeshExtractor`: walks a chunk and emits its [`ChunkGeometry`]
//! - `face`: per-face visibility, occlusion and quad emission
//! - `mesh`: the geometry buffers themselves
//!
//! Neighbor cells outside the chunk are resolved through a caller-supplied lookup. The
//! lookup must not load chunks; a missing chunk reads as `AIR`, so border faces are emitted
//! and later culled when the neighbor arrives and triggers a rebuild.

use cgmath::Point3;
use log::trace;

use crate::engine_state::rendering::atlas::AtlasLayout;
use crate::engine_state::voxels::{
    block::{block_side::BlockSide, block_type::BlockType, RenderCategory},
    chunk::{Chunk, CHUNK_DIMENSION},
};

pub mod face;
mod mesh;

pub use mesh::ChunkGeometry;

/// Stateless chunk-to-geometry converter.
pub struct MeshExtractor;

impl MeshExtractor {
    /// Builds the full geometry of `chunk`.
    ///
    /// Cells are visited in y, z, x order and faces in [`BlockSide::all`] order, so the
    /// output is deterministic for a given chunk and neighborhood.
    ///
    /// # Arguments
    /// * `chunk` - The chunk to mesh
    /// * `atlas` - Tile layout used to compute UVs
    /// * `neighbor_lookup` - Resolves chunk-local coordinates that fall outside `chunk`
    pub fn extract<F>(chunk: &Chunk, atlas: &AtlasLayout, neighbor_lookup: F) -> ChunkGeometry
    where
        F: Fn(i32, i32, i32) -> BlockType,
    {
        let sample = |x: i32, y: i32, z: i32| {
            chunk
                .get_local(x, y, z)
                .unwrap_or_else(|| neighbor_lookup(x, y, z))
        };

        let mut geometry = ChunkGeometry::new();

        for y in 0..CHUNK_DIMENSION {
            for z in 0..CHUNK_DIMENSION {
                for x in 0..CHUNK_DIMENSION {
                    let block_type = sample(x, y, z);
                    let Some(definition) = block_type.definition() else {
                        continue;
                    };
                    let cell = Point3::new(x, y, z);

                    if definition.category == RenderCategory::CrossBillboard {
                        face::push_cross(&mut geometry, cell, definition, atlas);
                        continue;
                    }

                    for side in BlockSide::all() {
                        let offset = cell + side.normal();
                        let neighbor = sample(offset.x, offset.y, offset.z);
                        if !face::face_visible(block_type, definition, neighbor) {
                            continue;
                        }
                        face::push_face(
                            &mut geometry,
                            cell,
                            side,
                            block_type,
                            definition,
                            atlas,
                            &sample,
                        );
                    }
                }
            }
        }

        trace!(
            "Extracted {} quads for chunk {:?}",
            geometry.quad_count(),
            chunk.position
        );
        geometry
    }
}

#[cfg(test)]
mod tests {
    use super::face::{AO_FLOOR, LIQUID_SURFACE_HEIGHT};
    use super::*;

    fn nothing(_: i32, _: i32, _: i32) -> BlockType {
        BlockType::AIR
    }

    fn single(block_type: BlockType) -> Chunk {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        chunk.set_voxel(8, 8, 8, block_type);
        chunk
    }

    #[test]
    fn isolated_block_emits_six_faces() {
        let chunk = single(BlockType::STONE);
        let geometry = MeshExtractor::extract(&chunk, &AtlasLayout::default(), nothing);

        assert_eq!(geometry.quad_count(), 6);
        assert_eq!(geometry.vertices.len(), 24);
        assert_eq!(geometry.indices.len(), 36);
        assert!(geometry.vertices.iter().all(|v| v.shade() == 1.0));
    }

    #[test]
    fn enclosed_block_emits_nothing_of_its_own() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        for y in 7..=9 {
            for z in 7..=9 {
                for x in 7..=9 {
                    chunk.set_voxel(x, y, z, BlockType::STONE);
                }
            }
        }
        let geometry = MeshExtractor::extract(&chunk, &AtlasLayout::default(), nothing);

        // Only the outer shell of the 3x3x3 cube is visible.
        assert_eq!(geometry.quad_count(), 6 * 9);
        let center_face = geometry.vertices.chunks(4).any(|quad| {
            quad.iter()
                .all(|v| v.position.iter().all(|&c| (8.0..=9.0).contains(&c)))
        });
        assert!(!center_face);
    }

    #[test]
    fn occlusion_stays_in_range() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        for x in 0..4 {
            chunk.set_voxel(x, 0, 0, BlockType::STONE);
            chunk.set_voxel(0, x, 0, BlockType::STONE);
            chunk.set_voxel(0, 0, x, BlockType::DIRT);
        }
        chunk.set_voxel(1, 1, 0, BlockType::STONE);
        let geometry = MeshExtractor::extract(&chunk, &AtlasLayout::default(), nothing);

        assert!(geometry
            .vertices
            .iter()
            .all(|v| (AO_FLOOR..=1.0).contains(&v.shade())));
        assert!(geometry.vertices.iter().any(|v| v.shade() < 1.0));
    }

    #[test]
    fn corner_between_two_walls_uses_the_floor_shade() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        chunk.set_voxel(8, 8, 8, BlockType::STONE);
        chunk.set_voxel(9, 9, 8, BlockType::STONE);
        chunk.set_voxel(8, 9, 9, BlockType::STONE);
        let geometry = MeshExtractor::extract(&chunk, &AtlasLayout::default(), nothing);

        let darkest = geometry
            .vertices
            .iter()
            .filter(|v| v.normal == [0.0, 1.0, 0.0] && v.position == [9.0, 9.0, 9.0])
            .map(|v| v.shade())
            .fold(f32::MAX, f32::min);
        assert_eq!(darkest, AO_FLOOR);
    }

    #[test]
    fn adjacent_water_cells_share_no_face() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        chunk.set_voxel(4, 4, 4, BlockType::WATER);
        chunk.set_voxel(5, 4, 4, BlockType::WATER);
        let geometry = MeshExtractor::extract(&chunk, &AtlasLayout::default(), nothing);

        assert_eq!(geometry.quad_count(), 10);
    }

    #[test]
    fn water_against_glass_keeps_both_faces() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        chunk.set_voxel(4, 4, 4, BlockType::WATER);
        chunk.set_voxel(5, 4, 4, BlockType::GLASS);
        let geometry = MeshExtractor::extract(&chunk, &AtlasLayout::default(), nothing);

        assert_eq!(geometry.quad_count(), 12);
    }

    #[test]
    fn opaque_block_shows_face_against_leaves() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        chunk.set_voxel(4, 4, 4, BlockType::STONE);
        chunk.set_voxel(5, 4, 4, BlockType::OAK_LEAVES);
        let geometry = MeshExtractor::extract(&chunk, &AtlasLayout::default(), nothing);

        // Stone keeps its +X face; leaves keep their -X face.
        assert_eq!(geometry.quad_count(), 12);
    }

    #[test]
    fn plants_become_two_unshaded_quads() {
        let chunk = single(BlockType::ROSE);
        let geometry = MeshExtractor::extract(&chunk, &AtlasLayout::default(), nothing);

        assert_eq!(geometry.vertices.len(), 8);
        assert_eq!(geometry.indices.len(), 12);
        assert!(geometry.vertices.iter().all(|v| v.shade() == 1.0));
        assert!(geometry.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn plants_do_not_hide_neighbor_faces() {
        let mut chunk = single(BlockType::STONE);
        chunk.set_voxel(8, 9, 8, BlockType::TALL_GRASS);
        let geometry = MeshExtractor::extract(&chunk, &AtlasLayout::default(), nothing);

        assert_eq!(geometry.quad_count(), 6 + 2);
    }

    #[test]
    fn only_the_water_top_is_lowered() {
        let chunk = single(BlockType::WATER);
        let geometry = MeshExtractor::extract(&chunk, &AtlasLayout::default(), nothing);

        let top: Vec<_> = geometry
            .vertices
            .iter()
            .filter(|v| v.normal == [0.0, 1.0, 0.0])
            .collect();
        assert_eq!(top.len(), 4);
        assert!(top.iter().all(|v| v.position[1] == 8.0 + LIQUID_SURFACE_HEIGHT));

        let side_max = geometry
            .vertices
            .iter()
            .filter(|v| v.normal == [1.0, 0.0, 0.0])
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert_eq!(side_max, 9.0);
    }

    #[test]
    fn border_faces_follow_the_neighbor_lookup() {
        let mut chunk = Chunk::empty(Point3::new(0, 0, 0));
        chunk.set_voxel(15, 0, 0, BlockType::STONE);

        let open = MeshExtractor::extract(&chunk, &AtlasLayout::default(), nothing);
        let closed = MeshExtractor::extract(&chunk, &AtlasLayout::default(), |x, _, _| {
            if x == CHUNK_DIMENSION {
                BlockType::STONE
            } else {
                BlockType::AIR
            }
        });

        assert_eq!(open.quad_count(), 6);
        assert_eq!(closed.quad_count(), 5);
    }

    #[test]
    fn darker_diagonal_is_kept_as_the_split() {
        // An opaque block above one corner of the top face darkens exactly one vertex.
        let mut chunk = single(BlockType::STONE);
        chunk.set_voxel(7, 9, 7, BlockType::STONE);
        let geometry = MeshExtractor::extract(&chunk, &AtlasLayout::default(), nothing);

        let top_start = geometry
            .vertices
            .chunks(4)
            .position(|quad| quad[0].normal == [0.0, 1.0, 0.0] && quad[0].position[1] == 9.0)
            .expect("top face of the center block");
        let quad = &geometry.vertices[top_start * 4..top_start * 4 + 4];
        let shades: Vec<f32> = quad.iter().map(|v| v.shade()).collect();
        let triangles = &geometry.indices[top_start * 6..top_start * 6 + 6];
        let base = (top_start * 4) as u32;

        let dark = shades.iter().position(|&s| s < 1.0).expect("one shaded corner") as u32;
        let opposite = 3 - dark;
        // The shared edge of the two triangles joins the darker corner to its opposite
        // only when that pair is the darker one.
        let shared: Vec<u32> = triangles[..3]
            .iter()
            .filter(|i| triangles[3..].contains(i))
            .map(|i| i - base)
            .collect();
        assert_eq!(shared.len(), 2);
        assert!(shared.contains(&dark) && shared.contains(&opposite));
    }
}
