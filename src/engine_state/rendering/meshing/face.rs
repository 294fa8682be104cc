//! Quad emission for a single voxel: cube faces with ambient occlusion, and cross
//! billboards for plants.

use cgmath::{Point3, Vector3, Zero};

use super::mesh::ChunkGeometry;
use crate::engine_state::rendering::{atlas::AtlasLayout, Vertex};
use crate::engine_state::voxels::block::{
    block_side::{BlockSide, TileFace},
    block_type::BlockType,
    BlockDefinition,
};

/// Shade lost per occluding neighbor.
pub const AO_STEP: f32 = 0.2;
/// Shade of a corner tucked between two opaque edge neighbors.
pub const AO_FLOOR: f32 = 0.4;
/// Height of a liquid's top surface, as a fraction of the cell.
pub const LIQUID_SURFACE_HEIGHT: f32 = 0.9;

/// The two diagonal quads of a cross billboard, each in top-left, bottom-left,
/// top-right, bottom-right order.
const CROSS_PLANES: [[[f32; 3]; 4]; 2] = [
    [[0.0, 1.0, 0.0], [0.0, 0.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
    [[0.0, 1.0, 1.0], [0.0, 0.0, 1.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
];

/// Decides whether the face between `current` and `neighbor` is visible.
///
/// Opaque blocks show a face only against non-opaque neighbors. Non-opaque blocks show a
/// face against anything of a different type, so two adjacent cells of the same liquid or
/// glass never produce an internal face.
pub fn face_visible(current: BlockType, definition: &BlockDefinition, neighbor: BlockType) -> bool {
    if neighbor.is_air() {
        return true;
    }
    let Some(neighbor_definition) = neighbor.definition() else {
        return false;
    };
    if definition.opaque {
        !neighbor_definition.opaque
    } else {
        neighbor != current
    }
}

/// Shade of one vertex given the opacity of its two edge neighbors and diagonal neighbor.
pub fn ambient_occlusion(edge1: bool, edge2: bool, diagonal: bool) -> f32 {
    if edge1 && edge2 {
        return AO_FLOOR;
    }
    let occluders = edge1 as u8 + edge2 as u8 + diagonal as u8;
    1.0 - AO_STEP * occluders as f32
}

/// Computes the shade of one face corner.
///
/// The three sampled cells lie in the layer directly across the face: one step along each
/// in-plane axis toward the corner, and the diagonal combining both steps.
pub fn corner_occlusion<S>(cell: Point3<i32>, side: BlockSide, corner: [u8; 3], sample: &S) -> f32
where
    S: Fn(i32, i32, i32) -> BlockType,
{
    let layer = cell + side.normal();
    let (u, v) = match side.axis() {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };

    let mut step_u = Vector3::zero();
    step_u[u] = if corner[u] == 1 { 1 } else { -1 };
    let mut step_v = Vector3::zero();
    step_v[v] = if corner[v] == 1 { 1 } else { -1 };

    let opaque_at = |p: Point3<i32>| sample(p.x, p.y, p.z).is_opaque();

    ambient_occlusion(
        opaque_at(layer + step_u),
        opaque_at(layer + step_v),
        opaque_at(layer + step_u + step_v),
    )
}

/// Picks the quad diagonal so the shading gradient does not visibly flip.
///
/// Corners 0/3 and 1/2 are the two diagonals. Both splits wind counter-clockwise.
pub fn quad_triangles(shades: [f32; 4]) -> [u32; 6] {
    if shades[0] + shades[3] > shades[1] + shades[2] {
        [0, 1, 2, 2, 1, 3]
    } else {
        [0, 1, 3, 0, 3, 2]
    }
}

/// Emits one cube face of the voxel at `cell`.
pub fn push_face<S>(
    geometry: &mut ChunkGeometry,
    cell: Point3<i32>,
    side: BlockSide,
    block_type: BlockType,
    definition: &BlockDefinition,
    atlas: &AtlasLayout,
    sample: &S,
) where
    S: Fn(i32, i32, i32) -> BlockType,
{
    let corners = side.corners();
    let uvs = atlas.tile_uvs(definition.tiles.resolve(side.tile_face()));
    let normal = side.normal().cast::<f32>().unwrap_or_else(Vector3::zero);
    let lowered = block_type == BlockType::WATER && side == BlockSide::TOP;

    let shades = corners.map(|corner| corner_occlusion(cell, side, corner, sample));

    let vertices: [Vertex; 4] = std::array::from_fn(|i| {
        let corner = corners[i];
        let height = if lowered && corner[1] == 1 {
            LIQUID_SURFACE_HEIGHT
        } else {
            corner[1] as f32
        };
        Vertex::new(
            [
                cell.x as f32 + corner[0] as f32,
                cell.y as f32 + height,
                cell.z as f32 + corner[2] as f32,
            ],
            normal.into(),
            uvs[i],
            shades[i],
        )
    });

    geometry.push_quad(vertices, quad_triangles(shades));
}

/// Emits the two unshaded diagonal quads of a plant-like block.
pub fn push_cross(
    geometry: &mut ChunkGeometry,
    cell: Point3<i32>,
    definition: &BlockDefinition,
    atlas: &AtlasLayout,
) {
    let uvs = atlas.tile_uvs(definition.tiles.resolve(TileFace::Side));

    for plane in CROSS_PLANES {
        let vertices: [Vertex; 4] = std::array::from_fn(|i| {
            let corner = plane[i];
            Vertex::new(
                [
                    cell.x as f32 + corner[0],
                    cell.y as f32 + corner[1],
                    cell.z as f32 + corner[2],
                ],
                [0.0, 1.0, 0.0],
                uvs[i],
                1.0,
            )
        });
        geometry.push_quad(vertices, [0, 1, 2, 2, 1, 3]);
    }
}
