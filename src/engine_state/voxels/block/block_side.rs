//! # Block Side Module
//!
//! This module defines the six faces of a voxel cell, their outward normals, and the
//! unit-cube corners the mesh extractor emits for each face.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// The order is: [RIGHT, LEFT, TOP, BOTTOM, FRONT, BACK], which is also the order the
/// mesh extractor visits faces in.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The right face (facing positive X)
    RIGHT = 0,

    /// The left face (facing negative X)
    LEFT = 1,

    /// The top face (facing positive Y)
    TOP = 2,

    /// The bottom face (facing negative Y)
    BOTTOM = 3,

    /// The front face (facing positive Z)
    FRONT = 4,

    /// The back face (facing negative Z)
    BACK = 5,
}

/// Which entry of a block's tile table a face samples.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum TileFace {
    Top,
    Bottom,
    Side,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// The outward unit normal of this face.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
        }
    }

    /// The four corners of this face on the unit cube.
    ///
    /// Corners are ordered top-left, bottom-left, top-right, bottom-right as seen from
    /// outside the cube, so `(0, 1, 2)` is counter-clockwise and corners 0/3 and 1/2
    /// are the two diagonals.
    pub fn corners(self) -> [[u8; 3]; 4] {
        match self {
            BlockSide::RIGHT => [[1, 1, 1], [1, 0, 1], [1, 1, 0], [1, 0, 0]],
            BlockSide::LEFT => [[0, 1, 0], [0, 0, 0], [0, 1, 1], [0, 0, 1]],
            BlockSide::TOP => [[0, 1, 1], [1, 1, 1], [0, 1, 0], [1, 1, 0]],
            BlockSide::BOTTOM => [[0, 0, 0], [1, 0, 0], [0, 0, 1], [1, 0, 1]],
            BlockSide::FRONT => [[0, 1, 1], [0, 0, 1], [1, 1, 1], [1, 0, 1]],
            BlockSide::BACK => [[1, 1, 0], [1, 0, 0], [0, 1, 0], [0, 0, 0]],
        }
    }

    /// The index (0 = x, 1 = y, 2 = z) of the axis this face is perpendicular to.
    pub fn axis(self) -> usize {
        match self {
            BlockSide::RIGHT | BlockSide::LEFT => 0,
            BlockSide::TOP | BlockSide::BOTTOM => 1,
            BlockSide::FRONT | BlockSide::BACK => 2,
        }
    }

    pub fn tile_face(self) -> TileFace {
        match self {
            BlockSide::TOP => TileFace::Top,
            BlockSide::BOTTOM => TileFace::Bottom,
            _ => TileFace::Side,
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;

    use super::*;

    fn corner(c: [u8; 3]) -> Vector3<f32> {
        Vector3::new(c[0] as f32, c[1] as f32, c[2] as f32)
    }

    #[test]
    fn corner_winding_faces_outward() {
        for side in BlockSide::all() {
            let [c0, c1, c2, _] = side.corners().map(corner);
            let facing = (c1 - c0).cross(c2 - c0);
            let normal = side.normal().cast::<f32>().unwrap();
            assert!(facing.dot(normal) > 0.0, "{:?} winds inward", side);
        }
    }

    #[test]
    fn corners_lie_on_the_face_plane() {
        for side in BlockSide::all() {
            let plane = if side.normal()[side.axis()] > 0 { 1 } else { 0 };
            for c in side.corners() {
                assert_eq!(c[side.axis()], plane);
            }
        }
    }
}
