//! Voxel raycasting.
//!
//! Walks the grid cell by cell along the ray (Amanatides & Woo), so the first non-empty
//! voxel is found without testing cells the ray never enters.

use cgmath::{InnerSpace, Point3, Vector3, Zero};

use crate::engine_state::voxels::{block::block_type::BlockType, VoxelAccess};

/// Cells visited before a ray gives up.
pub const MAX_RAYCAST_STEPS: usize = 128;
/// Replaces exactly-zero direction components.
const DIRECTION_NUDGE: f32 = 1e-7;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RaycastHit {
    /// The voxel that stopped the ray.
    pub voxel: Point3<i32>,
    /// Outward normal of the face the ray entered through. Zero when the ray started
    /// inside `voxel`.
    pub normal: Vector3<i32>,
    pub block_type: BlockType,
}

impl RaycastHit {
    /// The empty cell in front of the hit face, where a new block would be placed.
    pub fn adjacent(&self) -> Point3<i32> {
        self.voxel + self.normal
    }
}

/// Finds the first non-empty voxel within `max_distance` of `origin` along `direction`.
///
/// The cell containing `origin` is tested first. A zero-length direction only tests that
/// cell.
pub fn raycast<A>(
    access: &mut A,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    max_distance: f32,
) -> Option<RaycastHit>
where
    A: VoxelAccess + ?Sized,
{
    let length = direction.magnitude();
    let direction = if length > f32::EPSILON {
        direction / length
    } else {
        direction
    };

    let start = [origin.x, origin.y, origin.z];
    let mut cell = start.map(|s| s.floor() as i32);
    let mut step = [0i32; 3];
    let mut t_max = [0f32; 3];
    let mut t_delta = [0f32; 3];

    for axis in 0..3 {
        let d = if direction[axis] == 0.0 {
            DIRECTION_NUDGE
        } else {
            direction[axis]
        };
        let s = start[axis];
        step[axis] = if d > 0.0 { 1 } else { -1 };
        t_delta[axis] = (1.0 / d).abs();
        t_max[axis] = if d > 0.0 {
            (s.floor() + 1.0 - s) / d
        } else {
            (s - s.floor()) / -d
        };
    }

    let mut normal = Vector3::zero();
    for _ in 0..MAX_RAYCAST_STEPS {
        let block_type = access.voxel(cell[0], cell[1], cell[2]);
        if !block_type.is_air() {
            return Some(RaycastHit {
                voxel: Point3::new(cell[0], cell[1], cell[2]),
                normal,
                block_type,
            });
        }

        let axis = if t_max[0] < t_max[1] {
            if t_max[0] < t_max[2] {
                0
            } else {
                2
            }
        } else if t_max[1] < t_max[2] {
            1
        } else {
            2
        };

        if t_max[axis] > max_distance {
            break;
        }
        cell[axis] += step[axis];
        t_max[axis] += t_delta[axis];
        normal = Vector3::zero();
        normal[axis] = -step[axis];
    }

    None
}
