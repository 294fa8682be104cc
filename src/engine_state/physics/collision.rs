//! Axis-separated collision resolution.
//!
//! A body is a vertical box of fixed radius and height whose position is the center of its
//! bottom face. Overlap is tested at twelve sample points: the four corners of the bottom,
//! middle and top rings. Motion is resolved one axis at a time, Y then X then Z, and each
//! resolved axis feeds the next test.
//!
//! Vertical contacts snap the body to `n + COLLISION_EPSILON` above a floor, or the same
//! distance below a ceiling. Downward tests probe `GROUND_PROBE_DEPTH` below the tentative
//! position, so a body resting at `n + COLLISION_EPSILON` collides again every frame and
//! snaps back to the identical height.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::voxels::VoxelAccess;

/// Hover distance kept between a body and the surfaces it rests against.
pub const COLLISION_EPSILON: f32 = 0.005;
/// How far below the feet floor contact is tested. Deeper than the hover distance so that
/// `(n + COLLISION_EPSILON) - GROUND_PROBE_DEPTH` stays strictly below `n` in f32.
pub const GROUND_PROBE_DEPTH: f32 = 2.0 * COLLISION_EPSILON;
/// Longest displacement resolved in one step; longer motion is split into sub-steps.
pub const MAX_STEP_DISTANCE: f32 = 0.5;
/// Upper bound on sub-steps per call.
const MAX_SUBSTEPS: u32 = 64;

/// Dimensions of a moving body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BodyShape {
    /// Half the horizontal extent of the box.
    pub radius: f32,
    pub height: f32,
}

impl Default for BodyShape {
    fn default() -> Self {
        BodyShape {
            radius: 0.3,
            height: 1.8,
        }
    }
}

impl BodyShape {
    pub fn new(radius: f32, height: f32) -> Self {
        BodyShape { radius, height }
    }

    /// Offsets of the sample points relative to the body position.
    pub fn sample_offsets(&self) -> [Vector3<f32>; 12] {
        let r = self.radius;
        let heights = [0.0, self.height / 2.0, self.height];
        std::array::from_fn(|i| {
            let x = if i & 1 == 0 { -r } else { r };
            let z = if i & 2 == 0 { -r } else { r };
            Vector3::new(x, heights[i / 4], z)
        })
    }

    /// Whether the body at `position` overlaps the unit cell `voxel`.
    pub fn intersects_voxel(&self, position: Point3<f32>, voxel: Point3<i32>) -> bool {
        let overlaps = |min: f32, max: f32, cell: i32| min < (cell + 1) as f32 && max > cell as f32;

        overlaps(position.x - self.radius, position.x + self.radius, voxel.x)
            && overlaps(position.y, position.y + self.height, voxel.y)
            && overlaps(position.z - self.radius, position.z + self.radius, voxel.z)
    }
}

/// Outcome of one [`collide`] call.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionResult {
    pub position: Point3<f32>,
    /// The input velocity with every blocked axis zeroed.
    pub velocity: Vector3<f32>,
    /// Whether the body ends the step resting on solid ground.
    pub is_grounded: bool,
}

/// Whether any sample point of a body at `position` lies inside a solid voxel.
pub fn is_colliding<A>(access: &mut A, shape: &BodyShape, position: Point3<f32>) -> bool
where
    A: VoxelAccess + ?Sized,
{
    shape.sample_offsets().iter().any(|offset| {
        let point = position + *offset;
        access
            .voxel(point.x.floor() as i32, point.y.floor() as i32, point.z.floor() as i32)
            .is_solid()
    })
}

/// Moves a body by `velocity * dt`, stopping it at solid voxels.
pub fn collide<A>(
    access: &mut A,
    shape: &BodyShape,
    position: Point3<f32>,
    velocity: Vector3<f32>,
    dt: f32,
) -> CollisionResult
where
    A: VoxelAccess + ?Sized,
{
    let distance = (velocity * dt).magnitude();
    let substeps = if distance.is_finite() {
        ((distance / MAX_STEP_DISTANCE).ceil() as u32).clamp(1, MAX_SUBSTEPS)
    } else {
        1
    };
    let step_dt = dt / substeps as f32;

    let mut result = CollisionResult {
        position,
        velocity,
        is_grounded: false,
    };
    for _ in 0..substeps {
        result = resolve_step(access, shape, result.position, result.velocity, step_dt);
    }
    result
}

fn resolve_step<A>(
    access: &mut A,
    shape: &BodyShape,
    mut position: Point3<f32>,
    mut velocity: Vector3<f32>,
    dt: f32,
) -> CollisionResult
where
    A: VoxelAccess + ?Sized,
{
    let mut is_grounded = false;

    let dy = velocity.y * dt;
    if dy < 0.0 {
        position.y += dy;
        let probe = Point3::new(position.x, position.y - GROUND_PROBE_DEPTH, position.z);
        if is_colliding(access, shape, probe) {
            position.y = probe.y.floor() + 1.0 + COLLISION_EPSILON;
            velocity.y = 0.0;
            is_grounded = true;
        }
    } else if dy > 0.0 {
        position.y += dy;
        if is_colliding(access, shape, position) {
            position.y = (position.y + shape.height + COLLISION_EPSILON).floor()
                - shape.height
                - COLLISION_EPSILON;
            velocity.y = 0.0;
        }
    } else {
        let probe = Point3::new(position.x, position.y - GROUND_PROBE_DEPTH, position.z);
        if is_colliding(access, shape, probe) {
            velocity.y = 0.0;
            is_grounded = true;
        }
    }

    for axis in [0, 2] {
        let delta = velocity[axis] * dt;
        if delta == 0.0 {
            continue;
        }
        let previous = position[axis];
        position[axis] += delta;
        if is_colliding(access, shape, position) {
            position[axis] = previous;
            velocity[axis] = 0.0;
        }
    }

    CollisionResult {
        position,
        velocity,
        is_grounded,
    }
}
