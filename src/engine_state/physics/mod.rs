//! Movement and targeting against the voxel grid.
//!
//! Both resolvers read voxels through [`VoxelAccess`](crate::engine_state::voxels::VoxelAccess)
//! on demand, outside the streaming budget.

pub mod collision;
pub mod raycast;

pub use collision::{collide, BodyShape, CollisionResult};
pub use raycast::{raycast, RaycastHit};
