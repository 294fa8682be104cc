//! Breaking and placing blocks through a raycast hit.

use cgmath::{Point3, Vector3, Zero};
use log::debug;
use thiserror::Error;

use super::physics::{BodyShape, RaycastHit};
use super::voxels::{block::block_type::BlockType, world::World};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InteractionError {
    #[error("There is no block at {0:?}")]
    NothingThere(Point3<i32>),
    #[error("{0:?} cannot be broken")]
    Indestructible(BlockType),
    #[error("Cell {0:?} is already occupied")]
    Occupied(Point3<i32>),
    #[error("Cell {0:?} overlaps the body")]
    ObstructedByBody(Point3<i32>),
    #[error("The hit has no entry face to place against")]
    NoFace,
    #[error("Chunk holding {0:?} is not loaded")]
    Unloaded(Point3<i32>),
    #[error("Air cannot be placed")]
    PlacingAir,
}

/// Removes the block that was hit. Returns the removed type.
pub fn break_block(world: &mut World, hit: &RaycastHit) -> Result<BlockType, InteractionError> {
    let target = hit.voxel;
    let current = world.get_voxel(target.x, target.y, target.z);
    let definition = current
        .definition()
        .ok_or(InteractionError::NothingThere(target))?;
    if !definition.is_breakable() {
        return Err(InteractionError::Indestructible(current));
    }
    if !world.set_voxel(target.x, target.y, target.z, BlockType::AIR) {
        return Err(InteractionError::Unloaded(target));
    }

    debug!("Broke {} at {:?}", definition.name, target);
    Ok(current)
}

/// Places `block_type` in the cell in front of the hit face.
///
/// The cell must be empty and must not overlap the body standing at `body_position`.
/// Returns the cell that was filled.
pub fn place_block(
    world: &mut World,
    hit: &RaycastHit,
    block_type: BlockType,
    shape: &BodyShape,
    body_position: Point3<f32>,
) -> Result<Point3<i32>, InteractionError> {
    if block_type.is_air() {
        return Err(InteractionError::PlacingAir);
    }
    if hit.normal == Vector3::zero() {
        return Err(InteractionError::NoFace);
    }

    let target = hit.adjacent();
    if !world.get_voxel(target.x, target.y, target.z).is_air() {
        return Err(InteractionError::Occupied(target));
    }
    if shape.intersects_voxel(body_position, target) {
        return Err(InteractionError::ObstructedByBody(target));
    }
    if !world.set_voxel(target.x, target.y, target.z, block_type) {
        return Err(InteractionError::Unloaded(target));
    }

    debug!("Placed {:?} at {:?}", block_type, target);
    Ok(target)
}
