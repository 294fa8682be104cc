use super::block::block_type::BlockType;
use super::world::World;

/// Read access to voxels by world coordinate, as needed by collision and raycasting.
///
/// Takes `&mut self` so that implementations may load data on demand.
pub trait VoxelAccess {
    fn voxel(&mut self, x: i32, y: i32, z: i32) -> BlockType;
}

impl VoxelAccess for World {
    fn voxel(&mut self, x: i32, y: i32, z: i32) -> BlockType {
        self.get_voxel(x, y, z)
    }
}
