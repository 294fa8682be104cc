//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! The discriminants are the on-disk/in-chunk byte ids, so they must never be renumbered.

use num_derive::FromPrimitive;

use super::{BlockDefinition, BlockTypeSize, BLOCK_DEFINITIONS};

/// Enumerates all possible block types in the voxel world.
///
/// Each variant's discriminant is the byte stored in chunk voxel arrays. `AIR` (0)
/// is the empty sentinel and has no [`BlockDefinition`].
#[allow(non_camel_case_types)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Default)]
pub enum BlockType {
    /// The empty cell.
    #[default]
    AIR = 0,

    STONE = 1,
    COBBLESTONE = 2,
    /// Grass-capped dirt, with distinct top, bottom and side tiles.
    GRASS = 3,
    DIRT = 4,
    SAND = 5,
    GRAVEL = 6,
    /// The indestructible world floor.
    BEDROCK = 7,

    OAK_LOG = 10,
    OAK_LEAVES = 11,

    COAL_ORE = 20,
    IRON_ORE = 21,
    GOLD_ORE = 22,
    DIAMOND_ORE = 23,

    PLANKS = 30,
    GLASS = 31,
    BRICKS = 32,

    TALL_GRASS = 40,
    DANDELION = 41,
    ROSE = 42,
    CARROT = 43,

    /// Non-solid liquid; rendered with a lowered surface.
    WATER = 50,
}

impl BlockType {
    /// Converts a stored byte back into a `BlockType`.
    ///
    /// Unknown ids decode as `AIR`, so a corrupted voxel reads as empty rather than panicking.
    pub fn from_id(id: BlockTypeSize) -> Self {
        num::FromPrimitive::from_u8(id).unwrap_or(BlockType::AIR)
    }

    /// The byte stored in chunk voxel arrays for this type.
    pub fn id(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    pub fn is_air(self) -> bool {
        self == BlockType::AIR
    }

    /// Looks up this type's static metadata. Returns `None` for `AIR`.
    pub fn definition(self) -> Option<&'static BlockDefinition> {
        BLOCK_DEFINITIONS.get(&self.id())
    }

    /// Whether this type blocks light and hides the faces of opaque neighbors.
    pub fn is_opaque(self) -> bool {
        self.definition().is_some_and(|definition| definition.opaque)
    }

    /// Whether this type blocks movement.
    pub fn is_solid(self) -> bool {
        self.definition().is_some_and(|definition| definition.solid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_bytes() {
        for block_type in [
            BlockType::AIR,
            BlockType::STONE,
            BlockType::OAK_LEAVES,
            BlockType::DIAMOND_ORE,
            BlockType::WATER,
        ] {
            assert_eq!(BlockType::from_id(block_type.id()), block_type);
        }
    }

    #[test]
    fn unknown_ids_decode_as_air() {
        assert_eq!(BlockType::from_id(8), BlockType::AIR);
        assert_eq!(BlockType::from_id(255), BlockType::AIR);
    }

    #[test]
    fn solidity_is_independent_of_opacity() {
        assert!(BlockType::GLASS.is_solid());
        assert!(!BlockType::GLASS.is_opaque());

        assert!(!BlockType::TALL_GRASS.is_solid());
        assert!(!BlockType::WATER.is_solid());

        assert!(BlockType::STONE.is_solid());
        assert!(BlockType::STONE.is_opaque());

        assert!(!BlockType::AIR.is_solid());
        assert!(!BlockType::AIR.is_opaque());
    }
}
