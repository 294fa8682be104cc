//! # Block Module
//!
//! This module provides the block registry: a flat, static table of per-type metadata
//! keyed by block id. Every consumer (terrain generation, meshing, collision, and
//! external collaborators such as inventories) reads the same table, so behavior is
//! data rather than per-instance dispatch.

use block_side::TileFace;
use block_type::BlockType;

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types in memory.
/// This is used for efficient storage of chunk voxel data.
pub type BlockTypeSize = u8;

/// Column/row coordinate of a tile inside the texture atlas grid.
pub type AtlasTile = (u8, u8);

/// How a block is turned into geometry by the mesh extractor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderCategory {
    /// A full cube hiding the faces of its opaque neighbors.
    OpaqueCube,
    /// A full cube that can be seen through (glass, liquids).
    TransparentCube,
    /// A full, non-opaque cube whose same-type internal faces are culled (leaves).
    FoliageCube,
    /// Two intersecting diagonal quads (plants). Never culled.
    CrossBillboard,
}

/// Atlas tiles used for each face of a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FaceTiles {
    /// One tile on every face.
    Uniform(AtlasTile),
    /// Separate top and bottom tiles; `side` is used for any face left unspecified.
    Split {
        top: Option<AtlasTile>,
        bottom: Option<AtlasTile>,
        side: AtlasTile,
    },
}

impl FaceTiles {
    /// Resolves the tile for a face, falling back to the side tile.
    pub fn resolve(&self, face: TileFace) -> AtlasTile {
        match *self {
            FaceTiles::Uniform(tile) => tile,
            FaceTiles::Split { top, bottom, side } => match face {
                TileFace::Top => top.unwrap_or(side),
                TileFace::Bottom => bottom.unwrap_or(side),
                TileFace::Side => side,
            },
        }
    }
}

/// Immutable metadata shared by all voxels of one type.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockDefinition {
    /// Human readable name, for UI and inventories.
    pub name: &'static str,
    pub category: RenderCategory,
    /// Blocks light and hides the faces of opaque neighbors.
    pub opaque: bool,
    /// Blocks movement. Independent of `opaque`.
    pub solid: bool,
    /// Break-time units. Negative means indestructible.
    pub hardness: f32,
    pub tiles: FaceTiles,
}

impl BlockDefinition {
    pub fn is_breakable(&self) -> bool {
        self.hardness >= 0.0
    }
}

/// Looks up the definition of a block type. `AIR` has none.
pub fn lookup(block_type: BlockType) -> Option<&'static BlockDefinition> {
    BLOCK_DEFINITIONS.get(&block_type.id())
}

/// The registry, keyed by [`BlockTypeSize`] id.
pub static BLOCK_DEFINITIONS: phf::Map<BlockTypeSize, BlockDefinition> = phf::phf_map! {
    1u8 => BlockDefinition {
        name: "Stone",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 1.5,
        tiles: FaceTiles::Uniform((3, 0)),
    },
    2u8 => BlockDefinition {
        name: "Cobblestone",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 2.0,
        tiles: FaceTiles::Uniform((0, 1)),
    },
    3u8 => BlockDefinition {
        name: "Grass",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 0.6,
        tiles: FaceTiles::Split { top: Some((0, 0)), bottom: Some((2, 0)), side: (1, 0) },
    },
    4u8 => BlockDefinition {
        name: "Dirt",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 0.5,
        tiles: FaceTiles::Uniform((2, 0)),
    },
    5u8 => BlockDefinition {
        name: "Sand",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 0.5,
        tiles: FaceTiles::Uniform((2, 1)),
    },
    6u8 => BlockDefinition {
        name: "Gravel",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 0.6,
        tiles: FaceTiles::Uniform((3, 1)),
    },
    7u8 => BlockDefinition {
        name: "Bedrock",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: -1.0,
        tiles: FaceTiles::Uniform((1, 1)),
    },
    10u8 => BlockDefinition {
        name: "Oak Log",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 2.0,
        tiles: FaceTiles::Split { top: Some((5, 1)), bottom: Some((5, 1)), side: (4, 1) },
    },
    11u8 => BlockDefinition {
        name: "Oak Leaves",
        category: RenderCategory::FoliageCube,
        opaque: false,
        solid: true,
        hardness: 0.2,
        tiles: FaceTiles::Uniform((4, 3)),
    },
    20u8 => BlockDefinition {
        name: "Coal Ore",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 3.0,
        tiles: FaceTiles::Uniform((2, 2)),
    },
    21u8 => BlockDefinition {
        name: "Iron Ore",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 3.0,
        tiles: FaceTiles::Uniform((1, 2)),
    },
    22u8 => BlockDefinition {
        name: "Gold Ore",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 3.0,
        tiles: FaceTiles::Uniform((0, 2)),
    },
    23u8 => BlockDefinition {
        name: "Diamond Ore",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 3.0,
        tiles: FaceTiles::Uniform((2, 3)),
    },
    30u8 => BlockDefinition {
        name: "Planks",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 2.0,
        tiles: FaceTiles::Uniform((4, 0)),
    },
    31u8 => BlockDefinition {
        name: "Glass",
        category: RenderCategory::TransparentCube,
        opaque: false,
        solid: true,
        hardness: 0.3,
        tiles: FaceTiles::Uniform((1, 3)),
    },
    32u8 => BlockDefinition {
        name: "Bricks",
        category: RenderCategory::OpaqueCube,
        opaque: true,
        solid: true,
        hardness: 2.0,
        tiles: FaceTiles::Uniform((7, 0)),
    },
    40u8 => BlockDefinition {
        name: "Tall Grass",
        category: RenderCategory::CrossBillboard,
        opaque: false,
        solid: false,
        hardness: 0.0,
        tiles: FaceTiles::Uniform((7, 2)),
    },
    41u8 => BlockDefinition {
        name: "Dandelion",
        category: RenderCategory::CrossBillboard,
        opaque: false,
        solid: false,
        hardness: 0.0,
        tiles: FaceTiles::Uniform((13, 0)),
    },
    42u8 => BlockDefinition {
        name: "Rose",
        category: RenderCategory::CrossBillboard,
        opaque: false,
        solid: false,
        hardness: 0.0,
        tiles: FaceTiles::Uniform((12, 0)),
    },
    43u8 => BlockDefinition {
        name: "Carrot",
        category: RenderCategory::CrossBillboard,
        opaque: false,
        solid: false,
        hardness: 0.0,
        tiles: FaceTiles::Uniform((12, 5)),
    },
    50u8 => BlockDefinition {
        name: "Water",
        category: RenderCategory::TransparentCube,
        opaque: false,
        solid: false,
        hardness: 100.0,
        tiles: FaceTiles::Uniform((14, 0)),
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_has_no_definition() {
        assert!(lookup(BlockType::AIR).is_none());
    }

    #[test]
    fn every_named_type_except_air_is_registered() {
        for id in 1..=u8::MAX {
            let block_type = BlockType::from_id(id);
            if !block_type.is_air() {
                assert!(lookup(block_type).is_some(), "{:?} missing from registry", block_type);
            }
        }
    }

    #[test]
    fn split_tiles_fall_back_to_side() {
        let tiles = FaceTiles::Split { top: Some((0, 0)), bottom: None, side: (1, 0) };
        assert_eq!(tiles.resolve(TileFace::Top), (0, 0));
        assert_eq!(tiles.resolve(TileFace::Bottom), (1, 0));
        assert_eq!(tiles.resolve(TileFace::Side), (1, 0));

        let grass = lookup(BlockType::GRASS).unwrap();
        assert_eq!(grass.tiles.resolve(TileFace::Bottom), (2, 0));
    }

    #[test]
    fn bedrock_is_indestructible() {
        assert!(!lookup(BlockType::BEDROCK).unwrap().is_breakable());
        assert!(lookup(BlockType::DIRT).unwrap().is_breakable());
        assert!(lookup(BlockType::TALL_GRASS).unwrap().is_breakable());
    }
}
