//! Texture atlas layout.
//!
//! The atlas image itself belongs to the rendering backend. The core only needs to know
//! how tiles are laid out so that the mesh extractor can emit UVs, so the layout is a plain
//! value constructed once at startup and passed by reference.

use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::block::AtlasTile;

/// Describes a square atlas of equally sized tiles.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasLayout {
    /// Number of tiles along each edge of the atlas.
    pub tiles_per_row: u32,
    /// UV inset applied on each edge of a tile to avoid bleeding from its neighbors.
    pub padding: f32,
}

impl Default for AtlasLayout {
    fn default() -> Self {
        AtlasLayout {
            tiles_per_row: 16,
            padding: 0.001,
        }
    }
}

impl AtlasLayout {
    /// Size of one tile in UV units.
    pub fn tile_size(&self) -> f32 {
        1.0 / self.tiles_per_row.max(1) as f32
    }

    /// UVs of a tile's corners, in [`BlockSide::corners`] order
    /// (top-left, bottom-left, top-right, bottom-right).
    ///
    /// Tile row 0 is the top row of the image, so `v` is flipped.
    ///
    /// [`BlockSide::corners`]: crate::engine_state::voxels::block::block_side::BlockSide::corners
    pub fn tile_uvs(&self, tile: AtlasTile) -> [[f32; 2]; 4] {
        let tile_size = self.tile_size();
        let u0 = tile.0 as f32 * tile_size + self.padding;
        let v0 = 1.0 - (tile.1 as f32 + 1.0) * tile_size + self.padding;
        let size = tile_size - self.padding * 2.0;

        [
            [u0, v0 + size],
            [u0, v0],
            [u0 + size, v0 + size],
            [u0 + size, v0],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_tile_sits_at_top_of_texture() {
        let atlas = AtlasLayout { tiles_per_row: 16, padding: 0.0 };
        let uvs = atlas.tile_uvs((0, 0));

        assert_eq!(uvs[0], [0.0, 1.0]);
        assert_eq!(uvs[1], [0.0, 1.0 - 1.0 / 16.0]);
        assert_eq!(uvs[2], [1.0 / 16.0, 1.0]);
    }

    #[test]
    fn padding_insets_every_edge() {
        let atlas = AtlasLayout::default();
        let uvs = atlas.tile_uvs((3, 2));
        let tile = atlas.tile_size();

        assert!(uvs[1][0] > 3.0 * tile);
        assert!(uvs[2][0] < 4.0 * tile);
        assert!(uvs[1][1] > 1.0 - 3.0 * tile);
        assert!(uvs[0][1] < 1.0 - 2.0 * tile);
    }
}
