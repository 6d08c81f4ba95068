//! Tile-space helpers shared by layout, socket scanning, and population.

use crate::types::{Pos, TileKind};

pub(super) fn in_bounds(width: usize, height: usize, pos: Pos) -> bool {
    pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < width && (pos.y as usize) < height
}

pub(super) fn tile_at(tiles: &[TileKind], width: usize, pos: Pos) -> TileKind {
    tiles[(pos.y as usize) * width + (pos.x as usize)]
}

/// Spiral search for the closest floor tile to `desired`, used to repair
/// spawn and exit anchors that land on carved-over geometry.
pub(super) fn nearest_floor_tile(
    tiles: &[TileKind],
    width: usize,
    height: usize,
    desired: Pos,
) -> Pos {
    if in_bounds(width, height, desired) && tile_at(tiles, width, desired) == TileKind::Floor {
        return desired;
    }

    for radius in 1_i32..10 {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let candidate = Pos { y: desired.y + dy, x: desired.x + dx };
                if in_bounds(width, height, candidate)
                    && tile_at(tiles, width, candidate) == TileKind::Floor
                {
                    return candidate;
                }
            }
        }
    }
    desired
}
