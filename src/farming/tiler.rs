//! Soil tile shapes derived from tilled neighbours.
//!
//! Each tilled tile picks its sprite from the four cardinal neighbours, tested
//! in the fixed order top, right, bottom, left. An isolated tile uses `"o"`;
//! otherwise the key is `_` followed by one letter per tilled neighbour in
//! that same order (`"_t"`, `"_tl"`, `"_trbl"`, ...).

use std::collections::HashMap;

use crate::shared::TileCoord;

use super::grid::{GridStore, SoilTag};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ORDER: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    pub const fn letter(self) -> char {
        match self {
            Direction::Top => 't',
            Direction::Right => 'r',
            Direction::Bottom => 'b',
            Direction::Left => 'l',
        }
    }

    pub const fn neighbor(self, coord: TileCoord) -> TileCoord {
        match self {
            Direction::Top => coord.offset(0, -1),
            Direction::Right => coord.offset(1, 0),
            Direction::Bottom => coord.offset(0, 1),
            Direction::Left => coord.offset(-1, 0),
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Direction::Top => 1,
            Direction::Right => 2,
            Direction::Bottom => 4,
            Direction::Left => 8,
        }
    }
}

// Indexed by the neighbour mask (t = 1, r = 2, b = 4, l = 8).
const SHAPE_KEYS: [&str; 16] = [
    "o", "_t", "_r", "_tr", "_b", "_tb", "_rb", "_trb",
    "_l", "_tl", "_rl", "_trl", "_bl", "_tbl", "_rbl", "_trbl",
];

/// Which cardinal neighbours of a tilled tile are also tilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SoilShape(u8);

impl SoilShape {
    pub const ISOLATED: SoilShape = SoilShape(0);

    pub fn of(grid: &GridStore, coord: TileCoord) -> Self {
        let mut mask = 0;
        for dir in Direction::ORDER {
            if grid.has_tag(dir.neighbor(coord), SoilTag::Tilled) {
                mask |= dir.bit();
            }
        }
        SoilShape(mask)
    }

    pub const fn has(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    /// Atlas key for this shape.
    pub fn key(self) -> &'static str {
        SHAPE_KEYS[usize::from(self.0 & 0x0f)]
    }

    pub fn all_keys() -> impl Iterator<Item = &'static str> {
        SHAPE_KEYS.into_iter()
    }
}

/// Recompute the shape of every tilled tile.
pub fn compute_shapes(grid: &GridStore) -> HashMap<TileCoord, SoilShape> {
    grid.coords_with(SoilTag::Tilled)
        .map(|coord| (coord, SoilShape::of(grid, coord)))
        .collect()
}

/// Refresh the shapes of `coord` and its four neighbours after `coord`
/// changed. Produces the same map as `compute_shapes` would.
pub fn retile_around(
    grid: &GridStore,
    shapes: &mut HashMap<TileCoord, SoilShape>,
    coord: TileCoord,
) {
    let affected = std::iter::once(coord).chain(Direction::ORDER.map(|d| d.neighbor(coord)));
    for tile in affected {
        if grid.has_tag(tile, SoilTag::Tilled) {
            shapes.insert(tile, SoilShape::of(grid, tile));
        } else {
            shapes.remove(&tile);
        }
    }
}
