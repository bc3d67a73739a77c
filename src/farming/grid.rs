//! Sparse tag grid backing the soil layer.
//!
//! Reads never insert: looking up an unknown coordinate yields an empty tag
//! set and leaves the map untouched, so iterating the grid only ever visits
//! coordinates that were explicitly tagged.

use std::collections::HashMap;

use crate::shared::TileCoord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoilTag {
    Farmable,
    Tilled,
    Watered,
    Planted,
}

impl SoilTag {
    pub const ALL: [SoilTag; 4] = [
        SoilTag::Farmable,
        SoilTag::Tilled,
        SoilTag::Watered,
        SoilTag::Planted,
    ];

    const fn bit(self) -> u8 {
        match self {
            SoilTag::Farmable => 1 << 0,
            SoilTag::Tilled => 1 << 1,
            SoilTag::Watered => 1 << 2,
            SoilTag::Planted => 1 << 3,
        }
    }
}

/// The set of tags on one cell, packed into a byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellTags(u8);

impl CellTags {
    pub const EMPTY: CellTags = CellTags(0);

    pub const fn contains(self, tag: SoilTag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn insert(&mut self, tag: SoilTag) {
        self.0 |= tag.bit();
    }

    pub fn remove(&mut self, tag: SoilTag) {
        self.0 &= !tag.bit();
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = SoilTag> {
        SoilTag::ALL.into_iter().filter(move |t| self.contains(*t))
    }
}

#[derive(Debug, Clone, Default)]
pub struct GridStore {
    cells: HashMap<TileCoord, CellTags>,
}

impl GridStore {
    pub fn get(&self, coord: TileCoord) -> CellTags {
        self.cells.get(&coord).copied().unwrap_or(CellTags::EMPTY)
    }

    pub fn has_tag(&self, coord: TileCoord, tag: SoilTag) -> bool {
        self.get(coord).contains(tag)
    }

    pub fn add_tag(&mut self, coord: TileCoord, tag: SoilTag) {
        self.cells.entry(coord).or_default().insert(tag);
    }

    pub fn remove_tag(&mut self, coord: TileCoord, tag: SoilTag) {
        if let Some(tags) = self.cells.get_mut(&coord) {
            tags.remove(tag);
            if tags.is_empty() {
                self.cells.remove(&coord);
            }
        }
    }

    /// Remove `tag` from every cell. Returns how many cells lost it.
    pub fn clear_tag(&mut self, tag: SoilTag) -> usize {
        let mut cleared = 0;
        for tags in self.cells.values_mut() {
            if tags.contains(tag) {
                tags.remove(tag);
                cleared += 1;
            }
        }
        self.cells.retain(|_, tags| !tags.is_empty());
        cleared
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, CellTags)> + '_ {
        self.cells.iter().map(|(&coord, &tags)| (coord, tags))
    }

    pub fn coords_with(&self, tag: SoilTag) -> impl Iterator<Item = TileCoord> + '_ {
        self.iter()
            .filter(move |(_, tags)| tags.contains(tag))
            .map(|(coord, _)| coord)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
