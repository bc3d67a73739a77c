//! The farm map file: which tiles can be tilled and where things stand.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shared::*;

/// Axis-aligned rectangle in map pixels, as written in RON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl From<MapRect> for Rect {
    fn from(r: MapRect) -> Self {
        Rect::new(r.x, r.y, r.x + r.w, r.y + r.h)
    }
}

/// A tree on the map; `x`/`y` is the top-left of its sprite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapTree {
    pub size: TreeSize,
    pub x: f32,
    pub y: f32,
}

/// Contents of `assets/data/farm.ron`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmMap {
    /// Tiles marked farmable, as (col, row).
    pub farmable: Vec<(i32, i32)>,
    pub player_start: (f32, f32),
    pub bed: MapRect,
    pub trader: MapRect,
    #[serde(default)]
    pub trees: Vec<MapTree>,
}

impl FarmMap {
    pub fn farmable_tiles(&self) -> FarmableTiles {
        FarmableTiles(self.farmable.iter().copied().map(TileCoord::from).collect())
    }

    pub fn tree_spawns(&self) -> TreeSpawns {
        TreeSpawns(
            self.trees
                .iter()
                .map(|t| TreeSpawn {
                    size: t.size,
                    top_left: Vec2::new(t.x, t.y),
                })
                .collect(),
        )
    }

    pub fn layout(&self) -> FarmLayout {
        FarmLayout {
            player_start: Vec2::new(self.player_start.0, self.player_start.1),
            bed: self.bed.into(),
            trader: self.trader.into(),
        }
    }
}
