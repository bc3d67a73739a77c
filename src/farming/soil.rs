//! The soil layer: tilling, watering, planting, harvest, and day turnover.
//!
//! `SoilLayer` is the only thing that mutates farm tiles or plants. Every
//! operation silently ignores actions whose preconditions fail (untilled
//! ground, already watered, occupied tile, ...) and reports whether it took
//! effect so the calling system can decide on sounds and effects.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::shared::*;

use super::grid::{CellTags, GridStore, SoilTag};
use super::plants::Plant;
use super::tiler::{retile_around, SoilShape};

/// What a successful harvest yields.
#[derive(Debug, Clone, PartialEq)]
pub struct Harvest {
    pub species: ItemId,
    pub coord: TileCoord,
    pub quantity: u32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SoilLayer {
    grid: GridStore,
    shapes: HashMap<TileCoord, SoilShape>,
    plants: HashMap<TileCoord, Plant>,
}

impl SoilLayer {
    /// Build a layer from the map's farmable tiles.
    pub fn new(farmable: impl IntoIterator<Item = TileCoord>) -> Self {
        let mut grid = GridStore::default();
        for coord in farmable {
            grid.add_tag(coord, SoilTag::Farmable);
        }
        Self {
            grid,
            ..default()
        }
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn tags(&self, coord: TileCoord) -> CellTags {
        self.grid.get(coord)
    }

    pub fn has_tag(&self, coord: TileCoord, tag: SoilTag) -> bool {
        self.grid.has_tag(coord, tag)
    }

    pub fn shape(&self, coord: TileCoord) -> Option<SoilShape> {
        self.shapes.get(&coord).copied()
    }

    pub fn shapes(&self) -> impl Iterator<Item = (TileCoord, SoilShape)> + '_ {
        self.shapes.iter().map(|(&c, &s)| (c, s))
    }

    pub fn plant(&self, coord: TileCoord) -> Option<&Plant> {
        self.plants.get(&coord)
    }

    pub fn plants(&self) -> impl Iterator<Item = (TileCoord, &Plant)> + '_ {
        self.plants.iter().map(|(&c, p)| (c, p))
    }

    pub fn watered_tiles(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.grid.coords_with(SoilTag::Watered)
    }

    /// Whether the point lies on a farmable tile.
    pub fn is_farmable(&self, point: Vec2) -> bool {
        self.grid.has_tag(TileCoord::from_point(point), SoilTag::Farmable)
    }

    /// Whether the point lies on tilled ground.
    pub fn is_tilled(&self, point: Vec2) -> bool {
        self.grid.has_tag(TileCoord::from_point(point), SoilTag::Tilled)
    }

    /// Whether the point lies on a watered tile.
    pub fn check_watered(&self, point: Vec2) -> bool {
        self.grid.has_tag(TileCoord::from_point(point), SoilTag::Watered)
    }

    // ─── Operations ──────────────────────────────────────────────────────

    /// Hoe the farmable tile under `point`. When it is raining, freshly tilled
    /// ground (and any other dry tilled ground) is watered straight away.
    pub fn till(&mut self, point: Vec2, raining: bool) -> bool {
        let coord = TileCoord::from_point(point);
        let tags = self.grid.get(coord);
        if !tags.contains(SoilTag::Farmable) || tags.contains(SoilTag::Tilled) {
            return false;
        }

        self.grid.add_tag(coord, SoilTag::Tilled);
        retile_around(&self.grid, &mut self.shapes, coord);
        debug!(
            "[Farming] Tilled {:?} -> {}",
            coord,
            self.shapes.get(&coord).copied().unwrap_or_default().key()
        );

        if raining {
            self.water_all();
        }
        true
    }

    /// Water the tilled tile under `point`.
    pub fn water(&mut self, point: Vec2) -> bool {
        let coord = TileCoord::from_point(point);
        let tags = self.grid.get(coord);
        if !tags.contains(SoilTag::Tilled) || tags.contains(SoilTag::Watered) {
            return false;
        }

        self.grid.add_tag(coord, SoilTag::Watered);
        debug!("[Farming] Watered {:?}", coord);
        true
    }

    /// Water every dry tilled tile. Returns how many were watered.
    pub fn water_all(&mut self) -> usize {
        let dry: Vec<TileCoord> = self
            .grid
            .iter()
            .filter(|(_, tags)| tags.contains(SoilTag::Tilled) && !tags.contains(SoilTag::Watered))
            .map(|(coord, _)| coord)
            .collect();

        for &coord in &dry {
            self.grid.add_tag(coord, SoilTag::Watered);
        }
        dry.len()
    }

    /// Plant `species` on the tilled tile under `point`.
    pub fn plant_seed(&mut self, point: Vec2, species: &SpeciesDef) -> bool {
        let coord = TileCoord::from_point(point);
        let tags = self.grid.get(coord);
        if !tags.contains(SoilTag::Tilled) || tags.contains(SoilTag::Planted) {
            return false;
        }

        self.grid.add_tag(coord, SoilTag::Planted);
        self.plants.insert(coord, Plant::new(species));
        debug!("[Farming] Planted {} at {:?}", species.id, coord);
        true
    }

    /// One growth tick for every plant, gated on its tile being watered.
    pub fn grow_plants(&mut self) {
        for (coord, plant) in self.plants.iter_mut() {
            plant.grow(self.grid.has_tag(*coord, SoilTag::Watered));
        }
    }

    /// Pick the ripe plant at `coord`. Unripe or missing plants are left alone.
    pub fn harvest(&mut self, coord: TileCoord) -> Option<Harvest> {
        if !self.plants.get(&coord)?.is_harvestable() {
            return None;
        }

        let plant = self.plants.remove(&coord)?;
        self.grid.remove_tag(coord, SoilTag::Planted);
        debug!("[Farming] Harvested {} at {:?}", plant.species(), coord);

        Some(Harvest {
            species: plant.species().to_string(),
            coord,
            quantity: 1,
        })
    }

    /// Dry out every tile.
    pub fn remove_water(&mut self) {
        self.grid.clear_tag(SoilTag::Watered);
    }

    /// Turn the soil over to a new day: plants grow on yesterday's water,
    /// the ground dries, and rain waters it again.
    pub fn advance_day(&mut self, raining: bool) {
        self.grow_plants();
        self.remove_water();
        if raining {
            let watered = self.water_all();
            info!("[Farming] Rain watered {} tiles", watered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corn() -> SpeciesDef {
        SpeciesDef {
            id: "corn".into(),
            name: "Corn".into(),
            growth_rate: 1.0,
            frames: 4,
            sprite_y_offset: -16.0,
            sell_price: 10,
            seed_price: 4,
        }
    }

    /// Centre of a tile, in map space.
    fn at(col: i32, row: i32) -> Vec2 {
        TileCoord::new(col, row).rect().center()
    }

    fn field(cols: i32, rows: i32) -> SoilLayer {
        SoilLayer::new((0..cols).flat_map(|c| (0..rows).map(move |r| TileCoord::new(c, r))))
    }

    #[test]
    fn till_outside_farmland_is_ignored() {
        let mut soil = field(2, 2);
        assert!(!soil.till(at(5, 5), false));
        assert!(soil.tags(TileCoord::new(5, 5)).is_empty());
        assert!(soil.shape(TileCoord::new(5, 5)).is_none());
    }

    #[test]
    fn till_twice_is_same_as_once() {
        let mut soil = field(2, 2);
        assert!(soil.till(at(1, 1), false));
        let after_once = soil.tags(TileCoord::new(1, 1));
        assert!(!soil.till(at(1, 1), false));
        assert_eq!(soil.tags(TileCoord::new(1, 1)), after_once);
        assert_eq!(soil.shapes().count(), 1);
    }

    #[test]
    fn tilling_neighbours_reshapes_both() {
        let mut soil = field(6, 6);
        soil.till(at(3, 3), false);
        soil.till(at(3, 2), false);

        assert!(soil.shape(TileCoord::new(3, 3)).unwrap().key().contains('t'));
        assert!(soil.shape(TileCoord::new(3, 2)).unwrap().key().contains('b'));
    }

    #[test]
    fn till_in_rain_waters_all_tilled_ground() {
        let mut soil = field(4, 1);
        soil.till(at(0, 0), false);
        soil.till(at(2, 0), true);

        assert!(soil.has_tag(TileCoord::new(0, 0), SoilTag::Watered));
        assert!(soil.has_tag(TileCoord::new(2, 0), SoilTag::Watered));
        assert!(!soil.has_tag(TileCoord::new(1, 0), SoilTag::Watered));
    }

    #[test]
    fn water_needs_tilled_ground() {
        let mut soil = field(2, 2);
        assert!(!soil.water(at(0, 0)));
        soil.till(at(0, 0), false);
        assert!(soil.water(at(0, 0)));
        assert!(!soil.water(at(0, 0)), "Already watered");
        assert!(soil.check_watered(at(0, 0)));
    }

    #[test]
    fn point_queries_follow_tags() {
        let mut soil = field(2, 1);
        assert!(soil.is_farmable(at(1, 0)));
        assert!(!soil.is_farmable(at(2, 0)));
        assert!(!soil.is_tilled(at(1, 0)));

        soil.till(at(1, 0), false);
        assert!(soil.is_tilled(at(1, 0)));
        assert!(soil.is_farmable(at(1, 0)));
    }

    #[test]
    fn till_water_plant_creates_fresh_plant() {
        let mut soil = field(2, 2);
        soil.till(at(1, 0), false);
        soil.water(at(1, 0));
        assert!(soil.plant_seed(at(1, 0), &corn()));

        let coord = TileCoord::new(1, 0);
        assert!(soil.has_tag(coord, SoilTag::Planted));
        let plant = soil.plant(coord).unwrap();
        assert_eq!(plant.species(), "corn");
        assert_eq!(plant.age(), 0.0);

        assert!(!soil.plant_seed(at(1, 0), &corn()), "One plant per tile");
    }

    #[test]
    fn planting_needs_tilled_ground() {
        let mut soil = field(2, 2);
        assert!(!soil.plant_seed(at(0, 0), &corn()));
        assert!(soil.plant(TileCoord::new(0, 0)).is_none());
    }

    #[test]
    fn plants_only_grow_on_watered_tiles() {
        let mut soil = field(2, 1);
        soil.till(at(0, 0), false);
        soil.till(at(1, 0), false);
        soil.plant_seed(at(0, 0), &corn());
        soil.plant_seed(at(1, 0), &corn());
        soil.water(at(0, 0));

        soil.grow_plants();

        assert_eq!(soil.plant(TileCoord::new(0, 0)).unwrap().age(), 1.0);
        assert_eq!(soil.plant(TileCoord::new(1, 0)).unwrap().age(), 0.0);
    }

    #[test]
    fn harvest_requires_ripeness() {
        let mut soil = field(1, 1);
        let coord = TileCoord::new(0, 0);
        soil.till(at(0, 0), false);
        soil.plant_seed(at(0, 0), &corn());

        assert!(soil.harvest(coord).is_none());
        assert!(soil.plant(coord).is_some());

        for _ in 0..3 {
            soil.water(at(0, 0));
            soil.grow_plants();
            soil.remove_water();
        }

        let harvest = soil.harvest(coord).unwrap();
        assert_eq!(harvest.species, "corn");
        assert_eq!(harvest.quantity, 1);
        assert!(soil.plant(coord).is_none());
        assert!(!soil.has_tag(coord, SoilTag::Planted));
        assert!(soil.has_tag(coord, SoilTag::Tilled), "Harvest leaves the ground tilled");
        assert!(soil.harvest(coord).is_none());
    }

    #[test]
    fn remove_water_is_idempotent() {
        let mut soil = field(3, 1);
        for c in 0..3 {
            soil.till(at(c, 0), false);
        }
        soil.water_all();

        soil.remove_water();
        assert_eq!(soil.watered_tiles().count(), 0);
        soil.remove_water();
        assert_eq!(soil.watered_tiles().count(), 0);
        assert_eq!(soil.shapes().count(), 3);
    }

    #[test]
    fn advance_day_grows_then_dries_then_rains() {
        let mut soil = field(2, 1);
        let coord = TileCoord::new(0, 0);
        soil.till(at(0, 0), false);
        soil.plant_seed(at(0, 0), &corn());
        soil.water(at(0, 0));

        soil.advance_day(false);
        assert_eq!(soil.plant(coord).unwrap().age(), 1.0);
        assert!(!soil.has_tag(coord, SoilTag::Watered));

        soil.advance_day(true);
        assert_eq!(soil.plant(coord).unwrap().age(), 1.0, "Dry yesterday, no growth");
        assert!(soil.has_tag(coord, SoilTag::Watered), "Rain waters today");

        soil.advance_day(false);
        assert_eq!(soil.plant(coord).unwrap().age(), 2.0);
    }

    #[test]
    fn tag_invariants_hold_after_mixed_actions() {
        let mut soil = field(3, 3);
        let points: Vec<Vec2> = (0..5).flat_map(|c| (0..5).map(move |r| at(c, r))).collect();
        for (i, &p) in points.iter().enumerate() {
            match i % 4 {
                0 => {
                    soil.till(p, i % 3 == 0);
                }
                1 => {
                    soil.water(p);
                }
                2 => {
                    soil.plant_seed(p, &corn());
                }
                _ => soil.advance_day(i % 2 == 0),
            }
        }

        for c in -1..6 {
            for r in -1..6 {
                let tags = soil.tags(TileCoord::new(c, r));
                if tags.contains(SoilTag::Watered) || tags.contains(SoilTag::Planted) {
                    assert!(tags.contains(SoilTag::Tilled));
                }
                if tags.contains(SoilTag::Tilled) {
                    assert!(tags.contains(SoilTag::Farmable));
                }
            }
        }
    }
}
