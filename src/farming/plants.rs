//! Per-tile plant growth.

use crate::shared::{ItemId, SpeciesDef};

/// Age at which a plant stops being ground cover and starts blocking movement.
pub const BLOCKING_AGE: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Plant {
    species: ItemId,
    age: f32,
    growth_rate: f32,
    max_age: f32,
    harvestable: bool,
}

impl Plant {
    pub fn new(def: &SpeciesDef) -> Self {
        let max_age = def.max_age();
        Self {
            species: def.id.clone(),
            age: 0.0,
            growth_rate: def.growth_rate,
            max_age,
            // A single-frame species is ripe as soon as it is planted.
            harvestable: max_age <= 0.0,
        }
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn age(&self) -> f32 {
        self.age
    }

    pub fn max_age(&self) -> f32 {
        self.max_age
    }

    pub fn is_harvestable(&self) -> bool {
        self.harvestable
    }

    /// Grown plants are solid; seedlings can be walked over.
    pub fn is_blocking(&self) -> bool {
        self.age >= BLOCKING_AGE
    }

    /// Index into the species' growth frames.
    pub fn frame_index(&self) -> usize {
        self.age.max(0.0) as usize
    }

    /// Advance one growth tick. Nothing happens unless the tile is watered.
    /// Returns true if the age changed.
    pub fn grow(&mut self, watered: bool) -> bool {
        if !watered || self.harvestable {
            return false;
        }

        self.age += self.growth_rate;
        if self.age >= self.max_age {
            self.age = self.max_age;
            self.harvestable = true;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(id: &str, growth_rate: f32, frames: u8) -> SpeciesDef {
        SpeciesDef {
            id: id.into(),
            name: id.into(),
            growth_rate,
            frames,
            sprite_y_offset: -8.0,
            sell_price: 1,
            seed_price: 1,
        }
    }

    #[test]
    fn corn_ripens_after_three_watered_ticks_and_stays_clamped() {
        let mut plant = Plant::new(&species("corn", 1.0, 4));
        assert_eq!(plant.max_age(), 3.0);

        for _ in 0..3 {
            assert!(plant.grow(true));
        }
        assert_eq!(plant.age(), 3.0);
        assert!(plant.is_harvestable());

        plant.grow(true);
        assert_eq!(plant.age(), 3.0, "Age is clamped at maturity");
    }

    #[test]
    fn dry_ticks_do_not_grow() {
        let mut plant = Plant::new(&species("corn", 1.0, 4));
        for _ in 0..10 {
            assert!(!plant.grow(false));
        }
        assert_eq!(plant.age(), 0.0);
        assert!(!plant.is_harvestable());
    }

    #[test]
    fn fractional_rate_overshoot_is_clamped() {
        let mut plant = Plant::new(&species("tomato", 0.7, 4));
        let mut last = plant.age();
        for _ in 0..4 {
            plant.grow(true);
            assert!(plant.age() >= last, "Age never decreases");
            assert!(plant.age() <= plant.max_age());
            last = plant.age();
        }
        assert!(!plant.is_harvestable(), "2.8 is still short of 3");

        plant.grow(true);
        assert_eq!(plant.age(), 3.0);
        assert!(plant.is_harvestable());
    }

    #[test]
    fn blocking_starts_at_one_growth_unit() {
        let mut plant = Plant::new(&species("tomato", 0.7, 4));
        assert!(!plant.is_blocking());
        plant.grow(true);
        assert!(!plant.is_blocking(), "0.7 is still ground cover");
        plant.grow(true);
        assert!(plant.is_blocking());
        assert_eq!(plant.frame_index(), 1);
    }
}
