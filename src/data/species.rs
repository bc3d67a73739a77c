use crate::shared::*;

/// Populate the SpeciesRegistry with every plantable species, in the order
/// the trader lists them.
///
/// Growth: a plant ages by `growth_rate` on each watered day and is ripe at
/// `frames - 1`, so corn ripens after 3 watered days and tomato after 5.
pub fn populate_species(registry: &mut SpeciesRegistry) {
    registry.species = vec![
        SpeciesDef {
            id: "corn".into(),
            name: "Corn".into(),
            growth_rate: 1.0,
            frames: 4,
            sprite_y_offset: -16.0,
            sell_price: 10,
            seed_price: 4,
        },
        SpeciesDef {
            id: "tomato".into(),
            name: "Tomato".into(),
            growth_rate: 0.7,
            frames: 4,
            sprite_y_offset: -8.0,
            sell_price: 20,
            seed_price: 5,
        },
    ];
}
