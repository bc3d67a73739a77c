use bevy::prelude::*;
use crate::shared::*;

/// Fill the purse at startup: starting money plus `starting_seeds` of every
/// species the trader sells.
pub fn init_inventory(
    mut inventory: ResMut<Inventory>,
    settings: Res<GameSettings>,
    species: Res<SpeciesRegistry>,
) {
    *inventory = starting_inventory(&settings, &species);
    info!(
        "[Economy] Starting with {} money and {} seeds of each species",
        inventory.money, settings.starting_seeds
    );
}

pub fn starting_inventory(settings: &GameSettings, species: &SpeciesRegistry) -> Inventory {
    let mut inventory = Inventory {
        money: settings.starting_money,
        ..default()
    };
    for id in species.ids() {
        inventory.add_seed(id, settings.starting_seeds);
    }
    inventory
}

/// Applies ItemPickupEvents (harvests) to the item inventory.
pub fn apply_item_pickups(
    mut pickup_events: EventReader<ItemPickupEvent>,
    mut inventory: ResMut<Inventory>,
) {
    for ev in pickup_events.read() {
        inventory.add_item(&ev.item_id, ev.quantity);
        debug!(
            "[Economy] +{} {} (now {})",
            ev.quantity,
            ev.item_id,
            inventory.item_count(&ev.item_id)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::species::populate_species;

    #[test]
    fn starting_inventory_follows_settings() {
        let mut species = SpeciesRegistry::default();
        populate_species(&mut species);
        let settings = GameSettings {
            starting_money: 50,
            starting_seeds: 3,
            ..default()
        };

        let inventory = starting_inventory(&settings, &species);
        assert_eq!(inventory.money, 50);
        assert_eq!(inventory.seed_count("corn"), 3);
        assert_eq!(inventory.seed_count("tomato"), 3);
        assert_eq!(inventory.item_count("corn"), 0);
    }
}
