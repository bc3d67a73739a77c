//! Hoe, watering can, and seed actions.
//!
//! Cues follow the swing, not the outcome: the hoe sounds over any farmable
//! tile, the can sounds on every use, and seeds sound over tilled ground.

use bevy::prelude::*;
use crate::shared::*;
use super::SoilLayer;

// ─────────────────────────────────────────────────────────────────────────────
// Tools — hoe and watering can
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_tool_use(
    mut tool_events: EventReader<ToolUseEvent>,
    mut soil: ResMut<SoilLayer>,
    day: Res<DayCycle>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in tool_events.read() {
        let sfx_id = match event.tool {
            ToolKind::Hoe => {
                let audible = soil.is_farmable(event.target);
                soil.till(event.target, day.raining);
                audible.then_some("hoe")
            }
            ToolKind::WateringCan => {
                soil.water(event.target);
                Some("water")
            }
            // Trees handle the axe.
            ToolKind::Axe => None,
        };

        if let Some(sfx_id) = sfx_id {
            sfx_events.send(PlaySfxEvent { sfx_id: sfx_id.to_string() });
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Planting
// ─────────────────────────────────────────────────────────────────────────────

/// Plant the requested species. One seed is used up only if planting works.
pub fn handle_plant_seed(
    mut plant_events: EventReader<PlantSeedEvent>,
    mut soil: ResMut<SoilLayer>,
    mut inventory: ResMut<Inventory>,
    species: Res<SpeciesRegistry>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in plant_events.read() {
        let Some(def) = species.get(&event.species) else {
            warn!("[Farming] Unknown species {:?}", event.species);
            continue;
        };

        if inventory.seed_count(&def.id) == 0 {
            continue;
        }

        if soil.is_tilled(event.target) {
            sfx_events.send(PlaySfxEvent { sfx_id: "plant".to_string() });
        }
        if soil.plant_seed(event.target, def) {
            inventory.take_seed(&def.id);
        }
    }
}
