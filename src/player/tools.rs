use bevy::prelude::*;
use crate::shared::*;
use super::{next_tool, target_point, PlayerActions, PlayerLoadout, PlayerMovement};

/// Switch tool (Q) or seed (E). Holding the key cycles at the switch rate.
pub fn tool_cycle(
    time: Res<Time>,
    input: Res<PlayerInput>,
    species: Res<SpeciesRegistry>,
    mut actions: ResMut<PlayerActions>,
    mut loadout: ResMut<PlayerLoadout>,
) {
    actions.tool_switch.tick(time.delta());
    actions.seed_switch.tick(time.delta());

    if input.tool_switch && actions.tool_switch.try_trigger() {
        loadout.tool = next_tool(loadout.tool);
        debug!("[Player] Tool: {:?}", loadout.tool);
    }

    if input.seed_switch && actions.seed_switch.try_trigger() && !species.species.is_empty() {
        loadout.seed = (loadout.seed + 1) % species.species.len();
        debug!("[Player] Seed: {}", species.species[loadout.seed].id);
    }
}

/// Swing the held tool. The swing winds up first; the `ToolUseEvent` fires
/// when the wind-up ends, aimed at the point in front of the player.
pub fn tool_use(
    time: Res<Time>,
    input: Res<PlayerInput>,
    loadout: Res<PlayerLoadout>,
    mut actions: ResMut<PlayerActions>,
    query: Query<(&Transform, &PlayerMovement), With<Player>>,
    mut tool_events: EventWriter<ToolUseEvent>,
) {
    let Ok((transform, movement)) = query.get_single() else {
        return;
    };

    if actions.tool_use.tick(time.delta()) {
        let target = target_point(world_to_map(transform.translation), movement.facing);
        tool_events.send(ToolUseEvent {
            tool: loadout.tool,
            target,
        });
        return;
    }

    if input.tool_use && !actions.tool_use.is_active() {
        actions.tool_use.activate();
    }
}

/// Plant the selected seed in front of the player, after a short wind-up.
/// Nothing happens without seeds in stock.
pub fn seed_use(
    time: Res<Time>,
    input: Res<PlayerInput>,
    loadout: Res<PlayerLoadout>,
    inventory: Res<Inventory>,
    species: Res<SpeciesRegistry>,
    mut actions: ResMut<PlayerActions>,
    query: Query<(&Transform, &PlayerMovement), With<Player>>,
    mut seed_events: EventWriter<PlantSeedEvent>,
) {
    let Ok((transform, movement)) = query.get_single() else {
        return;
    };
    let Some(def) = species.species.get(loadout.seed) else {
        return;
    };

    if actions.seed_use.tick(time.delta()) {
        let target = target_point(world_to_map(transform.translation), movement.facing);
        seed_events.send(PlantSeedEvent {
            species: def.id.clone(),
            target,
        });
        return;
    }

    if input.seed_use && !actions.seed_use.is_active() && inventory.seed_count(&def.id) > 0 {
        actions.seed_use.activate();
    }
}
