use bevy::prelude::*;
use crate::shared::*;
use super::player_hitbox;

/// Places on the farm that respond to the interact key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionZone {
    Bed,
    Trader,
}

/// Which zone, if any, the player's hitbox overlaps. The bed wins ties.
pub fn zone_at(layout: &FarmLayout, center: Vec2) -> Option<InteractionZone> {
    let hitbox = player_hitbox(center);
    if !layout.bed.intersect(hitbox).is_empty() {
        Some(InteractionZone::Bed)
    } else if !layout.trader.intersect(hitbox).is_empty() {
        Some(InteractionZone::Trader)
    } else {
        None
    }
}

/// Interact key: sleeping in the bed ends the day, talking to the trader
/// opens the shop.
pub fn interact(
    input: Res<PlayerInput>,
    layout: Res<FarmLayout>,
    day: Res<DayCycle>,
    query: Query<&Transform, With<Player>>,
    mut day_end_events: EventWriter<DayEndEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !input.interact {
        return;
    }
    let Ok(transform) = query.get_single() else {
        return;
    };

    match zone_at(&layout, world_to_map(transform.translation)) {
        Some(InteractionZone::Bed) => {
            info!("[Player] Going to sleep on day {}", day.day);
            day_end_events.send(DayEndEvent { day: day.day });
        }
        Some(InteractionZone::Trader) => {
            info!("[Player] Opening shop");
            next_state.set(GameState::Shop);
        }
        None => {}
    }
}
