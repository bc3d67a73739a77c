//! Harvest system — walking into a ripe plant picks it.

use bevy::prelude::*;
use crate::shared::*;
use super::{DecayParticle, FarmEntities, SoilLayer};

/// How long the decay flash lingers after a harvest.
pub const DECAY_SECS: f32 = 0.2;

/// Sprite tint for the decay flash. Channels far above 1.0 saturate every
/// visible texel, so the plant's last frame shows as a flat white shape.
pub const FLASH_TINT: Color = Color::linear_rgb(16.0, 16.0, 16.0);

/// Harvest every ripe plant whose tile overlaps the player's hitbox.
pub fn harvest_on_contact(
    mut commands: Commands,
    mut soil: ResMut<SoilLayer>,
    farm_entities: Res<FarmEntities>,
    player_query: Query<&Transform, With<Player>>,
    sprite_query: Query<(&Sprite, &Transform), Without<Player>>,
    mut pickup_events: EventWriter<ItemPickupEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    let Ok(player_tf) = player_query.get_single() else {
        return;
    };

    let hitbox = Rect::from_center_size(world_to_map(player_tf.translation), PLAYER_HITBOX);

    let ripe: Vec<TileCoord> = soil
        .plants()
        .filter(|(coord, plant)| {
            plant.is_harvestable() && !coord.rect().intersect(hitbox).is_empty()
        })
        .map(|(coord, _)| coord)
        .collect();

    for coord in ripe {
        let Some(harvest) = soil.harvest(coord) else {
            continue;
        };

        info!("[Farming] Harvested {} at {:?}", harvest.species, coord);

        pickup_events.send(ItemPickupEvent {
            item_id: harvest.species,
            quantity: harvest.quantity,
        });
        sfx_events.send(PlaySfxEvent { sfx_id: "success".to_string() });

        // Flash the last plant frame in white where the plant stood.
        let Some(&entity) = farm_entities.plants.get(&coord) else {
            continue;
        };
        if let Ok((sprite, transform)) = sprite_query.get(entity) {
            commands.spawn((
                Sprite {
                    color: FLASH_TINT,
                    ..sprite.clone()
                },
                transform.with_translation(transform.translation.with_z(layers::MAIN)),
                DecayParticle {
                    timer: Timer::from_seconds(DECAY_SECS, TimerMode::Once),
                },
            ));
        }
    }
}
