//! Visual synchronisation systems — keep farming sprites in sync with the
//! soil layer. State lives in `SoilLayer`; these systems spawn, update, and
//! despawn entities until the world matches it.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use rand::Rng;

use crate::shared::*;
use super::grid::SoilTag;
use super::{
    DecayParticle, FarmEntities, FarmingAtlases, PlantEntity, SoilLayer, SoilTileEntity,
    WaterTileEntity,
};

// ─────────────────────────────────────────────────────────────────────────────
// Soil sprite sync
// ─────────────────────────────────────────────────────────────────────────────

/// One sprite per tilled tile, showing the tile's current shape.
pub fn sync_soil_sprites(
    mut commands: Commands,
    mut farm_entities: ResMut<FarmEntities>,
    atlases: Res<FarmingAtlases>,
    soil: Res<SoilLayer>,
    mut soil_query: Query<(&mut SoilTileEntity, &mut Sprite)>,
) {
    if !atlases.loaded || !(soil.is_changed() || atlases.is_changed()) {
        return;
    }

    // Re-skin tiles whose neighbours changed.
    for (mut tile, mut sprite) in soil_query.iter_mut() {
        let Some(shape) = soil.shape(tile.coord) else {
            continue;
        };
        if tile.shape_key != shape.key() {
            tile.shape_key = shape.key();
            if let Some(image) = atlases.soil.get(shape.key()) {
                sprite.image = image.clone();
            }
        }
    }

    let missing: Vec<_> = soil
        .shapes()
        .filter(|(coord, _)| !farm_entities.soil.contains_key(coord))
        .collect();

    for (coord, shape) in missing {
        let image = atlases.soil.get(shape.key()).cloned().unwrap_or_default();
        let entity = commands
            .spawn((
                Sprite::from_image(image),
                Transform::from_translation(map_to_world(coord.rect().center(), layers::SOIL)),
                SoilTileEntity { coord, shape_key: shape.key() },
            ))
            .id();
        farm_entities.soil.insert(coord, entity);
    }

    let stale: Vec<TileCoord> = farm_entities
        .soil
        .keys()
        .filter(|&&coord| soil.shape(coord).is_none())
        .copied()
        .collect();

    for coord in stale {
        if let Some(entity) = farm_entities.soil.remove(&coord) {
            commands.entity(entity).despawn();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Water overlay sync
// ─────────────────────────────────────────────────────────────────────────────

/// One randomly chosen water overlay per watered tile; overlays vanish when
/// the ground dries.
pub fn sync_water_sprites(
    mut commands: Commands,
    mut farm_entities: ResMut<FarmEntities>,
    atlases: Res<FarmingAtlases>,
    soil: Res<SoilLayer>,
) {
    if !atlases.loaded || !(soil.is_changed() || atlases.is_changed()) {
        return;
    }

    let mut rng = rand::thread_rng();

    let missing: Vec<TileCoord> = soil
        .watered_tiles()
        .filter(|coord| !farm_entities.water.contains_key(coord))
        .collect();

    for coord in missing {
        let image = if atlases.water.is_empty() {
            Handle::default()
        } else {
            atlases.water[rng.gen_range(0..atlases.water.len())].clone()
        };
        let entity = commands
            .spawn((
                Sprite::from_image(image),
                Transform::from_translation(map_to_world(
                    coord.rect().center(),
                    layers::SOIL_WATER,
                )),
                WaterTileEntity { coord },
            ))
            .id();
        farm_entities.water.insert(coord, entity);
    }

    let dried: Vec<TileCoord> = farm_entities
        .water
        .keys()
        .filter(|&&coord| !soil.has_tag(coord, SoilTag::Watered))
        .copied()
        .collect();

    for coord in dried {
        if let Some(entity) = farm_entities.water.remove(&coord) {
            commands.entity(entity).despawn();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plant sprite sync
// ─────────────────────────────────────────────────────────────────────────────

/// Hitbox of a grown plant, in map space: the tile, narrowed by 26 px and
/// trimmed to its lower 60%.
pub fn plant_hitbox(coord: TileCoord) -> Rect {
    let tile = coord.rect();
    Rect::new(
        tile.min.x + 13.0,
        tile.max.y - TILE_SIZE * 0.6,
        tile.max.x - 13.0,
        tile.max.y,
    )
}

/// Plant sprites follow growth: the frame tracks age, and grown plants move
/// to the main layer and become solid.
pub fn sync_plant_sprites(
    mut commands: Commands,
    mut farm_entities: ResMut<FarmEntities>,
    atlases: Res<FarmingAtlases>,
    species: Res<SpeciesRegistry>,
    soil: Res<SoilLayer>,
    mut plant_query: Query<(Entity, &mut PlantEntity, &mut Sprite, &mut Transform)>,
) {
    if !atlases.loaded || !(soil.is_changed() || atlases.is_changed()) {
        return;
    }

    let frame_image = |id: &str, frame: usize| -> Handle<Image> {
        atlases
            .plants
            .get(id)
            .and_then(|frames| frames.get(frame).or_else(|| frames.last()))
            .cloned()
            .unwrap_or_default()
    };

    let anchor_point = |coord: TileCoord, id: &str| -> Vec2 {
        let tile = coord.rect();
        let y_offset = species.get(id).map(|d| d.sprite_y_offset).unwrap_or(0.0);
        Vec2::new(tile.center().x, tile.max.y + y_offset)
    };

    for (entity, mut tag, mut sprite, mut transform) in plant_query.iter_mut() {
        let Some(plant) = soil.plant(tag.coord) else {
            continue;
        };
        let frame = plant.frame_index();
        if tag.frame != frame {
            tag.frame = frame;
            sprite.image = frame_image(plant.species(), frame);
        }

        let z = if plant.is_blocking() { layers::MAIN } else { layers::GROUND_PLANT };
        transform.translation.z = z;

        if plant.is_blocking() {
            commands.entity(entity).insert(Collider { hitbox: plant_hitbox(tag.coord) });
        }
    }

    let missing: Vec<_> = soil
        .plants()
        .filter(|(coord, _)| !farm_entities.plants.contains_key(coord))
        .map(|(coord, plant)| {
            let id = plant.species().to_string();
            (coord, id, plant.frame_index(), plant.is_blocking())
        })
        .collect();

    for (coord, id, frame, blocking) in missing {
        let z = if blocking { layers::MAIN } else { layers::GROUND_PLANT };
        let mut entity = commands.spawn((
            Sprite {
                image: frame_image(&id, frame),
                anchor: Anchor::BottomCenter,
                ..default()
            },
            Transform::from_translation(map_to_world(anchor_point(coord, &id), z)),
            PlantEntity { coord, frame },
        ));
        if blocking {
            entity.insert(Collider { hitbox: plant_hitbox(coord) });
        }
        farm_entities.plants.insert(coord, entity.id());
    }

    let gone: Vec<TileCoord> = farm_entities
        .plants
        .keys()
        .filter(|&&coord| soil.plant(coord).is_none())
        .copied()
        .collect();

    for coord in gone {
        if let Some(entity) = farm_entities.plants.remove(&coord) {
            commands.entity(entity).despawn();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Decay particles
// ─────────────────────────────────────────────────────────────────────────────

/// Decay flashes hold at full strength until their timer runs out.
pub fn tick_decay_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut particles: Query<(Entity, &mut DecayParticle)>,
) {
    for (entity, mut particle) in particles.iter_mut() {
        if particle.timer.tick(time.delta()).finished() {
            commands.entity(entity).despawn();
        }
    }
}
