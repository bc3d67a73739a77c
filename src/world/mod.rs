//! World domain — the farm's trees.
//!
//! Responsible for:
//! - Planting the grove from the farm map
//! - Axe swings: damage, apples, felling into stumps
//! - The daily apple crop
//! - Tree, stump, and apple sprites and the trees' colliders

use bevy::prelude::*;
use bevy::sprite::Anchor;
use std::collections::HashMap;

use crate::shared::*;

pub mod trees;

pub use trees::{Chop, Grove, Tree};

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Grove>()
            .init_resource::<TreeAtlases>()
            .add_systems(OnExit(GameState::Loading), init_grove)
            .add_systems(OnEnter(GameState::Playing), load_tree_atlases)
            .add_systems(
                Update,
                (handle_axe_use, regrow_apples_on_new_day)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                PostUpdate,
                sync_tree_sprites.run_if(in_state(GameState::Playing)),
            );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS & RESOURCES
// ═══════════════════════════════════════════════════════════════════════

/// Sprite of the tree at `index` in the grove, tagged with whether it is
/// currently drawn standing or as a stump.
#[derive(Component, Debug, Clone)]
pub struct TreeEntity {
    pub index: usize,
    pub standing: bool,
}

/// One hanging apple.
#[derive(Component, Debug, Clone)]
pub struct AppleEntity;

/// Tree, stump, and apple images. Render systems skip work until loaded.
#[derive(Resource, Default)]
pub struct TreeAtlases {
    pub loaded: bool,
    pub trees: HashMap<TreeSize, Handle<Image>>,
    pub stumps: HashMap<TreeSize, Handle<Image>>,
    pub apple: Handle<Image>,
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

/// Replace the (empty) default grove with the map's trees.
pub fn init_grove(mut commands: Commands, spawns: Res<TreeSpawns>) {
    let grove = Grove::new(&spawns.0, &mut rand::thread_rng());
    info!("[World] Planted {} trees", grove.trees().len());
    commands.insert_resource(grove);
}

/// Axe swings hit whatever tree stands at the target.
pub fn handle_axe_use(
    mut tool_events: EventReader<ToolUseEvent>,
    mut grove: ResMut<Grove>,
    mut pickup_events: EventWriter<ItemPickupEvent>,
) {
    let mut rng = rand::thread_rng();
    for event in tool_events.read() {
        if event.tool != ToolKind::Axe {
            continue;
        }
        let Some(chop) = grove.chop_at(event.target, &mut rng) else {
            continue;
        };

        if chop.apples > 0 {
            pickup_events.send(ItemPickupEvent {
                item_id: "apple".to_string(),
                quantity: chop.apples,
            });
        }
        if chop.wood > 0 {
            info!("[World] Tree felled for {} wood", chop.wood);
            pickup_events.send(ItemPickupEvent {
                item_id: "wood".to_string(),
                quantity: chop.wood,
            });
        }
    }
}

pub fn regrow_apples_on_new_day(
    mut new_day_events: EventReader<NewDayEvent>,
    mut grove: ResMut<Grove>,
) {
    for event in new_day_events.read() {
        grove.regrow(&mut rand::thread_rng());
        debug!("[World] Apples regrown for day {}", event.day);
    }
}

/// Assets:
///   graphics/trees/{small,large}.png
///   graphics/stumps/{small,large}.png
///   graphics/fruit/apple.png
fn load_tree_atlases(asset_server: Res<AssetServer>, mut atlases: ResMut<TreeAtlases>) {
    if atlases.loaded {
        return;
    }
    for size in [TreeSize::Small, TreeSize::Large] {
        let key = size.key();
        atlases
            .trees
            .insert(size, asset_server.load(format!("graphics/trees/{key}.png")));
        atlases
            .stumps
            .insert(size, asset_server.load(format!("graphics/stumps/{key}.png")));
    }
    atlases.apple = asset_server.load("graphics/fruit/apple.png");
    atlases.loaded = true;
}

/// Trees are drawn from their top-left corner; felled trees swap to the
/// stump image and a smaller collider. Apples are redrawn whenever the
/// grove changes.
pub fn sync_tree_sprites(
    mut commands: Commands,
    atlases: Res<TreeAtlases>,
    grove: Res<Grove>,
    mut tree_query: Query<(Entity, &mut TreeEntity, &mut Sprite, &mut Transform)>,
    apple_query: Query<Entity, With<AppleEntity>>,
) {
    if !atlases.loaded || !(grove.is_changed() || atlases.is_changed()) {
        return;
    }

    let image = |tree: &Tree| -> Handle<Image> {
        let images = if tree.is_alive() { &atlases.trees } else { &atlases.stumps };
        images.get(&tree.size()).cloned().unwrap_or_default()
    };

    let mut drawn = vec![false; grove.trees().len()];
    for (entity, mut tag, mut sprite, mut transform) in tree_query.iter_mut() {
        let Some(tree) = grove.trees().get(tag.index) else {
            commands.entity(entity).despawn();
            continue;
        };
        drawn[tag.index] = true;
        if tag.standing != tree.is_alive() {
            tag.standing = tree.is_alive();
            sprite.image = image(tree);
            transform.translation = map_to_world(tree.rect().min, layers::MAIN);
            commands.entity(entity).insert(Collider { hitbox: tree.hitbox() });
        }
    }

    for (index, tree) in grove.trees().iter().enumerate() {
        if drawn[index] {
            continue;
        }
        commands.spawn((
            Sprite {
                image: image(tree),
                anchor: Anchor::TopLeft,
                ..default()
            },
            Transform::from_translation(map_to_world(tree.rect().min, layers::MAIN)),
            TreeEntity {
                index,
                standing: tree.is_alive(),
            },
            Collider { hitbox: tree.hitbox() },
        ));
    }

    for entity in apple_query.iter() {
        commands.entity(entity).despawn();
    }
    for apple in grove.trees().iter().flat_map(Tree::apples) {
        commands.spawn((
            Sprite {
                image: atlases.apple.clone(),
                anchor: Anchor::TopLeft,
                ..default()
            },
            Transform::from_translation(map_to_world(apple, layers::FRUIT)),
            AppleEntity,
        ));
    }
}
