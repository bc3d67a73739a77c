use bevy::prelude::*;
use crate::shared::*;
use super::PlayerMovement;

/// Spawn the player at the map's start point.
/// Runs on every `OnEnter(GameState::Playing)`, including returns from the shop.
pub fn spawn_player(
    mut commands: Commands,
    asset_server: Option<Res<AssetServer>>,
    layout: Res<FarmLayout>,
    existing: Query<Entity, With<Player>>,
) {
    // Guard: don't double-spawn when the shop closes.
    if !existing.is_empty() {
        return;
    }

    let image = asset_server
        .map(|server| server.load("graphics/player/down/0.png"))
        .unwrap_or_default();

    commands.spawn((
        Player,
        PlayerMovement::default(),
        Sprite::from_image(image),
        Transform::from_translation(map_to_world(layout.player_start, layers::MAIN)),
        Visibility::default(),
    ));

    info!("[Player] Spawned at {:?}", layout.player_start);
}
