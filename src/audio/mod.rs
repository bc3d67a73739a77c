//! Audio — one-shot sound cues and the looping background track.

use bevy::audio::Volume;
use bevy::prelude::*;
use crate::shared::*;

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MusicState>()
            .add_systems(OnEnter(GameState::Playing), start_game_music)
            .add_systems(Update, handle_play_sfx);
    }
}

#[derive(Resource, Default)]
pub struct MusicState {
    pub current_track: Option<Entity>,
}

/// Maps SFX IDs (sent by other domains) to actual audio file paths.
pub fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "hoe" => Some("audio/hoe.wav"),
        "water" => Some("audio/water.wav"),
        "plant" => Some("audio/plant.wav"),
        "success" => Some("audio/success.wav"),
        _ => None,
    }
}

const MUSIC_PATH: &str = "audio/music.wav";

/// Listen for PlaySfxEvent and spawn one-shot audio sources that auto-despawn.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<GameSettings>,
) {
    for event in events.read() {
        let Some(path) = sfx_path(&event.sfx_id) else {
            warn!("[Audio] Unknown sound cue '{}'", event.sfx_id);
            continue;
        };
        commands.spawn((
            AudioPlayer::new(asset_server.load(path)),
            PlaybackSettings::DESPAWN.with_volume(Volume::new(settings.sfx_volume)),
        ));
    }
}

/// Start the background loop on the first entry into Playing. Returning
/// from the shop keeps the track running.
pub fn start_game_music(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<GameSettings>,
    mut music_state: ResMut<MusicState>,
) {
    if music_state.current_track.is_some() {
        return;
    }
    let entity = commands
        .spawn((
            AudioPlayer::new(asset_server.load(MUSIC_PATH)),
            PlaybackSettings::LOOP.with_volume(Volume::new(settings.music_volume)),
        ))
        .id();
    music_state.current_track = Some(entity);
}
