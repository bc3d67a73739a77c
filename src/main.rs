use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use tillfield::shared::*;
use tillfield::{audio, calendar, data, economy, farming, input, player, world};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Tillfield".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<DayCycle>()
        .init_resource::<Inventory>()
        .init_resource::<PlayerInput>()
        .init_resource::<SpeciesRegistry>()
        .init_resource::<GameSettings>()
        .init_resource::<FarmableTiles>()
        .init_resource::<FarmLayout>()
        .init_resource::<TreeSpawns>()
        .init_resource::<ShopData>()
        // Events
        .add_event::<ToolUseEvent>()
        .add_event::<PlantSeedEvent>()
        .add_event::<DayEndEvent>()
        .add_event::<NewDayEvent>()
        .add_event::<ItemPickupEvent>()
        .add_event::<PlaySfxEvent>()
        // Data loading
        .add_plugins(data::DataPlugin)
        // Domain plugins
        .add_plugins(input::InputPlugin)
        .add_plugins(calendar::CalendarPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(farming::FarmingPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(economy::EconomyPlugin)
        .add_plugins(audio::AudioPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
