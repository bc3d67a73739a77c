mod movement;
mod tools;
mod camera;
mod interaction;
mod spawn;

pub use interaction::{interact, zone_at, InteractionZone};
pub use movement::{facing_from_axis, player_movement, resolve_movement};
pub use tools::{seed_use, tool_cycle, tool_use};
pub use spawn::spawn_player;

use bevy::prelude::*;
use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // -- Local resources --
        app.init_resource::<PlayerLoadout>()
            .init_resource::<PlayerActions>();

        // -- Timers depend on settings, so build them once data has loaded --
        app.add_systems(OnExit(GameState::Loading), init_player_actions);

        // -- Spawn player when we enter Playing --
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        // -- Systems that run every frame while Playing --
        app.add_systems(
            Update,
            (
                // tool_use starts the wind-up that freezes movement; run it first
                tools::tool_use.before(movement::player_movement),
                tools::seed_use,
                tools::tool_cycle,
                movement::player_movement,
                interaction::interact,
                camera::camera_follow_player.after(movement::player_movement),
            )
                .run_if(in_state(GameState::Playing)),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Player-domain components and resources
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Default)]
pub struct PlayerMovement {
    pub facing: Facing,
}

/// What the player currently holds.
#[derive(Resource, Debug, Clone)]
pub struct PlayerLoadout {
    pub tool: ToolKind,
    /// Index into `SpeciesRegistry::species`.
    pub seed: usize,
}

impl Default for PlayerLoadout {
    fn default() -> Self {
        Self {
            tool: ToolKind::Hoe,
            seed: 0,
        }
    }
}

/// Debounce and wind-up timers for the player's held-key actions.
#[derive(Resource, Debug, Clone)]
pub struct PlayerActions {
    pub tool_use: ActionTimer,
    pub seed_use: ActionTimer,
    pub tool_switch: ActionTimer,
    pub seed_switch: ActionTimer,
}

impl PlayerActions {
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self {
            tool_use: ActionTimer::from_millis(settings.tool_use_ms),
            seed_use: ActionTimer::from_millis(settings.seed_use_ms),
            tool_switch: ActionTimer::from_millis(settings.switch_ms),
            seed_switch: ActionTimer::from_millis(settings.switch_ms),
        }
    }
}

impl Default for PlayerActions {
    fn default() -> Self {
        Self::from_settings(&GameSettings::default())
    }
}

fn init_player_actions(mut commands: Commands, settings: Res<GameSettings>) {
    commands.insert_resource(PlayerActions::from_settings(&settings));
}

// ═══════════════════════════════════════════════════════════════════════════
// Helpers shared across sub-modules
// ═══════════════════════════════════════════════════════════════════════════

pub const TOOL_ORDER: [ToolKind; 3] = [ToolKind::Hoe, ToolKind::Axe, ToolKind::WateringCan];

/// Where the held tool or seed lands: the player's centre plus the facing offset.
pub fn target_point(center: Vec2, facing: Facing) -> Vec2 {
    center + facing.tool_offset()
}

pub fn next_tool(tool: ToolKind) -> ToolKind {
    let idx = TOOL_ORDER.iter().position(|t| *t == tool).unwrap_or(0);
    TOOL_ORDER[(idx + 1) % TOOL_ORDER.len()]
}

/// Player hitbox in map space.
pub fn player_hitbox(center: Vec2) -> Rect {
    Rect::from_center_size(center, PLAYER_HITBOX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tools_cycle_and_wrap() {
        assert_eq!(next_tool(ToolKind::Hoe), ToolKind::Axe);
        assert_eq!(next_tool(ToolKind::Axe), ToolKind::WateringCan);
        assert_eq!(next_tool(ToolKind::WateringCan), ToolKind::Hoe);
    }

    #[test]
    fn target_point_uses_facing_offset() {
        let center = Vec2::new(100.0, 100.0);
        assert_eq!(target_point(center, Facing::Left), Vec2::new(50.0, 140.0));
        assert_eq!(target_point(center, Facing::Down), Vec2::new(100.0, 150.0));
        assert_eq!(target_point(center, Facing::Up), Vec2::new(100.0, 90.0));
    }

    #[test]
    fn actions_follow_settings() {
        let settings = GameSettings {
            tool_use_ms: 10,
            ..default()
        };
        let mut actions = PlayerActions::from_settings(&settings);
        actions.tool_use.activate();
        assert!(actions.tool_use.tick(std::time::Duration::from_millis(10)));
    }
}
