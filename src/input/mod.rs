use bevy::input::InputSystem;
use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .add_systems(PreUpdate, reset_and_read_input.after(InputSystem));
    }
}

/// The single point where hardware input becomes game actions.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    game_state: Res<State<GameState>>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    match game_state.get() {
        GameState::Loading => {}

        GameState::Playing => {
            let mut axis = Vec2::ZERO;
            // Map space: y grows downward.
            if keys.pressed(KeyCode::ArrowUp) {
                axis.y -= 1.0;
            }
            if keys.pressed(KeyCode::ArrowDown) {
                axis.y += 1.0;
            }
            if keys.pressed(KeyCode::ArrowLeft) {
                axis.x -= 1.0;
            }
            if keys.pressed(KeyCode::ArrowRight) {
                axis.x += 1.0;
            }
            input.move_axis = axis.normalize_or_zero();

            input.tool_use = keys.pressed(KeyCode::Space);
            input.seed_use = keys.pressed(KeyCode::ControlLeft);
            input.tool_switch = keys.pressed(KeyCode::KeyQ);
            input.seed_switch = keys.pressed(KeyCode::KeyE);
            input.interact = keys.just_pressed(KeyCode::Enter);
        }

        GameState::Shop => {
            input.ui_up = keys.pressed(KeyCode::ArrowUp);
            input.ui_down = keys.pressed(KeyCode::ArrowDown);
            input.ui_left = keys.pressed(KeyCode::ArrowLeft);
            input.ui_right = keys.pressed(KeyCode::ArrowRight);
            input.ui_confirm = keys.pressed(KeyCode::Space);
            input.ui_cancel = keys.just_pressed(KeyCode::Escape);
            // The trader key closes the shop it opened.
            input.interact = keys.just_pressed(KeyCode::Enter);
        }
    }
}
