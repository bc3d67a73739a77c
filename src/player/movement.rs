use bevy::prelude::*;
use crate::shared::*;
use super::{player_hitbox, PlayerActions, PlayerMovement};

/// Core movement system — reads the movement axis, applies velocity,
/// updates facing direction, and checks collisions.
///
/// Movement is resolved in map space (y down) and written back to the
/// world-space `Transform`. The player stands still while a tool swing
/// winds up.
pub fn player_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    settings: Res<GameSettings>,
    actions: Res<PlayerActions>,
    colliders: Query<&Collider, Without<Player>>,
    mut query: Query<(&mut Transform, &mut PlayerMovement), With<Player>>,
) {
    let Ok((mut transform, mut movement)) = query.get_single_mut() else {
        return;
    };

    let dir = input.move_axis;

    if actions.tool_use.is_active() || dir == Vec2::ZERO {
        return;
    }

    movement.facing = facing_from_axis(dir, movement.facing);

    let delta = dir.normalize_or_zero() * settings.player_speed * time.delta_secs();
    let position = world_to_map(transform.translation);

    // Axis-separated collision so the player can slide along obstacles.
    let solids: Vec<Rect> = colliders.iter().map(|c| c.hitbox).collect();
    let next = resolve_movement(position, delta, &solids);

    let z = transform.translation.z;
    transform.translation = map_to_world(next, z);
}

/// Facing for a map-space movement direction. Diagonals face vertically.
pub fn facing_from_axis(dir: Vec2, current: Facing) -> Facing {
    if dir == Vec2::ZERO {
        return current;
    }
    if dir.y.abs() >= dir.x.abs() {
        if dir.y < 0.0 { Facing::Up } else { Facing::Down }
    } else if dir.x > 0.0 {
        Facing::Right
    } else {
        Facing::Left
    }
}

/// Move `position` by `delta`, one axis at a time, refusing any step whose
/// hitbox would overlap a solid rect.
pub fn resolve_movement(position: Vec2, delta: Vec2, solids: &[Rect]) -> Vec2 {
    let mut next = position;

    let candidate = Vec2::new(next.x + delta.x, next.y);
    if !is_blocked(candidate, solids) {
        next = candidate;
    }

    let candidate = Vec2::new(next.x, next.y + delta.y);
    if !is_blocked(candidate, solids) {
        next = candidate;
    }

    next
}

fn is_blocked(center: Vec2, solids: &[Rect]) -> bool {
    let hitbox = player_hitbox(center);
    solids.iter().any(|solid| !solid.intersect(hitbox).is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_prefers_vertical_facing() {
        assert_eq!(facing_from_axis(Vec2::new(1.0, -1.0), Facing::Down), Facing::Up);
        assert_eq!(facing_from_axis(Vec2::new(-1.0, 0.0), Facing::Down), Facing::Left);
        assert_eq!(facing_from_axis(Vec2::ZERO, Facing::Right), Facing::Right);
    }

    #[test]
    fn free_movement_applies_delta() {
        let next = resolve_movement(Vec2::new(100.0, 100.0), Vec2::new(5.0, -3.0), &[]);
        assert_eq!(next, Vec2::new(105.0, 97.0));
    }

    #[test]
    fn blocked_axis_slides_along_obstacle() {
        // A wall directly to the right of the player.
        let wall = Rect::new(140.0, 0.0, 200.0, 400.0);
        let start = Vec2::new(100.0, 100.0);
        let next = resolve_movement(start, Vec2::new(10.0, 10.0), &[wall]);
        assert_eq!(next.x, start.x, "x step into the wall is refused");
        assert_eq!(next.y, 110.0, "y step still applies");
    }
}
