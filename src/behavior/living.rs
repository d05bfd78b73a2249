//! Shared living-state logic: facing, animation keys, knockback decay.

use crate::components::animation::Animation;
use crate::components::dice::{Dice, DiceKind};
use crate::components::direction::Direction;
use crate::components::rigidbody::RigidBody;

/// Deceleration applied per second while dash or knockback velocity decays
/// back toward base speed.
pub const DECEL_PER_SECOND: f32 = 600.0;

/// Animation key for a die's walk cycle at its current face and facing.
pub fn walk_key(kind: DiceKind, health: u32, direction: Direction) -> String {
    // A dead face has no walk cycle; clamp to face one for the last frames
    // before the dying animation takes over.
    format!(
        "{}_{}_{}",
        kind.as_str(),
        health.max(1),
        direction.octant_label()
    )
}

/// Animation key for a die's one-shot death animation.
pub fn death_key(kind: DiceKind) -> String {
    format!("{}_death", kind.as_str())
}

/// Recompute the discrete facing from the current velocity and switch the
/// walk animation when the bucket (or face) changed.
///
/// Zero velocity keeps the previous facing, and [`Animation::play`] is a
/// no-op for an unchanged key, so a die running in a straight line never
/// restarts its cycle.
pub fn refresh_facing(dice: &mut Dice, body: &RigidBody, animation: &mut Animation) {
    let bucket = Direction::from_velocity(body.velocity, dice.direction);
    dice.direction = bucket;
    animation.play(walk_key(dice.kind, dice.health, bucket));
}

/// Knockback short-circuit: while the flag is set, decay velocity toward
/// base speed instead of running the normal state logic.
///
/// Returns true when the caller must skip its normal update this frame.
pub fn knockback_update(dice: &mut Dice, body: &mut RigidBody, dt: f32) -> bool {
    if !dice.knockback {
        return false;
    }
    if body.decay_toward_speed(dice.speed, DECEL_PER_SECOND * dt) {
        dice.knockback = false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::Vector2;

    #[test]
    fn walk_key_tracks_face_and_octant() {
        assert_eq!(
            walk_key(DiceKind::Enemy, 3, Direction::UpLeft),
            "enemy_3_upleft"
        );
        // Health zero clamps to face one.
        assert_eq!(walk_key(DiceKind::Target, 0, Direction::Down), "target_1_down");
    }

    #[test]
    fn refresh_facing_keeps_direction_when_stopped() {
        let mut dice = Dice::new(DiceKind::Player, 6, 100.0);
        dice.direction = Direction::Left;
        let body = RigidBody::new_dynamic();
        let mut animation = Animation::new(walk_key(DiceKind::Player, 6, Direction::Left));
        refresh_facing(&mut dice, &body, &mut animation);
        assert_eq!(dice.direction, Direction::Left);
        assert_eq!(animation.key, "player_6_left");
    }

    #[test]
    fn knockback_update_clears_flag_on_convergence() {
        let mut dice = Dice::new(DiceKind::Enemy, 3, 80.0);
        dice.knockback = true;
        let mut body = RigidBody::new_dynamic();
        body.velocity = Vector2 { x: -200.0, y: 0.0 };

        let mut ticks = 0;
        while dice.knockback {
            assert!(knockback_update(&mut dice, &mut body, 1.0 / 60.0));
            ticks += 1;
            assert!(ticks < 120, "knockback must converge");
        }
        assert!(body.velocity.x.abs() <= 80.0);
        // Once cleared, normal updates resume.
        assert!(!knockback_update(&mut dice, &mut body, 1.0 / 60.0));
    }
}
