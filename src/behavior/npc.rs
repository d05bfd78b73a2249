//! NPC dice behavior: timer-based wandering with wall avoidance and the
//! chase/flee reaction to spotting the player.

use bevy_ecs::prelude::*;

use crate::behavior::living;
use crate::components::dice::DiceKind;
use crate::components::direction::Direction;
use crate::components::phase::PhaseContext;

/// Cooldown after a wall-forced redirect before the next one may happen.
const REDIRECT_COOLDOWN: f32 = 0.4;

/// Wander enter: pick an initial direction and start moving.
pub fn wander_enter(
    entity: Entity,
    _time: f32,
    _previous: Option<String>,
    ctx: &mut PhaseContext,
) -> Option<String> {
    let mut brain = ctx
        .npcs
        .get_mut(entity)
        .expect("wander state requires an NpcBrain");
    brain.desired_direction = random_compass();
    brain.wander_timer = brain.wander_period;
    None
}

/// Wander update.
///
/// Order per frame: knockback short-circuit, wander timer, wall-vision
/// redirect, player reaction, then velocity from the chosen direction.
pub fn wander_update(
    entity: Entity,
    _time: f32,
    _previous: Option<String>,
    ctx: &mut PhaseContext,
) -> Option<String> {
    let dt = ctx.world_time.delta;

    {
        let mut dice = ctx
            .dices
            .get_mut(entity)
            .expect("wander state requires its owning dice entity");
        let mut body = ctx
            .rigid_bodies
            .get_mut(entity)
            .expect("NPC dice must have a rigid body");
        if living::knockback_update(&mut dice, &mut body, dt) {
            return None;
        }
    }

    let (kind, speed) = {
        let dice = ctx
            .dices
            .get(entity)
            .expect("wander state requires its owning dice entity");
        (dice.kind, dice.speed)
    };
    let world_rect = {
        let position = ctx
            .positions
            .get(entity)
            .expect("NPC dice must have a position");
        let collider = ctx
            .box_colliders
            .get(entity)
            .expect("NPC dice must have a collider");
        collider.world_rect(position.pos)
    };

    {
        let mut brain = ctx
            .npcs
            .get_mut(entity)
            .expect("wander state requires an NpcBrain");

        brain.redirect_cooldown = (brain.redirect_cooldown - dt).max(0.0);

        // Periodic re-roll, never keeping the current direction.
        brain.wander_timer -= dt;
        if brain.wander_timer <= 0.0 {
            brain.wander_timer = brain.wander_period;
            brain.desired_direction = random_compass_excluding(&[brain.desired_direction]);
        }

        // Walking into a wall? Redirect away from it, with a short cooldown
        // so one corner does not re-roll the direction every frame.
        if brain.can_redirect() {
            if let Some(vision) = brain
                .desired_direction
                .vision_rect(&world_rect, brain.vision_range)
            {
                if ctx.tile_colliders.any_intersecting(&vision) {
                    brain.desired_direction =
                        random_compass_excluding(brain.desired_direction.wall_excluded());
                    brain.redirect_cooldown = REDIRECT_COOLDOWN;
                }
            }
        }

        // Seeing the player overrides wandering: enemies chase, targets flee.
        if brain.sees_player && brain.player_direction != Direction::Idle {
            brain.desired_direction = match kind {
                DiceKind::Enemy => brain.player_direction,
                _ => brain.player_direction.opposite(),
            };
        }

        let boost = if kind == DiceKind::Enemy && brain.sees_player {
            brain.chase_boost
        } else {
            1.0
        };
        let unit = brain.desired_direction.unit_vector();
        let mut body = ctx
            .rigid_bodies
            .get_mut(entity)
            .expect("NPC dice must have a rigid body");
        body.velocity.x = unit.x * speed * boost;
        body.velocity.y = unit.y * speed * boost;
    }

    {
        let mut dice = ctx
            .dices
            .get_mut(entity)
            .expect("wander state requires its owning dice entity");
        let body = ctx
            .rigid_bodies
            .get(entity)
            .expect("NPC dice must have a rigid body");
        let mut animation = ctx
            .animations
            .get_mut(entity)
            .expect("NPC dice must have an animation");
        living::refresh_facing(&mut dice, body, &mut animation);
    }

    None
}

/// Uniformly random compass direction.
fn random_compass() -> Direction {
    Direction::COMPASS[fastrand::usize(..Direction::COMPASS.len())]
}

/// Uniformly random compass direction outside the excluded set.
fn random_compass_excluding(excluded: &[Direction]) -> Direction {
    let allowed: Vec<Direction> = Direction::COMPASS
        .into_iter()
        .filter(|d| !excluded.contains(d))
        .collect();
    allowed[fastrand::usize(..allowed.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_pick_respects_exclusions() {
        for _ in 0..64 {
            let picked = random_compass_excluding(Direction::Right.wall_excluded());
            assert!(!Direction::Right.wall_excluded().contains(&picked));
        }
    }

    #[test]
    fn random_pick_differs_from_current() {
        for _ in 0..64 {
            let picked = random_compass_excluding(&[Direction::Up]);
            assert_ne!(picked, Direction::Up);
        }
    }
}
