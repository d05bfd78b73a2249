//! Wander/track bookkeeping for NPC dice.
//!
//! Targets and enemies share the same brain: wander on a timer, redirect
//! away from walls seen by the vision rectangle, and react to spotting the
//! player. Whether the reaction is fleeing or chasing depends on the die's
//! [`DiceKind`](super::dice::DiceKind), handled by the wander behavior.

use bevy_ecs::prelude::Component;

use crate::components::direction::Direction;

/// AI state for a wandering die.
#[derive(Component, Clone, Debug)]
pub struct NpcBrain {
    /// Seconds until the next random direction pick.
    pub wander_timer: f32,
    /// Interval between random direction picks.
    pub wander_period: f32,
    /// Cooldown before another wall-forced redirect may occur.
    pub redirect_cooldown: f32,
    /// Direction chosen this frame, applied as velocity by the behavior.
    pub desired_direction: Direction,
    /// True while the vision rect intersects the player.
    pub sees_player: bool,
    /// Direction from this die toward the player, valid while
    /// `sees_player` is set. Enemies chase it, targets flee it.
    pub player_direction: Direction,
    /// How far the vision rectangle extends, in world units.
    pub vision_range: f32,
    /// Speed multiplier applied while an enemy is tracking the player.
    pub chase_boost: f32,
}

impl NpcBrain {
    pub fn new(wander_period: f32, vision_range: f32, chase_boost: f32) -> Self {
        Self {
            wander_timer: 0.0,
            wander_period,
            redirect_cooldown: 0.0,
            desired_direction: Direction::Down,
            sees_player: false,
            player_direction: Direction::Idle,
            vision_range,
            chase_boost,
        }
    }

    /// True when a wall redirect is currently allowed.
    pub fn can_redirect(&self) -> bool {
        self.redirect_cooldown <= 0.0
    }
}
