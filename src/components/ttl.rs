//! Time-to-live component for automatic entity despawning.
//!
//! Dash ghost entities carry a [`Ttl`]: the countdown doubles as their fade
//! curve (opacity follows the remaining fraction) and despawns them when it
//! runs out.

use bevy_ecs::prelude::Component;

/// Despawns the entity once the countdown reaches zero.
#[derive(Component, Clone, Copy, Debug)]
pub struct Ttl {
    /// Remaining time in seconds before despawn.
    pub remaining: f32,
    /// Initial duration, kept so fades can compute the remaining fraction.
    pub total: f32,
}

impl Ttl {
    pub fn new(seconds: f32) -> Self {
        Ttl {
            remaining: seconds,
            total: seconds,
        }
    }

    /// Remaining lifetime as a 0..=1 fraction.
    pub fn fraction(&self) -> f32 {
        if self.total <= 0.0 {
            0.0
        } else {
            (self.remaining / self.total).clamp(0.0, 1.0)
        }
    }
}
