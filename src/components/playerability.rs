//! Dash and phase ability state for the player die.

use bevy_ecs::prelude::Component;

/// Capability flags and timers for the player's two abilities.
///
/// Dash: velocity burst that decays back to base speed per axis, trailed by
/// fading ghost entities. Phase: a short invulnerability window followed by
/// a cooldown during which the ability cannot be reused.
#[derive(Component, Clone, Debug)]
pub struct PlayerAbility {
    pub can_dash: bool,
    pub can_phase: bool,

    /// Velocity multiplier applied on dash activation.
    pub dash_power: f32,
    /// Deceleration applied per second while dash velocity decays.
    pub dash_decel: f32,
    /// Seconds between ghost spawns while dashing.
    pub ghost_interval: f32,
    /// Lifetime of one ghost entity.
    pub ghost_ttl: f32,
    /// True while dash velocity still exceeds base speed.
    pub dashing: bool,
    /// Seconds until the next ghost spawn.
    pub ghost_timer: f32,
    /// Seconds until the last spawned ghost has fully faded.
    pub ghost_fade_left: f32,

    /// Length of the phase invulnerability window in seconds.
    pub phase_duration: f32,
    /// Cooldown after phasing before the ability can be reused.
    pub phase_cooldown: f32,
    /// True while incoming contact damage and push-out are ignored.
    pub phasing: bool,
}

impl PlayerAbility {
    pub fn new() -> Self {
        Self {
            can_dash: true,
            can_phase: true,
            dash_power: 3.0,
            dash_decel: 600.0,
            ghost_interval: 0.04,
            ghost_ttl: 0.3,
            dashing: false,
            ghost_timer: 0.0,
            ghost_fade_left: 0.0,
            phase_duration: 0.35,
            phase_cooldown: 1.25,
            phasing: false,
        }
    }
}

impl Default for PlayerAbility {
    fn default() -> Self {
        Self::new()
    }
}
