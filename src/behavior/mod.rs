//! Dice state behavior.
//!
//! The phase callbacks wired into every die's state machine. Player dice run
//! `neutral` / `dash` / `phase`; NPC dice run `wander`; both share the
//! terminal `dying` state and the living-state facing/knockback logic.
//!
//! Submodules:
//! - [`living`] – shared facing bucketing, animation keys, knockback decay
//! - [`player`] – neutral movement, dash and phase callbacks
//! - [`npc`] – wander/track callbacks for targets and enemies
//! - [`dying`] – the terminal death state
//!
//! Builder helpers at the bottom assemble the full [`Phase`] machine per
//! dice kind.

pub mod dying;
pub mod living;
pub mod npc;
pub mod player;

use crate::components::phase::Phase;

/// Phase label constants shared across behaviors.
pub const NEUTRAL: &str = "neutral";
pub const DASH: &str = "dash";
pub const PHASE: &str = "phase";
pub const WANDER: &str = "wander";
pub const DYING: &str = "dying";

/// State machine for the player die.
pub fn player_phase() -> Phase {
    Phase::new(NEUTRAL)
        .on_update(NEUTRAL, player::neutral_update)
        .on_enter(DASH, player::dash_enter)
        .on_update(DASH, player::dash_update)
        .on_enter(PHASE, player::phase_enter)
        .on_update(PHASE, player::phase_update)
        .on_exit(PHASE, player::phase_exit)
        .on_enter(DYING, dying::dying_enter)
        .on_update(DYING, dying::dying_update)
}

/// State machine for target and enemy dice.
pub fn npc_phase() -> Phase {
    Phase::new(WANDER)
        .on_enter(WANDER, npc::wander_enter)
        .on_update(WANDER, npc::wander_update)
        .on_enter(DYING, dying::dying_enter)
        .on_update(DYING, dying::dying_update)
}
