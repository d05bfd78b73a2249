//! State machine component for controlling entity behavior.
//!
//! The [`Phase`] component is a finite state machine where each state is
//! identified by a string label such as `"neutral"`, `"dash"` or `"dying"`.
//! States must be registered up front; transitioning to an unregistered
//! label is an error, never a silent no-op.
//!
//! # Architecture
//!
//! - **States are string labels** registered through the builder methods
//! - **Three callback types per state:**
//!   - `on_enter` – called once when entering a state
//!   - `on_update` – called every frame while in the state
//!   - `on_exit` – called once when leaving a state
//! - **Transition requests** – [`Phase::transition_to`] validates the label
//!   and stores it in `next`; the phase systems apply it
//! - **Time tracking** – `time_in_phase` counts seconds in the current state
//!
//! The first registered state becomes current; its `on_enter` runs exactly
//! once, on the first detector pass after the entity spawns.
//!
//! # Related
//!
//! - [`crate::systems::phase`] – systems that process transitions and callbacks
//! - [`crate::behavior`] – the callbacks wired into dice phases

use bevy_ecs::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use thiserror::Error;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::dice::Dice;
use crate::components::mapposition::MapPosition;
use crate::components::npc::NpcBrain;
use crate::components::playerability::PlayerAbility;
use crate::components::rigidbody::RigidBody;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::events::audio::AudioCmd;
use crate::resources::input::InputState;
use crate::resources::tilecolliders::TileColliders;
use crate::resources::worldtime::WorldTime;

/// Errors produced by phase transitions.
#[derive(Debug, Error, PartialEq)]
pub enum PhaseError {
    /// The requested state label was never registered on this machine.
    #[error("phase \"{name}\" is not registered on this state machine")]
    UnknownState { name: String },
}

/// Context passed to phase callbacks, bundling the queries and resources the
/// dice behaviors read and mutate.
pub struct PhaseContext<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub dices: &'a mut Query<'w, 's, &'static mut Dice>,
    pub positions: &'a mut Query<'w, 's, &'static mut MapPosition>,
    pub rigid_bodies: &'a mut Query<'w, 's, &'static mut RigidBody>,
    pub box_colliders: &'a Query<'w, 's, &'static BoxCollider>,
    pub npcs: &'a mut Query<'w, 's, &'static mut NpcBrain>,
    pub abilities: &'a mut Query<'w, 's, &'static mut PlayerAbility>,
    pub animations: &'a mut Query<'w, 's, &'static mut Animation>,
    pub sprites: &'a Query<'w, 's, &'static Sprite>,
    pub scales: &'a Query<'w, 's, &'static Scale>,
    pub input: &'a InputState,
    pub tile_colliders: &'a TileColliders,
    pub world_time: &'a WorldTime,
    pub audio_cmds: &'a mut MessageWriter<'w, AudioCmd>,
}

/// Function pointer type for phase callbacks.
///
/// # Parameters
///
/// - `Entity` – the entity whose phase is being processed
/// - `time: f32` – seconds spent in the current phase (0.0 for `on_enter`)
/// - `previous: Option<String>` – the phase the entity was in before, if any
/// - `ctx: &mut PhaseContext` – access to ECS queries and resources
///
/// # Returns
///
/// - `Some(next_phase)` – request a transition (only honored from `on_update`)
/// - `None` – remain in the current phase
pub type PhaseCallback = for<'a, 'w, 's> fn(
    Entity,
    time: f32,
    previous: Option<String>,
    ctx: &mut PhaseContext<'a, 'w, 's>,
) -> Option<String>;

/// Finite state machine component.
#[derive(Component, Clone)]
pub struct Phase {
    /// The active state label.
    pub current: String,
    /// The state before the last transition, if any.
    pub previous: Option<String>,
    /// Validated pending transition. Cleared after processing.
    pub next: Option<String>,
    /// Seconds elapsed since entering the current state.
    pub time_in_phase: f32,
    /// True until the initial state's `on_enter` has run.
    pub pending_initial_enter: bool,
    states: FxHashSet<String>,
    pub on_enter: FxHashMap<String, PhaseCallback>,
    pub on_update: FxHashMap<String, PhaseCallback>,
    pub on_exit: FxHashMap<String, PhaseCallback>,
}

impl Phase {
    /// Create a machine with `initial` as its first registered and current
    /// state. Its `on_enter` hook runs on the first detector pass.
    pub fn new(initial: impl Into<String>) -> Self {
        let initial = initial.into();
        let mut states = FxHashSet::default();
        states.insert(initial.clone());
        Self {
            current: initial,
            previous: None,
            next: None,
            time_in_phase: 0.0,
            pending_initial_enter: true,
            states,
            on_enter: FxHashMap::default(),
            on_update: FxHashMap::default(),
            on_exit: FxHashMap::default(),
        }
    }

    /// Register a state with no callbacks (builder pattern).
    pub fn state(mut self, name: impl Into<String>) -> Self {
        self.states.insert(name.into());
        self
    }

    /// Register an `on_enter` callback; registers the state as well.
    pub fn on_enter(mut self, state: impl Into<String>, callback: PhaseCallback) -> Self {
        let state = state.into();
        self.states.insert(state.clone());
        self.on_enter.insert(state, callback);
        self
    }

    /// Register an `on_update` callback; registers the state as well.
    pub fn on_update(mut self, state: impl Into<String>, callback: PhaseCallback) -> Self {
        let state = state.into();
        self.states.insert(state.clone());
        self.on_update.insert(state, callback);
        self
    }

    /// Register an `on_exit` callback; registers the state as well.
    pub fn on_exit(mut self, state: impl Into<String>, callback: PhaseCallback) -> Self {
        let state = state.into();
        self.states.insert(state.clone());
        self.on_exit.insert(state, callback);
        self
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.states.contains(name)
    }

    /// Request a transition to another registered state.
    ///
    /// Fails with [`PhaseError::UnknownState`] for labels that were never
    /// registered, leaving the machine untouched.
    pub fn transition_to(&mut self, next: impl Into<String>) -> Result<(), PhaseError> {
        let next = next.into();
        if !self.states.contains(&next) {
            return Err(PhaseError::UnknownState { name: next });
        }
        self.next = Some(next);
        Ok(())
    }
}

impl fmt::Debug for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Phase")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("next", &self.next)
            .field("time_in_phase", &self.time_in_phase)
            .field("states", &self.states.iter().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(
        _entity: Entity,
        _time: f32,
        _previous: Option<String>,
        _ctx: &mut PhaseContext,
    ) -> Option<String> {
        None
    }

    #[test]
    fn first_state_becomes_current() {
        let phase = Phase::new("neutral").state("dash");
        assert_eq!(phase.current, "neutral");
        assert!(phase.pending_initial_enter);
        assert!(phase.is_registered("dash"));
    }

    #[test]
    fn transition_to_registered_state_is_queued() {
        let mut phase = Phase::new("neutral").state("dying");
        assert!(phase.transition_to("dying").is_ok());
        assert_eq!(phase.next.as_deref(), Some("dying"));
        // Current only changes when the detector system applies it.
        assert_eq!(phase.current, "neutral");
    }

    #[test]
    fn transition_to_unregistered_state_fails() {
        let mut phase = Phase::new("neutral");
        let err = phase.transition_to("flying").unwrap_err();
        assert_eq!(
            err,
            PhaseError::UnknownState {
                name: "flying".into()
            }
        );
        assert!(phase.next.is_none());
    }

    #[test]
    fn callback_builders_register_their_state() {
        let phase = Phase::new("neutral").on_update("wander", noop);
        assert!(phase.is_registered("wander"));
        assert!(phase.on_update.contains_key("wander"));
    }
}
