//! Phase state machine systems.
//!
//! This module provides systems for processing [`Phase`] components:
//!
//! - [`phase_change_detector`] – runs the initial state's enter hook once,
//!   detects pending transitions, runs `on_exit`/`on_enter` callbacks,
//!   emits [`PhaseChangeEvent`], and updates time tracking
//! - [`phase_update_system`] – runs `on_update` callbacks each frame and
//!   applies the transition requests they return
//!
//! # System Ordering
//!
//! These systems should run in order:
//! 1. `phase_change_detector` – process pending transitions from last frame
//! 2. `phase_update_system` – run per-frame logic, collect new requests
//!
//! A transition to an unregistered state label is a wiring error and panics
//! with a descriptive message rather than leaving the entity stuck.
//!
//! # Related
//!
//! - [`Phase`](crate::components::phase::Phase) – the state machine component
//! - [`PhaseChangeEvent`] – event emitted on transitions
//! - [`crate::behavior`] – the dice state callbacks

use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;

use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::dice::Dice;
use crate::components::mapposition::MapPosition;
use crate::components::npc::NpcBrain;
use crate::components::phase::{Phase, PhaseCallback, PhaseContext};
use crate::components::playerability::PlayerAbility;
use crate::components::rigidbody::RigidBody;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::events::audio::AudioCmd;
use crate::events::phase::PhaseChangeEvent;
use crate::resources::input::InputState;
use crate::resources::tilecolliders::TileColliders;
use crate::resources::worldtime::WorldTime;

/// Bundled system parameters for phase callback execution.
///
/// This [`SystemParam`] aggregates the queries and resources needed to
/// construct a [`PhaseContext`] for callback invocation.
#[derive(SystemParam)]
pub struct PhaseRunnerContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub dices: Query<'w, 's, &'static mut Dice>,
    pub positions: Query<'w, 's, &'static mut MapPosition>,
    pub rigid_bodies: Query<'w, 's, &'static mut RigidBody>,
    pub box_colliders: Query<'w, 's, &'static BoxCollider>,
    pub npcs: Query<'w, 's, &'static mut NpcBrain>,
    pub abilities: Query<'w, 's, &'static mut PlayerAbility>,
    pub animations: Query<'w, 's, &'static mut Animation>,
    pub sprites: Query<'w, 's, &'static Sprite>,
    pub scales: Query<'w, 's, &'static Scale>,
    pub input: Res<'w, InputState>,
    pub tile_colliders: Res<'w, TileColliders>,
    pub world_time: Res<'w, WorldTime>,
    pub audio_cmds: MessageWriter<'w, AudioCmd>,
}

macro_rules! phase_ctx {
    ($context:expr) => {
        &mut PhaseContext {
            commands: &mut $context.commands,
            dices: &mut $context.dices,
            positions: &mut $context.positions,
            rigid_bodies: &mut $context.rigid_bodies,
            box_colliders: &$context.box_colliders,
            npcs: &mut $context.npcs,
            abilities: &mut $context.abilities,
            animations: &mut $context.animations,
            sprites: &$context.sprites,
            scales: &$context.scales,
            input: &$context.input,
            tile_colliders: &$context.tile_colliders,
            world_time: &$context.world_time,
            audio_cmds: &mut $context.audio_cmds,
        }
    };
}

/// Detect and process phase transitions.
///
/// This system iterates over all entities with a [`Phase`] component and:
///
/// 1. If the machine was just created: runs the initial state's `on_enter`
///    exactly once (spawn counts as the transition into the first state)
/// 2. If `phase.next` is set:
///    - Swaps `current` with `next`, storing the old state in `previous`
///    - Runs the `on_exit` callback for the old state
///    - Emits a [`PhaseChangeEvent`]
///    - Runs the `on_enter` callback for the new state
///    - Resets `time_in_phase` to 0.0
/// 3. Otherwise, increments `time_in_phase` by the frame delta
///
/// # System Ordering
///
/// Should run **before** [`phase_update_system`] each frame.
pub fn phase_change_detector(
    mut query: Query<(Entity, &mut Phase)>,
    time: Res<WorldTime>,
    mut context: PhaseRunnerContext,
) {
    // Collected first to avoid holding the query borrow during callbacks.
    let mut initial_enters: Vec<(Entity, Option<PhaseCallback>)> = Vec::new();
    let mut transitions: Vec<(
        Entity,
        String,
        f32,
        Option<PhaseCallback>,
        Option<PhaseCallback>,
    )> = Vec::new();

    for (entity, mut phase) in query.iter_mut() {
        if phase.pending_initial_enter {
            phase.pending_initial_enter = false;
            let on_enter = phase.on_enter.get(&phase.current).copied();
            initial_enters.push((entity, on_enter));
            continue;
        }

        if let Some(next_phase) = phase.next.take() {
            let previous_phase = std::mem::replace(&mut phase.current, next_phase.clone());
            phase.previous = Some(previous_phase.clone());
            let old_time_in_phase = phase.time_in_phase;
            phase.time_in_phase = 0.0;

            let on_exit: Option<PhaseCallback> = phase.on_exit.get(&previous_phase).copied();
            let on_enter: Option<PhaseCallback> = phase.on_enter.get(&next_phase).copied();

            transitions.push((entity, previous_phase, old_time_in_phase, on_exit, on_enter));
        } else {
            phase.time_in_phase += time.delta;
        }
    }

    for (entity, on_enter) in initial_enters {
        context.commands.trigger(PhaseChangeEvent { entity });
        if let Some(callback) = on_enter {
            callback(entity, 0.0, None, phase_ctx!(context));
        }
    }

    for (entity, previous_phase, old_time_in_phase, on_exit, on_enter) in transitions {
        if let Some(callback) = on_exit {
            callback(
                entity,
                old_time_in_phase,
                Some(previous_phase.clone()),
                phase_ctx!(context),
            );
        }
        context.commands.trigger(PhaseChangeEvent { entity });
        if let Some(callback) = on_enter {
            callback(entity, 0.0, Some(previous_phase.clone()), phase_ctx!(context));
        }
    }
}

/// Run per-frame `on_update` callbacks for entities in their current phase.
///
/// For each entity with a [`Phase`] component, this system:
///
/// 1. Looks up the `on_update` callback registered for the current state
/// 2. Invokes it with the entity, `time_in_phase` and the `previous` state
/// 3. If the callback returns `Some(next_phase)`, queues the transition
///    through [`Phase::transition_to`]; an unregistered label panics with
///    the underlying [`PhaseError`](crate::components::phase::PhaseError)
///
/// Queued transitions are applied by [`phase_change_detector`] on the next
/// frame.
///
/// # System Ordering
///
/// Should run **after** [`phase_change_detector`] each frame.
pub fn phase_update_system(
    mut query: Query<(Entity, &mut Phase)>,
    mut context: PhaseRunnerContext,
) {
    let mut phase_changes: Vec<(Entity, String)> = Vec::new();

    for (entity, phase) in query.iter() {
        if phase.pending_initial_enter {
            // Enter has not run yet; first update comes next frame.
            continue;
        }
        if let Some(callback) = phase.on_update.get(&phase.current) {
            if let Some(next) = callback(
                entity,
                phase.time_in_phase,
                phase.previous.clone(),
                phase_ctx!(context),
            ) {
                phase_changes.push((entity, next));
            }
        }
    }

    for (entity, next) in phase_changes {
        if let Ok((_, mut phase)) = query.get_mut(entity) {
            phase
                .transition_to(next)
                .unwrap_or_else(|err| panic!("{err} (entity {entity:?})"));
        }
    }
}
