//! Game systems.
//!
//! This module groups all ECS systems that advance the simulation, input
//! and rendering. The per-frame ordering lives in `main.rs`; the simulation
//! half runs as: prune dead dice, pairwise interaction, state machine tick,
//! static tile resolution, movement integration.
//!
//! Submodules overview
//! - [`animation`] – advance sprite animations, detect one-shot completion
//! - [`audio`] – bridge with the audio thread (poll/forward message queues)
//! - [`gameconfig`] – apply configuration changes to window and render target
//! - [`gamestate`] – check for pending state transitions and trigger events
//! - [`group`] – publish entity counts for tracked groups
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`interaction`] – pairwise dice collision resolution and combat
//! - [`lifecycle`] – death pruning and post-hit invulnerability flicker
//! - [`movement`] – integrate positions from rigid body velocities and time
//! - [`phase`] – per-entity state machine transitions and updates
//! - [`render`] – draw world, HUD and debug overlays using Raylib
//! - [`tilecollision`] – push dynamic bodies out of static tile colliders
//! - [`time`] – update simulation time and delta
//! - [`ttl`] – fade and despawn short-lived entities (dash ghosts)

pub mod animation;
pub mod audio;
pub mod gameconfig;
pub mod gamestate;
pub mod group;
pub mod input;
pub mod interaction;
pub mod lifecycle;
pub mod movement;
pub mod phase;
pub mod render;
pub mod tilecollision;
pub mod time;
pub mod ttl;
