//! Event types and observers used by the game.
//!
//! This module groups the domain events exchanged across systems and the
//! corresponding observers that react to them. Events provide a decoupled
//! way for systems to communicate without direct dependencies.
//!
//! Submodules:
//! - [`audio`] – commands and messages for the background audio thread
//! - [`collision`] – collision notifications emitted by the interaction system
//! - [`gamestate`] – state transition notifications for the high-level flow
//! - [`input`] – logical input action events
//! - [`phase`] – per-entity state machine transition notifications
//! - [`switchdebug`] – toggle debug rendering and diagnostics on/off
//! - [`switchfullscreen`] – toggle fullscreen mode
//!
//! See each submodule for concrete event data, semantics and usage.

pub mod audio;
pub mod collision;
pub mod gamestate;
pub mod input;
pub mod phase;
pub mod switchdebug;
pub mod switchfullscreen;
