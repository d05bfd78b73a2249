//! Dice Arena library.
//!
//! Exposes the game's ECS components, resources, systems, events and dice
//! behavior for use in integration tests and as a reusable library.

pub mod behavior;
pub mod components;
pub mod events;
pub mod game;
pub mod rect;
pub mod resources;
pub mod systems;
