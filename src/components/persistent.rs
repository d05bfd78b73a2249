//! Persistent entity marker component.
//!
//! Entities with the [`Persistent`] component survive the roster wipe that
//! happens on game-state transitions (observers, registered systems).

use bevy_ecs::prelude::Component;

/// Tag component for entities that must not be despawned on scene cleanup.
#[derive(Component, Clone, Debug)]
pub struct Persistent;
