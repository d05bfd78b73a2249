//! Group tag component.
//!
//! Groups name rosters of entities ("player", "targets", "enemies",
//! "tiles"). The group counting system publishes per-group entity counts
//! that the game flow reads for its win/lose checks.

use bevy_ecs::prelude::Component;

/// Named group an entity belongs to.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Group(String);

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}
