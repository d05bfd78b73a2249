//! Phase transition event.
//!
//! [`PhaseChangeEvent`] is triggered whenever an entity's
//! [`Phase`](crate::components::phase::Phase) component transitions from one
//! state to another, e.g. a die entering `"dying"`. Observers can listen for
//! it to react to transitions without polling every machine.

use bevy_ecs::prelude::*;

/// Event emitted when an entity's phase changes.
///
/// Triggered by
/// [`phase_change_detector`](crate::systems::phase::phase_change_detector)
/// after the `on_exit` callback runs and before `on_enter` runs.
#[derive(Event, Debug, Clone)]
pub struct PhaseChangeEvent {
    /// The entity that transitioned to a new state.
    pub entity: Entity,
}
