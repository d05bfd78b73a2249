//! Input action events.
//!
//! [`InputEvent`] is triggered when gameplay-relevant input actions occur
//! (press or release). Systems can subscribe to these events to react to
//! input without directly reading the
//! [`InputState`](crate::resources::input::InputState) resource.

use bevy_ecs::prelude::*;

/// Logical input actions, abstracted from their physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Dash activation (default: Space).
    Dash,
    /// Phase activation (default: Left Shift).
    Phase,
    /// Back/quit (default: Escape).
    Back,
}

/// Event emitted when an input action is pressed or released.
#[derive(Event, Debug, Clone, Copy)]
pub struct InputEvent {
    /// The input action that triggered this event.
    pub action: InputAction,
    /// Whether the action was pressed (true) or released (false).
    pub pressed: bool,
}
