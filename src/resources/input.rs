//! Per-frame keyboard input resource.
//!
//! Captures the subset of keyboard state the game cares about and exposes it
//! to systems and phase callbacks via the [`InputState`] resource. Defaults
//! use WASD for movement (arrow keys as the secondary binding), space for
//! dash and left shift for phase.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

/// Boolean key state with an associated keyboard binding.
#[derive(Debug, Clone, Copy)]
pub struct BoolState {
    /// Whether the key is currently held this frame.
    pub active: bool,
    /// Whether the key was pressed this frame.
    pub just_pressed: bool,
    /// Whether the key was released this frame.
    pub just_released: bool,
    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl BoolState {
    fn bound(key: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            just_released: false,
            key_binding: key,
        }
    }
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL)
    }
}

/// Resource capturing the per-frame keyboard state relevant to gameplay.
///
/// Directional fields come in a primary (WASD) and secondary (arrows)
/// binding; the movement helpers OR the two together.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub maindirection_up: BoolState,
    pub maindirection_down: BoolState,
    pub maindirection_left: BoolState,
    pub maindirection_right: BoolState,
    pub secondarydirection_up: BoolState,
    pub secondarydirection_down: BoolState,
    pub secondarydirection_left: BoolState,
    pub secondarydirection_right: BoolState,
    /// Dash activation.
    pub action_dash: BoolState,
    /// Phase activation.
    pub action_phase: BoolState,
    /// Back/quit.
    pub action_back: BoolState,
    /// Debug overlay toggle.
    pub mode_debug: BoolState,
    /// Fullscreen toggle.
    pub fullscreen_toggle: BoolState,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_up: BoolState::bound(KeyboardKey::KEY_W),
            maindirection_down: BoolState::bound(KeyboardKey::KEY_S),
            maindirection_left: BoolState::bound(KeyboardKey::KEY_A),
            maindirection_right: BoolState::bound(KeyboardKey::KEY_D),
            secondarydirection_up: BoolState::bound(KeyboardKey::KEY_UP),
            secondarydirection_down: BoolState::bound(KeyboardKey::KEY_DOWN),
            secondarydirection_left: BoolState::bound(KeyboardKey::KEY_LEFT),
            secondarydirection_right: BoolState::bound(KeyboardKey::KEY_RIGHT),
            action_dash: BoolState::bound(KeyboardKey::KEY_SPACE),
            action_phase: BoolState::bound(KeyboardKey::KEY_LEFT_SHIFT),
            action_back: BoolState::bound(KeyboardKey::KEY_ESCAPE),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F1),
            fullscreen_toggle: BoolState::bound(KeyboardKey::KEY_F11),
        }
    }
}

impl InputState {
    pub fn up(&self) -> bool {
        self.maindirection_up.active || self.secondarydirection_up.active
    }

    pub fn down(&self) -> bool {
        self.maindirection_down.active || self.secondarydirection_down.active
    }

    pub fn left(&self) -> bool {
        self.maindirection_left.active || self.secondarydirection_left.active
    }

    pub fn right(&self) -> bool {
        self.maindirection_right.active || self.secondarydirection_right.active
    }

    /// Any movement key pressed this frame; cancels a dash early.
    pub fn any_direction_just_pressed(&self) -> bool {
        self.maindirection_up.just_pressed
            || self.maindirection_down.just_pressed
            || self.maindirection_left.just_pressed
            || self.maindirection_right.just_pressed
            || self.secondarydirection_up.just_pressed
            || self.secondarydirection_down.just_pressed
            || self.secondarydirection_left.just_pressed
            || self.secondarydirection_right.just_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_inactive() {
        let input = InputState::default();
        assert!(!input.up() && !input.down() && !input.left() && !input.right());
        assert!(!input.action_dash.active);
        assert!(!input.action_phase.active);
        assert!(!input.any_direction_just_pressed());
    }

    #[test]
    fn default_key_bindings() {
        let input = InputState::default();
        assert_eq!(input.maindirection_up.key_binding, KeyboardKey::KEY_W);
        assert_eq!(input.action_dash.key_binding, KeyboardKey::KEY_SPACE);
        assert_eq!(input.action_phase.key_binding, KeyboardKey::KEY_LEFT_SHIFT);
        assert_eq!(input.mode_debug.key_binding, KeyboardKey::KEY_F1);
    }

    #[test]
    fn secondary_binding_feeds_direction_helpers() {
        let mut input = InputState::default();
        input.secondarydirection_left.active = true;
        assert!(input.left());
        input.maindirection_right.active = true;
        assert!(input.right());
    }
}
