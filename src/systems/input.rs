//! Input systems.
//!
//! [`update_input_state`] reads hardware input from Raylib each frame and
//! writes the results into [`crate::resources::input::InputState`]. Input
//! events are emitted for dash/phase/back presses, and the debug and
//! fullscreen toggles fire their own events.

use bevy_ecs::prelude::*;

use crate::events::input::{InputAction, InputEvent};
use crate::events::switchdebug::SwitchDebugEvent;
use crate::events::switchfullscreen::SwitchFullScreenEvent;
use crate::resources::input::{BoolState, InputState};

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSendMut<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let refresh = |state: &mut BoolState| {
        state.active = rl.is_key_down(state.key_binding);
        state.just_pressed = rl.is_key_pressed(state.key_binding);
        state.just_released = rl.is_key_released(state.key_binding);
    };

    refresh(&mut input.maindirection_up);
    refresh(&mut input.maindirection_down);
    refresh(&mut input.maindirection_left);
    refresh(&mut input.maindirection_right);
    refresh(&mut input.secondarydirection_up);
    refresh(&mut input.secondarydirection_down);
    refresh(&mut input.secondarydirection_left);
    refresh(&mut input.secondarydirection_right);
    refresh(&mut input.action_dash);
    refresh(&mut input.action_phase);
    refresh(&mut input.action_back);
    refresh(&mut input.mode_debug);
    refresh(&mut input.fullscreen_toggle);

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
    if input.fullscreen_toggle.just_pressed {
        commands.trigger(SwitchFullScreenEvent {});
    }

    let mut action_event = |action: InputAction, state: &BoolState| {
        if state.just_pressed {
            commands.trigger(InputEvent {
                action,
                pressed: true,
            });
        }
        if state.just_released {
            commands.trigger(InputEvent {
                action,
                pressed: false,
            });
        }
    };
    action_event(InputAction::Dash, &input.action_dash);
    action_event(InputAction::Phase, &input.action_phase);
    action_event(InputAction::Back, &input.action_back);
}
