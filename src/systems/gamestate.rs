//! Game state systems.
//!
//! [`check_pending_state`] triggers the transition observer when a next
//! state has been requested; [`state_is_playing`] is the run condition that
//! gates the simulation systems to the Playing state.

use crate::events::gamestate::GameStateChangedEvent;
use crate::resources::gamestate::{GameState, GameStates, NextGameState, NextGameStates};
use bevy_ecs::prelude::*;

/// Trigger the state-change observer when a transition is pending.
pub fn check_pending_state(mut commands: Commands, next_state: ResMut<NextGameState>) {
    if let NextGameStates::Pending(_new_state) = next_state.get() {
        commands.trigger(GameStateChangedEvent {});
    }
}

/// Run condition: the game is in the Playing state.
pub fn state_is_playing(state: Res<GameState>) -> bool {
    matches!(state.get(), GameStates::Playing)
}
