//! Dice lifecycle systems: death pruning and post-hit invulnerability.
//!
//! Pruning runs first in the frame: dice flagged dead are despawned, which
//! also removes their rigid body and collider from simulation. The iframe
//! system counts down the invulnerability window armed by a survivable hit,
//! alternating the die's opacity every frame for the flicker effect.

use bevy_ecs::prelude::*;
use log::debug;

use crate::components::dice::Dice;
use crate::resources::worldtime::WorldTime;

/// Opacity shown on the dark half of the hit flicker.
const FLICKER_LOW_OPACITY: f32 = 0.35;

/// Despawn every die whose death animation has completed.
///
/// Runs before the pairwise interaction pass so a die that finished dying
/// last frame takes no further part in the simulation.
pub fn prune_dead_dice(query: Query<(Entity, &Dice)>, mut commands: Commands) {
    for (entity, dice) in query.iter() {
        if dice.is_dead {
            debug!("pruning dead {} die {:?}", dice.kind.as_str(), entity);
            commands.entity(entity).try_despawn();
        }
    }
}

/// Count down iframe windows and drive the opacity flicker.
pub fn update_iframes(mut query: Query<&mut Dice>, time: Res<WorldTime>) {
    for mut dice in query.iter_mut() {
        if !dice.losing_life || dice.is_dying {
            continue;
        }
        dice.iframe_timer -= time.delta;
        if dice.iframe_timer <= 0.0 {
            dice.losing_life = false;
            dice.iframe_timer = 0.0;
            dice.opacity = 1.0;
        } else {
            // Alternate every frame while invulnerable.
            dice.opacity = if time.frame_count % 2 == 0 {
                FLICKER_LOW_OPACITY
            } else {
                1.0
            };
        }
    }
}
