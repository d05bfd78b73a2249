//! TTL (time-to-live) system.
//!
//! Decrements TTL timers and despawns entities when their time runs out.
//! Entities that also carry a [`Tint`] fade with the remaining fraction,
//! which is how dash ghosts dissolve.

use bevy_ecs::prelude::*;

use crate::components::tint::Tint;
use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

/// Decrement TTLs, fade tinted entities, despawn at zero.
pub fn ttl_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Ttl, Option<&mut Tint>)>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (entity, mut ttl, tint) in query.iter_mut() {
        ttl.remaining -= dt;
        if ttl.remaining <= 0.0 {
            commands.entity(entity).try_despawn();
            continue;
        }
        if let Some(mut tint) = tint {
            let alpha = (255.0 * ttl.fraction()) as u8;
            tint.color.a = alpha;
        }
    }
}
