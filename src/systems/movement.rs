//! Movement integration system.
//!
//! Integrates [`MapPosition`](crate::components::mapposition::MapPosition)
//! from [`RigidBody`](crate::components::rigidbody::RigidBody) velocities
//! and the frame delta. Static and frozen bodies never move, regardless of
//! their stored velocity.

use bevy_ecs::prelude::*;

use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::resources::worldtime::WorldTime;

/// Integrate each dynamic, unfrozen body's position by velocity x delta.
pub fn movement(mut query: Query<(&mut MapPosition, &RigidBody)>, time: Res<WorldTime>) {
    for (mut position, body) in query.iter_mut() {
        if !body.dynamic || body.frozen {
            continue;
        }
        position.pos.x += body.velocity.x * time.delta;
        position.pos.y += body.velocity.y * time.delta;
    }
}
