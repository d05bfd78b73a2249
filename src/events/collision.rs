//! Collision event emitted by the dice interaction system.
//!
//! Whenever a dice pair physically resolves, the interaction system fires a
//! [`CollisionEvent`] carrying both entities and the contact normal as seen
//! from entity `a`. Combat consequences (life loss, knockback, direction
//! reversal) are applied inline by the interaction system itself; observers
//! of this event are for decoupled reactions such as diagnostics.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use log::debug;
use raylib::prelude::Vector2;

/// Event fired when two dice bodies physically collide.
///
/// `normal` is the unit axis normal recorded on `a`; `b` received the
/// opposite normal.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
    pub normal: Vector2,
}

/// Observer that logs resolved collisions for diagnostics.
pub fn collision_log_observer(trigger: On<CollisionEvent>) {
    let event = trigger.event();
    debug!(
        "collision resolved: {:?} vs {:?}, normal ({}, {})",
        event.a, event.b, event.normal.x, event.normal.y
    );
}
