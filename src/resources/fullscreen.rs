//! Full screen marker resource.
//!
//! The presence of this resource indicates that the application is running
//! in full screen mode. The fullscreen observer inserts and removes it.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the application runs in full screen mode.
#[derive(Resource, Clone, Copy)]
pub struct FullScreen {}
