//! Debug toggle resource.
//!
//! The mere presence of this resource enables the debug overlay (collider
//! boxes, NPC vision rectangles) and extra diagnostics. Remove it to
//! disable debug behavior.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, systems may draw overlays or log extra.
#[derive(Resource, Clone, Copy)]
pub struct DebugMode {}
