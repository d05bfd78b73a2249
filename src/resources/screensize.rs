//! Screen size resource.
//!
//! Stores the game's internal render resolution in pixels. Render culling
//! and HUD layout read this; it only changes when the configuration does.

use bevy_ecs::prelude::Resource;

/// Current render resolution in pixels.
#[derive(Resource, Clone, Copy)]
pub struct ScreenSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}
