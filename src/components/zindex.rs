//! Z-index component for render ordering.
//!
//! Tiles draw below dice, dice below ghosts' trailing copies of themselves,
//! and the HUD above everything. Higher values are drawn later (on top).

use bevy_ecs::prelude::Component;

/// Rendering order hint for 2D drawing.
///
/// Higher values are drawn later (on top). The renderer sorts by `ZIndex`
/// to achieve a painter's algorithm.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ZIndex(pub i32);
