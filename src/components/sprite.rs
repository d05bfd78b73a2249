//! Sprite rendering component.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Sprite identified by a texture key, its size in world units and an offset
/// into the texture when it is a spritesheet. The animation system rewrites
/// `offset` each frame; `origin` is the pivot (in pixels, relative to the
/// frame's top-left) used for placement and scaling when rendering.
#[derive(Component, Clone, Debug)]
pub struct Sprite {
    pub tex_key: String,
    pub width: f32,
    pub height: f32,
    pub offset: Vector2,
    pub origin: Vector2,
    pub flip_h: bool,
    pub flip_v: bool,
}

impl Sprite {
    /// Sprite with a centered origin, the common case for dice and tiles.
    pub fn centered(tex_key: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            tex_key: tex_key.into(),
            width,
            height,
            offset: Vector2 { x: 0.0, y: 0.0 },
            origin: Vector2 {
                x: width * 0.5,
                y: height * 0.5,
            },
            flip_h: false,
            flip_v: false,
        }
    }
}
