//! Color tint component for rendering sprites.
//!
//! Replaces `Color::WHITE` in sprite draw calls. The render system also
//! multiplies in the die's opacity, which carries the hit flicker and the
//! ghost trail fade.

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

/// Color modulation applied when drawing the entity's sprite.
#[derive(Component, Clone, Debug, Copy)]
pub struct Tint {
    pub color: Color,
}

impl Tint {
    /// Create a new Tint with the specified RGBA values.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            color: Color::new(r, g, b, a),
        }
    }

    /// This tint with its alpha scaled by `opacity` (0..=1).
    pub fn with_opacity(&self, opacity: f32) -> Color {
        let a = (self.color.a as f32 * opacity.clamp(0.0, 1.0)) as u8;
        Color::new(self.color.r, self.color.g, self.color.b, a)
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_white() {
        let t = Tint::default();
        assert_eq!(t.color.r, 255);
        assert_eq!(t.color.a, 255);
    }

    #[test]
    fn with_opacity_scales_alpha_only() {
        let t = Tint::new(100, 150, 200, 200);
        let c = t.with_opacity(0.5);
        assert_eq!(c.r, 100);
        assert_eq!(c.g, 150);
        assert_eq!(c.b, 200);
        assert_eq!(c.a, 100);
    }

    #[test]
    fn with_opacity_clamps() {
        let t = Tint::default();
        assert_eq!(t.with_opacity(2.0).a, 255);
        assert_eq!(t.with_opacity(-1.0).a, 0);
    }
}
