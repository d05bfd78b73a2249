//! Axis-aligned box collider component.
//!
//! A collider is a size plus an offset relative to the entity's
//! [`MapPosition`](super::mapposition::MapPosition). The collision systems
//! ask it for the world-space [`Rect`] at the entity's current position.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

use crate::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector2,
    pub offset: Vector2,
}

impl BoxCollider {
    /// Create a BoxCollider with the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vector2 {
                x: width,
                y: height,
            },
            offset: Vector2 { x: 0.0, y: 0.0 },
        }
    }

    /// Builder: set the offset from the entity position.
    pub fn with_offset(mut self, offset: Vector2) -> Self {
        self.offset = offset;
        self
    }

    /// World-space rectangle of this collider for a given entity position.
    pub fn world_rect(&self, position: Vector2) -> Rect {
        Rect {
            x: position.x + self.offset.x,
            y: position.y + self.offset.y,
            width: self.size.x,
            height: self.size.y,
        }
    }

    /// AABB overlap test against another collider at another position.
    pub fn overlaps(&self, position: Vector2, other: &Self, other_position: Vector2) -> bool {
        self.world_rect(position)
            .intersects(&other.world_rect(other_position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_rect_applies_offset() {
        let collider = BoxCollider::new(10.0, 20.0).with_offset(Vector2 { x: -5.0, y: -10.0 });
        let rect = collider.world_rect(Vector2 { x: 100.0, y: 100.0 });
        assert_eq!(rect.left(), 95.0);
        assert_eq!(rect.top(), 90.0);
        assert_eq!(rect.right(), 105.0);
        assert_eq!(rect.bottom(), 110.0);
    }

    #[test]
    fn overlaps_matches_rect_intersection() {
        let a = BoxCollider::new(10.0, 10.0);
        let b = BoxCollider::new(10.0, 10.0);
        let origin = Vector2 { x: 0.0, y: 0.0 };
        assert!(a.overlaps(origin, &b, Vector2 { x: 8.0, y: 0.0 }));
        // Touching edges do not overlap.
        assert!(!a.overlaps(origin, &b, Vector2 { x: 10.0, y: 0.0 }));
    }
}
