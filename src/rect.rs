//! Floating-point axis-aligned rectangle.
//!
//! [`Rect`] is the geometry primitive shared by colliders, tile resolution
//! and vision casting. It is plain data: position of the top-left corner plus
//! a non-negative size, mutated in place by the collision systems.

use raylib::prelude::Vector2;
use thiserror::Error;

/// Errors produced when constructing a [`Rect`].
#[derive(Debug, Error, PartialEq)]
pub enum RectError {
    /// Width or height was negative.
    #[error("rectangle size must be non-negative, got {width}x{height}")]
    NegativeSize { width: f32, height: f32 },
}

/// Axis-aligned rectangle in world units.
///
/// `x`/`y` are the left/top edge. Width and height are guaranteed
/// non-negative when built through [`Rect::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a rectangle, failing on negative dimensions.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Result<Self, RectError> {
        if width < 0.0 || height < 0.0 {
            return Err(RectError::NegativeSize { width, height });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
        })
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vector2 {
        Vector2 {
            x: self.x + self.width * 0.5,
            y: self.y + self.height * 0.5,
        }
    }

    /// Open-interval overlap test: touching edges do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Shift the rectangle in place.
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_negative_size() {
        assert_eq!(
            Rect::new(0.0, 0.0, -1.0, 5.0),
            Err(RectError::NegativeSize {
                width: -1.0,
                height: 5.0
            })
        );
        assert_eq!(
            Rect::new(0.0, 0.0, 5.0, -0.5),
            Err(RectError::NegativeSize {
                width: 5.0,
                height: -0.5
            })
        );
        assert!(Rect::new(0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn accessors() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0).unwrap();
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.bottom(), 60.0);
        let c = r.center();
        assert_eq!(c.x, 25.0);
        assert_eq!(c.y, 40.0);
    }

    #[test]
    fn intersection_is_symmetric() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let b = Rect::new(5.0, 5.0, 10.0, 10.0).unwrap();
        let c = Rect::new(50.0, 50.0, 3.0, 3.0).unwrap();
        assert_eq!(a.intersects(&b), b.intersects(&a));
        assert_eq!(a.intersects(&c), c.intersects(&a));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let b = Rect::new(10.0, 0.0, 10.0, 10.0).unwrap();
        let c = Rect::new(0.0, 10.0, 10.0, 10.0).unwrap();
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn translate_moves_in_place() {
        let mut r = Rect::new(1.0, 2.0, 3.0, 4.0).unwrap();
        r.translate(-1.0, 3.0);
        assert_eq!(r.x, 0.0);
        assert_eq!(r.y, 5.0);
        assert_eq!(r.width, 3.0);
    }
}
