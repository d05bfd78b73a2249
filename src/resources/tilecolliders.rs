//! Static tile collider set.
//!
//! The tilemap's collision layer is baked into this resource at scene
//! setup: one world-space [`Rect`] per solid tile. The physics systems and
//! the NPC vision checks query it through [`TileColliders::nearby`], the
//! static geometry seam. Callers never see the tilemap itself.

use bevy_ecs::prelude::Resource;

use crate::rect::Rect;

/// All static collider rectangles of the current scene.
#[derive(Resource, Debug, Default)]
pub struct TileColliders {
    rects: Vec<Rect>,
}

impl TileColliders {
    pub fn new(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    /// Colliders intersecting `area`. An empty result is the normal case,
    /// not an error.
    pub fn nearby(&self, area: &Rect) -> impl Iterator<Item = &Rect> {
        self.rects.iter().filter(move |r| r.intersects(area))
    }

    /// True if any collider intersects `area`.
    pub fn any_intersecting(&self, area: &Rect) -> bool {
        self.rects.iter().any(|r| r.intersects(area))
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Replace the collider set (scene transition).
    pub fn reset(&mut self, rects: Vec<Rect>) {
        self.rects = rects;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(x: f32, y: f32) -> Rect {
        Rect::new(x, y, 16.0, 16.0).unwrap()
    }

    #[test]
    fn nearby_filters_by_intersection() {
        let colliders = TileColliders::new(vec![tile(0.0, 0.0), tile(16.0, 0.0), tile(160.0, 0.0)]);
        let area = Rect::new(8.0, 4.0, 16.0, 8.0).unwrap();
        let hits: Vec<_> = colliders.nearby(&area).collect();
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn empty_query_is_not_an_error() {
        let colliders = TileColliders::default();
        let area = Rect::new(0.0, 0.0, 100.0, 100.0).unwrap();
        assert_eq!(colliders.nearby(&area).count(), 0);
        assert!(!colliders.any_intersecting(&area));
    }
}
