//! Static tile collision resolution.
//!
//! For every dynamic body the system builds a fresh manifold against the
//! tile colliders near it and pushes the body out of each intersecting tile
//! along the axis of least overlap (minimum translation vector). The
//! correction is positional only; velocities are untouched, so a body can
//! keep sliding along a wall. The push-out is not exact for simultaneous
//! multi-tile penetration but is idempotent per tile and converges because
//! it runs again every frame.

use bevy_ecs::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::mapposition::MapPosition;
use crate::components::rigidbody::RigidBody;
use crate::rect::Rect;
use crate::resources::tilecolliders::TileColliders;

/// How far beyond the body's own rect to query for tiles.
const QUERY_MARGIN: f32 = 4.0;

/// Push `body_rect` out of `tile` along the axis with the smaller overlap.
///
/// Returns the applied correction `(dx, dy)`; zero when the rects do not
/// intersect.
pub fn resolve_against_tile(body_rect: &mut Rect, tile: &Rect) -> (f32, f32) {
    if !body_rect.intersects(tile) {
        return (0.0, 0.0);
    }

    // Four directed overlaps: how far the body would have to move in each
    // direction to clear the tile.
    let push_left = body_rect.right() - tile.left();
    let push_right = tile.right() - body_rect.left();
    let push_up = body_rect.bottom() - tile.top();
    let push_down = tile.bottom() - body_rect.top();

    let min_x = push_left.min(push_right);
    let min_y = push_up.min(push_down);

    let (dx, dy) = if min_x < min_y {
        if push_left < push_right {
            (-push_left, 0.0)
        } else {
            (push_right, 0.0)
        }
    } else if push_up < push_down {
        (0.0, -push_up)
    } else {
        (0.0, push_down)
    };

    body_rect.translate(dx, dy);
    (dx, dy)
}

/// Resolve every dynamic body against the static tile collider set.
pub fn tile_collision(
    mut query: Query<(&mut MapPosition, &RigidBody, &BoxCollider)>,
    tile_colliders: Res<TileColliders>,
) {
    for (mut position, body, collider) in query.iter_mut() {
        if !body.dynamic || body.frozen {
            continue;
        }

        let mut rect = collider.world_rect(position.pos);
        let query_area = Rect {
            x: rect.x - QUERY_MARGIN,
            y: rect.y - QUERY_MARGIN,
            width: rect.width + QUERY_MARGIN * 2.0,
            height: rect.height + QUERY_MARGIN * 2.0,
        };

        let mut total = (0.0f32, 0.0f32);
        for tile in tile_colliders.nearby(&query_area) {
            let (dx, dy) = resolve_against_tile(&mut rect, tile);
            total.0 += dx;
            total.1 += dy;
        }

        if total != (0.0, 0.0) {
            position.pos.x += total.0;
            position.pos.y += total.1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shallow_horizontal_overlap_pushes_on_x() {
        // Body overlaps the tile's left edge by 2 units.
        let mut body = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let tile = Rect::new(8.0, 0.0, 16.0, 16.0).unwrap();
        let (dx, dy) = resolve_against_tile(&mut body, &tile);
        assert_eq!((dx, dy), (-2.0, 0.0));
        assert_eq!(body.right(), 8.0);
    }

    #[test]
    fn shallow_vertical_overlap_pushes_on_y() {
        // Body overlaps the tile's bottom edge by 3 units.
        let mut body = Rect::new(0.0, 13.0, 10.0, 10.0).unwrap();
        let tile = Rect::new(0.0, 0.0, 16.0, 16.0).unwrap();
        let (dx, dy) = resolve_against_tile(&mut body, &tile);
        assert_eq!((dx, dy), (0.0, 3.0));
        assert_eq!(body.top(), 16.0);
    }

    #[test]
    fn resolution_is_idempotent() {
        let mut body = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let tile = Rect::new(8.0, 0.0, 16.0, 16.0).unwrap();
        resolve_against_tile(&mut body, &tile);
        // Second pass finds no intersection and applies no correction.
        let (dx, dy) = resolve_against_tile(&mut body, &tile);
        assert_eq!((dx, dy), (0.0, 0.0));
    }

    #[test]
    fn touching_rects_are_untouched() {
        let mut body = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let tile = Rect::new(10.0, 0.0, 16.0, 16.0).unwrap();
        let before = body;
        let (dx, dy) = resolve_against_tile(&mut body, &tile);
        assert_eq!((dx, dy), (0.0, 0.0));
        assert_eq!(body, before);
    }
}
