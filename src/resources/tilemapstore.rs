//! Tilemap storage and data types.
//!
//! Serializable structs for Tilesetter-style JSON tile map data and a store
//! for loaded maps. The layer named `"collision"` is special: its tile
//! placements are baked into the
//! [`TileColliders`](super::tilecolliders::TileColliders) resource at scene
//! setup, while the remaining layers are spawned as sprite entities.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::rect::Rect;

/// Layer name whose tiles become static colliders.
pub const COLLISION_LAYER: &str = "collision";

/// Single tile placement within a layer.
#[derive(Debug, Deserialize, Serialize)]
pub struct Tileposition {
    /// X coordinate in tiles.
    pub x: u32,
    /// Y coordinate in tiles.
    pub y: u32,
    /// Tile identifier (tileset-local).
    pub id: u32,
}

/// A named tile layer containing positions.
#[derive(Debug, Deserialize, Serialize)]
pub struct Tilelayer {
    pub name: String,
    pub positions: Vec<Tileposition>,
}

/// Tilemap metadata and layers.
#[derive(Debug, Deserialize, Serialize)]
pub struct Tilemap {
    /// Size of a tile in pixels.
    pub tile_size: u32,
    /// Map width in tiles.
    pub map_width: u32,
    /// Map height in tiles.
    pub map_height: u32,
    pub layers: Vec<Tilelayer>,
}

impl Tilemap {
    /// World-space collider rectangles from the collision layer, one per
    /// solid tile. Empty when the map has no collision layer.
    pub fn collision_rects(&self) -> Vec<Rect> {
        let tile = self.tile_size as f32;
        self.layers
            .iter()
            .filter(|layer| layer.name == COLLISION_LAYER)
            .flat_map(|layer| layer.positions.iter())
            .map(|pos| Rect {
                x: pos.x as f32 * tile,
                y: pos.y as f32 * tile,
                width: tile,
                height: tile,
            })
            .collect()
    }
}

/// Registry of loaded tilemaps by key.
#[derive(Resource, Debug, Default)]
pub struct TilemapStore {
    pub map: FxHashMap<String, Tilemap>,
}

impl TilemapStore {
    /// Create an empty store.
    pub fn new() -> Self {
        TilemapStore {
            map: FxHashMap::default(),
        }
    }

    /// Get a tilemap by its key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&Tilemap> {
        self.map.get(key.as_ref())
    }

    /// Insert a tilemap with a specific key.
    pub fn insert(&mut self, key: impl Into<String>, tilemap: Tilemap) {
        self.map.insert(key.into(), tilemap);
    }

    /// Clear all loaded tilemaps.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collision_rects_come_from_the_collision_layer_only() {
        let map = Tilemap {
            tile_size: 16,
            map_width: 4,
            map_height: 4,
            layers: vec![
                Tilelayer {
                    name: "floor".into(),
                    positions: vec![Tileposition { x: 0, y: 0, id: 1 }],
                },
                Tilelayer {
                    name: COLLISION_LAYER.into(),
                    positions: vec![
                        Tileposition { x: 1, y: 2, id: 7 },
                        Tileposition { x: 3, y: 0, id: 7 },
                    ],
                },
            ],
        };
        let rects = map.collision_rects();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].x, 16.0);
        assert_eq!(rects[0].y, 32.0);
        assert_eq!(rects[0].width, 16.0);
    }

    #[test]
    fn tilemap_json_round_trip() {
        let json = r#"{
            "tile_size": 16,
            "map_width": 2,
            "map_height": 2,
            "layers": [
                { "name": "collision", "positions": [ { "x": 0, "y": 1, "id": 3 } ] }
            ]
        }"#;
        let map: Tilemap = serde_json::from_str(json).unwrap();
        assert_eq!(map.tile_size, 16);
        assert_eq!(map.collision_rects().len(), 1);
    }
}
