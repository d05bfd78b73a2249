//! Animation resource registry.
//!
//! A minimal store for animation definitions reused by multiple entities.
//! The animation system looks definitions up by string key and drives
//! playback from the immutable parameters stored here. Dice walk cycles are
//! registered per kind, face and octant at setup; death animations are the
//! non-looping entries.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Vector2;
use rustc_hash::FxHashMap;

/// Central registry of reusable animation definitions keyed by string IDs.
#[derive(Resource, Default)]
pub struct AnimationStore {
    animations: FxHashMap<String, AnimationResource>,
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, animation: AnimationResource) {
        self.animations.insert(key.into(), animation);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&AnimationResource> {
        self.animations.get(key.as_ref())
    }

    pub fn clear(&mut self) {
        self.animations.clear();
    }
}

/// Immutable data describing a sprite-sheet animation.
///
/// `position` anchors the first frame inside the sheet; each subsequent
/// frame advances by `displacement` pixels on the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationResource {
    /// Texture key in [`crate::resources::texturestore::TextureStore`].
    pub tex_key: String,
    /// Pixel position of the first frame in the sheet.
    pub position: Vector2,
    /// Per-frame displacement on the x axis, in pixels.
    pub displacement: f32,
    /// Number of frames in the animation.
    pub frame_count: usize,
    /// Frames per second playback speed.
    pub fps: f32,
    /// Whether the animation restarts after the last frame.
    pub looped: bool,
}
