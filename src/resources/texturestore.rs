//! Texture store resource.
//!
//! Non-send registry of loaded textures keyed by string IDs. Textures are
//! loaded during setup (dice sheets, the tileset) and referenced by key from
//! [`Sprite`](crate::components::sprite::Sprite) components.

use raylib::prelude::Texture2D;
use rustc_hash::FxHashMap;

/// Map of texture keys to loaded textures.
///
/// Non-send resource: raylib textures must stay on the main thread.
pub struct TextureStore {
    textures: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    pub fn new() -> Self {
        Self {
            textures: FxHashMap::default(),
        }
    }

    pub fn add(&mut self, key: impl Into<String>, texture: Texture2D) {
        self.textures.insert(key.into(), texture);
    }

    pub fn get(&self, key: impl AsRef<str>) -> Option<&Texture2D> {
        self.textures.get(key.as_ref())
    }

    pub fn clear(&mut self) {
        self.textures.clear();
    }
}

impl Default for TextureStore {
    fn default() -> Self {
        Self::new()
    }
}
