//! Font store resource.
//!
//! A non-send resource that stores loaded fonts keyed by string IDs. Fonts
//! are loaded during setup and used by the HUD (health pips, target count,
//! win/lose banners).
//!
//! Note: non-send because raylib fonts must be accessed from the main
//! thread only.

use raylib::prelude::Font;
use rustc_hash::FxHashMap;

/// Map of font keys to loaded fonts.
///
/// Use `NonSend<FontStore>` in system parameters.
pub struct FontStore {
    fonts: FxHashMap<String, Font>,
}

impl FontStore {
    /// Create an empty font store.
    pub fn new() -> Self {
        Self {
            fonts: FxHashMap::default(),
        }
    }

    /// Add a font with the given key.
    pub fn add(&mut self, id: impl Into<String>, font: Font) {
        self.fonts.insert(id.into(), font);
    }

    /// Get a font by its key.
    pub fn get(&self, id: impl AsRef<str>) -> Option<&Font> {
        self.fonts.get(id.as_ref())
    }
}

impl Default for FontStore {
    fn default() -> Self {
        Self::new()
    }
}
