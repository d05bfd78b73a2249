//! Window size resource.
//!
//! Tracks the actual OS window dimensions in pixels, which may differ from
//! the game's internal render resolution. Updated each frame to handle
//! window resizing; the final blit uses it to letterbox the render target.

use bevy_ecs::prelude::Resource;
use raylib::prelude::*;

/// Current window size in pixels.
#[derive(Resource, Clone, Copy)]
pub struct WindowSize {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl WindowSize {
    /// Destination rectangle for letterboxed rendering.
    ///
    /// Given the game's render resolution, returns a rectangle that
    /// preserves the game's aspect ratio, fits within the window bounds and
    /// centers the content (letterbox/pillarbox as needed).
    pub fn calculate_letterbox(&self, game_width: u32, game_height: u32) -> Rectangle {
        let game_w = game_width as f32;
        let game_h = game_height as f32;
        let window_w = self.w as f32;
        let window_h = self.h as f32;

        let game_aspect = game_w / game_h;
        let window_aspect = window_w / window_h;

        if window_aspect > game_aspect {
            // Window is wider than game: pillarbox.
            let scale = window_h / game_h;
            let scaled_w = game_w * scale;
            Rectangle {
                x: (window_w - scaled_w) / 2.0,
                y: 0.0,
                width: scaled_w,
                height: window_h,
            }
        } else {
            // Window is taller than game: letterbox.
            let scale = window_w / game_w;
            let scaled_h = game_h * scale;
            Rectangle {
                x: 0.0,
                y: (window_h - scaled_h) / 2.0,
                width: window_w,
                height: scaled_h,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wider_window_pillarboxes() {
        let window = WindowSize { w: 2000, h: 720 };
        let dest = window.calculate_letterbox(640, 360);
        assert_eq!(dest.height, 720.0);
        assert_eq!(dest.width, 1280.0);
        assert_eq!(dest.x, 360.0);
        assert_eq!(dest.y, 0.0);
    }

    #[test]
    fn taller_window_letterboxes() {
        let window = WindowSize { w: 640, h: 1000 };
        let dest = window.calculate_letterbox(640, 360);
        assert_eq!(dest.width, 640.0);
        assert_eq!(dest.height, 360.0);
        assert_eq!(dest.y, 320.0);
    }
}
