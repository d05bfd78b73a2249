//! Game configuration change detection system.
//!
//! Monitors [`GameConfig`] for changes and applies settings to the window,
//! render target and screen size resources.

use crate::events::switchfullscreen::SwitchFullScreenEvent;
use crate::resources::fullscreen::FullScreen;
use crate::resources::gameconfig::GameConfig;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use bevy_ecs::prelude::*;
use log::{error, info};
use raylib::ffi;

/// System that applies game configuration changes.
///
/// Detects when [`GameConfig`] is added or modified and applies render
/// size, fullscreen, vsync and FPS settings to the running game.
pub fn apply_gameconfig_changes(
    maybe_config: Option<Res<GameConfig>>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut render_target: NonSendMut<RenderTarget>,
    mut screen_size: ResMut<ScreenSize>,
    fullscreen: Option<Res<FullScreen>>,
    mut commands: Commands,
) {
    let Some(config) = maybe_config else {
        return;
    };

    if config.is_changed() || config.is_added() {
        // Apply render size if different from current.
        if render_target.game_width != config.render_width
            || render_target.game_height != config.render_height
        {
            info!(
                "Resizing render target: {}x{} -> {}x{}",
                render_target.game_width,
                render_target.game_height,
                config.render_width,
                config.render_height
            );
            if let Err(e) =
                render_target.recreate(&mut rl, &th, config.render_width, config.render_height)
            {
                error!("Failed to resize render target: {}", e);
            } else {
                screen_size.w = config.render_width as i32;
                screen_size.h = config.render_height as i32;
            }
        }

        // Synchronize fullscreen state between config and window.
        let is_fullscreen = fullscreen.is_some();
        if config.fullscreen != is_fullscreen {
            info!(
                "Fullscreen mismatch: config={}, window={} - triggering toggle",
                config.fullscreen, is_fullscreen
            );
            commands.trigger(SwitchFullScreenEvent {});
        }

        // Apply vsync setting.
        unsafe {
            if config.vsync {
                ffi::SetWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
            } else {
                ffi::ClearWindowState(ffi::ConfigFlags::FLAG_VSYNC_HINT as u32);
            }
        }

        rl.set_target_fps(config.target_fps);

        info!("GameConfig changes applied.");
    }
}
