//! Render systems.
//!
//! The render pass draws the world into the fixed-resolution render target
//! (camera-culled, z-sorted sprites with tint and opacity modulation), then
//! scales the target to the window with letterboxing. The HUD (health pips,
//! targets left, win/lose banners) draws on top at render resolution. With
//! [`DebugMode`](crate::resources::debugmode::DebugMode) present, collider
//! boxes and NPC vision rectangles are overlaid.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::boxcollider::BoxCollider;
use crate::components::dice::{Dice, DiceKind};
use crate::components::mapposition::MapPosition;
use crate::components::npc::NpcBrain;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::resources::camera2d::Camera2DRes;
use crate::resources::debugmode::DebugMode;
use crate::resources::fontstore::FontStore;
use crate::resources::gamestate::{GameState, GameStates};
use crate::resources::group::TrackedGroups;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use crate::resources::texturestore::TextureStore;
use crate::resources::windowsize::WindowSize;

/// Camera-follow system: the view tracks the player die.
pub fn camera_follow(mut camera: Option<ResMut<Camera2DRes>>, query: Query<(&Dice, &MapPosition)>) {
    let Some(camera) = camera.as_deref_mut() else {
        return;
    };
    for (dice, position) in query.iter() {
        if dice.kind == DiceKind::Player {
            camera.0.target = position.pos;
        }
    }
}

/// Exclusive render system: draws the whole frame.
///
/// Temporarily removes the raylib handles and render target from the world
/// so drawing scopes can borrow them while ECS queries run against the
/// remaining world.
pub fn render_system(world: &mut World) {
    let Some(mut rl) = world.remove_non_send_resource::<raylib::RaylibHandle>() else {
        return;
    };
    let thread = world
        .remove_non_send_resource::<raylib::RaylibThread>()
        .expect("RaylibThread must be registered");
    let mut target = world
        .remove_non_send_resource::<RenderTarget>()
        .expect("RenderTarget must be registered");

    {
        let mut d = rl.begin_drawing(&thread);

        {
            let mut dt = d.begin_texture_mode(&thread, &mut target.texture);
            dt.clear_background(Color::new(24, 26, 34, 255));

            let camera = world.resource::<Camera2DRes>().0;
            let screen = *world.resource::<ScreenSize>();
            {
                let mut d2 = dt.begin_mode2D(camera);
                render_pass(world, &mut d2, &camera, screen);
            }
            render_hud(world, &mut dt, screen);
        }

        d.clear_background(Color::BLACK);
        let window = *world.resource::<WindowSize>();
        let dest = window.calculate_letterbox(target.game_width, target.game_height);
        d.draw_texture_pro(
            target.texture.texture(),
            target.source_rect(),
            dest,
            Vector2::zero(),
            0.0,
            Color::WHITE,
        );
    }

    world.insert_non_send_resource(target);
    world.insert_non_send_resource(thread);
    world.insert_non_send_resource(rl);
}

/// World-space sprite pass with camera culling and painter's sort.
fn render_pass<D: RaylibDraw>(
    world: &mut World,
    d2: &mut D,
    camera: &Camera2D,
    screen: ScreenSize,
) {
    // Visible world rectangle from the camera transform.
    let inv_zoom = if camera.zoom != 0.0 {
        1.0 / camera.zoom
    } else {
        1.0
    };
    let view_min = Vector2 {
        x: camera.target.x - camera.offset.x * inv_zoom,
        y: camera.target.y - camera.offset.y * inv_zoom,
    };
    let view_max = Vector2 {
        x: view_min.x + screen.w as f32 * inv_zoom,
        y: view_min.y + screen.h as f32 * inv_zoom,
    };

    let mut to_draw: Vec<(Sprite, MapPosition, ZIndex, Color)> = {
        let mut query =
            world.query::<(&Sprite, &MapPosition, &ZIndex, Option<&Dice>, Option<&Tint>)>();
        query
            .iter(world)
            .filter_map(|(sprite, position, z, dice, tint)| {
                let min = Vector2 {
                    x: position.pos.x - sprite.origin.x,
                    y: position.pos.y - sprite.origin.y,
                };
                let max = Vector2 {
                    x: min.x + sprite.width,
                    y: min.y + sprite.height,
                };
                let visible = !(max.x < view_min.x
                    || min.x > view_max.x
                    || max.y < view_min.y
                    || min.y > view_max.y);
                if !visible {
                    return None;
                }
                let opacity = dice.map(|d| d.opacity).unwrap_or(1.0);
                let color = tint.copied().unwrap_or_default().with_opacity(opacity);
                Some((sprite.clone(), *position, *z, color))
            })
            .collect()
    };

    to_draw.sort_by_key(|(_, _, z, _)| *z);

    let textures = world.non_send_resource::<TextureStore>();
    for (sprite, position, _z, color) in to_draw.iter() {
        let Some(texture) = textures.get(&sprite.tex_key) else {
            continue;
        };
        let mut src = Rectangle {
            x: sprite.offset.x,
            y: sprite.offset.y,
            width: sprite.width,
            height: sprite.height,
        };
        if sprite.flip_h {
            src.width = -src.width;
        }
        if sprite.flip_v {
            src.height = -src.height;
        }
        let dest = Rectangle {
            x: position.pos.x,
            y: position.pos.y,
            width: sprite.width,
            height: sprite.height,
        };
        d2.draw_texture_pro(texture, src, dest, sprite.origin, 0.0, *color);
    }

    if world.contains_resource::<DebugMode>() {
        let mut colliders = world.query::<(&BoxCollider, &MapPosition)>();
        for (collider, position) in colliders.iter(world) {
            let rect = collider.world_rect(position.pos);
            d2.draw_rectangle_lines(
                rect.x as i32,
                rect.y as i32,
                rect.width as i32,
                rect.height as i32,
                Color::RED,
            );
        }
        let mut npcs = world.query::<(&Dice, &NpcBrain, &BoxCollider, &MapPosition)>();
        for (dice, brain, collider, position) in npcs.iter(world) {
            let body = collider.world_rect(position.pos);
            if let Some(vision) = dice.direction.vision_rect(&body, brain.vision_range) {
                d2.draw_rectangle_lines(
                    vision.x as i32,
                    vision.y as i32,
                    vision.width as i32,
                    vision.height as i32,
                    Color::YELLOW,
                );
            }
        }
    }
}

/// Screen-space HUD pass.
fn render_hud<D: RaylibDraw>(world: &mut World, d: &mut D, screen: ScreenSize) {
    let state = world.resource::<GameState>().get().clone();

    let player_health: Option<(u32, u32)> = {
        let mut query = world.query::<&Dice>();
        query
            .iter(world)
            .find(|dice| dice.kind == DiceKind::Player)
            .map(|dice| (dice.health, dice.total_health))
    };
    let targets_left = world
        .resource::<TrackedGroups>()
        .count("targets")
        .unwrap_or(0);

    let fonts = world.non_send_resource::<FontStore>();
    let hud_font = fonts.get("hud");

    let mut draw_line = |text: &str, x: f32, y: f32, size: f32, color: Color| match hud_font {
        Some(font) => {
            d.draw_text_ex(font, text, Vector2 { x, y }, size, 1.0, color);
        }
        None => {
            d.draw_text(text, x as i32, y as i32, size as i32, color);
        }
    };

    if let Some((health, total)) = player_health {
        draw_line(&format!("HP {health}/{total}"), 8.0, 8.0, 16.0, Color::WHITE);
    }
    draw_line(
        &format!("TARGETS {targets_left}"),
        8.0,
        28.0,
        16.0,
        Color::WHITE,
    );

    let banner = match state {
        GameStates::Win => Some(("ALL TARGETS DOWN", Color::GOLD)),
        GameStates::Lose => Some(("GAME OVER", Color::RED)),
        _ => None,
    };
    if let Some((text, color)) = banner {
        let x = screen.w as f32 * 0.5 - text.len() as f32 * 6.0;
        let y = screen.h as f32 * 0.5 - 16.0;
        draw_line(text, x, y, 24.0, color);
    }
}
