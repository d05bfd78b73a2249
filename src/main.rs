//! Dice Arena main entry point.
//!
//! A 2D top-down action game written in Rust using:
//! - **raylib** for windowing, graphics, and audio
//! - **bevy_ecs** for entity-component-system architecture
//!
//! The player die roams a tiled arena hunting target dice while enemy dice
//! hunt the player. Every die shows its remaining health as its face;
//! collisions knock dice around, drain faces and eventually kill.
//!
//! # Project Structure
//!
//! - [`behavior`] – phase callbacks for neutral/dash/phase/wander/dying
//! - [`components`] – ECS components (dice, physics, collision, animation)
//! - [`events`] – event types (collision, audio, game state transitions)
//! - [`game`] – high-level setup, roster spawning and win/lose flow
//! - [`rect`] – the shared float AABB primitive
//! - [`resources`] – ECS resources (stores, camera, input, tile colliders)
//! - [`systems`] – ECS systems (simulation, input, rendering, audio)
//!
//! # Main Loop
//!
//! 1. Initialize raylib window, ECS world, resources, audio thread
//! 2. Register observers, state hooks and systems
//! 3. Per frame: input, death pruning, pairwise dice interaction, state
//!    machine tick, tile collision resolution, integration, animation,
//!    render
//! 4. Clean up the audio thread on exit
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

mod behavior;
mod components;
mod events;
mod game;
mod rect;
mod resources;
mod systems;

use crate::components::persistent::Persistent;
use crate::events::collision::collision_log_observer;
use crate::events::gamestate::GameStateChangedEvent;
use crate::events::gamestate::observe_gamestate_change_event;
use crate::events::switchdebug::switch_debug_observer;
use crate::events::switchfullscreen::switch_fullscreen_observer;
use crate::game::QuitRequested;
use crate::resources::animationstore::AnimationStore;
use crate::resources::audio::{setup_audio, shutdown_audio};
use crate::resources::debugmode::DebugMode;
use crate::resources::dicedefs::DiceDefs;
use crate::resources::fontstore::FontStore;
use crate::resources::gameconfig::GameConfig;
use crate::resources::gamestate::{GameState, GameStates, NextGameState};
use crate::resources::group::TrackedGroups;
use crate::resources::input::InputState;
use crate::resources::rendertarget::RenderTarget;
use crate::resources::screensize::ScreenSize;
use crate::resources::systemsstore::SystemsStore;
use crate::resources::texturestore::TextureStore;
use crate::resources::tilecolliders::TileColliders;
use crate::resources::tilemapstore::TilemapStore;
use crate::resources::windowsize::WindowSize;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::audio::{
    forward_audio_cmds, poll_audio_messages, update_bevy_audio_cmds, update_bevy_audio_messages,
};
use crate::systems::gameconfig::apply_gameconfig_changes;
use crate::systems::gamestate::{check_pending_state, state_is_playing};
use crate::systems::group::update_group_counts_system;
use crate::systems::input::update_input_state;
use crate::systems::interaction::dice_interaction;
use crate::systems::lifecycle::{prune_dead_dice, update_iframes};
use crate::systems::movement::movement;
use crate::systems::phase::{phase_change_detector, phase_update_system};
use crate::systems::render::{camera_follow, render_system};
use crate::systems::tilecollision::tile_collision;
use crate::systems::time::update_world_time;
use crate::systems::ttl::ttl_system;
use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Dice Arena
#[derive(Parser)]
#[command(version, about = "Dice Arena: hunt the target dice, dodge the enemies.")]
struct Cli {
    /// Path to the configuration INI file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Start with the debug overlay enabled.
    #[arg(long)]
    debug: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // --------------- Raylib window & config ---------------
    let mut config = GameConfig::with_path(cli.config);
    config.load_from_file().ok(); // missing file: keep defaults

    let window_width = config.window_width;
    let window_height = config.window_height;

    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("Dice Arena")
        .build();
    rl.set_target_fps(config.target_fps);
    // ESC is handled by the game (quit flow), not by raylib.
    rl.set_exit_key(None);

    // --------------- Render target for fixed-resolution rendering ---------------
    let render_width = config.render_width;
    let render_height = config.render_height;

    let render_target = RenderTarget::new(&mut rl, &thread, render_width, render_height)
        .expect("Failed to create render target");

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default().with_time_scale(1.0));
    world.insert_resource(TrackedGroups::default());
    world.insert_resource(ScreenSize {
        w: render_width as i32,
        h: render_height as i32,
    });
    world.insert_resource(WindowSize {
        w: rl.get_screen_width(),
        h: rl.get_screen_height(),
    });

    world.insert_resource(config);
    world.insert_resource(InputState::default());
    world.insert_resource(
        DiceDefs::load_or_default("./assets/dice.json").expect("invalid dice definitions"),
    );
    world.insert_resource(TileColliders::default());
    world.insert_resource(TilemapStore::new());
    world.insert_resource(AnimationStore::new());
    world.insert_non_send_resource(render_target);

    if cli.debug {
        world.insert_resource(DebugMode {});
    }

    // Audio must be up before the game setup loads sounds.
    setup_audio(&mut world);

    world.insert_resource(GameState::new());
    world.insert_resource(NextGameState::new());
    world.insert_non_send_resource(FontStore::new());
    world.insert_non_send_resource(TextureStore::new());

    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);
    world.spawn((Observer::new(observe_gamestate_change_event), Persistent));

    // Game state systems store.
    // NOTE: registered systems are stored as entities; mark them Persistent
    // so they survive world cleanups.
    let mut systems_store = SystemsStore::new();

    let setup_system_id = world.register_system(game::setup);
    world
        .entity_mut(setup_system_id.entity())
        .insert(Persistent);
    systems_store.insert("setup", setup_system_id);

    let enter_play_system_id = world.register_system(game::enter_play);
    world
        .entity_mut(enter_play_system_id.entity())
        .insert(Persistent);
    systems_store.insert("enter_play", enter_play_system_id);

    let enter_win_system_id = world.register_system(game::enter_win);
    world
        .entity_mut(enter_win_system_id.entity())
        .insert(Persistent);
    systems_store.insert("enter_win", enter_win_system_id);

    let enter_lose_system_id = world.register_system(game::enter_lose);
    world
        .entity_mut(enter_lose_system_id.entity())
        .insert(Persistent);
    systems_store.insert("enter_lose", enter_lose_system_id);

    let quit_game_system_id = world.register_system(game::quit_game);
    world
        .entity_mut(quit_game_system_id.entity())
        .insert(Persistent);
    systems_store.insert("quit_game", quit_game_system_id);

    world.insert_resource(systems_store);

    world.flush();

    // Enter the Setup state immediately.
    {
        let mut next_state = world.resource_mut::<NextGameState>();
        next_state.set(GameStates::Setup);
    }
    world.trigger(GameStateChangedEvent {});

    world.spawn((Observer::new(switch_debug_observer), Persistent));
    world.spawn((Observer::new(switch_fullscreen_observer), Persistent));
    world.spawn((Observer::new(collision_log_observer), Persistent));
    // Observers must exist before any system that triggers their events.
    world.flush();

    let mut update = Schedule::default();
    update.add_systems(apply_gameconfig_changes);
    update.add_systems(update_input_state);
    update.add_systems(check_pending_state.after(update_input_state));
    update.add_systems(
        // Audio systems must run together, in this order.
        (
            update_bevy_audio_cmds,
            forward_audio_cmds,
            poll_audio_messages,
            update_bevy_audio_messages,
        )
            .chain(),
    );
    // The simulation half, ordered per frame: prune the dead, resolve
    // pairwise interactions, tick each die's state machine, push bodies out
    // of tiles, then integrate velocities.
    update.add_systems(
        (
            prune_dead_dice,
            update_iframes,
            dice_interaction,
            phase_change_detector,
            phase_update_system,
            tile_collision,
            movement,
        )
            .chain()
            .run_if(state_is_playing)
            .after(update_input_state),
    );
    update.add_systems(ttl_system.after(movement));
    update.add_systems(update_group_counts_system.after(movement));
    update.add_systems(
        (game::update)
            .run_if(state_is_playing)
            .after(update_group_counts_system)
            .after(check_pending_state),
    );
    update.add_systems(animation.after(phase_update_system));
    update.add_systems(camera_follow.after(movement));
    update.add_systems(
        render_system
            .after(animation)
            .after(camera_follow)
            .after(ttl_system),
    );

    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
        && !world.contains_resource::<QuitRequested>()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();

        // The window may have been resized this frame.
        let (new_w, new_h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        {
            let mut window_size = world.resource_mut::<WindowSize>();
            window_size.w = new_w;
            window_size.h = new_h;
        }
    }
    shutdown_audio(&mut world);
}
