//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution: input state, timing, rendering
//! handles, asset stores, tile colliders and dice tuning.
//!
//! Overview
//! - `animationstore` – definitions for sprite animations reused across dice
//! - `audio` – bridge and channels for the background audio thread
//! - `camera2d` – shared 2D camera used for world/screen transforms
//! - `debugmode` – presence toggles optional debug overlays and logs
//! - `dicedefs` – typed per-kind dice tuning loaded from JSON
//! - `fontstore` – loaded fonts keyed by string IDs
//! - `fullscreen` – presence marks full screen mode
//! - `gameconfig` – INI-backed render/window configuration
//! - `gamestate` – authoritative and pending high-level game state
//! - `group` – tracked group names and their entity counts
//! - `input` – per-frame keyboard state of keys relevant to the game
//! - `rendertarget` – fixed-resolution framebuffer scaled to the window
//! - `screensize` – internal render resolution in pixels
//! - `systemsstore` – registry of dynamically-lookup-able systems by name
//! - `texturestore` – loaded textures keyed by string IDs
//! - `tilecolliders` – static collider rectangles of the current scene
//! - `tilemapstore` – loaded tile maps and layers
//! - `windowsize` – actual OS window dimensions
//! - `worldtime` – simulation time and delta

pub mod animationstore;
pub mod audio;
pub mod camera2d;
pub mod debugmode;
pub mod dicedefs;
pub mod fontstore;
pub mod fullscreen;
pub mod gameconfig;
pub mod gamestate;
pub mod group;
pub mod input;
pub mod rendertarget;
pub mod screensize;
pub mod systemsstore;
pub mod texturestore;
pub mod tilecolliders;
pub mod tilemapstore;
pub mod windowsize;
pub mod worldtime;
