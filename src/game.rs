//! High-level game setup and flow.
//!
//! The hooks in this module are registered in the
//! [`SystemsStore`](crate::resources::systemsstore::SystemsStore) and run by
//! the game-state observer: `setup` loads assets and the arena, `enter_play`
//! spawns the dice roster, `update` watches the win/lose conditions, and
//! `quit_game` tears the world down.

use bevy_ecs::prelude::*;
use log::info;
use raylib::prelude::*;

use crate::behavior;
use crate::behavior::living::walk_key;
use crate::components::animation::Animation;
use crate::components::boxcollider::BoxCollider;
use crate::components::dice::{Dice, DiceKind};
use crate::components::direction::Direction;
use crate::components::group::Group;
use crate::components::mapposition::MapPosition;
use crate::components::npc::NpcBrain;
use crate::components::persistent::Persistent;
use crate::components::playerability::PlayerAbility;
use crate::components::rigidbody::RigidBody;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::components::tint::Tint;
use crate::components::zindex::ZIndex;
use crate::events::audio::AudioCmd;
use crate::resources::animationstore::{AnimationResource, AnimationStore};
use crate::resources::camera2d::Camera2DRes;
use crate::resources::dicedefs::DiceDefs;
use crate::resources::fontstore::FontStore;
use crate::resources::gamestate::{GameStates, NextGameState};
use crate::resources::group::TrackedGroups;
use crate::resources::input::InputState;
use crate::resources::texturestore::TextureStore;
use crate::resources::tilecolliders::TileColliders;
use crate::resources::tilemapstore::{COLLISION_LAYER, Tilemap, TilemapStore};

/// Texture key of the arena tileset.
const TILESET_KEY: &str = "tileset";
/// Tilemap key of the arena.
const ARENA_KEY: &str = "arena";
/// Walk cycle frames per animation.
const WALK_FRAMES: usize = 4;
/// Frames in the one-shot death animation.
const DEATH_FRAMES: usize = 6;
/// Z index of dice sprites; tiles draw below, ghosts just beneath dice.
const DICE_Z: i32 = 10;

/// Marker resource set by [`quit_game`]; the main loop exits when present.
#[derive(Resource, Clone, Copy)]
pub struct QuitRequested;

/// Load a png + json tilemap pair exported by Tilesetter.
///
/// `path` is a directory whose basename names both files:
/// `assets/maps/arena` -> `arena.png` and `arena.txt`.
fn load_tilemap(rl: &mut RaylibHandle, th: &RaylibThread, path: &str) -> (Texture2D, Tilemap) {
    let dirname = path.split('/').next_back().expect("Not a valid dir path.");
    let json_path = format!("{path}/{dirname}.txt");
    let png_path = format!("{path}/{dirname}.png");

    let texture = rl
        .load_texture(th, &png_path)
        .expect("Failed to load tilemap texture");
    let json_string = std::fs::read_to_string(json_path).expect("Failed to load tilemap JSON");
    let tilemap: Tilemap =
        serde_json::from_str(&json_string).expect("Failed to parse tilemap JSON");
    (texture, tilemap)
}

/// Spawn the visible tile layers as sprite entities.
///
/// The collision layer is skipped here; it only feeds
/// [`TileColliders`](crate::resources::tilecolliders::TileColliders).
fn spawn_tiles(commands: &mut Commands, tex_width: i32, tilemap: &Tilemap) {
    let tex_w = tex_width as f32;
    let tile_size = tilemap.tile_size as f32;
    let tiles_per_row = ((tex_w / tile_size).floor() as u32).max(1);

    let layer_count = tilemap.layers.len() as i32;
    // ZIndex: if N layers, first is -N, last is -1, all below the dice.
    for (layer_index, layer) in tilemap.layers.iter().enumerate() {
        if layer.name == COLLISION_LAYER {
            continue;
        }
        let z = -(layer_count - (layer_index as i32));

        for pos in layer.positions.iter() {
            let wx = pos.x as f32 * tile_size;
            let wy = pos.y as f32 * tile_size;

            // Frame offset in the tileset texture (left-to-right, top-to-bottom).
            let col = pos.id % tiles_per_row;
            let row = pos.id / tiles_per_row;

            commands.spawn((
                Group::new("tiles"),
                MapPosition::new(wx, wy),
                ZIndex(z),
                Sprite {
                    tex_key: TILESET_KEY.to_string(),
                    width: tile_size,
                    height: tile_size,
                    offset: Vector2 {
                        x: col as f32 * tile_size,
                        y: row as f32 * tile_size,
                    },
                    origin: Vector2 {
                        x: tile_size * 0.5,
                        y: tile_size * 0.5,
                    },
                    flip_h: false,
                    flip_v: false,
                },
            ));
        }
    }
}

/// Sheet row of a compass facing inside a dice spritesheet.
fn octant_row(direction: Direction) -> usize {
    Direction::COMPASS
        .iter()
        .position(|d| *d == direction)
        .unwrap_or(0)
}

/// Register the walk cycles (per face and octant) and the death animation
/// for one dice kind.
fn register_dice_animations(store: &mut AnimationStore, kind: DiceKind, sprite_size: f32) {
    let tex_key = format!("dice_{}", kind.as_str());
    for face in 1..=6u32 {
        for direction in Direction::COMPASS {
            store.insert(
                walk_key(kind, face, direction),
                AnimationResource {
                    tex_key: tex_key.clone(),
                    position: Vector2 {
                        x: (face - 1) as f32 * WALK_FRAMES as f32 * sprite_size,
                        y: octant_row(direction) as f32 * sprite_size,
                    },
                    displacement: sprite_size,
                    frame_count: WALK_FRAMES,
                    fps: 8.0,
                    looped: true,
                },
            );
        }
    }
    // Death row sits below the eight walk rows.
    store.insert(
        crate::behavior::living::death_key(kind),
        AnimationResource {
            tex_key,
            position: Vector2 {
                x: 0.0,
                y: 8.0 * sprite_size,
            },
            displacement: sprite_size,
            frame_count: DEATH_FRAMES,
            fps: 10.0,
            looped: false,
        },
    );
}

/// Spawn one die of the given kind at a world position.
fn spawn_dice(commands: &mut Commands, defs: &DiceDefs, kind: DiceKind, x: f32, y: f32) {
    let def = defs.get(kind);
    let size = def.sprite_size;
    // Collider footprint: sprite size plus the per-kind offset on each side,
    // centered on the entity position like the sprite.
    let collider_size = size + def.collider_offset * 2.0;

    let mut entity = commands.spawn((
        Group::new(kind.group_name()),
        MapPosition::new(x, y),
        ZIndex(DICE_Z),
        Dice::new(kind, def.health, def.speed),
        RigidBody::new_dynamic(),
        BoxCollider::new(collider_size, collider_size).with_offset(Vector2 {
            x: -collider_size * 0.5,
            y: -collider_size * 0.5,
        }),
        Sprite::centered(format!("dice_{}", kind.as_str()), size, size),
        Scale::uniform(def.scale),
        Tint::default(),
        Animation::new(walk_key(kind, def.health, Direction::Down)),
    ));

    match kind {
        DiceKind::Player => {
            entity.insert((behavior::player_phase(), PlayerAbility::new()));
        }
        DiceKind::Target | DiceKind::Enemy => {
            entity.insert((
                behavior::npc_phase(),
                NpcBrain::new(def.wander_period, def.vision_range, def.chase_boost),
            ));
        }
    }
}

/// Setup hook: load fonts, textures, the arena tilemap and sounds, then
/// request the Playing state.
pub fn setup(
    mut commands: Commands,
    mut next_state: ResMut<NextGameState>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    th: NonSend<raylib::RaylibThread>,
    mut fonts: NonSendMut<FontStore>,
    mut textures: NonSendMut<TextureStore>,
    mut animations: ResMut<AnimationStore>,
    mut tilemaps: ResMut<TilemapStore>,
    mut tile_colliders: ResMut<TileColliders>,
    defs: Res<DiceDefs>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    let camera = Camera2D {
        target: Vector2 { x: 0.0, y: 0.0 },
        offset: Vector2 {
            x: rl.get_screen_width() as f32 * 0.5,
            y: rl.get_screen_height() as f32 * 0.5,
        },
        rotation: 0.0,
        zoom: 1.0,
    };
    commands.insert_resource(Camera2DRes(camera));

    let font = rl
        .load_font(&th, "./assets/fonts/Arcade_Cabinet.ttf")
        .expect("Failed to load font 'hud'");
    fonts.add("hud", font);

    for kind in [DiceKind::Player, DiceKind::Target, DiceKind::Enemy] {
        let path = format!("./assets/sprites/dice_{}.png", kind.as_str());
        let texture = rl
            .load_texture(&th, &path)
            .unwrap_or_else(|e| panic!("Failed to load dice sheet {path}: {e}"));
        textures.add(format!("dice_{}", kind.as_str()), texture);
        register_dice_animations(&mut animations, kind, defs.get(kind).sprite_size);
    }

    let (tileset, tilemap) = load_tilemap(&mut rl, &th, "./assets/maps/arena");
    let tileset_width = tileset.width;
    textures.add(TILESET_KEY, tileset);
    tile_colliders.reset(tilemap.collision_rects());
    info!(
        "arena loaded: {}x{} tiles, {} colliders",
        tilemap.map_width,
        tilemap.map_height,
        tile_colliders.len()
    );
    spawn_tiles(&mut commands, tileset_width, &tilemap);
    tilemaps.insert(ARENA_KEY, tilemap);

    audio_cmds.write(AudioCmd::LoadMusic {
        id: "bgm".into(),
        path: "./assets/audio/arena_theme.ogg".into(),
    });
    for fx in ["hit", "die", "phase", "dash_1", "dash_2", "dash_3", "win", "lose"] {
        audio_cmds.write(AudioCmd::LoadFx {
            id: fx.into(),
            path: format!("./assets/audio/{fx}.wav"),
        });
    }

    next_state.set(GameStates::Playing);
}

/// Enter-play hook: spawn the dice roster and start the music.
pub fn enter_play(
    mut commands: Commands,
    defs: Res<DiceDefs>,
    tilemaps: Res<TilemapStore>,
    mut tracked: ResMut<TrackedGroups>,
    mut audio_cmds: MessageWriter<AudioCmd>,
) {
    tracked.add_group("player");
    tracked.add_group("targets");
    tracked.add_group("enemies");

    let (world_w, world_h) = tilemaps
        .get(ARENA_KEY)
        .map(|map| {
            (
                (map.map_width * map.tile_size) as f32,
                (map.map_height * map.tile_size) as f32,
            )
        })
        .unwrap_or((640.0, 360.0));

    spawn_dice(
        &mut commands,
        &defs,
        DiceKind::Player,
        world_w * 0.5,
        world_h * 0.5,
    );
    for (fx, fy) in [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75)] {
        spawn_dice(
            &mut commands,
            &defs,
            DiceKind::Target,
            world_w * fx,
            world_h * fy,
        );
    }
    for (fx, fy) in [(0.75, 0.75), (0.5, 0.2)] {
        spawn_dice(
            &mut commands,
            &defs,
            DiceKind::Enemy,
            world_w * fx,
            world_h * fy,
        );
    }

    audio_cmds.write(AudioCmd::PlayMusic {
        id: "bgm".into(),
        looped: true,
    });
    info!("roster spawned: 1 player, 3 targets, 2 enemies");
}

/// Per-frame game flow while Playing: win/lose watching and quit input.
pub fn update(
    tracked: Res<TrackedGroups>,
    input: Res<InputState>,
    mut next_state: ResMut<NextGameState>,
) {
    if input.action_back.just_pressed {
        next_state.set(GameStates::Quitting);
        return;
    }
    if tracked.count("targets") == Some(0) {
        next_state.set(GameStates::Win);
        return;
    }
    if tracked.count("player") == Some(0) {
        next_state.set(GameStates::Lose);
    }
}

/// Enter-win hook: stop the action and play the jingle.
pub fn enter_win(mut bodies: Query<&mut RigidBody>, mut audio_cmds: MessageWriter<AudioCmd>) {
    freeze_all(&mut bodies);
    audio_cmds.write(AudioCmd::StopMusic { id: "bgm".into() });
    audio_cmds.write(AudioCmd::PlayFx { id: "win".into() });
}

/// Enter-lose hook: stop the action and play the jingle.
pub fn enter_lose(mut bodies: Query<&mut RigidBody>, mut audio_cmds: MessageWriter<AudioCmd>) {
    freeze_all(&mut bodies);
    audio_cmds.write(AudioCmd::StopMusic { id: "bgm".into() });
    audio_cmds.write(AudioCmd::PlayFx { id: "lose".into() });
}

fn freeze_all(bodies: &mut Query<&mut RigidBody>) {
    for mut body in bodies.iter_mut() {
        body.freeze();
    }
}

/// Quit hook: clear the world and ask the main loop to exit.
pub fn quit_game(mut commands: Commands, query: Query<Entity, Without<Persistent>>) {
    for entity in query.iter() {
        commands.entity(entity).try_despawn();
    }
    commands.insert_resource(QuitRequested);
    info!("quit requested");
}
