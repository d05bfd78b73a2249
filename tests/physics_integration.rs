//! Physics integration tests: movement, tile resolution, pairwise dice
//! collision and combat consequences.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use dicearena::components::boxcollider::BoxCollider;
use dicearena::components::dice::{Dice, DiceKind};
use dicearena::components::direction::Direction;
use dicearena::components::mapposition::MapPosition;
use dicearena::components::npc::NpcBrain;
use dicearena::components::playerability::PlayerAbility;
use dicearena::components::rigidbody::RigidBody;
use dicearena::behavior;
use dicearena::events::audio::AudioCmd;
use dicearena::rect::Rect;
use dicearena::resources::dicedefs::DiceDefs;
use dicearena::resources::input::InputState;
use dicearena::resources::tilecolliders::TileColliders;
use dicearena::resources::worldtime::WorldTime;
use dicearena::systems::interaction::dice_interaction;
use dicearena::systems::lifecycle::prune_dead_dice;
use dicearena::systems::movement::movement;
use dicearena::systems::tilecollision::tile_collision;

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn make_world(delta: f32) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime {
        elapsed: 0.0,
        delta,
        time_scale: 1.0,
        frame_count: 0,
    });
    world.insert_resource(InputState::default());
    world.insert_resource(TileColliders::default());
    world.insert_resource(DiceDefs::default());
    world.init_resource::<Messages<AudioCmd>>();
    world
}

fn tick_movement(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(movement);
    schedule.run(world);
}

fn tick_tile_collision(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(tile_collision);
    schedule.run(world);
}

fn tick_interaction(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(dice_interaction);
    schedule.run(world);
}

/// A centered 10x10 collider like the dice use.
fn collider_10() -> BoxCollider {
    BoxCollider::new(10.0, 10.0).with_offset(Vector2 { x: -5.0, y: -5.0 })
}

fn spawn_npc(world: &mut World, kind: DiceKind, x: f32, y: f32, vx: f32, vy: f32) -> Entity {
    let mut dice = Dice::new(kind, 3, 100.0);
    dice.direction = Direction::from_velocity(Vector2 { x: vx, y: vy }, Direction::Down);
    let mut body = RigidBody::new_dynamic();
    body.velocity = Vector2 { x: vx, y: vy };
    world
        .spawn((
            dice,
            MapPosition::new(x, y),
            body,
            collider_10(),
            behavior::npc_phase(),
            NpcBrain::new(1.5, 40.0, 1.3),
        ))
        .id()
}

fn spawn_player(world: &mut World, x: f32, y: f32) -> Entity {
    world
        .spawn((
            Dice::new(DiceKind::Player, 6, 120.0),
            MapPosition::new(x, y),
            RigidBody::new_dynamic(),
            collider_10(),
            behavior::player_phase(),
            PlayerAbility::new(),
        ))
        .id()
}

#[test]
fn movement_integrates_velocity_into_position() {
    let mut world = make_world(0.5);
    let mut body = RigidBody::new_dynamic();
    body.velocity = Vector2 { x: 10.0, y: -4.0 };
    let entity = world.spawn((MapPosition::new(0.0, 0.0), body)).id();

    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(entity).unwrap();
    assert!(approx_eq(pos.pos.x, 5.0));
    assert!(approx_eq(pos.pos.y, -2.0));
}

#[test]
fn static_and_frozen_bodies_never_move() {
    let mut world = make_world(1.0);
    let mut static_body = RigidBody::new_static();
    static_body.velocity = Vector2 { x: 50.0, y: 50.0 };
    let mut frozen_body = RigidBody::new_dynamic();
    frozen_body.velocity = Vector2 { x: 50.0, y: 50.0 };
    frozen_body.freeze();

    let static_entity = world.spawn((MapPosition::new(1.0, 2.0), static_body)).id();
    let frozen_entity = world.spawn((MapPosition::new(3.0, 4.0), frozen_body)).id();

    tick_movement(&mut world);

    let pos = world.get::<MapPosition>(static_entity).unwrap();
    assert!(approx_eq(pos.pos.x, 1.0) && approx_eq(pos.pos.y, 2.0));
    let pos = world.get::<MapPosition>(frozen_entity).unwrap();
    assert!(approx_eq(pos.pos.x, 3.0) && approx_eq(pos.pos.y, 4.0));
}

#[test]
fn tile_collision_pushes_out_and_converges() {
    let mut world = make_world(1.0 / 60.0);
    world
        .resource_mut::<TileColliders>()
        .reset(vec![Rect::new(8.0, -8.0, 16.0, 16.0).unwrap()]);

    // Centered 10x10 collider at origin: rect spans -5..5, wall starts at 8
    // minus 2 of penetration.
    let body = RigidBody::new_dynamic();
    let entity = world
        .spawn((MapPosition::new(5.0, 0.0), body, collider_10()))
        .id();

    tick_tile_collision(&mut world);
    let x_after_first = world.get::<MapPosition>(entity).unwrap().pos.x;
    assert!(approx_eq(x_after_first, 3.0));

    // No oscillation: a second pass leaves the position alone.
    tick_tile_collision(&mut world);
    let x_after_second = world.get::<MapPosition>(entity).unwrap().pos.x;
    assert!(approx_eq(x_after_second, x_after_first));
}

#[test]
fn head_on_npc_collision_splits_push_and_reverses_both() {
    let mut world = make_world(1.0 / 60.0);
    // Colliders span a: 0..10, b: 8..18 -> penetration 2 on x.
    let a = spawn_npc(&mut world, DiceKind::Enemy, 5.0, 5.0, 50.0, 0.0);
    let b = spawn_npc(&mut world, DiceKind::Enemy, 13.0, 5.0, -50.0, 0.0);

    tick_interaction(&mut world);

    let pos_a = world.get::<MapPosition>(a).unwrap().pos;
    let pos_b = world.get::<MapPosition>(b).unwrap().pos;
    assert!(approx_eq(pos_a.x, 4.0));
    assert!(approx_eq(pos_b.x, 14.0));

    let body_a = world.get::<RigidBody>(a).unwrap();
    let body_b = world.get::<RigidBody>(b).unwrap();
    assert_eq!(body_a.last_collision_normal, Vector2 { x: -1.0, y: 0.0 });
    assert_eq!(body_b.last_collision_normal, Vector2 { x: 1.0, y: 0.0 });

    // Both NPCs reverse to the opposite discrete direction with knockback.
    let dice_a = world.get::<Dice>(a).unwrap();
    let dice_b = world.get::<Dice>(b).unwrap();
    assert_eq!(dice_a.direction, Direction::Left);
    assert_eq!(dice_b.direction, Direction::Right);
    assert!(dice_a.knockback);
    assert!(dice_b.knockback);
    // Knockback pushes away from the contact.
    assert!(body_a.velocity.x < 0.0);
    assert!(body_b.velocity.x > 0.0);
}

#[test]
fn player_enemy_collision_costs_lives_and_knocks_back() {
    let mut world = make_world(1.0 / 60.0);
    let player = spawn_player(&mut world, 5.0, 5.0);
    let enemy = spawn_npc(&mut world, DiceKind::Enemy, 13.0, 5.0, -50.0, 0.0);

    tick_interaction(&mut world);

    let player_dice = world.get::<Dice>(player).unwrap();
    let enemy_dice = world.get::<Dice>(enemy).unwrap();
    // Both sides lose a life; the hostile enemy loses one more.
    assert_eq!(player_dice.health, 5);
    assert_eq!(enemy_dice.health, 1);
    assert!(player_dice.knockback);
    assert!(player_dice.losing_life);

    // Iframes: restore the overlap and collide again; both sides are still
    // in their invulnerability window, so no further damage lands.
    world.get_mut::<MapPosition>(player).unwrap().pos = Vector2 { x: 5.0, y: 5.0 };
    world.get_mut::<MapPosition>(enemy).unwrap().pos = Vector2 { x: 13.0, y: 5.0 };
    tick_interaction(&mut world);
    assert_eq!(world.get::<Dice>(player).unwrap().health, 5);
    assert_eq!(world.get::<Dice>(enemy).unwrap().health, 1);
}

#[test]
fn target_collision_costs_single_life() {
    let mut world = make_world(1.0 / 60.0);
    let player = spawn_player(&mut world, 5.0, 5.0);
    let target = spawn_npc(&mut world, DiceKind::Target, 13.0, 5.0, -50.0, 0.0);

    tick_interaction(&mut world);

    assert_eq!(world.get::<Dice>(player).unwrap().health, 5);
    assert_eq!(world.get::<Dice>(target).unwrap().health, 2);
}

#[test]
fn phasing_player_suppresses_pushout_and_damage() {
    let mut world = make_world(1.0 / 60.0);
    let player = spawn_player(&mut world, 5.0, 5.0);
    world.get_mut::<PlayerAbility>(player).unwrap().phasing = true;
    let enemy = spawn_npc(&mut world, DiceKind::Enemy, 13.0, 5.0, -50.0, 0.0);

    tick_interaction(&mut world);

    assert_eq!(world.get::<Dice>(player).unwrap().health, 6);
    assert_eq!(world.get::<Dice>(enemy).unwrap().health, 3);
    let pos = world.get::<MapPosition>(player).unwrap().pos;
    assert!(approx_eq(pos.x, 5.0));
}

#[test]
fn dying_dice_take_no_part_in_interactions() {
    let mut world = make_world(1.0 / 60.0);
    let a = spawn_npc(&mut world, DiceKind::Enemy, 5.0, 5.0, 50.0, 0.0);
    let b = spawn_npc(&mut world, DiceKind::Enemy, 13.0, 5.0, -50.0, 0.0);
    world.get_mut::<Dice>(a).unwrap().is_dying = true;

    tick_interaction(&mut world);

    // No push-out, no knockback, positions untouched.
    assert!(approx_eq(world.get::<MapPosition>(a).unwrap().pos.x, 5.0));
    assert!(approx_eq(world.get::<MapPosition>(b).unwrap().pos.x, 13.0));
    assert!(!world.get::<Dice>(b).unwrap().knockback);
}

#[test]
fn fatal_hit_transitions_to_dying() {
    let mut world = make_world(1.0 / 60.0);
    let player = spawn_player(&mut world, 5.0, 5.0);
    let target = spawn_npc(&mut world, DiceKind::Target, 13.0, 5.0, -50.0, 0.0);
    world.get_mut::<Dice>(target).unwrap().health = 1;

    tick_interaction(&mut world);

    let dice = world.get::<Dice>(target).unwrap();
    assert_eq!(dice.health, 0);
    assert!(dice.is_dying);
    let phase = world
        .get::<dicearena::components::phase::Phase>(target)
        .unwrap();
    assert_eq!(phase.next.as_deref(), Some("dying"));
    // The player survives with one less life.
    assert_eq!(world.get::<Dice>(player).unwrap().health, 5);
}

#[test]
fn dead_dice_are_pruned() {
    let mut world = make_world(1.0 / 60.0);
    let a = spawn_npc(&mut world, DiceKind::Target, 5.0, 5.0, 0.0, 0.0);
    world.get_mut::<Dice>(a).unwrap().is_dead = true;

    let mut schedule = Schedule::default();
    schedule.add_systems(prune_dead_dice);
    schedule.run(&mut world);

    assert!(world.get_entity(a).is_err());
}

#[test]
fn vision_contact_marks_npc_as_seeing_player() {
    let mut world = make_world(1.0 / 60.0);
    // Enemy facing right, player standing inside the 40-unit vision beam.
    let enemy = spawn_npc(&mut world, DiceKind::Enemy, 5.0, 5.0, 50.0, 0.0);
    spawn_player(&mut world, 30.0, 5.0);

    tick_interaction(&mut world);

    let brain = world.get::<NpcBrain>(enemy).unwrap();
    assert!(brain.sees_player);
    assert_eq!(brain.player_direction, Direction::Right);
}
