//! Behavior integration tests: state machine flow, player abilities, NPC
//! wandering and the dying lifecycle, run through real schedules.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use dicearena::behavior;
use dicearena::behavior::living::walk_key;
use dicearena::components::animation::Animation;
use dicearena::components::boxcollider::BoxCollider;
use dicearena::components::dice::{Dice, DiceKind};
use dicearena::components::direction::Direction;
use dicearena::components::mapposition::MapPosition;
use dicearena::components::npc::NpcBrain;
use dicearena::components::phase::Phase;
use dicearena::components::playerability::PlayerAbility;
use dicearena::components::rigidbody::RigidBody;
use dicearena::components::sprite::Sprite;
use dicearena::components::ttl::Ttl;
use dicearena::events::audio::AudioCmd;
use dicearena::rect::Rect;
use dicearena::resources::animationstore::{AnimationResource, AnimationStore};
use dicearena::resources::dicedefs::DiceDefs;
use dicearena::resources::input::InputState;
use dicearena::resources::tilecolliders::TileColliders;
use dicearena::resources::worldtime::WorldTime;
use dicearena::systems::animation::animation;
use dicearena::systems::lifecycle::{prune_dead_dice, update_iframes};
use dicearena::systems::phase::{phase_change_detector, phase_update_system};

const EPSILON: f32 = 1e-3;

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
    world.insert_resource(AnimationStore::new());
    world.init_resource::<Messages<AudioCmd>>();
    world
}

fn tick_phase(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems((phase_change_detector, phase_update_system).chain());
    schedule.run(world);
}

fn tick_animation(world: &mut World) {
    let mut schedule = Schedule::default();
    schedule.add_systems(animation);
    schedule.run(world);
}

fn spawn_player(world: &mut World) -> Entity {
    world
        .spawn((
            Dice::new(DiceKind::Player, 6, 120.0),
            MapPosition::new(100.0, 100.0),
            RigidBody::new_dynamic(),
            BoxCollider::new(24.0, 24.0).with_offset(Vector2 { x: -12.0, y: -12.0 }),
            Sprite::centered("dice_player", 32.0, 32.0),
            Animation::new(walk_key(DiceKind::Player, 6, Direction::Down)),
            behavior::player_phase(),
            PlayerAbility::new(),
        ))
        .id()
}

fn spawn_npc(world: &mut World, kind: DiceKind) -> Entity {
    world
        .spawn((
            Dice::new(kind, 3, 100.0),
            MapPosition::new(100.0, 100.0),
            RigidBody::new_dynamic(),
            BoxCollider::new(24.0, 24.0).with_offset(Vector2 { x: -12.0, y: -12.0 }),
            Sprite::centered(format!("dice_{}", kind.as_str()), 32.0, 32.0),
            Animation::new(walk_key(kind, 3, Direction::Down)),
            behavior::npc_phase(),
            NpcBrain::new(10.0, 40.0, 1.3),
        ))
        .id()
}

#[test]
fn neutral_input_moves_at_constant_speed_diagonally() {
    let mut world = make_world(1.0 / 60.0);
    let player = spawn_player(&mut world);

    {
        let mut input = world.resource_mut::<InputState>();
        input.maindirection_right.active = true;
        input.maindirection_up.active = true;
    }
    tick_phase(&mut world);

    let body = world.get::<RigidBody>(player).unwrap();
    let magnitude = (body.velocity.x * body.velocity.x + body.velocity.y * body.velocity.y).sqrt();
    assert!(approx_eq(magnitude, 120.0));
    assert!(body.velocity.x > 0.0 && body.velocity.y < 0.0);
    // Facing follows the velocity bucket.
    assert_eq!(
        world.get::<Dice>(player).unwrap().direction,
        Direction::UpRight
    );
}

#[test]
fn dash_bursts_then_returns_to_neutral() {
    let mut world = make_world(1.0 / 60.0);
    let player = spawn_player(&mut world);

    // Hold right and run one neutral frame to build base velocity.
    {
        let mut input = world.resource_mut::<InputState>();
        input.maindirection_right.active = true;
    }
    tick_phase(&mut world);
    assert!(approx_eq(
        world.get::<RigidBody>(player).unwrap().velocity.x,
        120.0
    ));

    // Press dash: neutral queues the transition, next tick enters dash.
    world.resource_mut::<InputState>().action_dash.just_pressed = true;
    tick_phase(&mut world);
    world.resource_mut::<InputState>().action_dash.just_pressed = false;
    tick_phase(&mut world);

    assert_eq!(world.get::<Phase>(player).unwrap().current, "dash");
    // One decay step already ran on the enter tick; the burst is still far
    // above base speed.
    let boosted = world.get::<RigidBody>(player).unwrap().velocity.x;
    assert!(boosted > 300.0);
    assert!(world.get::<PlayerAbility>(player).unwrap().dashing);

    // Run the dash out: velocity decays to base, ghosts trail behind, and
    // after the trail fades the machine is back in neutral.
    for _ in 0..120 {
        tick_phase(&mut world);
        if world.get::<Phase>(player).unwrap().current == "neutral" {
            break;
        }
    }
    assert_eq!(world.get::<Phase>(player).unwrap().current, "neutral");
    let body = world.get::<RigidBody>(player).unwrap();
    assert!(body.velocity.x <= 120.0 + EPSILON);
    assert!(!world.get::<PlayerAbility>(player).unwrap().dashing);

    // Ghost snapshots were spawned with a TTL.
    let ghost_count = world.query::<&Ttl>().iter(&world).count();
    assert!(ghost_count > 0);
}

#[test]
fn phase_grants_invulnerability_then_cools_down() {
    let mut world = make_world(0.1);
    let player = spawn_player(&mut world);

    tick_phase(&mut world); // initial neutral frame
    world.resource_mut::<InputState>().action_phase.just_pressed = true;
    tick_phase(&mut world); // neutral queues "phase"
    world.resource_mut::<InputState>().action_phase.just_pressed = false;
    tick_phase(&mut world); // enter phase

    assert_eq!(world.get::<Phase>(player).unwrap().current, "phase");
    assert!(world.get::<PlayerAbility>(player).unwrap().phasing);

    // Invulnerability expires after its fixed duration...
    for _ in 0..5 {
        tick_phase(&mut world);
    }
    let ability = world.get::<PlayerAbility>(player).unwrap();
    assert!(!ability.phasing);
    // ...but the cooldown still holds the machine in the phase state.
    assert_eq!(world.get::<Phase>(player).unwrap().current, "phase");

    // After duration + cooldown the machine returns to neutral.
    for _ in 0..20 {
        tick_phase(&mut world);
        if world.get::<Phase>(player).unwrap().current == "neutral" {
            break;
        }
    }
    assert_eq!(world.get::<Phase>(player).unwrap().current, "neutral");
}

#[test]
fn npc_wanders_at_base_speed() {
    let mut world = make_world(1.0 / 60.0);
    let npc = spawn_npc(&mut world, DiceKind::Target);

    tick_phase(&mut world);
    tick_phase(&mut world);

    let body = world.get::<RigidBody>(npc).unwrap();
    let magnitude = (body.velocity.x * body.velocity.x + body.velocity.y * body.velocity.y).sqrt();
    assert!(approx_eq(magnitude, 100.0));
}

#[test]
fn npc_redirects_away_from_seen_wall() {
    let mut world = make_world(1.0 / 60.0);
    let npc = spawn_npc(&mut world, DiceKind::Target);
    tick_phase(&mut world); // wander_enter picks some direction

    // Face the NPC right with a wall inside its vision beam.
    {
        let mut dice = world.get_mut::<Dice>(npc).unwrap();
        dice.direction = Direction::Right;
    }
    {
        let mut brain = world.get_mut::<NpcBrain>(npc).unwrap();
        brain.desired_direction = Direction::Right;
        brain.redirect_cooldown = 0.0;
    }
    world
        .resource_mut::<TileColliders>()
        .reset(vec![Rect::new(120.0, 88.0, 16.0, 16.0).unwrap()]);

    tick_phase(&mut world);

    let brain = world.get::<NpcBrain>(npc).unwrap();
    let excluded = Direction::Right.wall_excluded();
    assert!(
        !excluded.contains(&brain.desired_direction),
        "redirect must avoid walking back into the wall, got {:?}",
        brain.desired_direction
    );
    assert!(brain.redirect_cooldown > 0.0);
}

#[test]
fn enemy_chases_and_target_flees() {
    let mut world = make_world(1.0 / 60.0);
    let enemy = spawn_npc(&mut world, DiceKind::Enemy);
    let target = spawn_npc(&mut world, DiceKind::Target);
    tick_phase(&mut world);

    for entity in [enemy, target] {
        let mut brain = world.get_mut::<NpcBrain>(entity).unwrap();
        brain.sees_player = true;
        brain.player_direction = Direction::Left;
    }
    tick_phase(&mut world);

    let enemy_brain = world.get::<NpcBrain>(enemy).unwrap();
    assert_eq!(enemy_brain.desired_direction, Direction::Left);
    // Chasing enemies get their speed boost.
    let enemy_body = world.get::<RigidBody>(enemy).unwrap();
    assert!(approx_eq(enemy_body.velocity.x, -100.0 * 1.3));

    let target_brain = world.get::<NpcBrain>(target).unwrap();
    assert_eq!(target_brain.desired_direction, Direction::Right);
}

#[test]
fn dying_runs_once_then_flags_dead_and_prunes() {
    let mut world = make_world(1.0 / 60.0);
    // Two-frame death animation at 60 fps: finished after two ticks.
    world.resource_mut::<AnimationStore>().insert(
        "target_death",
        AnimationResource {
            tex_key: "dice_target".into(),
            position: Vector2 { x: 0.0, y: 256.0 },
            displacement: 32.0,
            frame_count: 2,
            fps: 60.0,
            looped: false,
        },
    );
    let npc = spawn_npc(&mut world, DiceKind::Target);
    tick_phase(&mut world);

    world
        .get_mut::<Phase>(npc)
        .unwrap()
        .transition_to("dying")
        .unwrap();
    tick_phase(&mut world); // enter dying

    {
        let dice = world.get::<Dice>(npc).unwrap();
        assert!(dice.is_dying);
        assert!(!dice.is_dead);
        let body = world.get::<RigidBody>(npc).unwrap();
        assert!(body.frozen);
        assert!(approx_eq(body.velocity.x, 0.0) && approx_eq(body.velocity.y, 0.0));
        let anim = world.get::<Animation>(npc).unwrap();
        assert_eq!(anim.key, "target_death");
    }

    // Play the one-shot death animation through.
    for _ in 0..4 {
        tick_animation(&mut world);
        tick_phase(&mut world);
    }
    assert!(world.get::<Dice>(npc).unwrap().is_dead);

    let mut schedule = Schedule::default();
    schedule.add_systems(prune_dead_dice);
    schedule.run(&mut world);
    assert!(world.get_entity(npc).is_err());
}

#[test]
fn iframes_flicker_and_expire() {
    let mut world = make_world(0.25);
    let npc = spawn_npc(&mut world, DiceKind::Enemy);
    world.get_mut::<Dice>(npc).unwrap().start_iframes(1.0);

    let mut schedule = Schedule::default();
    schedule.add_systems(update_iframes);

    let mut seen_low = false;
    let mut seen_high = false;
    for frame in 0..6 {
        world.resource_mut::<WorldTime>().frame_count = frame;
        schedule.run(&mut world);
        let dice = world.get::<Dice>(npc).unwrap();
        if dice.losing_life {
            if dice.opacity < 1.0 {
                seen_low = true;
            } else {
                seen_high = true;
            }
        }
    }

    let dice = world.get::<Dice>(npc).unwrap();
    assert!(!dice.losing_life, "iframes must expire");
    assert!(approx_eq(dice.opacity, 1.0));
    assert!(seen_low && seen_high, "opacity must alternate while armed");
}

#[test]
fn unregistered_phase_transition_is_rejected() {
    let mut phase = behavior::npc_phase();
    assert!(phase.transition_to("dash").is_err());
    assert!(phase.transition_to("dying").is_ok());
}
