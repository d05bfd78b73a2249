//! Dice-to-dice interaction: dynamic collision resolution plus combat.
//!
//! This is the per-frame pairwise pass over the live dice roster. For each
//! unordered pair it runs, in order:
//!
//! 1. skip if either die is mid-death,
//! 2. NPC vision checks against the player (reaction happens in the wander
//!    behavior later this same frame, before velocities are integrated),
//! 3. physical AABB resolution, suppressed while the player is phasing,
//! 4. combat consequences: inward-velocity cancellation on both bodies,
//!    NPC-vs-NPC direction reversal with knockback, player-vs-NPC mutual
//!    life loss with knockback on the player.
//!
//! The resolution axis is chosen by the *greater relative velocity*, not the
//! smaller overlap. That deviates from plain minimum-translation resolution
//! on purpose; gameplay feel depends on it.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::boxcollider::BoxCollider;
use crate::components::dice::{Dice, DiceKind};
use crate::components::direction::Direction;
use crate::components::mapposition::MapPosition;
use crate::components::npc::NpcBrain;
use crate::components::phase::Phase;
use crate::components::playerability::PlayerAbility;
use crate::components::rigidbody::RigidBody;
use crate::events::audio::AudioCmd;
use crate::events::collision::CollisionEvent;
use crate::rect::Rect;
use crate::resources::dicedefs::DiceDefs;

/// Penetrations at or below this depth are jitter, not collisions.
pub const COLLISION_EPSILON: f32 = 0.01;

/// Phase label a die transitions to when its health reaches zero.
pub const DYING_PHASE: &str = "dying";

/// Outcome of a resolved dynamic pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairResolution {
    /// Unit axis normal recorded on body A; B gets the negation.
    pub normal_a: Vector2,
    /// Penetration depth that was corrected.
    pub penetration: f32,
}

/// Resolve a dynamic AABB pair, mutating both rects in place.
///
/// Returns `None` when the rects do not intersect or the penetration is
/// within [`COLLISION_EPSILON`]; callers must then clear both bodies'
/// collision normals. On a real collision the positional correction is
/// split 50/50 between two dynamic bodies, or applied fully to the only
/// dynamic one, and the contact normal for A is returned.
pub fn resolve_pair(
    rect_a: &mut Rect,
    velocity_a: Vector2,
    dynamic_a: bool,
    rect_b: &mut Rect,
    velocity_b: Vector2,
    dynamic_b: bool,
) -> Option<PairResolution> {
    if !rect_a.intersects(rect_b) {
        return None;
    }

    let push_left = rect_a.right() - rect_b.left();
    let push_right = rect_b.right() - rect_a.left();
    let push_up = rect_a.bottom() - rect_b.top();
    let push_down = rect_b.bottom() - rect_a.top();

    let min_x = push_left.min(push_right);
    let min_y = push_up.min(push_down);
    let penetration = min_x.min(min_y);

    if penetration <= COLLISION_EPSILON {
        return None;
    }

    // Axis of greater relative approach speed, not of smaller overlap.
    let relative_x = (velocity_a.x - velocity_b.x).abs();
    let relative_y = (velocity_a.y - velocity_b.y).abs();

    let (push_a, normal_a) = if relative_x > relative_y {
        if push_left < push_right {
            (
                Vector2 {
                    x: -penetration,
                    y: 0.0,
                },
                Vector2 { x: -1.0, y: 0.0 },
            )
        } else {
            (
                Vector2 {
                    x: penetration,
                    y: 0.0,
                },
                Vector2 { x: 1.0, y: 0.0 },
            )
        }
    } else if push_up < push_down {
        (
            Vector2 {
                x: 0.0,
                y: -penetration,
            },
            Vector2 { x: 0.0, y: -1.0 },
        )
    } else {
        (
            Vector2 {
                x: 0.0,
                y: penetration,
            },
            Vector2 { x: 0.0, y: 1.0 },
        )
    };

    match (dynamic_a, dynamic_b) {
        (true, true) => {
            rect_a.translate(push_a.x * 0.5, push_a.y * 0.5);
            rect_b.translate(-push_a.x * 0.5, -push_a.y * 0.5);
        }
        (true, false) => rect_a.translate(push_a.x, push_a.y),
        (false, true) => rect_b.translate(-push_a.x, -push_a.y),
        (false, false) => {}
    }

    Some(PairResolution {
        normal_a,
        penetration,
    })
}

/// Knockback impulse away from the collision, scaled from base speed.
fn knockback_velocity(normal: Vector2, speed: f32, power: f32) -> Vector2 {
    Vector2 {
        x: normal.x * speed * power,
        y: normal.y * speed * power,
    }
}

/// The pairwise interaction pass (see module docs for the ordering).
pub fn dice_interaction(
    mut query: Query<(
        Entity,
        &mut Dice,
        &mut MapPosition,
        &mut RigidBody,
        &BoxCollider,
    )>,
    mut phases: Query<&mut Phase>,
    mut brains: Query<&mut NpcBrain>,
    abilities: Query<&PlayerAbility>,
    defs: Res<DiceDefs>,
    mut audio_cmds: MessageWriter<AudioCmd>,
    mut commands: Commands,
) {
    let mut combos = query.iter_combinations_mut();
    while let Some(
        [
            (entity_a, mut dice_a, mut pos_a, mut body_a, collider_a),
            (entity_b, mut dice_b, mut pos_b, mut body_b, collider_b),
        ],
    ) = combos.fetch_next()
    {
        // A die mid-death neither deals nor receives interaction effects.
        if !dice_a.interactive() || !dice_b.interactive() {
            continue;
        }

        let mut rect_a = collider_a.world_rect(pos_a.pos);
        let mut rect_b = collider_b.world_rect(pos_b.pos);

        // Vision before physical resolution: the wander behavior reads
        // `sees_player` later this frame, before velocity is finalized.
        if dice_a.kind == DiceKind::Player {
            update_npc_vision(entity_b, &dice_b, &rect_b, &rect_a, &mut brains);
        } else if dice_b.kind == DiceKind::Player {
            update_npc_vision(entity_a, &dice_a, &rect_a, &rect_b, &mut brains);
        }

        // A phasing player suppresses push-out and damage for the pair.
        let phasing = |entity: Entity, dice: &Dice| {
            dice.kind == DiceKind::Player
                && abilities.get(entity).map(|a| a.phasing).unwrap_or(false)
        };
        if phasing(entity_a, &dice_a) || phasing(entity_b, &dice_b) {
            continue;
        }

        let Some(resolution) = resolve_pair(
            &mut rect_a,
            body_a.velocity,
            body_a.dynamic,
            &mut rect_b,
            body_b.velocity,
            body_b.dynamic,
        ) else {
            body_a.clear_collision_normal();
            body_b.clear_collision_normal();
            continue;
        };

        // Map the corrected rects back onto the entity positions.
        pos_a.pos.x += rect_a.x - (pos_a.pos.x + collider_a.offset.x);
        pos_a.pos.y += rect_a.y - (pos_a.pos.y + collider_a.offset.y);
        pos_b.pos.x += rect_b.x - (pos_b.pos.x + collider_b.offset.x);
        pos_b.pos.y += rect_b.y - (pos_b.pos.y + collider_b.offset.y);

        let normal_a = resolution.normal_a;
        let normal_b = Vector2 {
            x: -normal_a.x,
            y: -normal_a.y,
        };
        body_a.set_collision_normal(normal_a);
        body_b.set_collision_normal(normal_b);
        body_a.cancel_velocity_along_normal();
        body_b.cancel_velocity_along_normal();

        commands.trigger(CollisionEvent {
            a: entity_a,
            b: entity_b,
            normal: normal_a,
        });

        if dice_a.kind.is_npc() && dice_b.kind.is_npc() {
            // Two NPCs bounce: reverse direction, knock both back.
            reverse_npc(
                entity_a, &mut dice_a, &mut body_a, normal_a, &defs, &mut brains,
            );
            reverse_npc(
                entity_b, &mut dice_b, &mut body_b, normal_b, &defs, &mut brains,
            );
        } else {
            // Player vs NPC: both sides lose a life, enemies lose one more,
            // and the player is knocked away.
            let (player, npc) = if dice_a.kind == DiceKind::Player {
                (
                    (entity_a, &mut dice_a, &mut body_a, normal_a),
                    (entity_b, &mut dice_b, &mut body_b),
                )
            } else {
                (
                    (entity_b, &mut dice_b, &mut body_b, normal_b),
                    (entity_a, &mut dice_a, &mut body_a),
                )
            };
            let (player_entity, player_dice, player_body, player_normal) = player;
            let (npc_entity, npc_dice, _npc_body) = npc;

            let hits = if npc_dice.kind == DiceKind::Enemy { 2 } else { 1 };
            apply_damage(npc_entity, npc_dice, hits, &defs, &mut phases, &mut audio_cmds);
            apply_damage(
                player_entity,
                player_dice,
                1,
                &defs,
                &mut phases,
                &mut audio_cmds,
            );

            let def = defs.get(DiceKind::Player);
            player_body.velocity =
                knockback_velocity(player_normal, player_dice.speed, def.knockback_power);
            player_dice.knockback = true;
        }
    }
}

/// Update an NPC's `sees_player` flag from its vision rectangle, recording
/// the direction toward the player for the chase/flee reaction.
fn update_npc_vision(
    npc_entity: Entity,
    npc_dice: &Dice,
    npc_rect: &Rect,
    player_rect: &Rect,
    brains: &mut Query<&mut NpcBrain>,
) {
    if let Ok(mut brain) = brains.get_mut(npc_entity) {
        brain.sees_player = npc_dice
            .direction
            .vision_rect(npc_rect, brain.vision_range)
            .map(|vision| vision.intersects(player_rect))
            .unwrap_or(false);
        if brain.sees_player {
            let npc_center = npc_rect.center();
            let player_center = player_rect.center();
            let toward = Vector2 {
                x: player_center.x - npc_center.x,
                y: player_center.y - npc_center.y,
            };
            brain.player_direction = Direction::from_velocity(toward, npc_dice.direction);
        }
    }
}

/// Reverse an NPC to the opposite direction and knock it back.
fn reverse_npc(
    entity: Entity,
    dice: &mut Dice,
    body: &mut RigidBody,
    normal: Vector2,
    defs: &DiceDefs,
    brains: &mut Query<&mut NpcBrain>,
) {
    let reversed = dice.direction.opposite();
    dice.direction = reversed;
    if let Ok(mut brain) = brains.get_mut(entity) {
        brain.desired_direction = reversed;
    }
    let def = defs.get(dice.kind);
    body.velocity = knockback_velocity(normal, dice.speed, def.knockback_power);
    dice.knockback = true;
}

/// Decrement health `hits` times (respecting iframes), arming iframes on a
/// survivable hit and transitioning to the dying phase on a fatal one.
fn apply_damage(
    entity: Entity,
    dice: &mut Dice,
    hits: u32,
    defs: &DiceDefs,
    phases: &mut Query<&mut Phase>,
    audio_cmds: &mut MessageWriter<AudioCmd>,
) {
    if dice.losing_life {
        return;
    }

    let mut died = false;
    for _ in 0..hits {
        if dice.lose_life() {
            died = true;
            break;
        }
    }

    if died {
        dice.is_dying = true;
        if let Ok(mut phase) = phases.get_mut(entity) {
            phase
                .transition_to(DYING_PHASE)
                .expect("dying phase must be registered on every dice");
        }
    } else {
        let def = defs.get(dice.kind);
        dice.start_iframes(def.iframe_duration);
        audio_cmds.write(AudioCmd::PlayFx { id: "hit".into() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn head_on_horizontal_pair_splits_correction() {
        // A at x=0 width=10 moving +50, B at x=8 width=10 moving -50:
        // penetration 2 on the x axis, split one unit each way.
        let mut a = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let mut b = Rect::new(8.0, 0.0, 10.0, 10.0).unwrap();
        let resolution = resolve_pair(
            &mut a,
            Vector2 { x: 50.0, y: 0.0 },
            true,
            &mut b,
            Vector2 { x: -50.0, y: 0.0 },
            true,
        )
        .unwrap();

        assert!(approx_eq(resolution.penetration, 2.0));
        assert_eq!(resolution.normal_a, Vector2 { x: -1.0, y: 0.0 });
        assert!(approx_eq(a.x, -1.0));
        assert!(approx_eq(b.x, 9.0));
        // Rects now touch and no longer intersect.
        assert!(!a.intersects(&b));
    }

    #[test]
    fn non_intersecting_pair_reports_none() {
        let mut a = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let mut b = Rect::new(20.0, 0.0, 10.0, 10.0).unwrap();
        let zero = Vector2 { x: 0.0, y: 0.0 };
        assert!(resolve_pair(&mut a, zero, true, &mut b, zero, true).is_none());
    }

    #[test]
    fn epsilon_deep_overlap_is_ignored() {
        let mut a = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let mut b = Rect::new(9.995, 0.0, 10.0, 10.0).unwrap();
        let zero = Vector2 { x: 0.0, y: 0.0 };
        assert!(resolve_pair(&mut a, zero, true, &mut b, zero, true).is_none());
        assert!(approx_eq(a.x, 0.0));
        assert!(approx_eq(b.x, 9.995));
    }

    #[test]
    fn axis_follows_relative_velocity_not_overlap() {
        // Deeper overlap on x than on y, but the pair approaches faster
        // vertically, so resolution happens on the y axis.
        let mut a = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let mut b = Rect::new(2.0, 7.0, 10.0, 10.0).unwrap();
        let resolution = resolve_pair(
            &mut a,
            Vector2 { x: 0.0, y: 80.0 },
            true,
            &mut b,
            Vector2 { x: 0.0, y: -80.0 },
            true,
        )
        .unwrap();
        assert_eq!(resolution.normal_a, Vector2 { x: 0.0, y: -1.0 });
        // Push magnitude is the global minimum penetration.
        assert!(approx_eq(resolution.penetration, 3.0));
    }

    #[test]
    fn single_dynamic_body_takes_full_correction() {
        let mut a = Rect::new(0.0, 0.0, 10.0, 10.0).unwrap();
        let mut b = Rect::new(8.0, 0.0, 10.0, 10.0).unwrap();
        let b_before = b;
        resolve_pair(
            &mut a,
            Vector2 { x: 50.0, y: 0.0 },
            true,
            &mut b,
            Vector2 { x: 0.0, y: 0.0 },
            false,
        )
        .unwrap();
        assert!(approx_eq(a.x, -2.0));
        assert_eq!(b, b_before);
    }

    #[test]
    fn knockback_velocity_points_along_normal() {
        let v = knockback_velocity(Vector2 { x: -1.0, y: 0.0 }, 100.0, 2.5);
        assert!(approx_eq(v.x, -250.0));
        assert!(approx_eq(v.y, 0.0));
    }
}
