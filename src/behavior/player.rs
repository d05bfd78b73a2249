//! Player dice behavior: neutral movement, dash and phase.

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::behavior::living;
use crate::behavior::{DASH, NEUTRAL, PHASE};
use crate::components::phase::PhaseContext;
use crate::components::tint::Tint;
use crate::components::ttl::Ttl;
use crate::components::zindex::ZIndex;
use crate::events::audio::AudioCmd;
use crate::resources::input::InputState;

/// Render opacity while phasing.
const PHASE_OPACITY: f32 = 0.55;

/// Z index for dash ghost entities, just below the dice layer.
const GHOST_Z: i32 = 9;

/// Neutral state: read directional input, normalize diagonals, watch for
/// ability activation.
pub fn neutral_update(
    entity: Entity,
    _time: f32,
    _previous: Option<String>,
    ctx: &mut PhaseContext,
) -> Option<String> {
    let mut dice = ctx
        .dices
        .get_mut(entity)
        .expect("neutral state requires its owning dice entity");
    let mut body = ctx
        .rigid_bodies
        .get_mut(entity)
        .expect("player dice must have a rigid body");
    let mut animation = ctx
        .animations
        .get_mut(entity)
        .expect("player dice must have an animation");

    if living::knockback_update(&mut dice, &mut body, ctx.world_time.delta) {
        return None;
    }

    apply_movement_input(ctx.input, &mut body.velocity, dice.speed);
    living::refresh_facing(&mut dice, &body, &mut animation);

    let ability = ctx
        .abilities
        .get(entity)
        .expect("player dice must have a PlayerAbility");
    if ability.can_dash && ctx.input.action_dash.just_pressed {
        return Some(DASH.into());
    }
    if ability.can_phase && ctx.input.action_phase.just_pressed {
        return Some(PHASE.into());
    }
    None
}

/// Dash enter: multiply velocity by the dash power, mark dashing, play one
/// randomly chosen dash cue.
pub fn dash_enter(
    entity: Entity,
    _time: f32,
    _previous: Option<String>,
    ctx: &mut PhaseContext,
) -> Option<String> {
    let mut body = ctx
        .rigid_bodies
        .get_mut(entity)
        .expect("player dice must have a rigid body");
    let mut ability = ctx
        .abilities
        .get_mut(entity)
        .expect("player dice must have a PlayerAbility");

    body.velocity.x *= ability.dash_power;
    body.velocity.y *= ability.dash_power;
    ability.dashing = true;
    ability.ghost_timer = 0.0;
    ability.ghost_fade_left = ability.ghost_ttl;

    let cue = fastrand::u32(1..=3);
    ctx.audio_cmds.write(AudioCmd::PlayFx {
        id: format!("dash_{cue}"),
    });
    None
}

/// Dash update: decay velocity per axis toward base speed, trail ghosts,
/// and return to neutral once the last ghost has faded.
pub fn dash_update(
    entity: Entity,
    _time: f32,
    _previous: Option<String>,
    ctx: &mut PhaseContext,
) -> Option<String> {
    let dt = ctx.world_time.delta;

    let speed = {
        let mut dice = ctx
            .dices
            .get_mut(entity)
            .expect("dash state requires its owning dice entity");
        let body = ctx
            .rigid_bodies
            .get(entity)
            .expect("player dice must have a rigid body");
        let mut animation = ctx
            .animations
            .get_mut(entity)
            .expect("player dice must have an animation");
        living::refresh_facing(&mut dice, body, &mut animation);
        dice.speed
    };

    let mut ghost_due = false;
    let mut trail_finished = false;
    {
        let mut ability = ctx
            .abilities
            .get_mut(entity)
            .expect("player dice must have a PlayerAbility");
        if ability.dashing {
            // Trail a ghost snapshot every few hundredths of a second.
            ability.ghost_timer -= dt;
            if ability.ghost_timer <= 0.0 {
                ability.ghost_timer = ability.ghost_interval;
                ability.ghost_fade_left = ability.ghost_ttl;
                ghost_due = true;
            }

            let mut body = ctx
                .rigid_bodies
                .get_mut(entity)
                .expect("player dice must have a rigid body");
            let done = body.decay_toward_speed(speed, ability.dash_decel * dt);

            // Any fresh key press cancels the burst early.
            let cancelled = ctx.input.any_direction_just_pressed();
            if cancelled {
                body.velocity.x = body.velocity.x.clamp(-speed, speed);
                body.velocity.y = body.velocity.y.clamp(-speed, speed);
            }
            if done || cancelled {
                ability.dashing = false;
            }
        } else {
            // Dashing is over; hold the state until the trail has faded.
            ability.ghost_fade_left -= dt;
            if ability.ghost_fade_left <= 0.0 {
                trail_finished = true;
            }
        }
    }

    if ghost_due {
        spawn_ghost(entity, ctx);
    }
    if trail_finished {
        return Some(NEUTRAL.into());
    }
    None
}

/// Phase enter: become momentarily intangible.
pub fn phase_enter(
    entity: Entity,
    _time: f32,
    _previous: Option<String>,
    ctx: &mut PhaseContext,
) -> Option<String> {
    let mut dice = ctx
        .dices
        .get_mut(entity)
        .expect("phase state requires its owning dice entity");
    let mut ability = ctx
        .abilities
        .get_mut(entity)
        .expect("player dice must have a PlayerAbility");

    ability.phasing = true;
    dice.opacity = PHASE_OPACITY;
    ctx.audio_cmds.write(AudioCmd::PlayFx { id: "phase".into() });
    None
}

/// Phase update: keep moving, end the invulnerability window after its
/// fixed duration, then sit out the cooldown before returning to neutral.
pub fn phase_update(
    entity: Entity,
    time: f32,
    _previous: Option<String>,
    ctx: &mut PhaseContext,
) -> Option<String> {
    let mut dice = ctx
        .dices
        .get_mut(entity)
        .expect("phase state requires its owning dice entity");
    let mut body = ctx
        .rigid_bodies
        .get_mut(entity)
        .expect("player dice must have a rigid body");
    let mut animation = ctx
        .animations
        .get_mut(entity)
        .expect("player dice must have an animation");
    let mut ability = ctx
        .abilities
        .get_mut(entity)
        .expect("player dice must have a PlayerAbility");

    if !living::knockback_update(&mut dice, &mut body, ctx.world_time.delta) {
        apply_movement_input(ctx.input, &mut body.velocity, dice.speed);
        living::refresh_facing(&mut dice, &body, &mut animation);
    }

    if ability.phasing && time >= ability.phase_duration {
        ability.phasing = false;
        dice.opacity = 1.0;
    }
    if time >= ability.phase_duration + ability.phase_cooldown {
        return Some(NEUTRAL.into());
    }
    None
}

/// Phase exit: never leave the die intangible or translucent.
pub fn phase_exit(
    entity: Entity,
    _time: f32,
    _previous: Option<String>,
    ctx: &mut PhaseContext,
) -> Option<String> {
    if let Ok(mut ability) = ctx.abilities.get_mut(entity) {
        ability.phasing = false;
    }
    if let Ok(mut dice) = ctx.dices.get_mut(entity) {
        if !dice.losing_life {
            dice.opacity = 1.0;
        }
    }
    None
}

/// Translate held direction keys into a velocity, normalizing diagonal
/// movement to the same speed as cardinal movement.
fn apply_movement_input(input: &InputState, velocity: &mut Vector2, speed: f32) {
    let mut vx = 0.0;
    let mut vy = 0.0;
    if input.up() {
        vy -= speed;
    }
    if input.down() {
        vy += speed;
    }
    if input.left() {
        vx -= speed;
    }
    if input.right() {
        vx += speed;
    }
    if vx != 0.0 && vy != 0.0 {
        vx *= std::f32::consts::FRAC_1_SQRT_2;
        vy *= std::f32::consts::FRAC_1_SQRT_2;
    }
    velocity.x = vx;
    velocity.y = vy;
}

/// Spawn one dash ghost: a lightweight snapshot of the die's current
/// position and sprite frame that fades out via its TTL.
fn spawn_ghost(entity: Entity, ctx: &mut PhaseContext) {
    let Ok(position) = ctx.positions.get(entity) else {
        return;
    };
    let Ok(sprite) = ctx.sprites.get(entity) else {
        return;
    };
    let scale = ctx.scales.get(entity).copied().unwrap_or_default();
    let ttl = ctx
        .abilities
        .get(entity)
        .map(|a| a.ghost_ttl)
        .unwrap_or(0.3);

    ctx.commands.spawn((
        *position,
        sprite.clone(),
        scale,
        Tint::default(),
        Ttl::new(ttl),
        ZIndex(GHOST_Z),
    ));
}
