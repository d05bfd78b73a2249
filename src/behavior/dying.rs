//! The terminal dying state.
//!
//! Entering it plays the death cue, freezes the body and starts the
//! one-shot death animation. When that animation completes, the die is
//! flagged fully dead and the lifecycle system prunes it on the next pass.
//! There are no transitions out.

use bevy_ecs::prelude::*;

use crate::behavior::living;
use crate::components::phase::PhaseContext;
use crate::events::audio::AudioCmd;

pub fn dying_enter(
    entity: Entity,
    _time: f32,
    _previous: Option<String>,
    ctx: &mut PhaseContext,
) -> Option<String> {
    let kind = {
        let mut dice = ctx
            .dices
            .get_mut(entity)
            .expect("dying state requires its owning dice entity");
        dice.is_dying = true;
        dice.knockback = false;
        dice.losing_life = false;
        dice.opacity = 1.0;
        dice.kind
    };

    {
        let mut body = ctx
            .rigid_bodies
            .get_mut(entity)
            .expect("dying dice must have a rigid body");
        body.velocity.x = 0.0;
        body.velocity.y = 0.0;
        body.clear_collision_normal();
        body.freeze();
    }

    {
        let mut animation = ctx
            .animations
            .get_mut(entity)
            .expect("dying dice must have an animation");
        animation.play(living::death_key(kind));
    }

    ctx.audio_cmds.write(AudioCmd::PlayFx { id: "die".into() });
    None
}

pub fn dying_update(
    entity: Entity,
    _time: f32,
    _previous: Option<String>,
    ctx: &mut PhaseContext,
) -> Option<String> {
    let finished = ctx
        .animations
        .get(entity)
        .map(|animation| animation.finished)
        .unwrap_or(true);
    if finished {
        let mut dice = ctx
            .dices
            .get_mut(entity)
            .expect("dying state requires its owning dice entity");
        dice.is_dead = true;
    }
    None
}
