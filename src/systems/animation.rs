//! Animation playback system.
//!
//! Advances [`Animation`](crate::components::animation::Animation)
//! components based on elapsed time and updates the visible sprite frame.
//! Non-looping animations stay on their last frame and raise `finished`
//! exactly once, which the dying behavior consumes.
//!
//! # Animation Flow
//!
//! 1. Definitions live in [`AnimationStore`](crate::resources::animationstore::AnimationStore)
//! 2. Entities carry an [`Animation`] pointing at a key
//! 3. This system advances frames based on `fps` and rewrites the
//!    [`Sprite`](crate::components::sprite::Sprite) sheet offset
//! 4. Behavior code switches keys via [`Animation::play`]

use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;

use crate::components::animation::Animation;
use crate::components::mapposition::MapPosition;
use crate::components::sprite::Sprite;
use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance animation playback and update the sprite frame.
///
/// Contract
/// - Reads [`WorldTime`] for the scaled delta.
/// - Looks up animation data from [`AnimationStore`]; entities whose key is
///   unknown are left untouched (their sprite shows the last frame set).
/// - Mutates [`Animation`] playback state and the [`Sprite`] offset.
pub fn animation(
    mut query: Query<(&mut Animation, &mut Sprite), With<MapPosition>>,
    animation_store: Res<AnimationStore>,
    time: Res<WorldTime>,
) {
    for (mut anim, mut sprite) in query.iter_mut() {
        let Some(resource) = animation_store.get(&anim.key) else {
            continue;
        };

        if !anim.finished {
            anim.elapsed += time.delta;
            let frame_duration = 1.0 / resource.fps;
            while anim.elapsed >= frame_duration {
                anim.elapsed -= frame_duration;
                anim.frame_index += 1;
                if anim.frame_index >= resource.frame_count {
                    if resource.looped {
                        anim.frame_index = 0;
                    } else {
                        // One-shot: stay on the last frame, flag completion.
                        anim.frame_index = resource.frame_count - 1;
                        anim.finished = true;
                        break;
                    }
                }
            }
        }

        sprite.offset = Vector2 {
            x: resource.position.x + anim.frame_index as f32 * resource.displacement,
            y: resource.position.y,
        };
    }
}
