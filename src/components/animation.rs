//! Sprite animation playback state.
//!
//! An entity's [`Animation`] points at a definition in the
//! [`AnimationStore`](crate::resources::animationstore::AnimationStore) by
//! key. The animation system advances frames; one-shot animations raise
//! `finished` when their last frame completes, which is how the dying
//! behavior knows the death animation played through exactly once.

use bevy_ecs::prelude::Component;

/// Per-entity animation playback state.
#[derive(Debug, Clone, Component)]
pub struct Animation {
    /// Key into the animation store.
    pub key: String,
    /// Index of the frame currently shown.
    pub frame_index: usize,
    /// Seconds accumulated toward the next frame advance.
    pub elapsed: f32,
    /// Set once a non-looping animation has completed its single cycle.
    pub finished: bool,
}

impl Animation {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            frame_index: 0,
            elapsed: 0.0,
            finished: false,
        }
    }

    /// Switch to another animation, restarting playback only when the key
    /// actually changes. Re-playing the current key is a no-op so facing
    /// recomputation never restarts a running walk cycle.
    pub fn play(&mut self, key: impl Into<String>) {
        let key = key.into();
        if self.key == key {
            return;
        }
        self.key = key;
        self.frame_index = 0;
        self.elapsed = 0.0;
        self.finished = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_same_key_does_not_restart() {
        let mut anim = Animation::new("player_6_down");
        anim.frame_index = 3;
        anim.elapsed = 0.1;
        anim.play("player_6_down");
        assert_eq!(anim.frame_index, 3);
        assert_eq!(anim.elapsed, 0.1);
    }

    #[test]
    fn play_new_key_restarts() {
        let mut anim = Animation::new("player_6_down");
        anim.frame_index = 3;
        anim.finished = true;
        anim.play("player_6_left");
        assert_eq!(anim.frame_index, 0);
        assert_eq!(anim.elapsed, 0.0);
        assert!(!anim.finished);
    }
}
