//! The dice entity component.
//!
//! Every acting entity in the arena is a die: the player die, the fleeing
//! target dice and the hostile enemy dice. [`Dice`] is the flat stats-and-
//! flags component shared by all three; kind-specific capabilities live in
//! their own components ([`PlayerAbility`](super::playerability::PlayerAbility),
//! [`NpcBrain`](super::npc::NpcBrain)).
//!
//! A die's current health is the face it shows, so losing a life also means
//! swapping the sprite to the next lower face.

use bevy_ecs::prelude::Component;

use crate::components::direction::Direction;

/// Entity kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiceKind {
    Player,
    Target,
    Enemy,
}

impl DiceKind {
    /// Lowercase label used for animation keys and logging.
    pub fn as_str(self) -> &'static str {
        match self {
            DiceKind::Player => "player",
            DiceKind::Target => "target",
            DiceKind::Enemy => "enemy",
        }
    }

    /// Group name used for roster counting.
    pub fn group_name(self) -> &'static str {
        match self {
            DiceKind::Player => "player",
            DiceKind::Target => "targets",
            DiceKind::Enemy => "enemies",
        }
    }

    pub fn is_npc(self) -> bool {
        !matches!(self, DiceKind::Player)
    }
}

/// Stats and lifecycle flags for one die.
#[derive(Component, Clone, Debug)]
pub struct Dice {
    pub kind: DiceKind,
    /// Current health; also the die face shown by the renderer.
    pub health: u32,
    pub total_health: u32,
    /// Base movement speed in world units per second.
    pub speed: f32,
    /// Render opacity, 0.0..=1.0. Alternates during the hit flicker.
    pub opacity: f32,
    /// Current discrete facing.
    pub direction: Direction,
    /// Set on entering the dying state; the die no longer interacts.
    pub is_dying: bool,
    /// Set when the death animation finished; pruned next pass.
    pub is_dead: bool,
    /// Set while knockback velocity is decaying back to base speed.
    pub knockback: bool,
    /// Invulnerability window after taking a hit.
    pub losing_life: bool,
    /// Seconds left on the invulnerability window.
    pub iframe_timer: f32,
}

impl Dice {
    pub fn new(kind: DiceKind, health: u32, speed: f32) -> Self {
        Self {
            kind,
            health,
            total_health: health,
            speed,
            opacity: 1.0,
            direction: Direction::Down,
            is_dying: false,
            is_dead: false,
            knockback: false,
            losing_life: false,
            iframe_timer: 0.0,
        }
    }

    /// Decrement health by exactly one, never below zero.
    ///
    /// Returns true exactly when this call brought health from 1 to 0, i.e.
    /// the die must transition to its dying state.
    pub fn lose_life(&mut self) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health -= 1;
        self.health == 0
    }

    /// Arm the post-hit invulnerability/flicker window.
    pub fn start_iframes(&mut self, duration: f32) {
        self.losing_life = true;
        self.iframe_timer = duration;
    }

    /// A die mid-death or fully dead takes no part in interactions.
    pub fn interactive(&self) -> bool {
        !self.is_dying && !self.is_dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lose_life_decrements_by_one() {
        let mut dice = Dice::new(DiceKind::Enemy, 3, 100.0);
        assert!(!dice.lose_life());
        assert_eq!(dice.health, 2);
        assert!(!dice.lose_life());
        assert_eq!(dice.health, 1);
    }

    #[test]
    fn lose_life_signals_death_exactly_at_zero() {
        let mut dice = Dice::new(DiceKind::Target, 1, 100.0);
        assert!(dice.lose_life());
        assert_eq!(dice.health, 0);
        // Never below zero, and no second death signal.
        assert!(!dice.lose_life());
        assert_eq!(dice.health, 0);
    }

    #[test]
    fn iframes_arm_flag_and_timer() {
        let mut dice = Dice::new(DiceKind::Player, 6, 120.0);
        dice.start_iframes(1.5);
        assert!(dice.losing_life);
        assert_eq!(dice.iframe_timer, 1.5);
    }

    #[test]
    fn dying_dice_are_not_interactive() {
        let mut dice = Dice::new(DiceKind::Enemy, 2, 100.0);
        assert!(dice.interactive());
        dice.is_dying = true;
        assert!(!dice.interactive());
    }
}
