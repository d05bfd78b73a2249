//! Typed dice definitions.
//!
//! One [`DiceDefinition`] per dice kind, with named, statically-typed fields
//! and explicit defaults. Definitions are loaded from `assets/dice.json`
//! when present; a missing file falls back to the compiled-in defaults so
//! the game always starts.

use bevy_ecs::prelude::Resource;
use log::warn;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::components::dice::DiceKind;

/// Errors loading the dice definition file.
#[derive(Debug, Error)]
pub enum DiceDefsError {
    #[error("failed to read dice definitions: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse dice definitions: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tuning values for one dice kind.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiceDefinition {
    /// Starting health, which is also the starting die face.
    pub health: u32,
    /// Base movement speed in world units per second.
    pub speed: f32,
    /// Render scale.
    pub scale: f32,
    /// Sprite footprint in pixels (square).
    pub sprite_size: f32,
    /// Added to the sprite footprint on each side to size the collider.
    pub collider_offset: f32,
    /// Wander period for NPCs, seconds between direction picks.
    pub wander_period: f32,
    /// Vision rectangle depth for NPCs.
    pub vision_range: f32,
    /// Speed multiplier while an enemy chases the player.
    pub chase_boost: f32,
    /// Seconds of post-hit invulnerability.
    pub iframe_duration: f32,
    /// Knockback impulse as a multiple of base speed.
    pub knockback_power: f32,
}

impl Default for DiceDefinition {
    fn default() -> Self {
        Self {
            health: 3,
            speed: 90.0,
            scale: 1.0,
            sprite_size: 32.0,
            collider_offset: -4.0,
            wander_period: 1.6,
            vision_range: 48.0,
            chase_boost: 1.35,
            iframe_duration: 1.2,
            knockback_power: 2.5,
        }
    }
}

/// All dice definitions, one per kind.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiceDefs {
    pub player: DiceDefinition,
    pub target: DiceDefinition,
    pub enemy: DiceDefinition,
}

impl Default for DiceDefs {
    fn default() -> Self {
        Self {
            player: DiceDefinition {
                health: 6,
                speed: 120.0,
                ..DiceDefinition::default()
            },
            target: DiceDefinition {
                health: 2,
                speed: 80.0,
                ..DiceDefinition::default()
            },
            enemy: DiceDefinition {
                health: 3,
                speed: 95.0,
                ..DiceDefinition::default()
            },
        }
    }
}

impl DiceDefs {
    /// Definition for a given kind.
    pub fn get(&self, kind: DiceKind) -> &DiceDefinition {
        match kind {
            DiceKind::Player => &self.player,
            DiceKind::Target => &self.target,
            DiceKind::Enemy => &self.enemy,
        }
    }

    /// Parse definitions from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DiceDefsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load definitions from a file, falling back to defaults when the file
    /// is absent. A present-but-malformed file is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, DiceDefsError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(
                "dice definitions not found at {}, using defaults",
                path.display()
            );
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_differ_per_kind() {
        let defs = DiceDefs::default();
        assert_eq!(defs.get(DiceKind::Player).health, 6);
        assert_eq!(defs.get(DiceKind::Target).health, 2);
        assert_eq!(defs.get(DiceKind::Enemy).health, 3);
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let defs = DiceDefs::from_json(r#"{ "enemy": { "speed": 140.0 } }"#).unwrap();
        assert_eq!(defs.enemy.speed, 140.0);
        // Fields missing inside "enemy" come from the per-kind default.
        assert_eq!(defs.enemy.health, DiceDefinition::default().health);
        // A wholly missing kind comes from the DiceDefs default.
        assert_eq!(defs.player.health, DiceDefs::default().player.health);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(DiceDefs::from_json("{ not json").is_err());
    }
}
