//! ECS components for entities.
//!
//! This module groups all component types that can be attached to entities
//! in the arena. Components define data such as position, collision, dice
//! stats, AI bookkeeping and rendering hints.
//!
//! Submodules overview:
//! - [`animation`] – sprite animation playback state with one-shot detection
//! - [`boxcollider`] – axis-aligned rectangular collider
//! - [`dice`] – stats and lifecycle flags shared by player/target/enemy dice
//! - [`direction`] – discrete 9-way facing with vision and wall tables
//! - [`group`] – tag component for grouping entities by name
//! - [`mapposition`] – world-space position (pivot) for an entity
//! - [`npc`] – wander/track AI bookkeeping for NPC dice
//! - [`persistent`] – marker for entities that survive scene cleanup
//! - [`phase`] – per-entity finite state machine
//! - [`playerability`] – dash/phase ability flags and timers
//! - [`rigidbody`] – velocity, dynamic flag and last collision normal
//! - [`scale`] – 2D scale factor for sprites
//! - [`sprite`] – 2D sprite rendering component
//! - [`tint`] – color modulation for rendering
//! - [`ttl`] – countdown despawn used by dash ghosts
//! - [`zindex`] – rendering order hint for 2D drawing

pub mod animation;
pub mod boxcollider;
pub mod dice;
pub mod direction;
pub mod group;
pub mod mapposition;
pub mod npc;
pub mod persistent;
pub mod phase;
pub mod playerability;
pub mod rigidbody;
pub mod scale;
pub mod sprite;
pub mod tint;
pub mod ttl;
pub mod zindex;
