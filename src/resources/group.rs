//! Tracked groups resource for entity counting.
//!
//! [`TrackedGroups`] names the groups whose populations the game watches and
//! stores the latest counts published by
//! [`update_group_counts_system`](crate::systems::group::update_group_counts_system).
//! The win/lose check reads these counts: no "targets" left means the player
//! won, no "player" left means the game is over.

use bevy_ecs::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

/// Set of tracked group names plus their latest entity counts.
#[derive(Debug, Clone, Resource, Default)]
pub struct TrackedGroups {
    groups: FxHashSet<String>,
    counts: FxHashMap<String, i32>,
}

impl TrackedGroups {
    /// Start tracking a group name.
    pub fn add_group(&mut self, group_name: impl Into<String>) {
        self.groups.insert(group_name.into());
    }

    /// Returns `true` if the given group name is being tracked.
    pub fn has_group(&self, group_name: impl AsRef<str>) -> bool {
        self.groups.contains(group_name.as_ref())
    }

    /// Latest published count for a tracked group. `None` until the counting
    /// system has run at least once for that group.
    pub fn count(&self, group_name: impl AsRef<str>) -> Option<i32> {
        self.counts.get(group_name.as_ref()).copied()
    }

    /// Publish a count. Called by the counting system.
    pub fn set_count(&mut self, group_name: impl AsRef<str>, count: i32) {
        if let Some(existing) = self.counts.get_mut(group_name.as_ref()) {
            *existing = count;
        } else {
            self.counts.insert(group_name.as_ref().to_string(), count);
        }
    }

    /// Iterator over all tracked group names.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.groups.iter()
    }

    /// Stop tracking everything and drop the published counts.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.counts.clear();
    }
}
