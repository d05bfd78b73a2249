//! Group entity counting system.
//!
//! Counts entities belonging to tracked groups and publishes the counts on
//! the [`TrackedGroups`] resource. The game flow reads them each frame:
//! zero live "targets" means the player won, zero "player" means the run is
//! over.
//!
//! Groups with zero entities are reported as `0`, which is exactly the
//! signal the win/lose check needs.

use crate::components::group::Group;
use crate::resources::group::TrackedGroups;
use bevy_ecs::prelude::*;

use rustc_hash::FxHashMap;

/// Count entities for each tracked group and publish the totals.
pub fn update_group_counts_system(
    query_group: Query<&Group>,
    mut tracked_groups: ResMut<TrackedGroups>,
) {
    let mut counts: FxHashMap<String, i32> = FxHashMap::default();
    for group in query_group.iter() {
        if tracked_groups.has_group(group.name()) {
            *counts.entry(group.name().to_string()).or_insert(0) += 1;
        }
    }

    // Publish all tracked groups, including zeros for emptied rosters.
    let names: Vec<String> = tracked_groups.iter().cloned().collect();
    for name in names {
        let count = counts.get(&name).copied().unwrap_or(0);
        tracked_groups.set_count(&name, count);
    }
}
