//! Simulation time resource.

use bevy_ecs::prelude::Resource;

/// Elapsed and per-frame simulation time, with a global time scale.
#[derive(Resource, Clone, Copy)]
pub struct WorldTime {
    /// Total scaled seconds since startup.
    pub elapsed: f32,
    /// Scaled delta of the current frame in seconds.
    pub delta: f32,
    /// Multiplier applied to incoming frame deltas.
    pub time_scale: f32,
    /// Number of completed frames.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            time_scale: 1.0,
            frame_count: 0,
        }
    }
}

impl WorldTime {
    pub fn with_time_scale(mut self, scale: f32) -> Self {
        self.time_scale = scale;
        self
    }
}
