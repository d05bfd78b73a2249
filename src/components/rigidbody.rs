//! Rigid body component for dice and other movable entities.
//!
//! The [`RigidBody`] stores velocity, the dynamic/static distinction and the
//! surface normal of the last resolved collision. Static bodies never move,
//! regardless of velocity. The `frozen` flag temporarily suspends movement
//! for an otherwise dynamic body (e.g. while dying).
//!
//! The collision systems write `last_collision_normal`; behavior code calls
//! [`RigidBody::cancel_velocity_along_normal`] afterwards so entities slide
//! along walls instead of sticking to them.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Movable or static body with velocity and collision bookkeeping.
#[derive(Component, Clone, Debug)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vector2,
    /// Static bodies are never integrated or pushed out.
    pub dynamic: bool,
    /// When true, the movement system skips this body entirely.
    pub frozen: bool,
    /// Unit axis normal of the last collision, zero when not colliding.
    pub last_collision_normal: Vector2,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new_dynamic()
    }
}

impl RigidBody {
    /// Create a dynamic body at rest.
    pub fn new_dynamic() -> Self {
        Self {
            velocity: Vector2 { x: 0.0, y: 0.0 },
            dynamic: true,
            frozen: false,
            last_collision_normal: Vector2 { x: 0.0, y: 0.0 },
        }
    }

    /// Create a static body. It participates in collisions but never moves.
    pub fn new_static() -> Self {
        Self {
            dynamic: false,
            ..Self::new_dynamic()
        }
    }

    /// Reset the recorded collision normal to zero.
    pub fn clear_collision_normal(&mut self) {
        self.last_collision_normal = Vector2 { x: 0.0, y: 0.0 };
    }

    /// Record a collision normal.
    pub fn set_collision_normal(&mut self, normal: Vector2) {
        self.last_collision_normal = normal;
    }

    /// Remove the velocity component pointing into the last collision
    /// surface, leaving any tangential (sliding) component untouched.
    ///
    /// No-op when there is no recorded normal or the body is already moving
    /// away from the surface.
    pub fn cancel_velocity_along_normal(&mut self) {
        let n = self.last_collision_normal;
        if n.x == 0.0 && n.y == 0.0 {
            return;
        }
        let inward = self.velocity.x * n.x + self.velocity.y * n.y;
        if inward < 0.0 {
            self.velocity.x -= n.x * inward;
            self.velocity.y -= n.y * inward;
        }
    }

    /// One clamp-toward-speed deceleration step on a single axis.
    ///
    /// If the axis speed exceeds `base`, subtract `step` without overshooting
    /// below `base`. Axes already at or under the base speed are unchanged.
    pub fn decay_axis_toward_speed(axis_velocity: f32, base: f32, step: f32) -> f32 {
        let magnitude = axis_velocity.abs();
        if magnitude <= base {
            return axis_velocity;
        }
        let clamped = (magnitude - step).max(base);
        clamped.copysign(axis_velocity)
    }

    /// Apply one deceleration step on both axes independently.
    ///
    /// Returns true once both axes are within the base speed, i.e. the decay
    /// has converged and the caller may clear its dash/knockback flag.
    pub fn decay_toward_speed(&mut self, base: f32, step: f32) -> bool {
        self.velocity.x = Self::decay_axis_toward_speed(self.velocity.x, base, step);
        self.velocity.y = Self::decay_axis_toward_speed(self.velocity.y, base, step);
        self.velocity.x.abs() <= base && self.velocity.y.abs() <= base
    }

    /// Freeze the body, preventing the movement system from updating it.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Unfreeze the body.
    pub fn unfreeze(&mut self) {
        self.frozen = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn static_body_is_not_dynamic() {
        let body = RigidBody::new_static();
        assert!(!body.dynamic);
        assert!(!body.frozen);
    }

    #[test]
    fn cancel_removes_only_inward_component() {
        let mut body = RigidBody::new_dynamic();
        body.velocity = Vector2 { x: 30.0, y: -12.0 };
        body.set_collision_normal(Vector2 { x: -1.0, y: 0.0 });
        body.cancel_velocity_along_normal();
        assert!(approx_eq(body.velocity.x, 0.0));
        assert!(approx_eq(body.velocity.y, -12.0));
    }

    #[test]
    fn cancel_keeps_outward_velocity() {
        let mut body = RigidBody::new_dynamic();
        body.velocity = Vector2 { x: -30.0, y: 5.0 };
        body.set_collision_normal(Vector2 { x: -1.0, y: 0.0 });
        body.cancel_velocity_along_normal();
        assert!(approx_eq(body.velocity.x, -30.0));
        assert!(approx_eq(body.velocity.y, 5.0));
    }

    #[test]
    fn cancel_without_normal_is_a_noop() {
        let mut body = RigidBody::new_dynamic();
        body.velocity = Vector2 { x: 7.0, y: 8.0 };
        body.cancel_velocity_along_normal();
        assert!(approx_eq(body.velocity.x, 7.0));
        assert!(approx_eq(body.velocity.y, 8.0));
    }

    #[test]
    fn decay_never_overshoots_base_speed() {
        assert!(approx_eq(
            RigidBody::decay_axis_toward_speed(-100.0, 60.0, 300.0),
            -60.0
        ));
        assert!(approx_eq(
            RigidBody::decay_axis_toward_speed(100.0, 60.0, 25.0),
            75.0
        ));
        // Already within base: untouched.
        assert!(approx_eq(
            RigidBody::decay_axis_toward_speed(-40.0, 60.0, 25.0),
            -40.0
        ));
    }

    #[test]
    fn decay_converges_in_finite_steps() {
        let mut body = RigidBody::new_dynamic();
        body.velocity = Vector2 { x: 500.0, y: -350.0 };
        let base = 80.0;
        let mut steps = 0;
        let mut last = body.velocity.x.abs().max(body.velocity.y.abs());
        loop {
            let done = body.decay_toward_speed(base, 30.0);
            let now = body.velocity.x.abs().max(body.velocity.y.abs());
            assert!(now <= last);
            last = now;
            steps += 1;
            if done {
                break;
            }
            assert!(steps < 100, "decay must terminate");
        }
        assert!(body.velocity.x.abs() <= base);
        assert!(body.velocity.y.abs() <= base);
    }
}
