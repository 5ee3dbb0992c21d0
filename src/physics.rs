//! Physics helper functions.
//!
//! Provides the rigid body used by both agents and the integration step
//! that turns a controller force into motion. Integration is
//! semi-implicit Euler: velocity first, then position from the new
//! velocity.

use glam::Vec3;

use crate::DEFAULT_MASS;

/// Smallest acceptable mass to avoid numerically unstable accelerations.
const MIN_MASS: f32 = 1e-6;

/// Computes acceleration from a force vector and optional mass.
///
/// Returns `None` if `mass` is non-positive or effectively zero (see
/// [`MIN_MASS`]). When `mass` is `None` the [`DEFAULT_MASS`] constant is
/// used.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use leashline::applied_acceleration;
/// let accel = applied_acceleration(Vec3::new(6.0, 0.0, -3.0), Some(3.0)).unwrap();
/// assert!((accel - Vec3::new(2.0, 0.0, -1.0)).length() < 1e-6);
/// assert!(applied_acceleration(Vec3::X, Some(0.0)).is_none());
/// ```
#[must_use]
pub fn applied_acceleration(force: Vec3, mass: Option<f32>) -> Option<Vec3> {
    match mass {
        Some(m) if m > MIN_MASS => Some(force / m),
        Some(_) => None,
        None => Some(force / DEFAULT_MASS),
    }
}

/// A point mass with an axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Centre of the body.
    pub position: Vec3,
    /// Current velocity.
    pub velocity: Vec3,
    /// Mass used to convert force into acceleration.
    pub mass: f32,
    /// Full extent of the bounding box along each axis.
    pub size: Vec3,
}

impl Body {
    /// Creates a resting body at `position`.
    #[must_use]
    pub const fn new(position: Vec3, mass: f32, size: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            mass,
            size,
        }
    }

    /// Applies `force` for `dt` seconds.
    ///
    /// Bodies whose mass is rejected by [`applied_acceleration`] keep
    /// their velocity and simply drift.
    pub fn apply_force(&mut self, force: Vec3, dt: f32) {
        if let Some(accel) = applied_acceleration(force, Some(self.mass)) {
            self.velocity += accel * dt;
        }
        self.position += self.velocity * dt;
    }
}
