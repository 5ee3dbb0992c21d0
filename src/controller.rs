//! Force-feedback positional controller shared by both agents.
//!
//! The controller requests a velocity proportional to the remaining lateral
//! distance, capped at the agent's maximum speed, and converts the error
//! between that request and the current velocity into a capped force.
//! Far from the target it drives at full speed; close to it the request
//! shrinks and the agent eases in rather than stopping dead.

use glam::Vec3;

use crate::config::{AgentTuning, ConfigError};
use crate::vector_math::{clamp_length, lateral};

/// Validated gains of the lateral velocity-tracking loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisController {
    max_speed: f32,
    velocity_gain: f32,
    force_gain: f32,
    max_force: f32,
}

impl AxisController {
    /// Builds a controller from agent tuning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] if any gain or limit is zero,
    /// negative or not finite.
    pub fn new(tuning: &AgentTuning) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self {
            max_speed: tuning.max_speed,
            velocity_gain: tuning.velocity_gain,
            force_gain: tuning.force_gain,
            max_force: tuning.max_force,
        })
    }

    /// Maximum lateral speed the controller will request.
    #[must_use]
    pub const fn max_speed(&self) -> f32 {
        self.max_speed
    }

    /// Velocity requested for the current lateral distance to `target`.
    #[must_use]
    pub fn desired_velocity(&self, target: Vec3, position: Vec3) -> Vec3 {
        let distance = lateral(target - position);
        clamp_length(distance * self.velocity_gain, self.max_speed)
    }

    /// Force to apply this physics step.
    ///
    /// Only the lateral distance drives the request. The velocity error
    /// keeps all three axes so stray motion on the fixed axes is damped.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec3;
    /// use leashline::{AgentTuning, AxisController};
    /// let controller = AxisController::new(&AgentTuning::default()).unwrap();
    /// let force = controller.force(Vec3::new(10.0, 5.0, 5.0), Vec3::ZERO, Vec3::ZERO);
    /// // Full speed (3.0) requested, error * 5.0 = 15.0, under the 20.0 cap.
    /// assert!((force - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-5);
    /// ```
    #[must_use]
    pub fn force(&self, target: Vec3, position: Vec3, velocity: Vec3) -> Vec3 {
        let error = self.desired_velocity(target, position) - velocity;
        clamp_length(error * self.force_gain, self.max_force)
    }
}
