//! A controlled body that chases a lateral setpoint.
use glam::Vec3;
use log::trace;

use crate::config::{AgentTuning, ConfigError};
use crate::controller::AxisController;
use crate::geometry::Extent;
use crate::lane::LaneBounds;
use crate::physics::Body;

/// Body, controller and the setpoint it is steered toward.
///
/// The target is rewritten every tick by whoever owns the agent; it is
/// only the controller's instantaneous setpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    /// Physical state.
    pub body: Body,
    /// Current setpoint. Only the lateral coordinate is acted on.
    pub target: Vec3,
    controller: AxisController,
}

impl Agent {
    /// Creates an agent resting at `position` with its target on itself.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigError`] from invalid tuning.
    pub fn new(position: Vec3, tuning: &AgentTuning) -> Result<Self, ConfigError> {
        let controller = AxisController::new(tuning)?;
        Ok(Self {
            body: Body::new(position, tuning.mass, tuning.size),
            target: position,
            controller,
        })
    }

    /// Current centre.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.body.position
    }

    /// Current lateral coordinate.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.body.position.x
    }

    /// Maximum lateral speed.
    #[must_use]
    pub const fn max_speed(&self) -> f32 {
        self.controller.max_speed()
    }

    /// Current bounding box.
    #[must_use]
    pub fn extent(&self) -> Extent {
        Extent::from_centre(self.body.position, self.body.size)
    }

    /// Retargets the agent onto its own position.
    pub fn hold(&mut self) {
        self.target = self.body.position;
    }

    /// Sets only the lateral coordinate of the target.
    pub fn set_target_x(&mut self, x: f32) {
        self.target.x = x;
    }

    /// Restricts the target to the lane.
    pub fn clamp_target(&mut self, lane: &LaneBounds) {
        self.target = lane.clamp_target(self.target);
    }

    /// Applies one controller force for `dt` seconds.
    pub fn physics_step(&mut self, dt: f32) {
        let force = self
            .controller
            .force(self.target, self.body.position, self.body.velocity);
        self.body.apply_force(force, dt);
        trace!(
            "agent at {:.3} -> {:.3}, v {:.3}, f {:.3}",
            self.body.position.x,
            self.target.x,
            self.body.velocity.x,
            force.x
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn agent_at(x: f32) -> Agent {
        Agent::new(Vec3::new(x, 0.0, 0.0), &AgentTuning::default())
            .unwrap_or_else(|e| panic!("default tuning should be valid: {e}"))
    }

    #[test]
    fn walks_towards_target() {
        let mut agent = agent_at(0.0);
        agent.set_target_x(2.0);
        for _ in 0..250 {
            agent.physics_step(0.02);
        }
        assert_relative_eq!(agent.x(), 2.0, epsilon = 1e-3);
        assert_relative_eq!(agent.body.position.y, 0.0);
        assert_relative_eq!(agent.body.position.z, 0.0);
    }

    #[test]
    fn stationary_when_at_target() {
        let mut agent = agent_at(1.0);
        agent.physics_step(0.02);
        assert_relative_eq!(agent.x(), 1.0);
        assert_relative_eq!(agent.body.velocity.x, 0.0);
    }

    #[test]
    fn clamp_target_respects_lane() {
        let mut agent = agent_at(0.0);
        agent.set_target_x(-8.0);
        agent.clamp_target(&LaneBounds::default());
        assert_relative_eq!(agent.target.x, -3.0);
    }
}
