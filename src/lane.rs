//! Lateral bounds of the traversable lane.
//!
//! Every candidate target position passes through [`LaneBounds::clamp_target`]
//! before it reaches an axis controller.
use glam::Vec3;
use serde::Deserialize;

use crate::config::ConfigError;
use crate::{LANE_MAX_X, LANE_MIN_X};

/// Closed lateral interval `[min, max]` agents may target.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct LaneBounds {
    /// Lowest permitted lateral coordinate.
    pub min: f32,
    /// Highest permitted lateral coordinate.
    pub max: f32,
}

impl Default for LaneBounds {
    fn default() -> Self {
        Self {
            min: LANE_MIN_X,
            max: LANE_MAX_X,
        }
    }
}

impl LaneBounds {
    /// Creates validated bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvertedLane`] unless both bounds are finite
    /// and `min < max`.
    pub fn new(min: f32, max: f32) -> Result<Self, ConfigError> {
        let lane = Self { min, max };
        lane.validate()?;
        Ok(lane)
    }

    /// Checks the invariant `min < max` on deserialised bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvertedLane`] when the interval is empty or
    /// not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min.is_finite() && self.max.is_finite() && self.min < self.max {
            Ok(())
        } else {
            Err(ConfigError::InvertedLane {
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Clamps a lateral coordinate into the lane.
    ///
    /// # Examples
    /// ```
    /// use leashline::LaneBounds;
    /// let lane = LaneBounds::default();
    /// assert_eq!(lane.clamp(7.5), 3.0);
    /// assert_eq!(lane.clamp(-0.5), -0.5);
    /// ```
    #[must_use]
    pub fn clamp(&self, x: f32) -> f32 {
        if x > self.max {
            self.max
        } else if x < self.min {
            self.min
        } else {
            x
        }
    }

    /// Clamps only the lateral coordinate of a target position.
    #[must_use]
    pub fn clamp_target(&self, target: Vec3) -> Vec3 {
        Vec3::new(self.clamp(target.x), target.y, target.z)
    }

    /// Whether `x` lies inside the lane.
    #[must_use]
    pub fn contains(&self, x: f32) -> bool {
        x >= self.min && x <= self.max
    }
}
