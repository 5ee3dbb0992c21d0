//! Session configuration and its validation.
//!
//! A [`SessionConfig`] is the single owner of every tunable the simulation
//! reads, including the scroll speed handed to spawners. Values default to
//! the constants in [`crate::constants`] and can be overridden from JSON.

use clap::ValueEnum;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lane::LaneBounds;
use crate::spawner::SpawnerSettings;
use crate::{
    AVOID_BUFFER, COMPANION_SIZE, DEBUFF_SECONDS, DEFAULT_MASS, DESPAWN_Z, DRAG_RATE,
    FIXED_TIMESTEP, FORCE_GAIN, LEASH_LENGTH, MAX_FORCE, MAX_HEALTH, MAX_SPEED, SCROLL_SPEED,
    VELOCITY_GAIN, WALKER_SIZE,
};

/// Reasons a configuration is rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A scalar that must be strictly positive was not.
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied.
        value: f32,
    },
    /// A scalar that must be finite was not.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied.
        value: f32,
    },
    /// Lane bounds are empty, inverted or not finite.
    #[error("lane minimum {min} must be finite and below maximum {max}")]
    InvertedLane {
        /// Supplied minimum.
        min: f32,
        /// Supplied maximum.
        max: f32,
    },
    /// The force gain would overshoot the requested velocity in one step.
    #[error("force gain {gain} with mass {mass} overshoots at a {timestep}s step")]
    UnstableGain {
        /// Configured force gain.
        gain: f32,
        /// Configured mass.
        mass: f32,
        /// Configured fixed timestep.
        timestep: f32,
    },
    /// A run must start with some health.
    #[error("max_health must be at least 1")]
    NoHealth,
    /// The JSON document could not be parsed.
    #[error("failed to parse session configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Rejects `value` unless it is finite and strictly positive.
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn ensure_finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

/// Force-shaping constants and body properties of one agent.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentTuning {
    /// Maximum lateral speed.
    pub max_speed: f32,
    /// Distance-to-velocity factor.
    pub velocity_gain: f32,
    /// Velocity-error-to-force factor.
    pub force_gain: f32,
    /// Force magnitude cap.
    pub max_force: f32,
    /// Body mass.
    pub mass: f32,
    /// Bounding box size.
    pub size: Vec3,
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            velocity_gain: VELOCITY_GAIN,
            force_gain: FORCE_GAIN,
            max_force: MAX_FORCE,
            mass: DEFAULT_MASS,
            size: Vec3::ONE,
        }
    }
}

impl AgentTuning {
    /// Default tuning with the walker's bounding box.
    #[must_use]
    pub fn walker() -> Self {
        Self {
            size: Vec3::from_array(WALKER_SIZE),
            ..Self::default()
        }
    }

    /// Default tuning with the companion's bounding box.
    #[must_use]
    pub fn companion() -> Self {
        Self {
            size: Vec3::from_array(COMPANION_SIZE),
            ..Self::default()
        }
    }

    /// Checks every scalar is positive and the box is non-degenerate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("max_speed", self.max_speed)?;
        ensure_positive("velocity_gain", self.velocity_gain)?;
        ensure_positive("force_gain", self.force_gain)?;
        ensure_positive("max_force", self.max_force)?;
        ensure_positive("mass", self.mass)?;
        ensure_positive("size.x", self.size.x)?;
        ensure_positive("size.z", self.size.z)?;
        Ok(())
    }
}

/// Every tunable of a chase session.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lane the agents are confined to.
    pub lane: LaneBounds,
    /// Walker tuning.
    pub walker: AgentTuning,
    /// Companion tuning.
    pub companion: AgentTuning,
    /// Separation beyond which the leash is taut.
    pub leash_length: f32,
    /// Per-frame drag advance.
    pub drag_rate: f32,
    /// Clearance added when escaping an obstacle.
    pub avoid_buffer: f32,
    /// Fixed physics step in seconds.
    pub fixed_timestep: f32,
    /// Speed at which spawned objects approach.
    pub scroll_speed: f32,
    /// Duration of the inverted-controls debuff.
    pub debuff_seconds: f32,
    /// Objects below this z are deactivated.
    pub despawn_z: f32,
    /// Cadence and placement of spawned objects.
    pub spawner: SpawnerSettings,
    /// Health the walker starts with.
    pub max_health: u32,
}

/// Preset pace of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Slow scrolling with a gentle spawn rate.
    Tutorial,
    /// Slow scrolling, sparse obstacles.
    #[default]
    Easy,
    /// Double speed.
    Normal,
    /// Triple speed with dense obstacles.
    Hard,
}

impl Difficulty {
    /// Scroll speed of spawned objects.
    #[must_use]
    pub const fn scroll_speed(self) -> f32 {
        match self {
            Self::Tutorial | Self::Easy => 2.0,
            Self::Normal => 4.0,
            Self::Hard => 6.0,
        }
    }

    /// Seconds between two spawns.
    #[must_use]
    pub const fn spawn_interval(self) -> f32 {
        match self {
            Self::Tutorial | Self::Normal => 2.0,
            Self::Easy => 4.0,
            Self::Hard => 0.8,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lane: LaneBounds::default(),
            walker: AgentTuning::walker(),
            companion: AgentTuning::companion(),
            leash_length: LEASH_LENGTH,
            drag_rate: DRAG_RATE,
            avoid_buffer: AVOID_BUFFER,
            fixed_timestep: FIXED_TIMESTEP,
            scroll_speed: SCROLL_SPEED,
            debuff_seconds: DEBUFF_SECONDS,
            despawn_z: DESPAWN_Z,
            spawner: SpawnerSettings::default(),
            max_health: MAX_HEALTH,
        }
    }
}

impl SessionConfig {
    /// Default configuration paced for `difficulty`.
    ///
    /// # Examples
    /// ```
    /// use leashline::config::{Difficulty, SessionConfig};
    /// let config = SessionConfig::for_difficulty(Difficulty::Hard);
    /// assert!((config.scroll_speed - 6.0).abs() < f32::EPSILON);
    /// ```
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        Self::default().with_difficulty(difficulty)
    }

    /// Replaces the scroll speed and spawn interval with `difficulty`'s.
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.scroll_speed = difficulty.scroll_speed();
        self.spawner.interval = difficulty.spawn_interval();
        self
    }

    /// Parses and validates a JSON document. Missing fields keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or any validation
    /// error from [`SessionConfig::validate`].
    ///
    /// # Examples
    /// ```
    /// use leashline::SessionConfig;
    /// let config = SessionConfig::from_json_str(r#"{ "leash_length": 1.5 }"#).unwrap();
    /// assert!((config.leash_length - 1.5).abs() < f32::EPSILON);
    /// assert!(SessionConfig::from_json_str(r#"{ "leash_length": 0 }"#).is_err());
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the whole configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.lane.validate()?;
        self.walker.validate()?;
        self.companion.validate()?;
        ensure_positive("leash_length", self.leash_length)?;
        ensure_positive("drag_rate", self.drag_rate)?;
        ensure_positive("fixed_timestep", self.fixed_timestep)?;
        ensure_positive("scroll_speed", self.scroll_speed)?;
        ensure_finite("avoid_buffer", self.avoid_buffer)?;
        ensure_finite("debuff_seconds", self.debuff_seconds)?;
        ensure_finite("despawn_z", self.despawn_z)?;
        self.spawner.validate()?;
        if self.max_health == 0 {
            return Err(ConfigError::NoHealth);
        }
        for tuning in [&self.walker, &self.companion] {
            if tuning.force_gain * self.fixed_timestep / tuning.mass > 1.0 {
                return Err(ConfigError::UnstableGain {
                    gain: tuning.force_gain,
                    mass: tuning.mass,
                    timestep: self.fixed_timestep,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case::leash(r#"{ "leash_length": -1.0 }"#, "leash_length")]
    #[case::speed(r#"{ "companion": { "max_speed": 0.0 } }"#, "max_speed")]
    #[case::timestep(r#"{ "fixed_timestep": 0.0 }"#, "fixed_timestep")]
    fn non_positive_fields_are_named(#[case] json: &str, #[case] expected: &str) {
        match SessionConfig::from_json_str(json) {
            Err(ConfigError::NonPositive { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected NonPositive for {expected}, got {other:?}"),
        }
    }

    #[test]
    fn coarse_timestep_is_unstable() {
        let result = SessionConfig::from_json_str(r#"{ "fixed_timestep": 0.5 }"#);
        assert!(matches!(result, Err(ConfigError::UnstableGain { .. })));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = SessionConfig::from_json_str("{ leash_length: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn nested_defaults_survive_partial_override() {
        let config = SessionConfig::from_json_str(r#"{ "walker": { "max_speed": 4.0 } }"#)
            .unwrap_or_else(|e| panic!("config should parse: {e}"));
        assert!((config.walker.max_speed - 4.0).abs() < f32::EPSILON);
        assert!((config.walker.force_gain - FORCE_GAIN).abs() < f32::EPSILON);
        assert_eq!(config.lane, LaneBounds::default());
    }

    #[rstest]
    #[case::tutorial(Difficulty::Tutorial, 2.0, 2.0)]
    #[case::easy(Difficulty::Easy, 2.0, 4.0)]
    #[case::normal(Difficulty::Normal, 4.0, 2.0)]
    #[case::hard(Difficulty::Hard, 6.0, 0.8)]
    fn difficulty_sets_pace(
        #[case] difficulty: Difficulty,
        #[case] speed: f32,
        #[case] interval: f32,
    ) {
        let config = SessionConfig::for_difficulty(difficulty);
        assert!((config.scroll_speed - speed).abs() < f32::EPSILON);
        assert!((config.spawner.interval - interval).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn difficulty_reads_from_json() {
        let difficulty: Difficulty = serde_json::from_str(r#""hard""#)
            .unwrap_or_else(|e| panic!("difficulty should parse: {e}"));
        assert_eq!(difficulty, Difficulty::Hard);
    }

    #[test]
    fn zero_health_is_rejected() {
        let result = SessionConfig::from_json_str(r#"{ "max_health": 0 }"#);
        assert!(matches!(result, Err(ConfigError::NoHealth)));
    }
}
