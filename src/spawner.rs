//! Timed spawning of obstacles, poles and waste into a session.
use glam::Vec3;
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::config::{ensure_positive, ConfigError};
use crate::entity::{ObjectId, ObjectTag};
use crate::session::Session;
use crate::{SPAWN_INTERVAL, SPAWN_START_DELAY, SPAWN_Z};

/// Timing and placement of spawned objects.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpawnerSettings {
    /// Seconds between spawns.
    pub interval: f32,
    /// Seconds before the first spawn.
    pub start_delay: f32,
    /// Scroll-axis coordinate objects appear at.
    pub spawn_z: f32,
}

impl Default for SpawnerSettings {
    fn default() -> Self {
        Self {
            interval: SPAWN_INTERVAL,
            start_delay: SPAWN_START_DELAY,
            spawn_z: SPAWN_Z,
        }
    }
}

impl SpawnerSettings {
    /// Checks the interval is positive and the delay is not negative.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] naming the bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("spawner.interval", self.interval)?;
        if !(self.start_delay.is_finite() && self.start_delay >= 0.0) {
            return Err(ConfigError::NonPositive {
                field: "spawner.start_delay",
                value: self.start_delay,
            });
        }
        if !self.spawn_z.is_finite() {
            return Err(ConfigError::NonFinite {
                field: "spawner.spawn_z",
                value: self.spawn_z,
            });
        }
        Ok(())
    }
}

/// Kinds of object the spawner picks from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnKind {
    /// Bench or planter.
    Obstacle,
    /// Light pole.
    Pole,
    /// Dog waste.
    Waste,
}

impl SpawnKind {
    /// Every kind, in pick order.
    pub const ALL: [Self; 3] = [Self::Obstacle, Self::Pole, Self::Waste];

    /// Tag the spawned object carries.
    #[must_use]
    pub const fn tag(self) -> ObjectTag {
        match self {
            Self::Obstacle => ObjectTag::Obstacle,
            Self::Pole => ObjectTag::Pole,
            Self::Waste => ObjectTag::Waste,
        }
    }

    /// Bounding box of the spawned object.
    #[must_use]
    pub const fn size(self) -> Vec3 {
        match self {
            Self::Obstacle => Vec3::new(1.0, 1.0, 1.0),
            Self::Pole => Vec3::new(0.3, 3.0, 0.3),
            Self::Waste => Vec3::new(0.4, 0.2, 0.4),
        }
    }
}

/// Drops a random object at a random lane position on a fixed cadence.
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    settings: SpawnerSettings,
    seed: u64,
    rng: StdRng,
    until_next: f32,
    spawned: u32,
}

impl ObstacleSpawner {
    /// Creates a spawner whose first object appears after the start delay.
    #[must_use]
    pub fn new(settings: SpawnerSettings, seed: u64) -> Self {
        Self {
            settings,
            seed,
            rng: StdRng::seed_from_u64(seed),
            until_next: settings.start_delay,
            spawned: 0,
        }
    }

    /// Rewinds to the state [`ObstacleSpawner::new`] produced.
    pub fn restart(&mut self) {
        *self = Self::new(self.settings, self.seed);
    }

    /// Seconds until the next spawn.
    #[must_use]
    pub const fn until_next(&self) -> f32 {
        self.until_next
    }

    /// Objects spawned so far.
    #[must_use]
    pub const fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Advances the timer by `dt`, spawning into `session` when it elapses.
    ///
    /// Returns the ids spawned during this call. Nothing spawns once the
    /// run is over.
    pub fn tick(&mut self, session: &mut Session, dt: f32) -> Vec<ObjectId> {
        let mut ids = Vec::new();
        if session.is_over() {
            return ids;
        }
        self.until_next -= dt;
        while self.until_next <= 0.0 {
            ids.push(self.spawn_one(session));
            self.until_next += self.settings.interval;
        }
        ids
    }

    /// Spawns one random object immediately.
    pub fn spawn_one(&mut self, session: &mut Session) -> ObjectId {
        let kind = SpawnKind::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(SpawnKind::Obstacle);
        let lane = session.config().lane;
        let x = self.rng.gen_range(lane.min..lane.max);
        let position = Vec3::new(x, 0.0, self.settings.spawn_z);
        let velocity = Vec3::new(0.0, 0.0, -session.config().scroll_speed);
        let id = session.spawn_object(kind.tag(), position, velocity, kind.size());
        self.spawned += 1;
        debug!("spawned {kind:?} as {id:?} at x {x:.2}");
        id
    }
}
