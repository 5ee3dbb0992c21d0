//! Core of a leash-bound chase between a walker and their companion.
//!
//! Two force-driven agents share a lane and are joined by a leash. The
//! walker follows player input; the companion works through a queue of
//! scrolling objects, dodging obstacles and chasing waste. A [`Session`]
//! owns one run and can be driven headless or through [`LeashChasePlugin`].
pub mod agent;
pub mod companion;
pub mod config;
pub mod constants;
pub mod controller;
pub mod drag;
pub mod entity;
pub mod focus;
pub mod geometry;
pub mod health;
pub mod input;
pub mod lane;
pub mod leash;
pub mod logging;
pub mod physics;
pub mod plugin;
pub mod session;
pub mod spawner;
pub mod vector_math;
pub mod walker;
pub mod world;
pub use constants::*;

pub use agent::Agent;
pub use companion::Companion;
pub use config::{AgentTuning, ConfigError, Difficulty, SessionConfig};
pub use controller::AxisController;
pub use drag::{DragGesture, DragPhase, DragSample};
pub use entity::{FocusClass, ObjectId, ObjectTag, WorldObject};
pub use focus::{FocusQueue, ObjectLookup, TargetCommand};
pub use health::Health;
pub use input::{InputSource, PlayerInput};
pub use lane::LaneBounds;
pub use leash::{companion_pull_target, walker_pull_target, Leash};
pub use logging::init as init_logging;
pub use physics::{applied_acceleration, Body};
pub use plugin::{ChaseOver, ChaseSession, LeashChasePlugin, ResetChase};
pub use session::{Session, SessionBuilder, Tally};
pub use spawner::{ObstacleSpawner, SpawnerSettings};
pub use vector_math::{clamp_length, Sign};
pub use walker::Walker;
pub use world::ObjectStore;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use leashline::prelude::*;
    //! ```

    pub use crate::input::{InputSource, PlayerInput};
    pub use crate::LaneBounds;
    pub use crate::LeashChasePlugin;
    pub use crate::ObjectTag;
    pub use crate::Session;
    pub use crate::SessionConfig;
    pub use crate::Tally;
}
