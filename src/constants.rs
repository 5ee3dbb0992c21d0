//! Game tuning constants used as configuration defaults.
//!
//! Distances are world units, speeds are units per second and timings are
//! seconds. [`crate::config::SessionConfig`] starts from these values and
//! may override any of them.

/// Lower lateral bound of the traversable lane.
pub const LANE_MIN_X: f32 = -3.0;
/// Upper lateral bound of the traversable lane.
pub const LANE_MAX_X: f32 = 3.0;

/// Maximum lateral speed of an agent.
pub const MAX_SPEED: f32 = 3.0;
/// Factor converting distance to target into a requested velocity.
pub const VELOCITY_GAIN: f32 = 2.5;
/// Factor converting velocity error into force.
pub const FORCE_GAIN: f32 = 5.0;
/// Upper bound on the force applied in a single physics step.
pub const MAX_FORCE: f32 = 20.0;
/// Mass used for both agents unless configured otherwise.
pub const DEFAULT_MASS: f32 = 1.0;

/// Lateral separation beyond which the leash is in tension.
pub const LEASH_LENGTH: f32 = 1.0;
/// Per-frame lateral advance of the drag position while a gesture is held.
pub const DRAG_RATE: f32 = 0.5;
/// Clearance added on either side of an obstacle when picking an escape.
pub const AVOID_BUFFER: f32 = 0.1;

/// Interval of the fixed physics step.
pub const FIXED_TIMESTEP: f32 = 0.02;
/// Speed at which spawned objects scroll toward the agents.
pub const SCROLL_SPEED: f32 = 2.0;
/// Duration of the inverted-controls debuff picked up from waste.
pub const DEBUFF_SECONDS: f32 = 3.0;
/// Objects scrolling below this z are deactivated.
pub const DESPAWN_Z: f32 = -2.0;
/// Health the walker starts each run with.
pub const MAX_HEALTH: u32 = 3;
/// Lateral margin around each agent ignored when a pole snags the leash.
pub const SNAG_MARGIN: f32 = 0.1;

/// Seconds between two obstacle spawns.
pub const SPAWN_INTERVAL: f32 = 1.5;
/// Seconds before the first obstacle spawn.
pub const SPAWN_START_DELAY: f32 = 2.0;
/// Scroll-axis coordinate new objects appear at.
pub const SPAWN_Z: f32 = 20.0;

/// Resting z position of the walker, behind the companion.
pub const WALKER_Z: f32 = -1.0;
/// Resting z position of the companion.
pub const COMPANION_Z: f32 = 0.0;
/// Bounding box of the walker.
pub const WALKER_SIZE: [f32; 3] = [0.5, 1.8, 0.5];
/// Bounding box of the companion.
pub const COMPANION_SIZE: [f32; 3] = [0.5, 0.5, 0.5];
