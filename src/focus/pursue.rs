//! Chasing a seek-class object when it can be reached in time.
use log::trace;

use super::{CompanionView, FocusObject, TargetCommand};
use crate::entity::FocusClass;

/// State of the pursuit routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PursuitState {
    /// The object is out of reach; the previous target stands.
    #[default]
    Holding,
    /// Steering onto the object's lateral position.
    Tracking,
    /// The object is no longer seek-class.
    Terminated,
}

/// Per-frame pursuit state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PursuitRoutine {
    state: PursuitState,
}

/// Seconds until the object's near edge reaches the companion's far edge.
///
/// Objects that are not scrolling never arrive and yield infinity.
#[must_use]
pub fn time_to_arrive(object: &FocusObject, companion: &CompanionView) -> f32 {
    let distance = (object.extent.min.z - companion.extent.max.z).abs();
    let speed = object.velocity.z.abs();
    if speed > f32::EPSILON && speed.is_finite() {
        distance / speed
    } else {
        f32::INFINITY
    }
}

/// Seconds the companion needs to match the object's lateral position.
#[must_use]
pub fn time_to_intercept(object: &FocusObject, companion: &CompanionView) -> f32 {
    (object.position.x - companion.x).abs() / companion.max_speed
}

/// Whether the companion can reach the object before it scrolls past.
///
/// An object that never arrives is not a pursuit candidate.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use leashline::entity::{ObjectId, ObjectTag};
/// use leashline::focus::{CompanionView, FocusObject};
/// use leashline::focus::pursue::is_reachable;
/// use leashline::geometry::Extent;
/// use leashline::LaneBounds;
/// let companion = CompanionView {
///     x: 0.0,
///     extent: Extent { min: Vec3::new(-0.25, 0.0, -0.5), max: Vec3::new(0.25, 0.0, 0.0) },
///     max_speed: 3.0,
///     lane: LaneBounds::default(),
///     avoid_buffer: 0.1,
/// };
/// let waste = FocusObject {
///     id: ObjectId(1),
///     tag: ObjectTag::Waste,
///     position: Vec3::new(2.0, 0.0, 4.2),
///     extent: Extent { min: Vec3::new(1.8, 0.0, 4.0), max: Vec3::new(2.2, 0.0, 4.4) },
///     velocity: Vec3::new(0.0, 0.0, -2.0),
///     contacted: false,
/// };
/// assert!(is_reachable(&waste, &companion));
/// ```
#[must_use]
pub fn is_reachable(object: &FocusObject, companion: &CompanionView) -> bool {
    let arrival = time_to_arrive(object, companion);
    arrival.is_finite() && time_to_intercept(object, companion) < arrival
}

impl PursuitRoutine {
    /// Starts a routine in the holding state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: PursuitState::Holding,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> PursuitState {
        self.state
    }

    /// Runs one frame against `object`.
    ///
    /// Reachability is re-evaluated every frame, so an object that starts
    /// out of reach can still be chased once its arrival time shrinks
    /// below the intercept time.
    pub fn step(&mut self, object: &FocusObject, companion: &CompanionView) -> TargetCommand {
        if self.state == PursuitState::Terminated
            || object.tag.focus_class() != Some(FocusClass::Seek)
        {
            self.state = PursuitState::Terminated;
            return TargetCommand::Unchanged;
        }

        if is_reachable(object, companion) {
            if self.state != PursuitState::Tracking {
                trace!("tracking {:?} at {:.3}", object.id, object.position.x);
            }
            self.state = PursuitState::Tracking;
            TargetCommand::SetX(object.position.x)
        } else {
            self.state = PursuitState::Holding;
            TargetCommand::Unchanged
        }
    }
}
