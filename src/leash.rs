//! Leash coupling between the walker and the companion.
//!
//! [`Leash::update`] recomputes tension and the companion's side of the
//! walker once per physics step. The two pull functions decide which agent
//! gets dragged along: whoever is moving away along a taut leash overrides
//! the other's target, so both never fight for control at once.

use crate::config::{ensure_positive, ConfigError};
use crate::vector_math::Sign;

/// Tension state of the leash joining the two agents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leash {
    length: f32,
    tension: bool,
    direction: Sign,
}

impl Leash {
    /// Creates a slack leash.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] unless `length` is positive and
    /// finite.
    pub fn new(length: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            length: ensure_positive("leash_length", length)?,
            tension: false,
            direction: Sign::Zero,
        })
    }

    /// Maximum slack separation.
    #[must_use]
    pub const fn length(&self) -> f32 {
        self.length
    }

    /// Whether the leash is taut.
    #[must_use]
    pub const fn in_tension(&self) -> bool {
        self.tension
    }

    /// Side of the walker the companion is on.
    #[must_use]
    pub const fn direction(&self) -> Sign {
        self.direction
    }

    /// Recomputes tension and direction from live positions.
    ///
    /// The leash is taut while the pointer is held or while the lateral
    /// separation exceeds its length.
    ///
    /// # Examples
    /// ```
    /// use leashline::Leash;
    /// use leashline::vector_math::Sign;
    /// let mut leash = Leash::new(1.0).unwrap();
    /// leash.update(0.0, -1.5, false);
    /// assert!(leash.in_tension());
    /// assert_eq!(leash.direction(), Sign::Negative);
    /// leash.update(0.0, 0.5, false);
    /// assert!(!leash.in_tension());
    /// ```
    pub fn update(&mut self, walker_x: f32, companion_x: f32, pointer_held: bool) {
        let separation = companion_x - walker_x;
        self.tension = pointer_held || separation.abs() > self.length;
        self.direction = Sign::of(separation);
    }

    /// Forces the leash slack, as on a fresh session.
    pub fn slacken(&mut self) {
        self.tension = false;
        self.direction = Sign::Zero;
    }
}

/// Inputs to the walker-side pull decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkerPull {
    /// Walker's effective horizontal input.
    pub horizontal: f32,
    /// Whether a drag gesture is in progress.
    pub dragging: bool,
    /// Companion's live lateral position.
    pub companion_x: f32,
    /// Companion's current lateral target.
    pub companion_target_x: f32,
}

/// Lateral target the walker is pulled to, if the companion is pulling.
///
/// The walker follows when it has no input of its own, no gesture is in
/// progress, the leash is taut and the companion is heading anywhere other
/// than back toward the walker.
#[must_use]
pub fn walker_pull_target(leash: &Leash, pull: &WalkerPull) -> Option<f32> {
    let heading = pull.companion_target_x - pull.companion_x;
    let pulled = pull.horizontal == 0.0
        && !pull.dragging
        && leash.in_tension()
        && heading != 0.0
        && leash.direction().flipped() != Sign::of(heading);
    pulled.then_some(pull.companion_x)
}

/// Inputs to the companion-side pull decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompanionPull {
    /// Walker's effective horizontal input.
    pub horizontal: f32,
    /// Whether the pointer is held.
    pub pointer_held: bool,
    /// Walker's live lateral position.
    pub walker_x: f32,
    /// Position produced by the drag gesture interpreter.
    pub drag_x: f32,
}

/// Lateral target the companion is pulled to, if the walker is pulling.
///
/// Walking away from the companion along a taut leash snaps its target onto
/// the walker. While the pointer is held the leash always counts as taut,
/// and without walking input the drag position is used instead.
#[must_use]
pub fn companion_pull_target(leash: &Leash, pull: &CompanionPull) -> Option<f32> {
    let walking_away = pull.horizontal != 0.0 && leash.direction() != Sign::of(pull.horizontal);
    if pull.pointer_held {
        if walking_away {
            Some(pull.walker_x)
        } else {
            Some(pull.drag_x)
        }
    } else if walking_away && leash.in_tension() {
        Some(pull.walker_x)
    } else {
        None
    }
}
