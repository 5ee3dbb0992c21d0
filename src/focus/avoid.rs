//! Steering the companion clear of an avoid-class object.
use log::debug;
use rand::Rng;

use super::{CompanionView, FocusObject, TargetCommand};
use crate::entity::FocusClass;

/// Side the companion escapes toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvoidSide {
    /// Past the obstacle's minimum edge.
    Left,
    /// Past the obstacle's maximum edge.
    Right,
}

/// State of the avoidance routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvoidState {
    /// Laterally clear of the obstacle; holding position.
    #[default]
    Clear,
    /// Overlapping and heading for the chosen side.
    Active(AvoidSide),
    /// The object is no longer avoid-class.
    Terminated,
}

/// Per-frame avoidance state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AvoidRoutine {
    state: AvoidState,
}

/// Lateral escape coordinates on both sides of an obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EscapePositions {
    /// Target that clears the obstacle's minimum edge.
    pub left: f32,
    /// Target that clears the obstacle's maximum edge.
    pub right: f32,
}

impl EscapePositions {
    /// Offsets the obstacle's edges by half the companion's width plus
    /// `buffer`.
    #[must_use]
    pub fn around(object: &FocusObject, companion: &CompanionView) -> Self {
        let half_width = companion.extent.width() * 0.5;
        Self {
            left: object.extent.min.x - half_width - companion.avoid_buffer,
            right: object.extent.max.x + half_width + companion.avoid_buffer,
        }
    }

    /// Picks a side, forced when one escape falls outside the lane.
    ///
    /// `coin_flip` is only consulted when both sides are reachable and
    /// returns `true` for left.
    pub fn choose(&self, companion: &CompanionView, coin_flip: impl FnOnce() -> bool) -> AvoidSide {
        if self.right >= companion.lane.max {
            AvoidSide::Left
        } else if self.left <= companion.lane.min {
            AvoidSide::Right
        } else if coin_flip() {
            AvoidSide::Left
        } else {
            AvoidSide::Right
        }
    }

    /// Lateral target for `side`.
    #[must_use]
    pub const fn target(&self, side: AvoidSide) -> f32 {
        match side {
            AvoidSide::Left => self.left,
            AvoidSide::Right => self.right,
        }
    }
}

impl AvoidRoutine {
    /// Starts a routine in the clear state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: AvoidState::Clear,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> AvoidState {
        self.state
    }

    /// Runs one frame against `object`.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        object: &FocusObject,
        companion: &CompanionView,
        rng: &mut R,
    ) -> TargetCommand {
        if self.state == AvoidState::Terminated
            || object.tag.focus_class() != Some(FocusClass::Avoid)
        {
            self.state = AvoidState::Terminated;
            return TargetCommand::Unchanged;
        }

        if !companion.extent.overlaps_lateral(&object.extent) {
            self.state = AvoidState::Clear;
            return TargetCommand::Hold;
        }

        if let AvoidState::Active(_) = self.state {
            return TargetCommand::Unchanged;
        }

        let escapes = EscapePositions::around(object, companion);
        let side = escapes.choose(companion, || rng.gen_bool(0.5));
        debug!(
            "avoiding {:?} to the {side:?} at {:.3}",
            object.id,
            escapes.target(side)
        );
        self.state = AvoidState::Active(side);
        TargetCommand::SetX(escapes.target(side))
    }
}
