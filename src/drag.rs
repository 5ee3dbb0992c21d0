//! Pointer-hold gesture that drags the companion along the leash.
//!
//! While the pointer is held and moved away from the companion's side, the
//! drag position advances by a fixed amount every frame until it saturates
//! at the leash length. The position is frozen when the gesture ends and
//! stays readable until the next gesture moves it.
//!
//! The first qualifying frame of a gesture seeds the position from the
//! walker's live lateral coordinate, so the result depends on how many
//! frames the gesture spans rather than on the pointer delta alone.

use glam::Vec2;
use log::debug;

use crate::vector_math::Sign;

/// Phase of the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    /// No pointer hold in progress.
    #[default]
    Idle,
    /// Pointer held since `origin` was sampled.
    Dragging {
        /// Pointer position when the hold began.
        origin: Vec2,
        /// Whether the position still needs seeding from the walker.
        first_tug: bool,
    },
}

/// One frame of input for the gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSample {
    /// Whether the pointer is held this frame.
    pub pointer_held: bool,
    /// Pointer position in screen space.
    pub pointer: Vec2,
    /// Walker's live lateral position.
    pub walker_x: f32,
    /// Side of the walker the companion is on.
    pub companion_direction: Sign,
    /// Leash length capping the drag.
    pub leash_length: f32,
}

/// Incremental drag position driven by a held pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragGesture {
    phase: DragPhase,
    position: f32,
    rate: f32,
}

impl DragGesture {
    /// Creates an idle gesture whose frozen position is `initial_position`.
    #[must_use]
    pub const fn new(rate: f32, initial_position: f32) -> Self {
        Self {
            phase: DragPhase::Idle,
            position: initial_position,
            rate,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Whether a gesture is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// Latest drag position, frozen while idle.
    #[must_use]
    pub const fn position(&self) -> f32 {
        self.position
    }

    /// Ends any gesture in progress, keeping the position.
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }

    /// Advances the state machine by one frame.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec2;
    /// use leashline::drag::{DragGesture, DragSample};
    /// use leashline::vector_math::Sign;
    /// let mut drag = DragGesture::new(0.5, 0.0);
    /// let mut sample = DragSample {
    ///     pointer_held: true,
    ///     pointer: Vec2::ZERO,
    ///     walker_x: 0.0,
    ///     companion_direction: Sign::Negative,
    ///     leash_length: 1.0,
    /// };
    /// drag.update(&sample);
    /// sample.pointer = Vec2::new(40.0, 0.0);
    /// for _ in 0..10 {
    ///     drag.update(&sample);
    /// }
    /// assert_eq!(drag.position(), 1.0);
    /// ```
    pub fn update(&mut self, sample: &DragSample) {
        match self.phase {
            DragPhase::Idle if sample.pointer_held => {
                debug!("drag gesture started at {:?}", sample.pointer);
                self.phase = DragPhase::Dragging {
                    origin: sample.pointer,
                    first_tug: true,
                };
                self.tug(sample);
            }
            DragPhase::Idle => {}
            DragPhase::Dragging { .. } if !sample.pointer_held => {
                debug!("drag gesture ended at {:.3}", self.position);
                self.phase = DragPhase::Idle;
            }
            DragPhase::Dragging { .. } => self.tug(sample),
        }
    }

    fn tug(&mut self, sample: &DragSample) {
        let DragPhase::Dragging { origin, first_tug } = &mut self.phase else {
            return;
        };
        let delta = sample.pointer.x - origin.x;
        let direction = Sign::of(delta);
        if delta == 0.0 || direction == sample.companion_direction {
            return;
        }
        if *first_tug {
            *first_tug = false;
            self.position = sample.walker_x;
        }
        let step = self.rate * direction.as_f32();
        let advanced = self.position + step;
        self.position = if advanced.abs() < sample.leash_length {
            advanced
        } else {
            sample.leash_length * direction.as_f32()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn sample(pointer_x: f32, held: bool, companion_direction: Sign) -> DragSample {
        DragSample {
            pointer_held: held,
            pointer: Vec2::new(pointer_x, 10.0),
            walker_x: 0.0,
            companion_direction,
            leash_length: 1.0,
        }
    }

    #[test]
    fn idle_without_pointer() {
        let mut drag = DragGesture::new(0.5, 0.3);
        drag.update(&sample(5.0, false, Sign::Zero));
        assert_eq!(drag.phase(), DragPhase::Idle);
        assert_relative_eq!(drag.position(), 0.3);
    }

    #[test]
    fn hold_without_movement_keeps_frozen_position() {
        let mut drag = DragGesture::new(0.5, 0.3);
        for _ in 0..5 {
            drag.update(&sample(12.0, true, Sign::Positive));
        }
        assert!(drag.is_dragging());
        assert_relative_eq!(drag.position(), 0.3);
    }

    #[test]
    fn first_tug_seeds_from_walker() {
        let mut drag = DragGesture::new(0.25, 9.0);
        drag.update(&sample(0.0, true, Sign::Positive));
        let mut tug = sample(-3.0, true, Sign::Positive);
        tug.walker_x = 0.5;
        drag.update(&tug);
        assert_relative_eq!(drag.position(), 0.25);
    }

    #[test]
    fn dragging_toward_companion_side_is_ignored() {
        let mut drag = DragGesture::new(0.5, 0.0);
        drag.update(&sample(0.0, true, Sign::Positive));
        drag.update(&sample(30.0, true, Sign::Positive));
        assert_relative_eq!(drag.position(), 0.0);
    }

    #[rstest]
    #[case::left(-50.0, -1.0)]
    #[case::right(50.0, 1.0)]
    fn saturates_at_leash_length(#[case] pointer_x: f32, #[case] expected: f32) {
        let mut drag = DragGesture::new(0.3, 0.0);
        drag.update(&sample(0.0, true, Sign::Zero));
        for _ in 0..20 {
            drag.update(&sample(pointer_x, true, Sign::Zero));
            assert!(drag.position().abs() <= 1.0);
        }
        assert_relative_eq!(drag.position(), expected);
    }

    #[test]
    fn release_freezes_position() {
        let mut drag = DragGesture::new(0.5, 0.0);
        drag.update(&sample(0.0, true, Sign::Negative));
        drag.update(&sample(5.0, true, Sign::Negative));
        drag.update(&sample(5.0, false, Sign::Negative));
        assert_eq!(drag.phase(), DragPhase::Idle);
        let frozen = drag.position();
        drag.update(&sample(100.0, false, Sign::Negative));
        assert_relative_eq!(drag.position(), frozen);
    }

    #[test]
    fn first_tug_saturates_in_absolute_coordinates() {
        let mut drag = DragGesture::new(0.5, 0.0);
        let mut offset = sample(0.0, true, Sign::Negative);
        offset.walker_x = 2.0;
        drag.update(&offset);
        offset.pointer.x = 3.0;
        drag.update(&offset);
        assert_relative_eq!(drag.position(), 1.0);
    }
}
