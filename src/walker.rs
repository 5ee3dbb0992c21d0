//! The player-controlled walker.
use glam::Vec3;
use log::info;

use crate::agent::Agent;
use crate::config::{AgentTuning, ConfigError};
use crate::drag::DragGesture;
use crate::input::{effective_horizontal, PlayerInput};
use crate::lane::LaneBounds;

/// Walker agent with the input it acted on this frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Walker {
    /// Controlled body.
    pub agent: Agent,
    /// Drag gesture steering the companion.
    pub drag: DragGesture,
    horizontal: f32,
    pointer_held: bool,
    debuff_remaining: f32,
}

impl Walker {
    /// Creates a walker at `position` whose drag starts frozen at
    /// `companion_x`.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigError`] from invalid tuning.
    pub fn new(
        position: Vec3,
        tuning: &AgentTuning,
        drag_rate: f32,
        companion_x: f32,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            agent: Agent::new(position, tuning)?,
            drag: DragGesture::new(drag_rate, companion_x),
            horizontal: 0.0,
            pointer_held: false,
            debuff_remaining: 0.0,
        })
    }

    /// Effective horizontal input of the current frame.
    #[must_use]
    pub const fn horizontal(&self) -> f32 {
        self.horizontal
    }

    /// Whether the pointer is held this frame.
    #[must_use]
    pub const fn pointer_held(&self) -> bool {
        self.pointer_held
    }

    /// Whether controls are currently inverted.
    #[must_use]
    pub fn is_debuffed(&self) -> bool {
        self.debuff_remaining > 0.0
    }

    /// Seconds of debuff left.
    #[must_use]
    pub const fn debuff_remaining(&self) -> f32 {
        self.debuff_remaining
    }

    /// Inverts controls for `seconds`, restarting any debuff in progress.
    pub fn apply_debuff(&mut self, seconds: f32) {
        if seconds > 0.0 {
            info!("controls inverted for {seconds:.1}s");
            self.debuff_remaining = seconds;
        }
    }

    /// Restores normal controls immediately.
    pub fn clear_debuff(&mut self) {
        self.debuff_remaining = 0.0;
    }

    /// Records this frame's input and ticks the debuff down by `dt`.
    ///
    /// The debuff applies to the frame it is still active in, so a 3 s
    /// debuff inverts exactly the frames within those 3 s.
    pub fn read_input(&mut self, input: &PlayerInput, dt: f32) {
        self.horizontal = effective_horizontal(input.horizontal, self.is_debuffed());
        self.pointer_held = input.pointer_held;
        if self.is_debuffed() {
            self.debuff_remaining = (self.debuff_remaining - dt).max(0.0);
        }
    }

    /// Targets the lane edge the input points at, or holds position.
    pub fn apply_move_target(&mut self, lane: &LaneBounds) {
        if self.horizontal > 0.0 {
            self.agent.set_target_x(lane.max);
        } else if self.horizontal < 0.0 {
            self.agent.set_target_x(lane.min);
        } else {
            self.agent.hold();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn walker() -> Walker {
        Walker::new(Vec3::ZERO, &AgentTuning::walker(), 0.5, 0.0)
            .unwrap_or_else(|e| panic!("walker tuning should be valid: {e}"))
    }

    #[rstest]
    #[case::right(1.0, 3.0)]
    #[case::left(-0.3, -3.0)]
    #[case::idle(0.0, 0.0)]
    fn move_target_follows_input(#[case] horizontal: f32, #[case] expected: f32) {
        let mut walker = walker();
        walker.read_input(&PlayerInput::walking(horizontal), 0.02);
        walker.apply_move_target(&LaneBounds::default());
        assert_relative_eq!(walker.agent.target.x, expected);
    }

    #[test]
    fn debuff_inverts_then_expires() {
        let mut walker = walker();
        walker.apply_debuff(0.05);
        walker.read_input(&PlayerInput::walking(1.0), 0.02);
        assert_relative_eq!(walker.horizontal(), -1.0);
        for _ in 0..3 {
            walker.read_input(&PlayerInput::walking(1.0), 0.02);
        }
        assert!(!walker.is_debuffed());
        assert_relative_eq!(walker.horizontal(), 1.0);
    }

    #[test]
    fn debuff_ticks_down_and_clears() {
        let mut walker = walker();
        walker.apply_debuff(0.05);
        walker.read_input(&PlayerInput::default(), 0.02);
        assert_relative_eq!(walker.debuff_remaining(), 0.03, epsilon = 1e-6);
        walker.clear_debuff();
        assert_relative_eq!(walker.debuff_remaining(), 0.0);
        assert!(!walker.is_debuffed());
    }
}
