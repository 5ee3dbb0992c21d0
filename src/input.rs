//! Player input sampled once per frame.
use bevy::prelude::Resource;
use glam::Vec2;

/// Raw player input for one frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInput {
    /// Horizontal axis in `[-1, 1]`; zero when no key is held.
    pub horizontal: f32,
    /// Whether the primary pointer button is held.
    pub pointer_held: bool,
    /// Pointer position in screen space.
    pub pointer_position: Vec2,
}

impl PlayerInput {
    /// Input holding the horizontal axis at `horizontal`.
    #[must_use]
    pub const fn walking(horizontal: f32) -> Self {
        Self {
            horizontal,
            pointer_held: false,
            pointer_position: Vec2::ZERO,
        }
    }

    /// Input with the pointer held at `pointer_position`.
    #[must_use]
    pub const fn dragging(pointer_position: Vec2) -> Self {
        Self {
            horizontal: 0.0,
            pointer_held: true,
            pointer_position,
        }
    }
}

/// Anything that can produce a frame of input.
pub trait InputSource {
    /// Input for the frame about to run.
    fn sample(&mut self) -> PlayerInput;
}

impl InputSource for PlayerInput {
    fn sample(&mut self) -> PlayerInput {
        *self
    }
}

/// Horizontal input after the inverted-controls debuff is applied.
///
/// # Examples
/// ```
/// use leashline::input::effective_horizontal;
/// assert_eq!(effective_horizontal(1.0, false), 1.0);
/// assert_eq!(effective_horizontal(1.0, true), -1.0);
/// ```
#[must_use]
pub fn effective_horizontal(raw: f32, debuffed: bool) -> f32 {
    let horizontal = if raw.is_finite() { raw.clamp(-1.0, 1.0) } else { 0.0 };
    if debuffed {
        -horizontal
    } else {
        horizontal
    }
}
