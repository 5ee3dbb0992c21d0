//! Leash tension, the drag gesture and the agents pulling each other.
use approx::assert_relative_eq;
use glam::Vec2;
use leashline::input::{InputSource, PlayerInput};
use leashline::{Leash, LEASH_LENGTH};
use rstest::rstest;
use test_utils::{chase_session, run_idle, run_with};

/// Holds the pointer and sweeps it to `target_x` after the first frame.
struct PointerSweep {
    target_x: f32,
    frames: u32,
}

impl InputSource for PointerSweep {
    fn sample(&mut self) -> PlayerInput {
        let x = if self.frames == 0 { 0.0 } else { self.target_x };
        self.frames += 1;
        PlayerInput::dragging(Vec2::new(x, 0.0))
    }
}

#[test]
fn tension_tracks_separation_when_not_dragging() {
    let mut leash =
        Leash::new(LEASH_LENGTH).unwrap_or_else(|e| panic!("leash length should be valid: {e}"));
    for step in 0..=60_u8 {
        let separation = f32::from(step) * 0.05;
        leash.update(0.0, separation, false);
        assert_eq!(leash.in_tension(), separation > LEASH_LENGTH);
    }
    for step in (0..=60_u8).rev() {
        let separation = -f32::from(step) * 0.05;
        leash.update(0.0, separation, false);
        assert_eq!(leash.in_tension(), separation.abs() > LEASH_LENGTH);
    }
}

#[rstest]
#[case::left(-6.0)]
#[case::right(6.0)]
fn companion_drags_idle_walker(#[case] target: f32) {
    let mut session = chase_session(0);
    if let Some(companion) = session.companion_mut() {
        companion.agent.set_target_x(target);
    }
    run_idle(&mut session, 1.0);
    let walker_x = session.walker().map_or(0.0, |walker| walker.agent.x());
    assert_eq!(walker_x.signum(), target.signum());
    assert!(walker_x.abs() > 0.0);
}

#[test]
fn walking_away_pulls_the_companion() {
    let mut session = chase_session(0);
    run_with(&mut session, &mut PlayerInput::walking(1.0), 2.0);
    let companion_x = session.companion().map_or(0.0, |c| c.agent.x());
    let walker_x = session.walker().map_or(0.0, |w| w.agent.x());
    assert!(companion_x > 0.5);
    assert!(walker_x - companion_x <= LEASH_LENGTH + 0.5);
}

#[rstest]
#[case::right(50.0, 1.0)]
#[case::left(-50.0, -1.0)]
fn held_drag_saturates_at_leash_length(#[case] pointer_x: f32, #[case] expected: f32) {
    let mut session = chase_session(0);
    let mut sweep = PointerSweep {
        target_x: pointer_x,
        frames: 0,
    };
    for _ in 0..100 {
        run_with(&mut session, &mut sweep, 0.02);
        let position = session.walker().map_or(0.0, |w| w.drag.position());
        assert!(position.abs() <= LEASH_LENGTH);
    }
    let walker = session
        .walker()
        .unwrap_or_else(|| panic!("session should have a walker"));
    assert!(walker.drag.is_dragging());
    assert_relative_eq!(walker.drag.position(), expected);
    let companion_x = session.companion().map_or(0.0, |c| c.agent.x());
    assert_relative_eq!(companion_x, expected, epsilon = 0.05);
}

#[test]
fn releasing_the_pointer_freezes_the_drag() {
    let mut session = chase_session(0);
    let mut sweep = PointerSweep {
        target_x: 20.0,
        frames: 0,
    };
    run_with(&mut session, &mut sweep, 0.2);
    let held = session.walker().map_or(0.0, |w| w.drag.position());
    run_idle(&mut session, 0.5);
    let walker = session
        .walker()
        .unwrap_or_else(|| panic!("session should have a walker"));
    assert!(!walker.drag.is_dragging());
    assert_relative_eq!(walker.drag.position(), held);
}
