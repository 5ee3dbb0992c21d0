//! Behaviour-driven tests using rust-rspec.
//!
//! These scenarios drive a full chase session headless and check how the
//! score and the agents evolve as objects scroll past.

use leashline::input::PlayerInput;
use leashline::Session;
use test_utils::{chase_session, companion_session, run_idle, spawn_obstacle, spawn_waste};

#[derive(Clone, Debug)]
struct Chase {
    session: Session,
}

impl Chase {
    fn companion_only() -> Self {
        Self {
            session: companion_session(0.0, 9),
        }
    }

    fn with_walker() -> Self {
        Self {
            session: chase_session(9),
        }
    }

    fn companion_x(&self) -> f32 {
        self.session.companion().map_or(0.0, |c| c.agent.x())
    }
}

#[test]
fn companion_dodges_then_fetches() {
    rspec::run(&rspec::given(
        "a companion facing an obstacle followed by waste",
        Chase::companion_only(),
        |ctx| {
            ctx.before_each(|chase| {
                spawn_obstacle(&mut chase.session, 0.0, 4.0, -2.0);
                spawn_waste(&mut chase.session, 0.0, 8.0, -2.0);
            });
            ctx.when("two seconds pass", |ctx| {
                ctx.before_each(|chase| run_idle(&mut chase.session, 2.0));
                ctx.then("the companion has stepped aside", |chase| {
                    assert!(chase.companion_x().abs() > 0.75);
                    assert_eq!(chase.session.tally().obstacles_hit, 0);
                });
                ctx.then("the waste is still queued", |chase| {
                    let pending = chase
                        .session
                        .companion()
                        .map_or(0, |c| c.focus.pending_len());
                    assert_eq!(pending, 1);
                });
            });
            ctx.when("both objects have scrolled past", |ctx| {
                ctx.before_each(|chase| run_idle(&mut chase.session, 4.5));
                ctx.then("the waste has been collected cleanly", |chase| {
                    let tally = chase.session.tally();
                    assert_eq!(tally.obstacles_hit, 0);
                    assert_eq!(tally.waste_collected, 1);
                });
                ctx.then("the companion is idle again", |chase| {
                    let busy = chase.session.companion().is_some_and(|c| c.focus.is_busy());
                    assert!(!busy);
                });
            });
        },
    ));
}

#[test]
fn walker_steps_in_waste() {
    rspec::run(&rspec::given(
        "a walker with waste heading straight for them",
        Chase::with_walker(),
        |ctx| {
            ctx.before_each(|chase| {
                if let Some(walker) = chase.session.walker_mut() {
                    walker.agent.body.position.x = 2.0;
                    walker.agent.hold();
                }
                chase.session.place_object(
                    leashline::ObjectTag::Waste,
                    glam::Vec3::new(2.0, 0.0, 2.0),
                    glam::Vec3::new(0.0, 0.0, -2.0),
                    test_utils::WASTE_SIZE,
                );
                run_idle(&mut chase.session, 2.0);
            });
            ctx.then("the controls are inverted", |chase| {
                assert_eq!(chase.session.tally().debuffs, 1);
                assert!(chase.session.walker().is_some_and(|w| w.is_debuffed()));
            });
            ctx.when("the walker pushes right", |ctx| {
                ctx.before_each(|chase| {
                    chase
                        .session
                        .advance(&mut PlayerInput::walking(1.0), 0.5);
                });
                ctx.then("they move left instead", |chase| {
                    let x = chase.session.walker().map_or(2.0, |w| w.agent.x());
                    assert!(x < 2.0, "walker should drift left, got {x}");
                });
            });
        },
    ));
}
