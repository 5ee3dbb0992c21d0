//! Builders and drivers shared by the integration tests.
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use glam::Vec3;
use leashline::entity::{ObjectId, ObjectTag};
use leashline::input::{InputSource, PlayerInput};
use leashline::{LeashChasePlugin, Session, SessionConfig};

/// Bounding box of the obstacles used in scenarios.
pub const OBSTACLE_SIZE: Vec3 = Vec3::ONE;
/// Bounding box of the waste used in scenarios.
pub const WASTE_SIZE: Vec3 = Vec3::new(0.4, 0.2, 0.4);

/// Session holding only a companion at `(x, 0, 0)`.
///
/// # Panics
/// Panics if the default configuration is rejected.
pub fn companion_session(x: f32, seed: u64) -> Session {
    Session::builder(SessionConfig::default())
        .seed(seed)
        .walker(None)
        .companion(Some(Vec3::new(x, 0.0, 0.0)))
        .build()
        .unwrap_or_else(|e| panic!("default config should be valid: {e}"))
}

/// Session with both agents at their resting positions.
///
/// # Panics
/// Panics if the default configuration is rejected.
pub fn chase_session(seed: u64) -> Session {
    Session::new(SessionConfig::default(), seed)
        .unwrap_or_else(|e| panic!("default config should be valid: {e}"))
}

/// Spawns a focused unit obstacle at `(x, 0, z)` scrolling at `vz`.
pub fn spawn_obstacle(session: &mut Session, x: f32, z: f32, vz: f32) -> ObjectId {
    session.spawn_object(
        ObjectTag::Obstacle,
        Vec3::new(x, 0.0, z),
        Vec3::new(0.0, 0.0, vz),
        OBSTACLE_SIZE,
    )
}

/// Spawns a focused piece of waste at `(x, 0, z)` scrolling at `vz`.
pub fn spawn_waste(session: &mut Session, x: f32, z: f32, vz: f32) -> ObjectId {
    session.spawn_object(
        ObjectTag::Waste,
        Vec3::new(x, 0.0, z),
        Vec3::new(0.0, 0.0, vz),
        WASTE_SIZE,
    )
}

/// Runs `session` for `seconds` with no player input.
pub fn run_idle(session: &mut Session, seconds: f32) {
    session.advance(&mut PlayerInput::default(), seconds);
}

/// Runs `session` for `seconds` with input from `source`.
pub fn run_with<I: InputSource>(session: &mut Session, source: &mut I, seconds: f32) {
    session.advance(source, seconds);
}

/// Headless app running the chase plugin one fixed step per update.
pub fn headless_app(config: SessionConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
        config.fixed_timestep,
    )));
    app.add_plugins(LeashChasePlugin::new(config));
    app
}
