//! Bevy plugin running a chase [`Session`] inside an app.
//!
//! The session stays authoritative. Physics runs in `FixedUpdate` at the
//! configured timestep, input and focus run once per `Update`, and avatar
//! transforms are copied out of the session afterwards for presentation.

use std::time::Duration;

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{error, info};
use thiserror::Error;

use crate::config::SessionConfig;
use crate::input::PlayerInput;
use crate::session::{Session, Tally};
use crate::spawner::ObstacleSpawner;

/// The session driven by [`LeashChasePlugin`].
#[derive(Resource, Deref, DerefMut, Debug, Clone)]
pub struct ChaseSession(pub Session);

/// Spawner feeding the session, present when spawning is enabled.
#[derive(Resource, Deref, DerefMut, Debug, Clone)]
pub struct ChaseSpawner(pub ObstacleSpawner);

/// Marks the entity mirroring the walker.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct WalkerAvatar;

/// Marks the entity mirroring the companion.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct CompanionAvatar;

/// Trigger to start a fresh run.
#[derive(Event, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ResetChase;

/// Raised once when the run's health runs out.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChaseOver {
    /// Score at the end of the run.
    pub tally: Tally,
}

/// Raised when the plugin cannot build its session.
#[derive(Event, Debug, Clone, Error)]
#[error("chase setup failed: {detail}")]
pub struct ChaseSetupError {
    /// Description of the underlying error.
    pub detail: String,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_setup_error(event: On<ChaseSetupError>) {
    error!("{}", event.event());
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn reset_chase(
    _event: On<ResetChase>,
    mut session: ResMut<ChaseSession>,
    spawner: Option<ResMut<ChaseSpawner>>,
) {
    session.reset();
    if let Some(mut spawner) = spawner {
        spawner.restart();
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_chase_over(event: On<ChaseOver>) {
    info!("chase over: {:?}", event.event().tally);
}

/// Installs the chase resources, systems and observers.
#[derive(Debug, Clone, Default)]
pub struct LeashChasePlugin {
    /// Session configuration.
    pub config: SessionConfig,
    /// Seed for the avoidance tie-break and the spawner.
    pub seed: u64,
    /// Whether to spawn objects on the configured cadence.
    pub spawning: bool,
}

impl LeashChasePlugin {
    /// Plugin for `config` with spawning disabled.
    #[must_use]
    pub const fn new(config: SessionConfig) -> Self {
        Self {
            config,
            seed: 0,
            spawning: false,
        }
    }

    /// Sets the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enables or disables timed spawning.
    #[must_use]
    pub const fn with_spawning(mut self, spawning: bool) -> Self {
        self.spawning = spawning;
        self
    }
}

impl Plugin for LeashChasePlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_setup_error);

        let session = match Session::new(self.config, self.seed) {
            Ok(session) => session,
            Err(e) => {
                app.world_mut().trigger(ChaseSetupError {
                    detail: e.to_string(),
                });
                return;
            }
        };

        info!(
            "chase running at a {:.3}s fixed step",
            self.config.fixed_timestep
        );
        app.insert_resource(Time::<Fixed>::from_duration(Duration::from_secs_f32(
            self.config.fixed_timestep,
        )));
        app.insert_resource(ChaseSession(session));
        app.init_resource::<PlayerInput>();
        if self.spawning {
            app.insert_resource(ChaseSpawner(ObstacleSpawner::new(
                self.config.spawner,
                self.seed.wrapping_add(1),
            )));
        }
        app.add_observer(reset_chase);
        app.add_observer(log_chase_over);

        app.add_systems(Startup, spawn_avatars_system);
        app.add_systems(
            FixedUpdate,
            (
                spawn_objects_system.run_if(resource_exists::<ChaseSpawner>),
                physics_step_system,
                detect_chase_over_system,
            )
                .chain(),
        );
        app.add_systems(
            Update,
            (frame_step_system, sync_avatar_transforms_system).chain(),
        );
    }
}

/// Spawns one avatar entity per agent present in the session.
pub fn spawn_avatars_system(mut commands: Commands, session: Res<ChaseSession>) {
    if let Some(walker) = session.walker() {
        commands.spawn((WalkerAvatar, Transform::from_translation(walker.agent.position())));
    }
    if let Some(companion) = session.companion() {
        commands.spawn((
            CompanionAvatar,
            Transform::from_translation(companion.agent.position()),
        ));
    }
}

/// Advances the spawner by one fixed step.
pub fn spawn_objects_system(
    mut spawner: ResMut<ChaseSpawner>,
    mut session: ResMut<ChaseSession>,
    time: Res<Time<Fixed>>,
) {
    spawner.tick(&mut session.0, time.timestep().as_secs_f32());
}

/// Runs one physics step of the session.
pub fn physics_step_system(mut session: ResMut<ChaseSession>, time: Res<Time<Fixed>>) {
    session.physics_step(time.timestep().as_secs_f32());
}

/// Triggers [`ChaseOver`] on the step the session ends.
pub fn detect_chase_over_system(
    mut commands: Commands,
    session: Res<ChaseSession>,
    mut reported: Local<bool>,
) {
    match (session.is_over(), *reported) {
        (true, false) => {
            commands.trigger(ChaseOver {
                tally: session.tally(),
            });
            *reported = true;
        }
        (false, true) => *reported = false,
        _ => {}
    }
}

/// Feeds this frame's [`PlayerInput`] to the session.
pub fn frame_step_system(
    mut session: ResMut<ChaseSession>,
    input: Res<PlayerInput>,
    time: Res<Time>,
) {
    let mut frame_input = *input;
    session.frame_step(&mut frame_input, time.delta_secs());
}

/// Copies agent positions onto their avatar transforms.
pub fn sync_avatar_transforms_system(
    session: Res<ChaseSession>,
    mut walkers: Query<&mut Transform, (With<WalkerAvatar>, Without<CompanionAvatar>)>,
    mut companions: Query<&mut Transform, (With<CompanionAvatar>, Without<WalkerAvatar>)>,
) {
    if let Some(walker) = session.walker() {
        for mut transform in &mut walkers {
            transform.translation = walker.agent.position();
        }
    }
    if let Some(companion) = session.companion() {
        for mut transform in &mut companions {
            transform.translation = companion.agent.position();
        }
    }
}
