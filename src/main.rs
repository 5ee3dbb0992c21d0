//! Headless run of the leash chase with a scripted walker.
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use clap::Parser;
use leashline::{
    init_logging, ChaseSession, Difficulty, LeashChasePlugin, PlayerInput, SessionConfig,
};
use log::info;

/// Simulates a leash chase without rendering and reports the score
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Simulated seconds to run
    #[arg(short, long, default_value_t = 30.0)]
    seconds: f32,
    /// Seed for the companion and the spawner
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// JSON session configuration; defaults apply to missing fields
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seconds the scripted walker keeps to one direction
    #[arg(long, default_value_t = 4.0)]
    sway_period: f32,
    /// Pace preset applied over the configuration
    #[arg(short, long, value_enum)]
    difficulty: Option<Difficulty>,
}

#[derive(Resource)]
struct Sway {
    period: f32,
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig> {
    let Some(path) = path else {
        return Ok(SessionConfig::default());
    };
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    SessionConfig::from_json_str(&json)
        .with_context(|| format!("invalid configuration in {}", path.display()))
}

fn sway_input_system(time: Res<Time>, sway: Res<Sway>, mut input: ResMut<PlayerInput>) {
    let phase = (time.elapsed_secs() / sway.period).floor();
    input.horizontal = if phase % 2.0 < 1.0 { 1.0 } else { -1.0 };
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    ensure!(
        args.seconds.is_finite() && args.seconds >= 0.0,
        "--seconds must be a non-negative number"
    );
    ensure!(
        args.sway_period.is_finite() && args.sway_period > 0.0,
        "--sway-period must be positive"
    );
    let loaded = load_config(args.config.as_deref())?;
    let config = args
        .difficulty
        .map_or(loaded, |difficulty| loaded.with_difficulty(difficulty));

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
            config.fixed_timestep,
        )))
        .add_plugins(
            LeashChasePlugin::new(config)
                .with_seed(args.seed)
                .with_spawning(true),
        )
        .insert_resource(Sway {
            period: args.sway_period,
        })
        .add_systems(PreUpdate, sway_input_system);

    let mut simulated = 0.0;
    while simulated < args.seconds {
        app.update();
        simulated += config.fixed_timestep;
        if app
            .world()
            .get_resource::<ChaseSession>()
            .is_some_and(|chase| chase.0.is_over())
        {
            break;
        }
    }

    let session = app
        .world()
        .get_resource::<ChaseSession>()
        .context("chase session was not installed")?;
    info!(
        "ran {:.1}s with {} objects in play",
        session.elapsed(),
        session.objects().active_count()
    );
    info!(
        "health {}/{}",
        session.health().current(),
        session.health().max()
    );
    info!("tally: {}", serde_json::to_string(&session.tally())?);
    Ok(())
}
