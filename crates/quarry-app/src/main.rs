//! The binary entry point for quarry.

mod platform;

use std::time::{Duration, Instant};

use clap::Parser;
use quarry_app::bootstrap::{self, SetupError};
use quarry_app::game_loop::{FIXED_DT, GameLoop};
use quarry_app::script::ScriptedInput;
use quarry_app::session::PlaySession;
use quarry_config::{CliArgs, Config, ConfigError};
use quarry_terrain::resolve_seed;
use thiserror::Error;
use tracing::info;

use crate::platform::{PlatformDirs, PlatformError};

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Setup(#[from] SetupError),
}

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("quarry: {e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = match &args.config {
        Some(root) => PlatformDirs::resolve_with_root(root),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);
    quarry_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!(
        "quarry starting: config {}, logs {}",
        dirs.config_dir.display(),
        dirs.log_dir.display()
    );

    let seed = resolve_seed(config.world.seed, &mut rand::rng());
    let world = bootstrap::build_world(&config.world, seed)?;
    let (settings, camera, placement) = bootstrap::session_parts(&config, seed)?;
    let mut session = PlaySession::new(world, camera, placement, settings);
    let mut script = ScriptedInput::new(
        config.camera.turn_rate_degrees,
        config.session.click_period,
    );

    let frames = u64::from(config.session.frames);
    let frame_budget = Duration::from_secs_f64(FIXED_DT);
    let mut game_loop = GameLoop::new();
    while session.stats().frames < frames {
        let frame_start = Instant::now();
        game_loop.tick(
            |dt, sim_time| {
                if session.stats().frames < frames {
                    let input = script.next_input(dt);
                    session.step(&input, sim_time);
                }
            },
            |_alpha| {},
        );
        if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    session.log_summary();
    Ok(())
}
