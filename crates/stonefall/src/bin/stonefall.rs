//! # STONEFALL
//!
//! Runs the simulation in real time until level 2 quits.
//!
//! ```bash
//! # Defaults, assets and saves relative to the working directory
//! ./stonefall
//!
//! # With a TOML override and debug logging
//! RUST_LOG=debug ./stonefall stonefall.toml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use stonefall::{GameController, HeadlessRenderer};
use stonefall_sim::{SimConfig, SimResult};
use tracing_subscriber::EnvFilter;

fn load_config() -> SimResult<SimConfig> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => SimConfig::from_toml_file(&path),
        None => Ok(SimConfig::default()),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Configuration error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut game = GameController::new(config, HeadlessRenderer::new());
    if let Err(err) = game.initialize() {
        tracing::error!("Failed to initialize game: {}", err);
        return ExitCode::FAILURE;
    }

    let frames = game.run_realtime();
    tracing::info!("Simulation ended after {} frames", frames);
    game.shutdown();
    ExitCode::SUCCESS
}
