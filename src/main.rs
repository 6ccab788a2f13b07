//! Mouth Runner entry point
//!
//! Headless driver: loads settings, registers the world, and runs the
//! simulation loop against a recorded openness signal. Rendering and face
//! tracking are external; snapshots are logged instead of drawn.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use mouth_runner::consts::DEFAULT_WORLD;
use mouth_runner::runner::{NoControls, NoSignal, RunOptions, ScriptedSignal};
use mouth_runner::sim::{Player, World, WorldManager};
use mouth_runner::{FrameSink, RenderSnapshot, Settings, SettingsError, SignalError, SimError};
use mouth_runner::{OpennessSource, SimulationLoop};

/// Gesture-driven endless runner (headless simulation)
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Settings JSON file (defaults are used when omitted)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Recorded openness signal, one sample per line ("-" for no face)
    #[arg(long, value_name = "PATH")]
    signal: Option<PathBuf>,

    /// RNG seed for spawn timing, heights and speeds
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// World to activate at startup
    #[arg(long, default_value = DEFAULT_WORLD)]
    world: String,

    /// Hold the configured tick rate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Keep ticking (frozen) after the run is lost
    #[arg(long)]
    keep_running: bool,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to open signal: {0}")]
    Signal(#[from] SignalError),
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Logs the HUD whenever it changes
#[derive(Default)]
struct LogSink {
    last_status: Option<String>,
}

impl FrameSink for LogSink {
    fn present(&mut self, snapshot: &RenderSnapshot) {
        let status = snapshot.status_line();
        if self.last_status.as_deref() != Some(status.as_str()) {
            log::info!("tick {}: {}", snapshot.tick, status);
            self.last_status = Some(status);
        }
        log::debug!(
            "tick {}: {} entities on screen",
            snapshot.tick,
            snapshot.entities.len()
        );
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    if cli.dump_config {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    log::info!("Mouth Runner starting (seed {})", cli.seed);

    let mut manager = WorldManager::new();
    manager.register(World::new(DEFAULT_WORLD, &settings, cli.seed, 0));
    // An unknown world name is a startup configuration error
    manager.activate(&cli.world, Some(Player::from_settings(&settings)))?;

    let mut source: Box<dyn OpennessSource> = match &cli.signal {
        Some(path) => {
            let signal = ScriptedSignal::from_path(path)?;
            log::info!("Replaying {} samples from {}", signal.len(), path.display());
            Box::new(signal)
        }
        None => Box::new(NoSignal),
    };

    let options = RunOptions {
        max_ticks: cli.ticks,
        realtime: cli.realtime,
        stop_when_lost: !cli.keep_running,
    };

    let mut sim = SimulationLoop::new(&settings, manager);
    let mut sink = LogSink::default();
    let summary = sim.run(&mut source, &mut NoControls, &mut sink, &options)?;

    if let Some(snapshot) = sim.snapshot() {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    log::info!(
        "{} jumps, {} failed reads",
        summary.jumps,
        summary.read_failures
    );
    Ok(())
}
