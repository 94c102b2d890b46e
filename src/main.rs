//! Auto Arena entry point
//!
//! Headless driver: loads configuration, plays AI-driven runs at a fixed
//! tick rate and logs progress.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use auto_arena::driver::{self, AutoPlay, FixedStep, LogSink, SteppedClock, WallClock};
use auto_arena::sim::{GameState, Snapshot};
use auto_arena::{QualityPreset, Settings, Tuning};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run seed; defaults to the settings file, then the clock.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// Tick budget per run before it is restarted (0 = until game over).
    #[arg(long, value_name = "N", default_value_t = 3600)]
    ticks: u64,
    /// Number of runs to play before quitting.
    #[arg(
        long,
        value_name = "N",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    runs: u32,
    /// Balance overrides (JSON).
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,
    /// Driver settings (JSON).
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
    /// Particle quality preset: low, medium or high.
    #[arg(long, value_name = "PRESET", value_parser = parse_quality)]
    quality: Option<QualityPreset>,
    /// Pace ticks against the wall clock instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Print the final snapshot as JSON.
    #[arg(long)]
    dump: bool,
}

fn parse_quality(s: &str) -> Result<QualityPreset, String> {
    QualityPreset::parse(s).ok_or_else(|| format!("unknown quality preset `{s}`"))
}

/// Seed from the clock when none was given
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => args.quality.map(Settings::from_preset).unwrap_or_default(),
    };
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Auto Arena starting...");

    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let settings = load_settings(&args)?;

    if let (Some(cli), Some(file)) = (args.seed, settings.seed) {
        if cli != file {
            log::warn!("--seed {} overrides seed {} from settings", cli, file);
        }
    }
    let seed = args.seed.or(settings.seed).unwrap_or_else(clock_seed);
    log::info!(
        "Seed {} | {} Hz | quality {} | {} run(s) of up to {} ticks",
        seed,
        settings.tick_hz,
        settings.quality.as_str(),
        args.runs,
        args.ticks
    );

    let mut state = GameState::from_settings(seed, &settings, tuning);
    let mut step = FixedStep::from_settings(&settings);
    let mut source = AutoPlay::new(args.runs, args.ticks);
    let mut sink = LogSink::new(u64::from(settings.tick_hz));

    let summary = if args.realtime {
        let mut clock = WallClock::new(settings.tick_secs());
        driver::run(&mut state, &mut step, &mut clock, &mut source, &mut sink)
    } else {
        let mut clock = SteppedClock { delta: step.step() };
        driver::run(&mut state, &mut step, &mut clock, &mut source, &mut sink)
    };

    log::info!(
        "Done: {} ticks, {} run(s), {} game over(s), best score {}, best wave {}",
        summary.ticks,
        summary.runs_started,
        summary.game_overs,
        summary.best_score,
        summary.best_wave
    );

    if args.dump {
        let json = serde_json::to_string_pretty(&Snapshot::capture(&state))
            .context("serializing final snapshot")?;
        println!("{json}");
    }

    Ok(())
}
