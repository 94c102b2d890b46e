//! Fixed-rate tick driver
//!
//! Turns wall-clock frames into whole simulation ticks and wires the
//! simulation to its collaborators: a command source on the way in and a
//! render sink on the way out. Nothing here touches gameplay state except
//! through `sim::tick`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::consts::MAX_FRAME_DELTA;
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};

/// Accumulates frame time and releases it in fixed ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    accumulator: f32,
    max_substeps: u32,
}

impl FixedStep {
    pub fn new(tick_hz: u32, max_substeps: u32) -> Self {
        Self {
            step: 1.0 / tick_hz.max(1) as f32,
            accumulator: 0.0,
            max_substeps: max_substeps.max(1),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_hz, settings.max_substeps)
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many ticks to run
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = dt.clamp(0.0, MAX_FRAME_DELTA);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }
}

/// Source of frame deltas
pub trait Clock {
    /// Seconds since the previous frame
    fn frame_delta(&mut self) -> f32;
}

/// Real time, sleeping so frames are at least `frame` apart
#[derive(Debug)]
pub struct WallClock {
    last: Instant,
    frame: Duration,
}

impl WallClock {
    pub fn new(frame_secs: f32) -> Self {
        Self {
            last: Instant::now(),
            frame: Duration::from_secs_f32(frame_secs),
        }
    }
}

impl Clock for WallClock {
    fn frame_delta(&mut self) -> f32 {
        let elapsed = self.last.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// Fixed delta per frame, no waiting (headless and tests)
#[derive(Debug, Clone, Copy)]
pub struct SteppedClock {
    pub delta: f32,
}

impl Clock for SteppedClock {
    fn frame_delta(&mut self) -> f32 {
        self.delta
    }
}

/// Discrete command input
pub trait CommandSource {
    /// Commands for the coming frame; `None` once the source is exhausted
    fn poll(&mut self, phase: GamePhase, time_ticks: u64) -> Option<Vec<Command>>;
}

/// Receives one snapshot per tick
pub trait RenderSink {
    fn present(&mut self, snapshot: &Snapshot, events: &[GameEvent]);
}

/// Replays a fixed list of per-frame command batches
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommands {
    frames: VecDeque<Vec<Command>>,
}

impl ScriptedCommands {
    pub fn new(frames: impl IntoIterator<Item = Vec<Command>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl CommandSource for ScriptedCommands {
    fn poll(&mut self, _phase: GamePhase, _time_ticks: u64) -> Option<Vec<Command>> {
        self.frames.pop_front()
    }
}

/// Plays `runs` AI-driven runs back to back, then quits.
///
/// A run ends at game over or once it reaches `max_ticks` (0 = no limit).
#[derive(Debug, Clone)]
pub struct AutoPlay {
    runs: u32,
    max_ticks: u64,
    started: u32,
}

impl AutoPlay {
    pub fn new(runs: u32, max_ticks: u64) -> Self {
        Self {
            runs,
            max_ticks,
            started: 0,
        }
    }
}

impl CommandSource for AutoPlay {
    fn poll(&mut self, phase: GamePhase, time_ticks: u64) -> Option<Vec<Command>> {
        let commands = match phase {
            GamePhase::Menu if self.started < self.runs => {
                self.started += 1;
                vec![Command::Start]
            }
            GamePhase::Menu => vec![Command::Quit],
            GamePhase::Playing if self.max_ticks > 0 && time_ticks >= self.max_ticks => {
                vec![Command::Restart]
            }
            GamePhase::Playing => Vec::new(),
            GamePhase::GameOver => vec![Command::Restart],
        };
        Some(commands)
    }
}

/// Logs a progress line every `every` ticks of play
#[derive(Debug, Clone)]
pub struct LogSink {
    every: u64,
}

impl LogSink {
    pub fn new(every: u64) -> Self {
        Self { every: every.max(1) }
    }
}

impl RenderSink for LogSink {
    fn present(&mut self, snapshot: &Snapshot, _events: &[GameEvent]) {
        if snapshot.phase == GamePhase::Playing && snapshot.tick % self.every == 0 {
            log::info!(
                "tick {:>6} | wave {:>3} | score {:>6} | level {:>3} | hp {:>3}/{:<3} | enemies {:>2} | shots {:>3} | particles {:>3}",
                snapshot.tick,
                snapshot.wave,
                snapshot.score,
                snapshot.player.level,
                snapshot.player.health,
                snapshot.player.max_health,
                snapshot.enemies.len(),
                snapshot.projectiles.len(),
                snapshot.particles.len(),
            );
        }
    }
}

/// Totals for a driver session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Ticks executed (including menu and game-over ticks)
    pub ticks: u64,
    pub runs_started: u32,
    pub game_overs: u32,
    pub best_score: u64,
    pub best_wave: u32,
}

/// Drive `state` until the source quits or runs dry.
///
/// Polled commands are applied one per tick; the source is polled again
/// only after all of them have been consumed.
pub fn run(
    state: &mut GameState,
    step: &mut FixedStep,
    clock: &mut impl Clock,
    source: &mut impl CommandSource,
    sink: &mut impl RenderSink,
) -> RunSummary {
    let mut summary = RunSummary::default();
    let mut pending: VecDeque<Command> = VecDeque::new();

    loop {
        // Poll only once earlier commands have been applied, so a source
        // reacting to the phase never sees a stale one
        if pending.is_empty() {
            match source.poll(state.phase, state.time_ticks) {
                Some(commands) => pending.extend(commands),
                None => {
                    log::info!("Command source exhausted");
                    return summary;
                }
            }
        }

        let ticks = step.advance(clock.frame_delta());
        for _ in 0..ticks {
            let input = TickInput {
                command: pending.pop_front(),
                ..Default::default()
            };
            let outcome = tick(state, &input);
            summary.ticks += 1;

            for event in &outcome.events {
                match event {
                    GameEvent::RunStarted { .. } => summary.runs_started += 1,
                    GameEvent::GameOver { .. } => summary.game_overs += 1,
                    _ => {}
                }
            }
            summary.best_score = summary.best_score.max(state.player.score);
            summary.best_wave = summary.best_wave.max(state.wave);

            if outcome.quit {
                return summary;
            }
            sink.present(&Snapshot::capture(state), &outcome.events);
        }
    }
}
