//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Each
//! `Playing` tick runs the same stages in the same order:
//! AI -> motion -> spawning -> lifetime decay -> collisions -> level-ups.

use glam::Vec2;

use super::ai;
use super::collision;
use super::fsm::{Action, Command, RunEvent, transition};
use super::score;
use super::spawner;
use super::state::{GameEvent, GamePhase, GameState};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Discrete command (start/restart/quit), applied before the step
    pub command: Option<Command>,
    /// Manual steering direction; `None` hands the player to the autopilot
    pub steer: Option<Vec2>,
    /// Manual fire (only read while steering manually)
    pub fire: bool,
}

impl TickInput {
    pub fn command(command: Command) -> Self {
        Self {
            command: Some(command),
            ..Default::default()
        }
    }
}

/// What a tick produced besides state changes
#[derive(Debug, Clone, Default)]
pub struct TickOutcome {
    /// A quit command was received; the driver should stop
    pub quit: bool,
    pub events: Vec<GameEvent>,
}

/// Advance the game state by one fixed tick
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    if let Some(command) = input.command {
        dispatch(state, RunEvent::Command(command), &mut outcome);
        if outcome.quit {
            return outcome;
        }
    }

    match state.phase {
        GamePhase::Menu => {}
        GamePhase::Playing => {
            step_playing(state, input, &mut outcome.events);
            if state.player.is_dead() {
                dispatch(state, RunEvent::PlayerDefeated, &mut outcome);
            }
        }
        GamePhase::GameOver => {
            // Gameplay is frozen; leftover debris keeps fading
            let bounds = state.tuning.bounds();
            for particle in &mut state.particles {
                particle.update(bounds);
            }
            state.particles.retain(|p| p.body.alive);
        }
    }

    outcome
}

/// Feed an event through the transition table and apply its action
fn dispatch(state: &mut GameState, event: RunEvent, outcome: &mut TickOutcome) {
    let Some((next, action)) = transition(state.phase, event) else {
        log::debug!("Ignoring {:?} in {:?}", event, state.phase);
        return;
    };

    match action {
        Action::None => {}
        Action::Reset => {
            state.reset();
            log::info!("Run started (seed {})", state.seed);
            outcome.events.push(GameEvent::RunStarted { seed: state.seed });
        }
        Action::Quit => {
            log::info!("Quit requested");
            outcome.quit = true;
        }
    }

    if next == GamePhase::GameOver && state.phase != GamePhase::GameOver {
        log::info!(
            "Game over: score {} at wave {} after {} ticks",
            state.player.score,
            state.wave,
            state.time_ticks
        );
        outcome.events.push(GameEvent::GameOver {
            score: state.player.score,
            wave: state.wave,
        });
    }
    state.phase = next;
}

fn step_playing(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    state.time_ticks += 1;

    // --- AI ---
    let intent = match input.steer {
        Some(steer) => ai::manual_intent(
            &state.player,
            &state.enemies,
            steer,
            input.fire,
            &state.tuning,
        ),
        None => ai::player_intent(&state.player, &state.enemies, &state.tuning, &mut state.rng),
    };
    state.player.body.vel = intent.velocity;
    if let Some(target) = intent.shoot_at {
        if let Some(shot) = state.player.shoot(target, &state.tuning) {
            state.push_projectile(shot);
        }
    }

    let player_center = state.player.body.center();
    let mut enemy_shots = Vec::new();
    for enemy in state.enemies.iter_mut() {
        let intent = ai::enemy_intent(enemy, player_center, &state.tuning, &mut state.rng);
        enemy.body.vel = intent.velocity;
        if let Some(target) = intent.shoot_at {
            if let Some(shot) = enemy.shoot(target, &state.tuning, &mut state.rng) {
                enemy_shots.push(shot);
            }
        }
    }
    for shot in enemy_shots {
        state.push_projectile(shot);
    }

    // --- Motion ---
    let bounds = state.tuning.bounds();
    state.player.update(bounds);
    for enemy in &mut state.enemies {
        enemy.update(bounds);
    }
    for projectile in &mut state.projectiles {
        projectile.body.update(bounds);
    }
    for particle in &mut state.particles {
        particle.update(bounds);
    }

    // --- Spawning ---
    spawner::step(state, events);

    // --- Lifetime decay ---
    for projectile in &mut state.projectiles {
        projectile.decay();
    }

    // --- Collisions ---
    collision::resolve(state, events);

    // --- Scoring ---
    // A lethal hit ends the run; the refill from a same-tick level-up must not revive it
    if !state.player.is_dead() {
        if let Some(level) = score::apply_level_up(&mut state.player, &state.tuning) {
            events.push(GameEvent::LevelUp { level });
        }
    }

    state.compact();
    state.normalize_order();
}
