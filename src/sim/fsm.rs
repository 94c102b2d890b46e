//! Run state machine
//!
//! All phase changes go through `transition`, a single table of
//! (phase, event) pairs. Pairs not listed are ignored.

use super::state::GamePhase;

/// Discrete commands from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Restart,
    Quit,
}

/// Inputs to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEvent {
    Command(Command),
    /// Player health reached zero during a tick
    PlayerDefeated,
}

/// Side effect attached to a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    /// Rebuild the player and clear every pool
    Reset,
    /// Stop the driver loop after this tick
    Quit,
}

/// Look up the next phase and action for `event` in `phase`
pub fn transition(phase: GamePhase, event: RunEvent) -> Option<(GamePhase, Action)> {
    use GamePhase::{GameOver, Menu, Playing};

    match (phase, event) {
        (_, RunEvent::Command(Command::Quit)) => Some((phase, Action::Quit)),
        (Menu, RunEvent::Command(Command::Start)) => Some((Playing, Action::Reset)),
        (Playing, RunEvent::PlayerDefeated) => Some((GameOver, Action::None)),
        (Playing | GameOver, RunEvent::Command(Command::Restart)) => Some((Menu, Action::None)),
        _ => None,
    }
}
