//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod ai;
pub mod body;
pub mod collision;
pub mod fsm;
pub mod rng;
pub mod score;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::circles_overlap;
pub use fsm::{Action, Command, RunEvent, transition};
pub use rng::{Edge, RandomSource, SimRng};
pub use snapshot::{BodyView, ColorClass, ParticleView, PlayerView, Snapshot};
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, Particle, ParticleColor, Player, Projectile,
};
pub use tick::{TickInput, TickOutcome, tick};
