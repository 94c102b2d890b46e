//! Auto Arena - an AI-driven arena shooter simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, AI, collisions, scoring)
//! - `driver`: Fixed-rate tick driver and the input/render seams
//! - `tuning`: Data-driven game balance
//! - `settings`: Runtime settings (tick rate, seed, particle quality)

pub mod driver;
pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will accept (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    pub const PLAYER_BASE_COOLDOWN: u32 = 20;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 25.0;
    pub const ENEMY_BASE_HEALTH: u32 = 20;
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    pub const ENEMY_DAMAGE: u32 = 10;
    pub const MAX_ENEMIES: usize = 10;

    /// Spawn cadence (ticks)
    pub const BASE_SPAWN_RATE: u32 = 60;
    pub const MIN_SPAWN_INTERVAL: u32 = 10;
    pub const WAVE_DELAY: u32 = 60;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_BASE_SIZE: f32 = 6.0;
    pub const PROJECTILE_LIFETIME: u32 = 90;

    /// Score needed per level
    pub const POINTS_PER_LEVEL: u64 = 100;
    /// Max health gained on each level-up
    pub const LEVEL_UP_HEALTH_BONUS: u32 = 20;
}

/// Center point of an axis-aligned square body at `pos` with side `size`
#[inline]
pub fn center_of(pos: Vec2, size: f32) -> Vec2 {
    pos + Vec2::splat(size / 2.0)
}

/// Unit direction from `from` toward `to`.
///
/// The length used for normalization is floored at 1 so coincident points
/// yield a zero vector instead of NaN.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    delta / delta.length().max(1.0)
}
