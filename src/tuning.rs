//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so a run can be
//! rebalanced from a JSON file without recompiling. Units are pixels and
//! ticks; velocities are pixels per tick.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, read_json};

/// Gameplay constants for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_size: f32,
    pub player_speed: f32,
    pub player_max_health: u32,
    /// Cooldown after a shot at level 1 (divided by level)
    pub player_base_cooldown: u32,
    /// Multiplier on projectile speed for player shots
    pub player_shoot_power: f32,
    /// Autopilot only fires at enemies closer than this
    pub player_engage_range: f32,
    /// Per-tick chance the autopilot pulls the trigger while in range
    pub player_shoot_chance: f32,

    // === Enemy ===
    pub enemy_size: f32,
    pub enemy_base_health: u32,
    pub enemy_base_speed: f32,
    pub enemy_damage: u32,
    pub enemy_shoot_chance: f32,
    pub enemy_cooldown_min: u32,
    pub enemy_cooldown_max: u32,

    // === Spawning ===
    pub max_enemies: usize,
    pub base_spawn_rate: u32,
    pub min_spawn_interval: u32,
    pub wave_delay: u32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_base_size: f32,
    pub projectile_lifetime: u32,

    // === Progression ===
    pub points_per_level: u64,
    pub level_up_health_bonus: u32,

    // === Particles ===
    pub contact_particles: u32,
    pub player_hit_particles: u32,
    pub enemy_hit_particles: u32,
    pub death_particles: u32,
    pub particle_lifetime: u32,
    pub particle_size: f32,
    pub particle_shrink: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            player_base_cooldown: PLAYER_BASE_COOLDOWN,
            player_shoot_power: 1.0,
            player_engage_range: 200.0,
            player_shoot_chance: 1.0 / 30.0,

            enemy_size: ENEMY_SIZE,
            enemy_base_health: ENEMY_BASE_HEALTH,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_damage: ENEMY_DAMAGE,
            enemy_shoot_chance: 1.0 / 60.0,
            enemy_cooldown_min: 60,
            enemy_cooldown_max: 120,

            max_enemies: MAX_ENEMIES,
            base_spawn_rate: BASE_SPAWN_RATE,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            wave_delay: WAVE_DELAY,

            projectile_speed: PROJECTILE_SPEED,
            projectile_base_size: PROJECTILE_BASE_SIZE,
            projectile_lifetime: PROJECTILE_LIFETIME,

            points_per_level: POINTS_PER_LEVEL,
            level_up_health_bonus: LEVEL_UP_HEALTH_BONUS,

            contact_particles: 10,
            player_hit_particles: 5,
            enemy_hit_particles: 5,
            death_particles: 15,
            particle_lifetime: 30,
            particle_size: 4.0,
            particle_shrink: 0.1,
        }
    }
}

impl Tuning {
    /// Field bounds as a vector (width, height)
    pub fn bounds(&self) -> glam::Vec2 {
        glam::Vec2::new(self.field_width, self.field_height)
    }

    /// Parse from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let tuning: Self = read_json(path)?;
        tuning.validate()?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("player_size", self.player_size),
            ("player_speed", self.player_speed),
            ("player_shoot_power", self.player_shoot_power),
            ("enemy_size", self.enemy_size),
            ("enemy_base_speed", self.enemy_base_speed),
            ("projectile_speed", self.projectile_speed),
            ("projectile_base_size", self.projectile_base_size),
            ("particle_size", self.particle_size),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be > 0, got {value}")));
            }
        }

        let largest = self.player_size.max(self.enemy_size);
        if self.field_width < largest || self.field_height < largest {
            return Err(ConfigError::invalid(
                "field_width",
                format!(
                    "field {}x{} is smaller than an entity ({largest})",
                    self.field_width, self.field_height
                ),
            ));
        }

        for (field, value) in [
            ("player_shoot_chance", self.player_shoot_chance),
            ("enemy_shoot_chance", self.enemy_shoot_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(field, format!("must be in [0, 1], got {value}")));
            }
        }

        if self.enemy_cooldown_min > self.enemy_cooldown_max {
            return Err(ConfigError::invalid(
                "enemy_cooldown_min",
                format!(
                    "{} exceeds enemy_cooldown_max {}",
                    self.enemy_cooldown_min, self.enemy_cooldown_max
                ),
            ));
        }
        if self.player_max_health == 0 {
            return Err(ConfigError::invalid("player_max_health", "must be > 0"));
        }
        if self.points_per_level == 0 {
            return Err(ConfigError::invalid("points_per_level", "must be > 0"));
        }
        if self.particle_shrink < 0.0 {
            return Err(ConfigError::invalid("particle_shrink", "must be >= 0"));
        }
        Ok(())
    }
}
