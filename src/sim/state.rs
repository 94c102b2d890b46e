//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here. Pools are kept sorted by
//! entity id so iteration (and therefore RNG draw order) is stable.

use glam::Vec2;

use super::body::Body;
use super::rng::{RandomSource, SimRng};
use crate::direction_to;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub enum GamePhase {
    /// Waiting for a start command
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Player is dead; gameplay frozen until restart
    GameOver,
}

/// Things that happened during a tick, for audio/HUD consumers
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RunStarted { seed: u64 },
    EnemySpawned { id: u32 },
    /// `contact` is true when the enemy died by ramming the player
    EnemyKilled { id: u32, reward: u32, contact: bool },
    PlayerHit { damage: u32 },
    LevelUp { level: u32 },
    WaveAdvanced { wave: u32 },
    GameOver { score: u64, wave: u32 },
}

/// The player-controlled (or autopiloted) combatant
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Body,
    pub health: u32,
    pub max_health: u32,
    pub score: u64,
    pub level: u32,
    pub shoot_cooldown: u32,
    pub shoot_power: f32,
}

impl Player {
    /// Fresh level-1 player at the center of the field
    pub fn new(tuning: &Tuning) -> Self {
        let center = tuning.bounds() / 2.0;
        Self {
            body: Body::centered(center, tuning.player_size),
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            score: 0,
            level: 1,
            shoot_cooldown: 0,
            shoot_power: tuning.player_shoot_power,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn health_ratio(&self) -> f32 {
        self.health as f32 / self.max_health.max(1) as f32
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Fire toward `target`. Returns `None` while the cooldown is running.
    ///
    /// The cooldown resets to `base / level`, so higher levels fire faster.
    pub fn shoot(&mut self, target: Vec2, tuning: &Tuning) -> Option<Projectile> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = tuning.player_base_cooldown / self.level.max(1);

        let origin = self.body.center();
        let dir = direction_to(origin, target);
        let vel = dir * tuning.projectile_speed * self.shoot_power;
        Some(Projectile::new(origin, vel, self.level, tuning))
    }

    /// Integrate motion and tick the shot cooldown
    pub fn update(&mut self, bounds: Vec2) {
        self.body.update(bounds);
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }
}

/// A hostile combatant
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: u32,
    pub body: Body,
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
    pub damage: u32,
    pub reward: u32,
    pub shoot_cooldown: u32,
}

impl Enemy {
    /// Base-stat enemy at `pos`, before any wave scaling
    pub fn new(id: u32, pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            body: Body::new(pos, tuning.enemy_size),
            health: tuning.enemy_base_health,
            max_health: tuning.enemy_base_health,
            speed: tuning.enemy_base_speed,
            damage: tuning.enemy_damage,
            reward: 10,
            shoot_cooldown: 0,
        }
    }

    /// Apply wave difficulty scaling to freshly spawned stats
    pub fn scale_for_wave(&mut self, wave: u32) {
        self.max_health += wave * 5;
        self.health = self.max_health;
        self.speed += wave as f32 * 0.2;
        self.reward = (10 + wave * 2).max(10);
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Fire at `target` with a randomized cooldown reset
    pub fn shoot(
        &mut self,
        target: Vec2,
        tuning: &Tuning,
        rng: &mut impl RandomSource,
    ) -> Option<Projectile> {
        if self.shoot_cooldown > 0 {
            return None;
        }
        self.shoot_cooldown = rng.range_u32(tuning.enemy_cooldown_min, tuning.enemy_cooldown_max);

        let origin = self.body.center();
        let vel = direction_to(origin, target) * tuning.projectile_speed;
        Some(Projectile::new(origin, vel, 0, tuning))
    }

    pub fn update(&mut self, bounds: Vec2) {
        self.body.update(bounds);
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }
}

/// A shot in flight
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub body: Body,
    /// 0 for enemy shots, otherwise the shooter's level at fire time
    pub owner_level: u32,
    pub damage: u32,
    pub lifetime: u32,
}

impl Projectile {
    /// New projectile centered on `origin`. The id is assigned when it
    /// joins the pool.
    pub fn new(origin: Vec2, vel: Vec2, owner_level: u32, tuning: &Tuning) -> Self {
        let size = tuning.projectile_base_size + owner_level as f32;
        let mut body = Body::centered(origin, size);
        body.vel = vel;
        Self {
            id: 0,
            body,
            owner_level,
            damage: (5 + owner_level * 2).max(1),
            lifetime: tuning.projectile_lifetime,
        }
    }

    pub fn is_player_owned(&self) -> bool {
        self.owner_level > 0
    }

    /// Count down one tick of lifetime; expire at zero
    pub fn decay(&mut self) {
        self.lifetime = self.lifetime.saturating_sub(1);
        if self.lifetime == 0 {
            self.body.alive = false;
        }
    }
}

/// Particle palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    /// Enemy rammed the player
    Contact,
    /// Player took a shot
    PlayerHit,
    /// Enemy took a shot
    EnemyHit,
    /// Enemy destroyed
    Death,
}

impl ParticleColor {
    /// Packed 0xRRGGBB
    pub fn rgb(&self) -> u32 {
        match self {
            ParticleColor::Contact => 0xff8c00,
            ParticleColor::PlayerHit => 0x3c8cff,
            ParticleColor::EnemyHit => 0xffdc50,
            ParticleColor::Death => 0xff3232,
        }
    }
}

/// Smallest size a shrinking particle keeps
const MIN_PARTICLE_SIZE: f32 = 0.5;

/// Decorative debris; never collides
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub body: Body,
    pub color: ParticleColor,
    pub lifetime: u32,
    pub max_lifetime: u32,
    pub shrink_rate: f32,
}

impl Particle {
    pub fn update(&mut self, bounds: Vec2) {
        self.body.update(bounds);
        self.body.size = (self.body.size - self.shrink_rate).max(MIN_PARTICLE_SIZE);
        self.lifetime = self.lifetime.saturating_sub(1);
        if self.lifetime == 0 {
            self.body.alive = false;
        }
    }

    /// Remaining lifetime in [0, 1]
    pub fn life_fraction(&self) -> f32 {
        self.lifetime as f32 / self.max_lifetime.max(1) as f32
    }
}

/// Spawn up to `count` particles flying out of `at`, respecting `cap`
pub fn burst(
    particles: &mut Vec<Particle>,
    at: Vec2,
    count: u32,
    color: ParticleColor,
    tuning: &Tuning,
    cap: usize,
    rng: &mut impl RandomSource,
) {
    for _ in 0..count {
        if particles.len() >= cap {
            return;
        }
        let angle = rng.unit() * std::f32::consts::TAU;
        let speed = rng.range_f32(1.0, 4.0);
        let lifetime = tuning.particle_lifetime / 2
            + rng.range_u32(0, tuning.particle_lifetime - tuning.particle_lifetime / 2);
        let mut body = Body::centered(at, tuning.particle_size);
        body.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        particles.push(Particle {
            body,
            color,
            lifetime: lifetime.max(1),
            max_lifetime: lifetime.max(1),
            shrink_rate: tuning.particle_shrink,
        });
    }
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: SimRng,
    pub tuning: Tuning,
    /// Particle pool cap
    pub max_particles: usize,
    pub phase: GamePhase,
    /// Current wave (1-based)
    pub wave: u32,
    /// Ticks until the spawner may admit another enemy
    pub spawn_timer: u32,
    /// Enemies admitted since the current wave began
    pub spawned_this_wave: u32,
    /// Gameplay ticks elapsed in the current run
    pub time_ticks: u64,
    pub player: Player,
    /// Active enemies (sorted by id)
    pub enemies: Vec<Enemy>,
    /// Active projectiles from both sides (sorted by id)
    pub projectiles: Vec<Projectile>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    next_id: u32,
}

impl GameState {
    /// Create a session in the `Menu` phase
    pub fn new(seed: u64, tuning: Tuning, max_particles: usize) -> Self {
        Self {
            seed,
            rng: SimRng::new(seed),
            player: Player::new(&tuning),
            tuning,
            max_particles,
            phase: GamePhase::Menu,
            wave: 1,
            spawn_timer: 0,
            spawned_this_wave: 0,
            time_ticks: 0,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            next_id: 1,
        }
    }

    /// Session using the particle budget from `settings`
    pub fn from_settings(seed: u64, settings: &crate::Settings, tuning: Tuning) -> Self {
        Self::new(seed, tuning, settings.max_particles())
    }

    /// Start a fresh run: new player, empty pools, wave 1
    pub fn reset(&mut self) {
        self.player = Player::new(&self.tuning);
        self.enemies.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.wave = 1;
        self.spawn_timer = 0;
        self.spawned_this_wave = 0;
        self.time_ticks = 0;
    }

    pub fn score(&self) -> u64 {
        self.player.score
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Give a projectile an id and add it to the pool
    pub fn push_projectile(&mut self, mut projectile: Projectile) {
        projectile.id = self.next_entity_id();
        self.projectiles.push(projectile);
    }

    /// Drop every entity flagged not-alive
    pub fn compact(&mut self) {
        self.enemies.retain(|e| e.body.alive);
        self.projectiles.retain(|p| p.body.alive);
        self.particles.retain(|p| p.body.alive);
    }

    /// Ensure pools are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.projectiles.sort_by_key(|p| p.id);
    }
}
