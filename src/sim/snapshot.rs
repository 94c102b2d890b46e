//! Read-only view of the simulation handed to renderers once per tick

use glam::Vec2;
use serde::Serialize;

use super::state::{GamePhase, GameState};

/// How a renderer should color a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorClass {
    Enemy,
    PlayerShot,
    EnemyShot,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub size: f32,
    pub health: u32,
    pub max_health: u32,
    pub health_ratio: f32,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyView {
    pub id: u32,
    pub pos: Vec2,
    pub size: f32,
    pub class: ColorClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub life_fraction: f32,
    pub rgb: u32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub wave: u32,
    pub player: PlayerView,
    pub enemies: Vec<BodyView>,
    pub projectiles: Vec<BodyView>,
    pub particles: Vec<ParticleView>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            tick: state.time_ticks,
            phase: state.phase,
            score: player.score,
            wave: state.wave,
            player: PlayerView {
                pos: player.body.pos,
                size: player.body.size,
                health: player.health,
                max_health: player.max_health,
                health_ratio: player.health_ratio(),
                level: player.level,
            },
            enemies: state
                .enemies
                .iter()
                .map(|e| BodyView {
                    id: e.id,
                    pos: e.body.pos,
                    size: e.body.size,
                    class: ColorClass::Enemy,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| BodyView {
                    id: p.id,
                    pos: p.body.pos,
                    size: p.body.size,
                    class: if p.is_player_owned() {
                        ColorClass::PlayerShot
                    } else {
                        ColorClass::EnemyShot
                    },
                })
                .collect(),
            particles: state
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.body.pos,
                    size: p.body.size,
                    life_fraction: p.life_fraction(),
                    rgb: p.color.rgb(),
                })
                .collect(),
        }
    }

    /// Exact bitwise equality, stricter than `PartialEq` on floats
    pub fn bit_identical(&self, other: &Self) -> bool {
        fn vec_bits(v: Vec2) -> (u32, u32) {
            (v.x.to_bits(), v.y.to_bits())
        }
        fn body_bits(b: &BodyView) -> (u32, (u32, u32), u32, ColorClass) {
            (b.id, vec_bits(b.pos), b.size.to_bits(), b.class)
        }

        self.tick == other.tick
            && self.phase == other.phase
            && self.score == other.score
            && self.wave == other.wave
            && vec_bits(self.player.pos) == vec_bits(other.player.pos)
            && self.player.health == other.player.health
            && self.player.level == other.player.level
            && self.enemies.len() == other.enemies.len()
            && self.projectiles.len() == other.projectiles.len()
            && self.particles.len() == other.particles.len()
            && self.enemies.iter().map(body_bits).eq(other.enemies.iter().map(body_bits))
            && self
                .projectiles
                .iter()
                .map(body_bits)
                .eq(other.projectiles.iter().map(body_bits))
            && self
                .particles
                .iter()
                .map(|p| (vec_bits(p.pos), p.size.to_bits(), p.rgb))
                .eq(other.particles.iter().map(|p| (vec_bits(p.pos), p.size.to_bits(), p.rgb)))
    }
}
