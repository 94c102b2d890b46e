//! Collision detection and resolution
//!
//! Bodies collide as circles of radius `size / 2`. Resolution runs three
//! passes in a fixed order:
//! 1. player vs enemies (contact)
//! 2. enemy shots vs player
//! 3. player shots vs enemies
//!
//! Removal is mark-then-compact: a pass flags `alive = false` and every
//! later check skips flagged entities, so nothing is removed, rewarded, or
//! damages twice in one tick. The tick compacts pools afterward.

use glam::Vec2;

use super::body::Body;
use super::score;
use super::state::{GameEvent, GameState, ParticleColor, burst};

/// True when two bodies' circular proxies overlap (touching is a miss)
#[inline]
pub fn circles_overlap(a: &Body, b: &Body) -> bool {
    let reach = a.radius() + b.radius();
    a.center().distance_squared(b.center()) < reach * reach
}

/// Resolve every pairwise interaction for this tick
pub fn resolve(state: &mut GameState, events: &mut Vec<GameEvent>) {
    player_vs_enemies(state, events);
    enemy_shots_vs_player(state, events);
    player_shots_vs_enemies(state, events);
}

fn player_vs_enemies(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let GameState {
        player,
        enemies,
        particles,
        rng,
        tuning,
        max_particles,
        ..
    } = state;

    for enemy in enemies.iter_mut().filter(|e| e.body.alive) {
        if !circles_overlap(&player.body, &enemy.body) {
            continue;
        }
        player.take_damage(enemy.damage);
        enemy.body.alive = false;
        score::award(player, enemy.reward);
        events.push(GameEvent::PlayerHit {
            damage: enemy.damage,
        });
        events.push(GameEvent::EnemyKilled {
            id: enemy.id,
            reward: enemy.reward,
            contact: true,
        });
        burst(
            particles,
            enemy.body.center(),
            tuning.contact_particles,
            ParticleColor::Contact,
            tuning,
            *max_particles,
            rng,
        );
    }
}

fn enemy_shots_vs_player(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let GameState {
        player,
        projectiles,
        particles,
        rng,
        tuning,
        max_particles,
        ..
    } = state;

    for shot in projectiles
        .iter_mut()
        .filter(|p| p.body.alive && !p.is_player_owned())
    {
        if !circles_overlap(&player.body, &shot.body) {
            continue;
        }
        player.take_damage(shot.damage);
        shot.body.alive = false;
        events.push(GameEvent::PlayerHit {
            damage: shot.damage,
        });
        burst(
            particles,
            shot.body.center(),
            tuning.player_hit_particles,
            ParticleColor::PlayerHit,
            tuning,
            *max_particles,
            rng,
        );
    }
}

fn player_shots_vs_enemies(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let GameState {
        player,
        enemies,
        projectiles,
        particles,
        rng,
        tuning,
        max_particles,
        ..
    } = state;

    for shot in projectiles
        .iter_mut()
        .filter(|p| p.body.alive && p.is_player_owned())
    {
        // A shot is consumed by the first live enemy it touches
        let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.body.alive && circles_overlap(&shot.body, &e.body))
        else {
            continue;
        };

        enemy.take_damage(shot.damage);
        shot.body.alive = false;
        let hit_at: Vec2 = shot.body.center();
        burst(
            particles,
            hit_at,
            tuning.enemy_hit_particles,
            ParticleColor::EnemyHit,
            tuning,
            *max_particles,
            rng,
        );

        if enemy.health == 0 {
            enemy.body.alive = false;
            score::award(player, enemy.reward);
            events.push(GameEvent::EnemyKilled {
                id: enemy.id,
                reward: enemy.reward,
                contact: false,
            });
            burst(
                particles,
                enemy.body.center(),
                tuning.death_particles,
                ParticleColor::Death,
                tuning,
                *max_particles,
                rng,
            );
        }
    }
}
