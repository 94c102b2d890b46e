//! Enemy admission and wave progression

use glam::Vec2;

use super::rng::{Edge, RandomSource};
use super::state::{Enemy, GameEvent, GameState};

/// Gap between a fresh enemy and the field edge it enters from
const SPAWN_MARGIN: f32 = 10.0;

/// Ticks between spawns at `wave`, floored at the tuning minimum
pub fn spawn_interval(base_rate: u32, min_interval: u32, wave: u32) -> u32 {
    base_rate
        .saturating_sub(wave.saturating_mul(5))
        .max(min_interval)
}

/// Entry point just outside `edge`, uniformly along it
pub fn edge_position(edge: Edge, bounds: Vec2, size: f32, rng: &mut impl RandomSource) -> Vec2 {
    match edge {
        Edge::Top => Vec2::new(rng.range_f32(0.0, bounds.x - size), -size - SPAWN_MARGIN),
        Edge::Bottom => Vec2::new(rng.range_f32(0.0, bounds.x - size), bounds.y + SPAWN_MARGIN),
        Edge::Left => Vec2::new(-size - SPAWN_MARGIN, rng.range_f32(0.0, bounds.y - size)),
        Edge::Right => Vec2::new(bounds.x + SPAWN_MARGIN, rng.range_f32(0.0, bounds.y - size)),
    }
}

/// Run one tick of the spawner.
///
/// Admission is checked before wave advancement, so a wave only advances
/// on a tick where the timer ran out with the field already empty. A wave
/// that has not admitted any enemy yet cannot advance; otherwise the
/// inter-wave delay expiring on an empty field would skip straight to the
/// next wave without ever spawning.
pub fn step(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let tuning = &state.tuning;
    if state.enemies.len() < tuning.max_enemies && state.spawn_timer == 0 {
        let edge = state.rng.edge();
        let pos = edge_position(edge, tuning.bounds(), tuning.enemy_size, &mut state.rng);
        let id = state.next_entity_id();

        let mut enemy = Enemy::new(id, pos, &state.tuning);
        enemy.scale_for_wave(state.wave);
        // Enemies enter flush with the edge so they are on-field from the first snapshot
        enemy.body.clamp_to(state.tuning.bounds());
        log::debug!("Spawned enemy {} from {:?} (wave {})", id, edge, state.wave);
        state.enemies.push(enemy);
        state.spawned_this_wave += 1;
        events.push(GameEvent::EnemySpawned { id });

        state.spawn_timer = spawn_interval(
            state.tuning.base_spawn_rate,
            state.tuning.min_spawn_interval,
            state.wave,
        );
    } else if state.spawn_timer > 0 {
        state.spawn_timer -= 1;
    }

    if state.enemies.is_empty() && state.spawn_timer == 0 && state.spawned_this_wave > 0 {
        state.wave += 1;
        state.spawn_timer = state.tuning.wave_delay;
        state.spawned_this_wave = 0;
        log::info!("Wave {} incoming", state.wave);
        events.push(GameEvent::WaveAdvanced { wave: state.wave });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRng;
    use crate::tuning::Tuning;

    fn playing_state() -> GameState {
        GameState::new(11, Tuning::default(), 256)
    }

    #[test]
    fn test_spawn_interval_tightens_and_floors() {
        assert_eq!(spawn_interval(60, 10, 1), 55);
        assert_eq!(spawn_interval(60, 10, 8), 20);
        assert_eq!(spawn_interval(60, 10, 11), 10);
        assert_eq!(spawn_interval(60, 10, 500), 10);
    }

    #[test]
    fn test_edge_positions_are_outside() {
        let bounds = Vec2::new(800.0, 600.0);
        let mut rng = ScriptedRng::new(&[], 0.5);
        assert!(edge_position(Edge::Top, bounds, 25.0, &mut rng).y < 0.0);
        assert!(edge_position(Edge::Bottom, bounds, 25.0, &mut rng).y > bounds.y);
        assert!(edge_position(Edge::Left, bounds, 25.0, &mut rng).x < 0.0);
        assert!(edge_position(Edge::Right, bounds, 25.0, &mut rng).x > bounds.x);
    }

    #[test]
    fn test_spawns_when_timer_zero() {
        let mut state = playing_state();
        let mut events = Vec::new();
        step(&mut state, &mut events);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_timer, spawn_interval(60, 10, 1));
        assert_eq!(state.wave, 1);
        assert_eq!(state.spawned_this_wave, 1);
        assert!(events.contains(&GameEvent::EnemySpawned { id: state.enemies[0].id }));

        let enemy = &state.enemies[0];
        assert!(enemy.body.in_bounds(state.tuning.bounds()));
        assert_eq!(enemy.max_health, state.tuning.enemy_base_health + 5);
        assert_eq!(enemy.reward, 12);
    }

    #[test]
    fn test_timer_counts_down_between_spawns() {
        let mut state = playing_state();
        let mut events = Vec::new();
        step(&mut state, &mut events);
        let timer = state.spawn_timer;
        step(&mut state, &mut events);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_timer, timer - 1);
    }

    #[test]
    fn test_respects_max_enemies() {
        let mut state = GameState::new(
            3,
            Tuning {
                max_enemies: 2,
                base_spawn_rate: 0,
                min_spawn_interval: 0,
                ..Tuning::default()
            },
            0,
        );
        let mut events = Vec::new();
        for _ in 0..20 {
            step(&mut state, &mut events);
            assert!(state.enemies.len() <= 2);
        }
        assert_eq!(state.enemies.len(), 2);
    }

    #[test]
    fn test_wave_advances_when_cleared_and_timer_expires() {
        let mut state = playing_state();
        let mut events = Vec::new();
        state.spawn_timer = 1;
        state.spawned_this_wave = 3;
        step(&mut state, &mut events);
        assert_eq!(state.wave, 2);
        assert_eq!(state.spawn_timer, state.tuning.wave_delay);
        assert_eq!(state.spawned_this_wave, 0);
        assert!(events.contains(&GameEvent::WaveAdvanced { wave: 2 }));
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_no_wave_advance_while_enemies_remain() {
        let mut state = playing_state();
        let mut events = Vec::new();
        step(&mut state, &mut events);
        for _ in 0..200 {
            state.spawn_timer = state.spawn_timer.max(1);
            step(&mut state, &mut events);
        }
        assert_eq!(state.wave, 1);
    }

    #[test]
    fn test_empty_wave_does_not_advance() {
        let mut state = playing_state();
        let mut events = Vec::new();
        state.spawn_timer = 1;
        step(&mut state, &mut events);
        assert_eq!(state.wave, 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_wave_delay_then_spawn() {
        let mut state = playing_state();
        let mut events = Vec::new();
        state.spawn_timer = 1;
        state.spawned_this_wave = 1;
        step(&mut state, &mut events);
        assert_eq!(state.wave, 2);

        let delay = state.spawn_timer;
        for _ in 0..delay {
            step(&mut state, &mut events);
            assert!(state.enemies.is_empty());
            assert_eq!(state.wave, 2);
        }
        assert_eq!(state.spawn_timer, 0);

        step(&mut state, &mut events);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.wave, 2);
        assert_eq!(state.enemies[0].reward, 14);
    }
}
