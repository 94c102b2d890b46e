//! Property tests over random seeds and random input streams

use std::collections::HashMap;

use auto_arena::Tuning;
use auto_arena::sim::{Command, GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};
use glam::Vec2;
use proptest::prelude::*;

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (0u8..40, -1.0f32..1.0, -1.0f32..1.0, any::<bool>()).prop_map(|(kind, x, y, fire)| match kind {
        0 => TickInput::command(Command::Start),
        1 => TickInput::command(Command::Restart),
        2..=9 => TickInput {
            steer: Some(Vec2::new(x, y)),
            fire,
            ..Default::default()
        },
        _ => TickInput::default(),
    })
}

fn session_strategy() -> impl Strategy<Value = (u64, Vec<TickInput>)> {
    (any::<u64>(), prop::collection::vec(input_strategy(), 1..400))
}

fn started(seed: u64) -> GameState {
    let mut state = GameState::new(seed, Tuning::default(), 256);
    tick(&mut state, &TickInput::command(Command::Start));
    state
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_entities_stay_in_bounds((seed, inputs) in session_strategy()) {
        let mut state = started(seed);
        let bounds = state.tuning.bounds();
        for input in &inputs {
            tick(&mut state, input);
            prop_assert!(state.player.body.in_bounds(bounds));
            for e in &state.enemies {
                prop_assert!(e.body.in_bounds(bounds), "enemy {} at {:?}", e.id, e.body.pos);
            }
            for p in &state.projectiles {
                prop_assert!(p.body.in_bounds(bounds), "projectile {} at {:?}", p.id, p.body.pos);
            }
            for p in &state.particles {
                prop_assert!(p.body.in_bounds(bounds));
            }
        }
    }

    #[test]
    fn prop_pools_respect_caps((seed, inputs) in session_strategy()) {
        let mut state = started(seed);
        for input in &inputs {
            tick(&mut state, input);
            prop_assert!(state.enemies.len() <= state.tuning.max_enemies);
            prop_assert!(state.particles.len() <= state.max_particles);
        }
    }

    #[test]
    fn prop_health_never_exceeds_max((seed, inputs) in session_strategy()) {
        let mut state = started(seed);
        for input in &inputs {
            tick(&mut state, input);
            prop_assert!(state.player.health <= state.player.max_health);
            for e in &state.enemies {
                prop_assert!(e.health <= e.max_health);
                prop_assert!(e.health > 0, "dead enemy {} left in pool", e.id);
            }
        }
    }

    #[test]
    fn prop_health_only_rises_on_level_up((seed, inputs) in session_strategy()) {
        let mut state = started(seed);
        for input in &inputs {
            let was_in_run = state.phase != GamePhase::Menu;
            let before = state.player.health;

            let outcome = tick(&mut state, input);

            let levelled = outcome
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::LevelUp { .. }));
            if was_in_run && !levelled {
                prop_assert!(
                    state.player.health <= before,
                    "health rose from {} to {} without a level-up",
                    before,
                    state.player.health
                );
            }
        }
    }

    #[test]
    fn prop_projectile_lifetime_counts_down((seed, inputs) in session_strategy()) {
        let mut state = started(seed);
        for input in &inputs {
            let was_playing = state.phase == GamePhase::Playing;
            let before: HashMap<u32, u32> =
                state.projectiles.iter().map(|p| (p.id, p.lifetime)).collect();

            tick(&mut state, input);

            if was_playing && state.phase == GamePhase::Playing {
                for p in &state.projectiles {
                    prop_assert!(p.lifetime > 0);
                    if let Some(&prev) = before.get(&p.id) {
                        prop_assert_eq!(p.lifetime, prev - 1);
                    }
                }
            }
        }
    }

    #[test]
    fn prop_same_seed_same_run((seed, inputs) in session_strategy()) {
        let mut a = started(seed);
        let mut b = started(seed);
        for input in &inputs {
            tick(&mut a, input);
            tick(&mut b, input);
            prop_assert!(Snapshot::capture(&a).bit_identical(&Snapshot::capture(&b)));
        }
    }

    #[test]
    fn prop_level_tracks_score((seed, inputs) in session_strategy()) {
        let mut state = started(seed);
        for input in &inputs {
            tick(&mut state, input);
            let expected = (state.player.score / state.tuning.points_per_level) as u32 + 1;
            if state.phase == GamePhase::Playing {
                prop_assert_eq!(state.player.level, expected);
            } else {
                // The killing tick may have scored without levelling up
                prop_assert!(state.player.level <= expected);
            }
        }
    }
}
