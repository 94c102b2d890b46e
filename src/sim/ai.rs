//! Seek heuristics for the autopiloted player and every enemy
//!
//! Policies only decide; they never mutate entities. The tick applies the
//! returned intents so decisions for one entity cannot observe another's
//! half-applied state.

use glam::Vec2;

use super::rng::RandomSource;
use super::state::{Enemy, Player};
use crate::direction_to;
use crate::tuning::Tuning;

/// What an entity wants to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intent {
    /// Velocity for this tick (pixels per tick)
    pub velocity: Vec2,
    /// Point to fire at, if the entity decided to shoot
    pub shoot_at: Option<Vec2>,
}

/// Nearest alive enemy to `from`, by center distance
pub fn nearest_enemy(from: Vec2, enemies: &[Enemy]) -> Option<&Enemy> {
    enemies
        .iter()
        .filter(|e| e.body.alive)
        .min_by(|a, b| {
            let da = a.body.center().distance_squared(from);
            let db = b.body.center().distance_squared(from);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Autopilot: chase the nearest enemy and take potshots when close,
/// otherwise wander.
pub fn player_intent(
    player: &Player,
    enemies: &[Enemy],
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Intent {
    let center = player.body.center();
    match nearest_enemy(center, enemies) {
        Some(target) => {
            let target_center = target.body.center();
            let velocity = direction_to(center, target_center) * tuning.player_speed;
            let in_range = center.distance(target_center) < tuning.player_engage_range;
            let shoot_at = (in_range && rng.chance(tuning.player_shoot_chance))
                .then_some(target_center);
            Intent { velocity, shoot_at }
        }
        None => {
            let vx = rng.range_f32(-tuning.player_speed, tuning.player_speed);
            let vy = rng.range_f32(-tuning.player_speed, tuning.player_speed);
            Intent {
                velocity: Vec2::new(vx, vy),
                shoot_at: None,
            }
        }
    }
}

/// Manual steering: move along `steer`, fire at the nearest enemy (or
/// straight up) when `fire` is held.
pub fn manual_intent(
    player: &Player,
    enemies: &[Enemy],
    steer: Vec2,
    fire: bool,
    tuning: &Tuning,
) -> Intent {
    let center = player.body.center();
    let velocity = steer.normalize_or_zero() * tuning.player_speed;
    let shoot_at = fire.then(|| {
        nearest_enemy(center, enemies)
            .map(|e| e.body.center())
            .unwrap_or(center - Vec2::Y)
    });
    Intent { velocity, shoot_at }
}

/// Enemy policy: close in on the player and occasionally fire
pub fn enemy_intent(
    enemy: &Enemy,
    player_center: Vec2,
    tuning: &Tuning,
    rng: &mut impl RandomSource,
) -> Intent {
    let velocity = direction_to(enemy.body.center(), player_center) * enemy.speed;
    let shoot_at = rng
        .chance(tuning.enemy_shoot_chance)
        .then_some(player_center);
    Intent { velocity, shoot_at }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRng;

    fn enemy_at(id: u32, center: Vec2, tuning: &Tuning) -> Enemy {
        let mut e = Enemy::new(id, Vec2::ZERO, tuning);
        e.body.pos = center - Vec2::splat(e.body.size / 2.0);
        e
    }

    #[test]
    fn test_nearest_enemy_skips_dead() {
        let tuning = Tuning::default();
        let mut close = enemy_at(1, Vec2::new(110.0, 100.0), &tuning);
        close.body.alive = false;
        let far = enemy_at(2, Vec2::new(300.0, 100.0), &tuning);
        let enemies = vec![close, far];
        let nearest = nearest_enemy(Vec2::new(100.0, 100.0), &enemies).unwrap();
        assert_eq!(nearest.id, 2);
    }

    #[test]
    fn test_player_seeks_nearest() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        let center = player.body.center();
        let enemies = vec![
            enemy_at(1, center + Vec2::new(0.0, 300.0), &tuning),
            enemy_at(2, center + Vec2::new(-150.0, 0.0), &tuning),
        ];
        // Never fire: unit draw above any chance
        let mut rng = ScriptedRng::new(&[], 0.99);
        let intent = player_intent(&player, &enemies, &tuning, &mut rng);
        assert!((intent.velocity.x + tuning.player_speed).abs() < 1e-4);
        assert!(intent.velocity.y.abs() < 1e-4);
        assert!(intent.shoot_at.is_none());
    }

    #[test]
    fn test_player_fires_only_in_range() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        let center = player.body.center();

        let near = vec![enemy_at(1, center + Vec2::new(100.0, 0.0), &tuning)];
        let mut rng = ScriptedRng::new(&[], 0.0);
        let intent = player_intent(&player, &near, &tuning, &mut rng);
        assert_eq!(intent.shoot_at, Some(near[0].body.center()));

        let far = vec![enemy_at(1, center + Vec2::new(350.0, 0.0), &tuning)];
        let intent = player_intent(&player, &far, &tuning, &mut rng);
        assert!(intent.shoot_at.is_none());
    }

    #[test]
    fn test_player_wanders_without_enemies() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        let mut rng = ScriptedRng::new(&[0.0, 0.75], 0.5);
        let intent = player_intent(&player, &[], &tuning, &mut rng);
        assert!((intent.velocity.x + tuning.player_speed).abs() < 1e-4);
        assert!((intent.velocity.y - tuning.player_speed * 0.5).abs() < 1e-4);
        assert!(intent.shoot_at.is_none());
    }

    #[test]
    fn test_enemy_seeks_player_at_own_speed() {
        let tuning = Tuning::default();
        let mut enemy = enemy_at(1, Vec2::new(100.0, 100.0), &tuning);
        enemy.speed = 3.5;
        let mut rng = ScriptedRng::new(&[], 0.99);
        let intent = enemy_intent(&enemy, Vec2::new(100.0, 400.0), &tuning, &mut rng);
        assert!((intent.velocity.y - 3.5).abs() < 1e-4);
        assert!(intent.velocity.x.abs() < 1e-4);
        assert!(intent.shoot_at.is_none());
    }

    #[test]
    fn test_enemy_shoot_roll() {
        let tuning = Tuning::default();
        let enemy = enemy_at(1, Vec2::new(100.0, 100.0), &tuning);
        let mut rng = ScriptedRng::new(&[0.001], 0.99);
        let target = Vec2::new(400.0, 300.0);
        let intent = enemy_intent(&enemy, target, &tuning, &mut rng);
        assert_eq!(intent.shoot_at, Some(target));
    }

    #[test]
    fn test_manual_intent() {
        let tuning = Tuning::default();
        let player = Player::new(&tuning);
        let intent = manual_intent(&player, &[], Vec2::new(3.0, 4.0), true, &tuning);
        assert!((intent.velocity.length() - tuning.player_speed).abs() < 1e-4);
        let aim = intent.shoot_at.unwrap();
        assert!(aim.y < player.body.center().y);

        let idle = manual_intent(&player, &[], Vec2::ZERO, false, &tuning);
        assert_eq!(idle.velocity, Vec2::ZERO);
        assert!(idle.shoot_at.is_none());
    }
}
