//! Score and level progression

use super::state::Player;
use crate::tuning::Tuning;

/// Level implied by a score: one level per `points_per_level`, starting at 1
#[inline]
pub fn level_for_score(score: u64, points_per_level: u64) -> u32 {
    (score / points_per_level.max(1)) as u32 + 1
}

/// Credit `reward` points to the player
pub fn award(player: &mut Player, reward: u32) {
    player.score += reward as u64;
}

/// Bring the player's level up to what their score implies.
///
/// Returns the new level if a level-up happened. A level-up raises max
/// health by the tuning bonus once and refills health to the new maximum,
/// however many levels the score jumped.
pub fn apply_level_up(player: &mut Player, tuning: &Tuning) -> Option<u32> {
    let level = level_for_score(player.score, tuning.points_per_level);
    if level <= player.level {
        return None;
    }
    player.level = level;
    player.max_health += tuning.level_up_health_bonus;
    player.health = player.max_health;
    log::info!(
        "Level up! Now level {} (max health {})",
        player.level,
        player.max_health
    );
    Some(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_score() {
        assert_eq!(level_for_score(0, 100), 1);
        assert_eq!(level_for_score(99, 100), 1);
        assert_eq!(level_for_score(100, 100), 2);
        assert_eq!(level_for_score(250, 100), 3);
    }

    #[test]
    fn test_crossing_100_levels_up() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.score = 95;
        player.health = 40;
        assert_eq!(apply_level_up(&mut player, &tuning), None);

        award(&mut player, 10);
        assert_eq!(apply_level_up(&mut player, &tuning), Some(2));
        assert_eq!(player.level, 2);
        assert_eq!(player.max_health, 120);
        assert_eq!(player.health, 120);

        // Idempotent until the next threshold
        assert_eq!(apply_level_up(&mut player, &tuning), None);
        assert_eq!(player.max_health, 120);
    }

    #[test]
    fn test_multi_level_jump_sets_derived_level() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        award(&mut player, 350);
        assert_eq!(apply_level_up(&mut player, &tuning), Some(4));
        assert_eq!(player.level, 4);
        assert_eq!(player.max_health, tuning.player_max_health + tuning.level_up_health_bonus);
    }
}
