//! Progression carried across levels and runs: dungeon depth plus the set
//! of owned upgrade identifiers. Derived player stats consult the owned
//! set; the base configuration tables are never mutated.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, keys};
use crate::game::Game;

/// Everything persistence needs to rebuild a run. Levels are regenerated
/// from the seed and depth, never stored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProgressionSnapshot {
    pub depth: u32,
    pub unlocked_upgrades: Vec<String>,
}

pub fn player_max_hp(config: &GameConfig, owned: &BTreeSet<String>) -> i32 {
    let mut hp = config.player.hp;
    if owned.contains(keys::UPGRADE_VIGOR) {
        hp += 4;
    }
    hp
}

pub fn player_speed(config: &GameConfig, owned: &BTreeSet<String>) -> f32 {
    let mut speed = config.player.speed;
    if owned.contains(keys::UPGRADE_SWIFT) {
        speed *= 1.15;
    }
    speed
}

impl Game {
    pub fn progression_snapshot(&self) -> ProgressionSnapshot {
        ProgressionSnapshot {
            depth: self.depth(),
            unlocked_upgrades: self.unlocked_upgrades().iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|key| key.to_string()).collect()
    }

    #[test]
    fn vigor_raises_max_hp_and_swift_raises_speed() {
        let config = GameConfig::default();
        let none = BTreeSet::new();

        assert_eq!(player_max_hp(&config, &none), config.player.hp);
        assert_eq!(
            player_max_hp(&config, &owned(&[keys::UPGRADE_VIGOR])),
            config.player.hp + 4
        );

        assert_eq!(player_speed(&config, &none), config.player.speed);
        assert!(player_speed(&config, &owned(&[keys::UPGRADE_SWIFT])) > config.player.speed);
    }

    #[test]
    fn unrelated_upgrades_leave_stats_alone() {
        let config = GameConfig::default();
        let blast = owned(&[keys::UPGRADE_BLAST, keys::UPGRADE_RICOCHET]);
        assert_eq!(player_max_hp(&config, &blast), config.player.hp);
        assert_eq!(player_speed(&config, &blast), config.player.speed);
    }

    #[test]
    fn snapshot_restores_depth_and_upgrades() {
        let snapshot = ProgressionSnapshot {
            depth: 4,
            unlocked_upgrades: vec![keys::UPGRADE_SWIFT.to_string()],
        };
        let game = Game::from_snapshot(99, GameConfig::default(), &snapshot);

        assert_eq!(game.depth(), 4);
        assert!(game.owns_upgrade(keys::UPGRADE_SWIFT));
        assert_eq!(game.progression_snapshot(), snapshot);
    }

    #[test]
    fn zero_depth_snapshots_clamp_to_the_first_level() {
        let snapshot = ProgressionSnapshot { depth: 0, unlocked_upgrades: Vec::new() };
        let game = Game::from_snapshot(5, GameConfig::default(), &snapshot);
        assert_eq!(game.depth(), 1);
    }
}
