//! Immutable tuning tables, built once at startup and passed by reference.
//! Nothing in here is mutated at runtime; upgrade unlocks are a set of owned
//! identifiers consulted when deriving stats, never an edit to these tables.

use crate::types::{AttackStrategy, EnemyKind, MovementStrategy};

pub mod keys {
    pub const UPGRADE_SWIFT: &str = "upgrade_swift";
    pub const UPGRADE_VIGOR: &str = "upgrade_vigor";
    pub const UPGRADE_BLAST: &str = "upgrade_blast";
    pub const UPGRADE_RICOCHET: &str = "upgrade_ricochet";

    /// Altars grant the first upgrade in this order not yet owned.
    pub const UPGRADE_ORDER: [&str; 4] =
        [UPGRADE_SWIFT, UPGRADE_VIGOR, UPGRADE_BLAST, UPGRADE_RICOCHET];
}

#[derive(Clone, Copy, Debug)]
pub struct LevelConfig {
    pub width: usize,
    pub height: usize,
    pub target_room_count: usize,
    pub min_room_size: usize,
    pub max_room_size: usize,
    pub padding: usize,
    pub tile_size: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct SpatialConfig {
    pub cell_size: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct DoorConfig {
    pub trigger_radius: f32,
    pub slide_speed: f32,
    /// Slide offset below which a door still blocks movement.
    pub solid_threshold: f32,
    /// Margin added around the door footprint for the room-activation
    /// safety check, so a room never triggers mid-doorway.
    pub safety_pad: f32,
    pub push_force: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct PopulationConfig {
    pub door_clearance: f32,
    pub placement_attempts: u32,
    pub min_room_enemies: usize,
    pub max_room_enemies: usize,
    pub elite_count: usize,
    pub boss_count: usize,
    pub loot_guard_count: usize,
    pub loot_fraction: f32,
    pub elite_fraction: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct PlayerConfig {
    pub hp: i32,
    pub speed: f32,
    pub radius: f32,
    pub fire_cooldown: f32,
    pub interaction_radius: f32,
    pub iframe_duration: f32,
    pub hit_knockback: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct ProjectileConfig {
    pub speed: f32,
    pub damage: i32,
    pub life: f32,
    pub radius: f32,
    pub knockback: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct ExplosionConfig {
    pub radius: f32,
    pub damage: i32,
    pub knockback: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct PickupConfig {
    /// Chance a slain enemy drops a health pack instead of a coin.
    pub health_drop_chance: f32,
    pub health_pack_heal: i32,
    pub radius: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub level: LevelConfig,
    pub spatial: SpatialConfig,
    pub doors: DoorConfig,
    pub population: PopulationConfig,
    pub player: PlayerConfig,
    pub player_projectile: ProjectileConfig,
    pub explosion: ExplosionConfig,
    pub pickups: PickupConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level: LevelConfig {
                width: 50,
                height: 50,
                target_room_count: 10,
                min_room_size: 7,
                max_room_size: 14,
                padding: 1,
                tile_size: 40.0,
            },
            spatial: SpatialConfig { cell_size: 80.0 },
            doors: DoorConfig {
                trigger_radius: 100.0,
                slide_speed: 100.0,
                solid_threshold: 30.0,
                safety_pad: 10.0,
                push_force: 200.0,
            },
            population: PopulationConfig {
                door_clearance: 120.0,
                placement_attempts: 30,
                min_room_enemies: 1,
                max_room_enemies: 12,
                elite_count: 6,
                boss_count: 6,
                loot_guard_count: 2,
                loot_fraction: 0.15,
                elite_fraction: 0.10,
            },
            player: PlayerConfig {
                hp: 10,
                speed: 200.0,
                radius: 15.0,
                fire_cooldown: 0.4,
                interaction_radius: 40.0,
                iframe_duration: 1.0,
                hit_knockback: 250.0,
            },
            player_projectile: ProjectileConfig {
                speed: 600.0,
                damage: 2,
                life: 2.0,
                radius: 4.0,
                knockback: 400.0,
            },
            explosion: ExplosionConfig { radius: 80.0, damage: 2, knockback: 500.0 },
            pickups: PickupConfig { health_drop_chance: 0.2, health_pack_heal: 2, radius: 10.0 },
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct EnemyStats {
    pub hp: i32,
    pub speed: f32,
    pub drop_value: u32,
    pub radius: f32,
}

pub fn enemy_stats(kind: EnemyKind) -> EnemyStats {
    match kind {
        EnemyKind::Walker => EnemyStats { hp: 3, speed: 100.0, drop_value: 10, radius: 15.0 },
        EnemyKind::Shooter => EnemyStats { hp: 3, speed: 80.0, drop_value: 15, radius: 15.0 },
        EnemyKind::Smart => EnemyStats { hp: 5, speed: 110.0, drop_value: 20, radius: 15.0 },
        EnemyKind::Stealth => EnemyStats { hp: 3, speed: 120.0, drop_value: 20, radius: 15.0 },
        EnemyKind::Rapid => EnemyStats { hp: 4, speed: 90.0, drop_value: 30, radius: 15.0 },
        EnemyKind::Shotgun => EnemyStats { hp: 6, speed: 70.0, drop_value: 30, radius: 15.0 },
        EnemyKind::Heavy => EnemyStats { hp: 12, speed: 50.0, drop_value: 50, radius: 20.0 },
    }
}

/// One row of the level-gated spawn table. A kind is eligible from
/// `unlock_depth` onward and its weight grows linearly with depth.
#[derive(Clone, Copy, Debug)]
pub struct EnemyWeightRule {
    pub kind: EnemyKind,
    pub unlock_depth: u32,
    pub base_weight: u32,
    pub per_depth: u32,
}

impl EnemyWeightRule {
    pub fn weight_at(&self, depth: u32) -> u32 {
        self.base_weight + self.per_depth * depth
    }
}

pub const ENEMY_WEIGHT_TABLE: &[EnemyWeightRule] = &[
    EnemyWeightRule { kind: EnemyKind::Walker, unlock_depth: 1, base_weight: 150, per_depth: 0 },
    EnemyWeightRule { kind: EnemyKind::Shooter, unlock_depth: 1, base_weight: 50, per_depth: 0 },
    EnemyWeightRule { kind: EnemyKind::Smart, unlock_depth: 2, base_weight: 40, per_depth: 5 },
    EnemyWeightRule { kind: EnemyKind::Rapid, unlock_depth: 3, base_weight: 30, per_depth: 5 },
    EnemyWeightRule { kind: EnemyKind::Shotgun, unlock_depth: 4, base_weight: 20, per_depth: 5 },
    EnemyWeightRule { kind: EnemyKind::Stealth, unlock_depth: 4, base_weight: 15, per_depth: 3 },
    EnemyWeightRule { kind: EnemyKind::Heavy, unlock_depth: 6, base_weight: 10, per_depth: 4 },
];

/// The weakest always-eligible kind, used as the weighted-draw fallback.
pub const FALLBACK_ENEMY_KIND: EnemyKind = EnemyKind::Walker;

#[derive(Clone, Copy, Debug)]
pub struct AttackProfile {
    pub strategy: AttackStrategy,
    pub cooldown: f32,
    pub projectile_speed: f32,
    pub damage: i32,
    pub range: f32,
}

pub fn movement_strategy(kind: EnemyKind) -> MovementStrategy {
    match kind {
        EnemyKind::Smart => MovementStrategy::PathfindingChase,
        _ => MovementStrategy::Chase,
    }
}

pub fn attack_profile(kind: EnemyKind) -> AttackProfile {
    match kind {
        EnemyKind::Walker | EnemyKind::Stealth => AttackProfile {
            strategy: AttackStrategy::Melee,
            cooldown: 0.0,
            projectile_speed: 0.0,
            damage: 1,
            range: 0.0,
        },
        EnemyKind::Shooter => AttackProfile {
            strategy: AttackStrategy::SingleShot,
            cooldown: 2.0,
            projectile_speed: 350.0,
            damage: 1,
            range: 420.0,
        },
        EnemyKind::Smart => AttackProfile {
            strategy: AttackStrategy::SingleShot,
            cooldown: 1.6,
            projectile_speed: 350.0,
            damage: 1,
            range: 420.0,
        },
        EnemyKind::Rapid => AttackProfile {
            strategy: AttackStrategy::SingleShot,
            cooldown: 0.5,
            projectile_speed: 400.0,
            damage: 1,
            range: 420.0,
        },
        EnemyKind::Shotgun => AttackProfile {
            strategy: AttackStrategy::Spread { count: 5, arc: 0.3 },
            cooldown: 2.4,
            projectile_speed: 300.0,
            damage: 1,
            range: 360.0,
        },
        EnemyKind::Heavy => AttackProfile {
            strategy: AttackStrategy::BurstRadial { count: 8 },
            cooldown: 3.0,
            projectile_speed: 280.0,
            damage: 1,
            range: 360.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_table_is_ordered_and_gated() {
        assert_eq!(ENEMY_WEIGHT_TABLE[0].kind, FALLBACK_ENEMY_KIND);
        assert!(ENEMY_WEIGHT_TABLE.iter().all(|rule| rule.unlock_depth >= 1));
    }

    #[test]
    fn weights_grow_with_depth_for_gated_kinds() {
        let smart = ENEMY_WEIGHT_TABLE
            .iter()
            .find(|rule| rule.kind == EnemyKind::Smart)
            .expect("smart rule");
        assert!(smart.weight_at(6) > smart.weight_at(2));
    }

    #[test]
    fn melee_kinds_carry_no_projectile_profile() {
        assert_eq!(attack_profile(EnemyKind::Walker).strategy, AttackStrategy::Melee);
        assert_eq!(attack_profile(EnemyKind::Stealth).strategy, AttackStrategy::Melee);
    }
}
