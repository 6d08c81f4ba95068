//! Attacks and projectiles: player fire from the aim vector, per-kind enemy
//! attack strategies, altar interaction, and projectile aging. Projectiles
//! fly without rollback; the collision pass decides what an overlap means.

use super::*;
use crate::config::{attack_profile, keys};
use crate::progression;
use crate::state::{Entity, EntityKind, ProjectileState};

const ENEMY_SHOT_RADIUS: f32 = 4.0;
const ENEMY_SHOT_LIFE: f32 = 3.0;

fn rotated(v: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

impl Game {
    pub(super) fn update_player(&mut self, dt: f32, input: &InputFrame) {
        {
            let player = self.world.player_mut();
            if let EntityKind::Player(state) = &mut player.kind
                && state.fire_cooldown > 0.0
            {
                state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);
            }
        }

        let speed = progression::player_speed(&self.config, &self.unlocked_upgrades);
        let step = input.movement.clamped_to_unit() * (speed * dt);
        if step.length() > 0.0 {
            let player_id = self.world.player_id;
            self.move_entity_with_rollback(player_id, step);
        }

        if input.fire {
            self.try_player_fire(input.aim);
        }
        if input.interact {
            self.try_use_altar();
        }
    }

    fn try_player_fire(&mut self, aim: Vec2) {
        if aim.length() < 0.001 {
            return;
        }
        {
            let player = self.world.player_mut();
            let EntityKind::Player(state) = &mut player.kind else {
                return;
            };
            if state.fire_cooldown > 0.0 {
                return;
            }
            state.fire_cooldown = self.config.player.fire_cooldown;
        }

        let from = self.world.player().pos;
        let shot = self.config.player_projectile;
        let bounces = u32::from(self.owns_upgrade(keys::UPGRADE_RICOCHET));
        let explosive = self.owns_upgrade(keys::UPGRADE_BLAST);
        self.spawn_projectile(ProjectileSpawn {
            from,
            velocity: aim.normalized() * shot.speed,
            damage: shot.damage,
            radius: shot.radius,
            life: shot.life,
            bounces,
            explosive,
            from_player: true,
        });
    }

    /// Standing at an unused altar and interacting grants the next upgrade
    /// not yet owned. The altar is spent either way.
    fn try_use_altar(&mut self) {
        let player_pos = self.world.player().pos;
        let reach = self.config.player.interaction_radius;

        let altar_id = self.world.entities.iter().find_map(|(id, entity)| {
            match entity.kind {
                EntityKind::Altar { used: false }
                    if entity.pos.distance(player_pos) < reach + entity.radius =>
                {
                    Some(id)
                }
                _ => None,
            }
        });
        let Some(altar_id) = altar_id else {
            return;
        };

        self.world.entities[altar_id].kind = EntityKind::Altar { used: true };
        if let Some(key) = keys::UPGRADE_ORDER
            .iter()
            .copied()
            .find(|key| !self.unlocked_upgrades.contains(*key))
        {
            self.unlocked_upgrades.insert(key.to_string());
            self.log.push(LogEvent::UpgradeUnlocked { key });
        }
    }

    pub(super) fn update_enemy_attack(&mut self, id: EntityId, dt: f32, player_pos: Vec2) {
        let (pos, kind, ready) = {
            let entity = &mut self.world.entities[id];
            let pos = entity.pos;
            let EntityKind::Enemy(enemy) = &mut entity.kind else {
                return;
            };
            if enemy.attack_cooldown > 0.0 {
                enemy.attack_cooldown = (enemy.attack_cooldown - dt).max(0.0);
            }
            (pos, enemy.kind, enemy.attack_cooldown <= 0.0)
        };

        let profile = attack_profile(kind);
        if profile.strategy == AttackStrategy::Melee {
            // Contact damage only; resolved by the collision pass.
            return;
        }
        if !ready || pos.distance(player_pos) > profile.range {
            return;
        }

        if let EntityKind::Enemy(enemy) = &mut self.world.entities[id].kind {
            enemy.attack_cooldown = profile.cooldown;
        }

        let aim = (player_pos - pos).normalized();
        let fire = |game: &mut Self, direction: Vec2| {
            game.spawn_projectile(ProjectileSpawn {
                from: pos,
                velocity: direction * profile.projectile_speed,
                damage: profile.damage,
                radius: ENEMY_SHOT_RADIUS,
                life: ENEMY_SHOT_LIFE,
                bounces: 0,
                explosive: false,
                from_player: false,
            });
        };

        match profile.strategy {
            AttackStrategy::Melee => {}
            AttackStrategy::SingleShot => fire(self, aim),
            AttackStrategy::Spread { count, arc } => {
                for index in 0..count {
                    let t = if count > 1 { index as f32 / (count - 1) as f32 } else { 0.5 };
                    let angle = -arc + 2.0 * arc * t;
                    fire(self, rotated(aim, angle));
                }
            }
            AttackStrategy::BurstRadial { count } => {
                for index in 0..count {
                    let angle = std::f32::consts::TAU * index as f32 / count as f32;
                    fire(self, rotated(aim, angle));
                }
            }
        }
    }

    pub(super) fn update_projectiles(&mut self, dt: f32) {
        let ids: Vec<EntityId> = self
            .world
            .entities
            .iter()
            .filter(|(_, entity)| {
                entity.is_live() && matches!(entity.kind, EntityKind::Projectile(_))
            })
            .map(|(id, _)| id)
            .collect();

        for id in ids {
            let entity = &mut self.world.entities[id];
            let EntityKind::Projectile(shot) = &mut entity.kind else {
                continue;
            };
            entity.pos = entity.pos + shot.velocity * dt;
            shot.age += dt;
            if shot.age > shot.life {
                entity.removed = true;
            }
        }
    }

    pub(super) fn spawn_projectile(&mut self, spawn: ProjectileSpawn) {
        let projectile = Entity {
            id: EntityId::default(),
            pos: spawn.from,
            radius: spawn.radius,
            collision: CollisionKind::Projectile,
            removed: false,
            affinity: RoomAffinity::Global,
            mass: 0.0,
            knockback: Vec2::ZERO,
            friction: 0.0,
            hp: 0,
            max_hp: 0,
            flash_timer: 0.0,
            kind: EntityKind::Projectile(ProjectileState {
                velocity: spawn.velocity,
                damage: spawn.damage,
                bounces: spawn.bounces,
                explosive: spawn.explosive,
                from_player: spawn.from_player,
                age: 0.0,
                life: spawn.life,
            }),
        };
        let id = self.world.entities.insert(projectile);
        self.world.entities[id].id = id;
    }
}

pub(super) struct ProjectileSpawn {
    pub(super) from: Vec2,
    pub(super) velocity: Vec2,
    pub(super) damage: i32,
    pub(super) radius: f32,
    pub(super) life: f32,
    pub(super) bounces: u32,
    pub(super) explosive: bool,
    pub(super) from_player: bool,
}
