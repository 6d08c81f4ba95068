//! Per-tick collision resolution. The broad phase is rebuilt from the live
//! entity set, projectiles are tested against walls and blocking objects
//! with bounce attribution, and every truly overlapping pair is dispatched
//! in both directions exactly once, keyed by entity id. Dispatching pairs
//! symmetrically up front avoids depending on outer-loop revisit order and
//! removal timing for the reciprocal reaction.

use super::*;
use crate::config::{attack_profile, enemy_stats};
use crate::state::{Entity, EntityKind};
use crate::types::PickupKind as Pickup;

impl Game {
    pub(super) fn resolve_collisions(&mut self, dt: f32) {
        self.rebuild_spatial();
        self.resolve_projectile_blockers(dt);
        self.dispatch_overlaps();
    }

    fn rebuild_spatial(&mut self) {
        self.spatial.clear();
        for (id, entity) in &self.world.entities {
            if entity.is_live() && entity.collision != CollisionKind::None {
                self.spatial.insert(id, entity.pos, entity.radius);
            }
        }
    }

    /// Walls and blocking objects stop projectiles. A shot with bounce
    /// charges reflects off the axis whose rollback clears the obstruction
    /// (x first; anything still blocked is attributed to y); otherwise the
    /// shot dies, exploding if flagged.
    fn resolve_projectile_blockers(&mut self, dt: f32) {
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
            let entity = &self.world.entities[id];
            let (pos, radius) = (entity.pos, entity.radius);
            let EntityKind::Projectile(shot) = entity.kind else {
                continue;
            };
            if !self.position_blocked(id, pos, radius) {
                continue;
            }

            if shot.bounces > 0 {
                let rolled_x = Vec2::new(pos.x - shot.velocity.x * dt, pos.y);
                let (new_pos, new_velocity) = if !self.position_blocked(id, rolled_x, radius) {
                    (rolled_x, Vec2::new(-shot.velocity.x, shot.velocity.y))
                } else {
                    (
                        Vec2::new(pos.x, pos.y - shot.velocity.y * dt),
                        Vec2::new(shot.velocity.x, -shot.velocity.y),
                    )
                };

                let entity = &mut self.world.entities[id];
                entity.pos = new_pos;
                if let EntityKind::Projectile(state) = &mut entity.kind {
                    state.velocity = new_velocity;
                    state.bounces -= 1;
                }
                self.effects.push(EffectEvent { kind: EffectKind::Spark, pos: new_pos });
            } else {
                self.world.entities[id].removed = true;
                if shot.explosive {
                    self.explode_at(pos);
                }
            }
        }
    }

    fn explode_at(&mut self, center: Vec2) {
        let blast = self.config.explosion;
        for id in self.spatial.query(center, blast.radius) {
            let Some(entity) = self.world.entities.get(id) else {
                continue;
            };
            if !entity.is_live()
                || entity.collision != CollisionKind::Enemy
                || entity.pos.distance(center) > blast.radius + entity.radius
            {
                continue;
            }
            let outward = (entity.pos - center).normalized();
            self.damage_enemy(id, blast.damage, outward, blast.knockback);
        }
        self.effects.push(EffectEvent { kind: EffectKind::Explosion, pos: center });
    }

    fn dispatch_overlaps(&mut self) {
        let ids: Vec<EntityId> = self
            .world
            .entities
            .iter()
            .filter(|(_, entity)| entity.is_live() && entity.collision != CollisionKind::None)
            .map(|(id, _)| id)
            .collect();

        for a in ids {
            let Some(entity_a) = self.world.entities.get(a) else {
                continue;
            };
            if !entity_a.is_live() {
                continue;
            }
            let (a_pos, a_radius) = (entity_a.pos, entity_a.radius);

            for b in self.spatial.query(a_pos, a_radius) {
                // Each unordered pair is handled once, from its smaller key.
                if b <= a {
                    continue;
                }
                let Some(entity_a) = self.world.entities.get(a) else {
                    break;
                };
                if !entity_a.is_live() {
                    break;
                }
                let (a_pos, a_radius) = (entity_a.pos, entity_a.radius);
                let Some(entity_b) = self.world.entities.get(b) else {
                    continue;
                };
                if !entity_b.is_live() {
                    continue;
                }

                if a_pos.distance(entity_b.pos) < a_radius + entity_b.radius {
                    self.react(a, b);
                    self.react(b, a);
                }
            }
        }
    }

    /// One-directional reaction of `source` hitting `target`. Both
    /// directions of a pair arrive here back to back; arms that already
    /// removed a participant make the second call a no-op.
    fn react(&mut self, source: EntityId, target: EntityId) {
        let (Some(entity_s), Some(entity_t)) =
            (self.world.entities.get(source), self.world.entities.get(target))
        else {
            return;
        };
        if !entity_s.is_live() || !entity_t.is_live() {
            return;
        }

        match (&entity_s.kind, &entity_t.kind) {
            (EntityKind::Projectile(shot), EntityKind::Enemy(_)) if shot.from_player => {
                let (damage, explosive) = (shot.damage, shot.explosive);
                let direction = shot.velocity.normalized();
                let hit_pos = entity_t.pos;

                self.world.entities[source].removed = true;
                self.effects.push(EffectEvent { kind: EffectKind::Impact, pos: hit_pos });
                self.damage_enemy(target, damage, direction, self.config.player_projectile.knockback);
                if explosive {
                    self.explode_at(hit_pos);
                }
            }
            (EntityKind::Projectile(shot), EntityKind::Player(_)) if !shot.from_player => {
                let damage = shot.damage;
                let direction = shot.velocity.normalized();
                self.world.entities[source].removed = true;
                self.damage_player(damage, direction);
            }
            (EntityKind::Player(_), EntityKind::Pickup(pickup)) => {
                let pickup = *pickup;
                self.world.entities[target].removed = true;
                match pickup {
                    Pickup::Coin { value } => self.score += value,
                    Pickup::HealthPack => {
                        let heal = self.config.pickups.health_pack_heal;
                        let player = self.world.player_mut();
                        player.hp = (player.hp + heal).min(player.max_hp);
                    }
                }
            }
            (EntityKind::Player(_), EntityKind::Enemy(enemy)) => {
                let profile = attack_profile(enemy.kind);
                let damage = if profile.strategy == AttackStrategy::Melee { profile.damage } else { 1 };
                let away = (entity_s.pos - entity_t.pos).normalized();
                self.damage_player(damage, away);
            }
            _ => {}
        }
    }

    fn damage_enemy(&mut self, id: EntityId, damage: i32, direction: Vec2, force: f32) {
        let Some(entity) = self.world.entities.get_mut(id) else {
            return;
        };
        if !entity.is_live() {
            return;
        }
        entity.hp -= damage;
        entity.flash_timer = 0.15;
        if entity.mass > 0.0 {
            entity.knockback = direction * (force / entity.mass);
        }
        if entity.hp > 0 {
            return;
        }

        entity.removed = true;
        let pos = entity.pos;
        let EntityKind::Enemy(state) = entity.kind else {
            return;
        };
        self.log.push(LogEvent::EnemySlain { kind: state.kind });
        self.spawn_drop(pos, enemy_stats(state.kind).drop_value);
    }

    fn damage_player(&mut self, damage: i32, direction: Vec2) {
        let iframe = self.config.player.iframe_duration;
        let force = self.config.player.hit_knockback;
        let died = {
            let player = self.world.player_mut();
            if !player.is_live() || player.flash_timer > 0.0 {
                return;
            }
            player.hp -= damage;
            player.flash_timer = iframe;
            player.knockback = direction * force;
            player.hp <= 0
        };
        if died {
            self.world.player_mut().hp = 0;
            self.log.push(LogEvent::PlayerDied);
            self.phase.request(GamePhase::GameOver, &mut self.log);
        }
    }

    /// Slain enemies drop a health pack or a coin worth their drop value.
    fn spawn_drop(&mut self, pos: Vec2, drop_value: u32) {
        let pickup = if self.roll_unit() < self.config.pickups.health_drop_chance {
            Pickup::HealthPack
        } else {
            Pickup::Coin { value: drop_value }
        };
        let entity = Entity {
            id: EntityId::default(),
            pos,
            radius: self.config.pickups.radius,
            collision: CollisionKind::Item,
            removed: false,
            affinity: RoomAffinity::Global,
            mass: 0.0,
            knockback: Vec2::ZERO,
            friction: 0.0,
            hp: 0,
            max_hp: 0,
            flash_timer: 0.0,
            kind: EntityKind::Pickup(pickup),
        };
        let id = self.world.entities.insert(entity);
        self.world.entities[id].id = id;
    }
}
