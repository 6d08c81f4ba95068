//! Room activation lifecycle. A room goes latent → triggered → cleared and
//! never back: entering an untriggered room locks its doors and makes the
//! roster live, clearing the last room-scoped enemy unlocks them again.
//! The exit room additionally gates the portal and level advancement.

use super::*;
use crate::config::{enemy_stats, movement_strategy};
use crate::state::{EnemyState, Entity, EntityKind, PortalState};

impl Game {
    pub(super) fn update_room_activation(&mut self) {
        let player_tile = self.world.grid.world_to_tile(self.world.player().pos);
        self.world.active_room = self.world.room_at_tile(player_tile);

        if let Some(index) = self.world.active_room {
            self.try_trigger_room(index);
        }
        self.check_room_clears();
        self.check_exit_condition();
    }

    fn try_trigger_room(&mut self, index: usize) {
        {
            let room = &self.world.rooms[index];
            if room.triggered || room.cleared {
                return;
            }
        }
        // Wait until the player is fully out of every doorway; locking a
        // door onto the player would trap them against it.
        if !self.player_clear_of_room_doors(index) {
            return;
        }

        self.world.rooms[index].triggered = true;
        self.log.push(LogEvent::RoomTriggered { room: index });

        if self.world.rooms[index].is_exit {
            self.open_exit_portal();
        }
        self.lock_room_doors(index);

        let roster = self.world.rooms[index].roster.clone();
        for spec in roster {
            self.spawn_roster_enemy(spec.kind, spec.pos, index);
        }
    }

    fn player_clear_of_room_doors(&self, index: usize) -> bool {
        let player = self.world.player();
        let probe = Aabb::around_circle(player.pos, player.radius);
        let pad = self.config.doors.safety_pad;
        self.world.rooms[index].doors.iter().all(|&door_id| {
            !probe.overlaps(self.world.entities[door_id].bounding_box().expanded(pad))
        })
    }

    fn spawn_roster_enemy(&mut self, kind: EnemyKind, pos: Vec2, room_index: usize) {
        let stats = enemy_stats(kind);
        let enemy = Entity {
            id: EntityId::default(),
            pos,
            radius: stats.radius,
            collision: CollisionKind::Enemy,
            removed: false,
            affinity: RoomAffinity::Room(room_index),
            mass: if kind == EnemyKind::Heavy { 2.0 } else { 1.0 },
            knockback: Vec2::ZERO,
            friction: 6.0,
            hp: stats.hp,
            max_hp: stats.hp,
            flash_timer: 0.0,
            kind: EntityKind::Enemy(EnemyState {
                kind,
                movement: movement_strategy(kind),
                attack_cooldown: 0.0,
            }),
        };
        let id = self.world.entities.insert(enemy);
        self.world.entities[id].id = id;
    }

    /// Clearing is checked for every triggered room, so enemies killed
    /// from an adjoining room still complete the lifecycle. Once cleared a
    /// room stays cleared.
    fn check_room_clears(&mut self) {
        let pending: Vec<usize> = self
            .world
            .rooms
            .iter()
            .enumerate()
            .filter(|(_, room)| room.triggered && !room.cleared)
            .map(|(index, _)| index)
            .collect();

        for index in pending {
            if self.world.live_enemy_count_in_room(index) > 0 {
                continue;
            }
            self.world.rooms[index].cleared = true;
            self.log.push(LogEvent::RoomCleared { room: index });
            self.unlock_room_doors(index);
            if self.world.rooms[index].is_exit {
                // Also covers a trigger-time open command racing the clear.
                self.open_exit_portal();
            }
        }
    }

    fn open_exit_portal(&mut self) {
        let portal_id = self.world.exit_portal_id;
        if let EntityKind::ExitPortal(portal) = &mut self.world.entities[portal_id].kind
            && !portal.open
        {
            portal.open = true;
            self.log.push(LogEvent::ExitPortalOpened);
        }
    }

    /// Standing at the open portal of the cleared exit room schedules the
    /// descent; the actual level swap happens at a later tick boundary.
    fn check_exit_condition(&mut self) {
        if self.pending_transition.is_some() {
            return;
        }
        let Some(exit_room) = self.world.rooms.iter().find(|room| room.is_exit) else {
            return;
        };
        if !exit_room.cleared {
            return;
        }
        let portal_open = matches!(
            self.world.entities[self.world.exit_portal_id].kind,
            EntityKind::ExitPortal(PortalState { open: true })
        );
        if !portal_open {
            return;
        }
        let player_pos = self.world.player().pos;
        if player_pos.distance(self.world.exit_point) > self.config.player.interaction_radius {
            return;
        }

        if self.phase.request(GamePhase::LevelTransition, &mut self.log) {
            self.pending_transition =
                Some(PendingTransition { next_depth: self.world.depth + 1 });
            self.log.push(LogEvent::LevelAdvanceScheduled);
        }
    }
}
