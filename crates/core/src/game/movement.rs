//! Enemy locomotion. Strategy is data on the enemy, not a subclass: plain
//! chasers head straight for the player, smart enemies route around walls
//! with A* and degrade to direct travel when no route exists.
//!
//! Entities scoped to a room other than the one the player occupies are
//! skipped entirely. Off-screen rooms do not simulate; a projectile fired
//! in a cleared room stops progressing once the player moves on. Accepted
//! tradeoff, not a bug.

use super::*;
use crate::config::enemy_stats;
use crate::state::EntityKind;

impl Game {
    pub(super) fn update_enemies(&mut self, dt: f32) {
        let player_pos = self.world.player().pos;
        let active_room = self.world.active_room;

        let ids: Vec<EntityId> = self
            .world
            .entities
            .iter()
            .filter(|(_, entity)| entity.is_live() && matches!(entity.kind, EntityKind::Enemy(_)))
            .map(|(id, _)| id)
            .collect();

        for id in ids {
            let entity = &self.world.entities[id];
            let simulated = match entity.affinity {
                RoomAffinity::Global => true,
                RoomAffinity::Room(room) => active_room == Some(room),
            };
            if !simulated {
                continue;
            }
            let EntityKind::Enemy(enemy) = entity.kind else {
                continue;
            };

            let step = self.enemy_step_direction(entity.pos, enemy.movement, player_pos);
            if step.length() > 0.001 {
                let speed = enemy_stats(enemy.kind).speed;
                self.move_entity_with_rollback(id, step * (speed * dt));
            }
            self.update_enemy_attack(id, dt, player_pos);
        }
    }

    fn enemy_step_direction(
        &self,
        from: Vec2,
        strategy: MovementStrategy,
        player_pos: Vec2,
    ) -> Vec2 {
        match strategy {
            MovementStrategy::Stationary => Vec2::ZERO,
            MovementStrategy::Chase => (player_pos - from).normalized(),
            MovementStrategy::PathfindingChase => {
                let grid = &self.world.grid;
                let start = grid.world_to_tile(from);
                let goal = grid.world_to_tile(player_pos);
                match pathfind::astar_path(grid, start, goal) {
                    Some(path) => match path.first() {
                        Some(next) => (grid.tile_center(*next) - from).normalized(),
                        // Already on the player's tile.
                        None => (player_pos - from).normalized(),
                    },
                    None => (player_pos - from).normalized(),
                }
            }
        }
    }
}
