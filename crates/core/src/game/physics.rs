//! Movement integration against level geometry. Movement is resolved one
//! axis at a time: an axis whose new position lands in a blocked spot is
//! rolled back while the other axis still applies, so entities slide along
//! walls instead of sticking.

use super::*;
use crate::state::EntityKind;

impl Game {
    /// True when a circle at `center` overlaps a wall tile, a solid door, or
    /// a blocking prop. Box-vs-box with exclusive edges throughout.
    pub(super) fn position_blocked(&self, moving: EntityId, center: Vec2, radius: f32) -> bool {
        if self.world.grid.circle_overlaps_wall(center, radius) {
            return true;
        }

        let probe = Aabb::around_circle(center, radius);
        for (id, other) in &self.world.entities {
            if id == moving || !other.is_live() {
                continue;
            }
            let blocking = match &other.kind {
                EntityKind::Door(door) => door.slide < self.config.doors.solid_threshold,
                EntityKind::Altar { .. } => true,
                _ => false,
            };
            if blocking && probe.overlaps(other.bounding_box()) {
                return true;
            }
        }
        false
    }

    pub(super) fn move_entity_with_rollback(&mut self, id: EntityId, delta: Vec2) {
        let radius = self.world.entities[id].radius;
        let mut pos = self.world.entities[id].pos;

        let moved_x = Vec2::new(pos.x + delta.x, pos.y);
        if !self.position_blocked(id, moved_x, radius) {
            pos = moved_x;
        }
        let moved_y = Vec2::new(pos.x, pos.y + delta.y);
        if !self.position_blocked(id, moved_y, radius) {
            pos = moved_y;
        }

        self.world.entities[id].pos = pos;
    }

    /// Applies impulse velocity with per-entity friction decay. Mass zero
    /// means immovable. Post-hit flash timers count down here too so every
    /// entity gets exactly one decrement per tick.
    pub(super) fn integrate_knockback(&mut self, dt: f32) {
        let ids: Vec<EntityId> = self.world.entities.keys().collect();
        for id in ids {
            let entity = &mut self.world.entities[id];
            if entity.flash_timer > 0.0 {
                entity.flash_timer = (entity.flash_timer - dt).max(0.0);
            }
            if entity.mass <= 0.0 || !entity.is_live() {
                continue;
            }
            let impulse = entity.knockback;
            if impulse.length() < 1.0 {
                entity.knockback = Vec2::ZERO;
                continue;
            }
            let decay = (1.0 - entity.friction * dt).max(0.0);
            entity.knockback = impulse * decay;

            self.move_entity_with_rollback(id, impulse * dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::two_room_fixture;
    use super::*;

    #[test]
    fn wall_blocks_along_one_axis_but_entity_slides_on_the_other() {
        let mut game = two_room_fixture();
        let player_id = game.world.player_id;
        // Just left of the wall column right of room A, away from the
        // corridor rows.
        let wall_x = 6.0 * game.world.grid.tile_size;
        let start = Vec2::new(wall_x - 16.0, 4.5 * game.world.grid.tile_size);
        game.world.entities[player_id].pos = start;

        game.move_entity_with_rollback(player_id, Vec2::new(10.0, 12.0));

        let ended = game.world.entities[player_id].pos;
        assert_eq!(ended.x, start.x, "x leg should have rolled back");
        assert_eq!(ended.y, start.y + 12.0, "y leg should still apply");
    }

    #[test]
    fn knockback_decays_toward_zero() {
        let mut game = two_room_fixture();
        let player_id = game.world.player_id;
        game.world.entities[player_id].knockback = Vec2::new(300.0, 0.0);

        for _ in 0..120 {
            game.integrate_knockback(1.0 / 60.0);
        }
        assert_eq!(game.world.entities[player_id].knockback, Vec2::ZERO);
    }

    #[test]
    fn immovable_entities_ignore_knockback() {
        let mut game = two_room_fixture();
        let door_id = game.world.rooms[1].doors[0];
        let before = game.world.entities[door_id].pos;
        game.world.entities[door_id].knockback = Vec2::new(500.0, 0.0);

        game.integrate_knockback(1.0 / 60.0);
        assert_eq!(game.world.entities[door_id].pos, before);
    }
}
