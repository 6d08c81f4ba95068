//! Sliding door state machines. Doors open on player proximity and close
//! again when left alone; a locked door is forced shut and ignores
//! proximity until unlocked. A door closing onto the player pushes the
//! player out of its footprint instead of pinning them.

use super::*;
use crate::state::EntityKind;

impl Game {
    pub(super) fn update_doors(&mut self, dt: f32) {
        let player_pos = self.world.player().pos;
        let player_radius = self.world.player().radius;
        let trigger_radius = self.config.doors.trigger_radius;
        let slide_speed = self.config.doors.slide_speed;
        let solid_threshold = self.config.doors.solid_threshold;
        let open_extent = self.world.grid.tile_size;

        let door_ids: Vec<EntityId> = self
            .world
            .entities
            .iter()
            .filter(|(_, entity)| matches!(entity.kind, EntityKind::Door(_)))
            .map(|(id, _)| id)
            .collect();

        let mut push: Option<Vec2> = None;
        for id in door_ids {
            let entity = &mut self.world.entities[id];
            let center = entity.pos;
            let door_box = entity.bounding_box();
            let near_player = center.distance(player_pos) < trigger_radius;
            let EntityKind::Door(door) = &mut entity.kind else {
                continue;
            };

            match door.phase {
                DoorPhase::Closed => {
                    if !door.locked && near_player {
                        door.phase = DoorPhase::Opening;
                    }
                }
                DoorPhase::Opening => {
                    if door.locked || !near_player {
                        door.phase = DoorPhase::Closing;
                    } else {
                        door.slide += slide_speed * dt;
                        if door.slide >= open_extent {
                            door.slide = open_extent;
                            door.phase = DoorPhase::Open;
                        }
                    }
                }
                DoorPhase::Open => {
                    if door.locked || !near_player {
                        door.phase = DoorPhase::Closing;
                    }
                }
                DoorPhase::Closing => {
                    if !door.locked && near_player {
                        door.phase = DoorPhase::Opening;
                    } else {
                        door.slide -= slide_speed * dt;
                        if door.slide <= 0.0 {
                            door.slide = 0.0;
                            door.phase = DoorPhase::Closed;
                        }
                    }
                }
            }

            let solid = door.slide < solid_threshold;
            if solid && Aabb::around_circle(player_pos, player_radius).overlaps(door_box) {
                let away = player_pos - center;
                let direction =
                    if away.length() > 0.001 { away.normalized() } else { Vec2::new(1.0, 0.0) };
                push = Some(direction * self.config.doors.push_force);
            }
        }

        if let Some(impulse) = push {
            self.world.player_mut().knockback = impulse;
        }
    }

    /// Forces every door of the room shut and keeps it shut.
    pub(super) fn lock_room_doors(&mut self, room_index: usize) {
        let door_ids = self.world.rooms[room_index].doors.clone();
        for id in door_ids {
            if let EntityKind::Door(door) = &mut self.world.entities[id].kind {
                door.locked = true;
                if door.phase != DoorPhase::Closed {
                    door.phase = DoorPhase::Closing;
                }
            }
        }
        self.log.push(LogEvent::DoorsLocked { room: room_index });
    }

    pub(super) fn unlock_room_doors(&mut self, room_index: usize) {
        let door_ids = self.world.rooms[room_index].doors.clone();
        for id in door_ids {
            if let EntityKind::Door(door) = &mut self.world.entities[id].kind {
                door.locked = false;
                if door.phase != DoorPhase::Open {
                    door.phase = DoorPhase::Opening;
                }
            }
        }
        self.log.push(LogEvent::DoorsUnlocked { room: room_index });
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::two_room_fixture;
    use super::*;
    use crate::state::EntityKind;

    const DT: f32 = 1.0 / 60.0;

    fn door_state(game: &Game, id: EntityId) -> crate::state::DoorState {
        match &game.world.entities[id].kind {
            EntityKind::Door(door) => *door,
            other => panic!("not a door: {other:?}"),
        }
    }

    #[test]
    fn door_opens_for_a_nearby_player_and_closes_when_left() {
        let mut game = two_room_fixture();
        let door_id = game.world.rooms[0].doors[0];
        let door_pos = game.world.entities[door_id].pos;

        game.world.player_mut().pos = Vec2::new(door_pos.x - 80.0, door_pos.y);
        for _ in 0..40 {
            game.update_doors(DT);
        }
        assert_eq!(door_state(&game, door_id).phase, DoorPhase::Open);

        game.world.player_mut().pos = Vec2::new(door_pos.x - 400.0, door_pos.y);
        for _ in 0..40 {
            game.update_doors(DT);
        }
        assert_eq!(door_state(&game, door_id).phase, DoorPhase::Closed);
        assert_eq!(door_state(&game, door_id).slide, 0.0);
    }

    #[test]
    fn locked_door_ignores_proximity() {
        let mut game = two_room_fixture();
        let door_id = game.world.rooms[1].doors[0];
        let door_pos = game.world.entities[door_id].pos;

        game.lock_room_doors(1);
        game.world.player_mut().pos = Vec2::new(door_pos.x + 80.0, door_pos.y);
        for _ in 0..40 {
            game.update_doors(DT);
        }
        let door = door_state(&game, door_id);
        assert!(door.locked);
        assert_eq!(door.phase, DoorPhase::Closed);
    }

    #[test]
    fn unlock_reopens_previously_locked_doors() {
        let mut game = two_room_fixture();
        let door_id = game.world.rooms[1].doors[0];
        game.lock_room_doors(1);
        game.unlock_room_doors(1);

        let door_pos = game.world.entities[door_id].pos;
        game.world.player_mut().pos = Vec2::new(door_pos.x + 60.0, door_pos.y);
        for _ in 0..40 {
            game.update_doors(DT);
        }
        assert_eq!(door_state(&game, door_id).phase, DoorPhase::Open);
    }

    #[test]
    fn closing_door_pushes_an_overlapping_player_out() {
        let mut game = two_room_fixture();
        let door_id = game.world.rooms[1].doors[0];
        let door_pos = game.world.entities[door_id].pos;

        game.lock_room_doors(1);
        game.world.player_mut().pos = Vec2::new(door_pos.x + 10.0, door_pos.y);
        game.update_doors(DT);

        let impulse = game.world.player().knockback;
        assert!(impulse.x > 0.0, "push should point away from the door center");
    }
}
