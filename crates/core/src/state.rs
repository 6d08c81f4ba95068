//! Runtime world state: the live entity arena, the tile grid in world
//! units, and per-room lifecycle flags. The world exclusively owns every
//! live entity; all cross-references are slotmap keys.

use slotmap::SlotMap;

use crate::levelgen::{GeneratedLevel, RoomRect, SpawnSpec};
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    pub fire_cooldown: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyState {
    pub kind: EnemyKind,
    pub movement: MovementStrategy,
    pub attack_cooldown: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileState {
    pub velocity: Vec2,
    pub damage: i32,
    pub bounces: u32,
    pub explosive: bool,
    pub from_player: bool,
    pub age: f32,
    pub life: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorState {
    pub tile: Pos,
    pub orientation: Orientation,
    pub phase: DoorPhase,
    pub locked: bool,
    /// Slide progress in world units; 0 = fully closed.
    pub slide: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PortalState {
    pub open: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityKind {
    Player(PlayerState),
    Enemy(EnemyState),
    Projectile(ProjectileState),
    Pickup(PickupKind),
    Door(DoorState),
    ExitPortal(PortalState),
    Altar { used: bool },
}

#[derive(Clone, Debug)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Vec2,
    pub radius: f32,
    pub collision: CollisionKind,
    /// Marked-for-removal flag; flagged entities are swept at tick end.
    pub removed: bool,
    pub affinity: RoomAffinity,
    /// 0 = immovable; knockback divides by mass otherwise.
    pub mass: f32,
    pub knockback: Vec2,
    pub friction: f32,
    pub hp: i32,
    pub max_hp: i32,
    /// Post-hit invulnerability window, seconds remaining.
    pub flash_timer: f32,
    pub kind: EntityKind,
}

impl Entity {
    pub fn is_live(&self) -> bool {
        !self.removed
    }

    pub fn bounding_box(&self) -> Aabb {
        Aabb::around_circle(self.pos, self.radius)
    }
}

#[derive(Clone)]
pub struct TileGrid {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub tiles: Vec<TileKind>,
}

impl TileGrid {
    pub fn from_level(level: &GeneratedLevel) -> Self {
        Self {
            width: level.width,
            height: level.height,
            tile_size: level.tile_size,
            tiles: level.tiles.clone(),
        }
    }

    /// Out-of-bounds reads as wall so movement never escapes the grid.
    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if pos.x < 0 || pos.y < 0 {
            return TileKind::Wall;
        }
        let x = pos.x as usize;
        let y = pos.y as usize;
        if x >= self.width || y >= self.height {
            return TileKind::Wall;
        }
        self.tiles[y * self.width + x]
    }

    pub fn is_floor(&self, pos: Pos) -> bool {
        self.tile_at(pos) == TileKind::Floor
    }

    pub fn world_to_tile(&self, world: Vec2) -> Pos {
        Pos {
            y: (world.y / self.tile_size).floor() as i32,
            x: (world.x / self.tile_size).floor() as i32,
        }
    }

    pub fn tile_center(&self, pos: Pos) -> Vec2 {
        Vec2::new(
            pos.x as f32 * self.tile_size + self.tile_size / 2.0,
            pos.y as f32 * self.tile_size + self.tile_size / 2.0,
        )
    }

    pub fn tile_box(&self, pos: Pos) -> Aabb {
        Aabb {
            x: pos.x as f32 * self.tile_size,
            y: pos.y as f32 * self.tile_size,
            width: self.tile_size,
            height: self.tile_size,
        }
    }

    /// Box-vs-box test of the circle's bounding box against every wall tile
    /// it could touch. Touching edges do not collide.
    pub fn circle_overlaps_wall(&self, center: Vec2, radius: f32) -> bool {
        let probe = Aabb::around_circle(center, radius);
        let min_x = (probe.x / self.tile_size).floor() as i32;
        let min_y = (probe.y / self.tile_size).floor() as i32;
        let max_x = ((probe.x + probe.width) / self.tile_size).floor() as i32;
        let max_y = ((probe.y + probe.height) / self.tile_size).floor() as i32;

        for tile_y in min_y..=max_y {
            for tile_x in min_x..=max_x {
                let pos = Pos { y: tile_y, x: tile_x };
                if self.tile_at(pos) == TileKind::Wall && probe.overlaps(self.tile_box(pos)) {
                    return true;
                }
            }
        }
        false
    }
}

/// Runtime room record. `triggered` and `cleared` only ever go false→true;
/// the spawn room starts with both set.
#[derive(Clone, Debug)]
pub struct Room {
    pub rect: RoomRect,
    pub kind: RoomKind,
    pub is_exit: bool,
    pub triggered: bool,
    pub cleared: bool,
    pub doors: Vec<EntityId>,
    pub roster: Vec<SpawnSpec>,
}

pub struct WorldState {
    pub grid: TileGrid,
    pub rooms: Vec<Room>,
    pub entities: SlotMap<EntityId, Entity>,
    pub player_id: EntityId,
    pub exit_portal_id: EntityId,
    pub spawn_point: Vec2,
    pub exit_point: Vec2,
    /// Room containing the player's tile this tick, if any.
    pub active_room: Option<usize>,
    pub depth: u32,
}

impl WorldState {
    pub fn player(&self) -> &Entity {
        &self.entities[self.player_id]
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.entities[self.player_id]
    }

    pub fn room_at_tile(&self, tile: Pos) -> Option<usize> {
        self.rooms.iter().position(|room| room.rect.contains(tile))
    }

    pub fn live_enemy_count_in_room(&self, room_index: usize) -> usize {
        self.entities
            .values()
            .filter(|entity| {
                entity.is_live()
                    && entity.collision == CollisionKind::Enemy
                    && entity.affinity == RoomAffinity::Room(room_index)
            })
            .count()
    }

    /// Entity ids sorted by a caller-supplied depth key, for draw order.
    pub fn render_order(&self, depth_key: impl Fn(&Entity) -> f32) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> =
            self.entities.iter().filter(|(_, entity)| entity.is_live()).map(|(id, _)| id).collect();
        ids.sort_by(|a, b| {
            depth_key(&self.entities[*a]).total_cmp(&depth_key(&self.entities[*b]))
        });
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> TileGrid {
        // 5x5 with a floor plus in the middle of walls.
        let mut tiles = vec![TileKind::Wall; 25];
        for pos in [(2, 1), (2, 2), (2, 3), (1, 2), (3, 2)] {
            tiles[pos.0 * 5 + pos.1] = TileKind::Floor;
        }
        TileGrid { width: 5, height: 5, tile_size: 40.0, tiles }
    }

    #[test]
    fn out_of_bounds_tiles_read_as_wall() {
        let grid = small_grid();
        assert_eq!(grid.tile_at(Pos { y: -1, x: 0 }), TileKind::Wall);
        assert_eq!(grid.tile_at(Pos { y: 0, x: 9 }), TileKind::Wall);
    }

    #[test]
    fn world_to_tile_floors_negative_coordinates() {
        let grid = small_grid();
        assert_eq!(grid.world_to_tile(Vec2::new(-1.0, -1.0)), Pos { y: -1, x: -1 });
        assert_eq!(grid.world_to_tile(Vec2::new(39.9, 80.0)), Pos { y: 2, x: 0 });
    }

    #[test]
    fn circle_in_open_tile_center_clears_walls() {
        let grid = small_grid();
        let center = grid.tile_center(Pos { y: 2, x: 2 });
        assert!(!grid.circle_overlaps_wall(center, 15.0));
    }

    #[test]
    fn circle_pushed_into_wall_tile_collides() {
        let grid = small_grid();
        let mut center = grid.tile_center(Pos { y: 2, x: 3 });
        center.x += 30.0; // reaches into the wall at x=4
        assert!(grid.circle_overlaps_wall(center, 15.0));
    }

    #[test]
    fn touching_a_wall_edge_exactly_does_not_collide() {
        let grid = small_grid();
        // Wall column at x=4 starts at world x=160; circle right edge lands
        // exactly on it.
        let center = Vec2::new(145.0, 100.0);
        assert!(!grid.circle_overlaps_wall(center, 15.0));
    }
}
