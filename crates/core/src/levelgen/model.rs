//! Public data models for generated levels: room rectangles, door sockets,
//! lazy spawn specs, and the assembled level plan handed to the runtime.

use crate::types::{EnemyKind, Orientation, Pos, RoomKind, TileKind, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoomRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl RoomRect {
    pub fn right(self) -> usize {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> usize {
        self.y + self.height - 1
    }

    pub fn area(self) -> usize {
        self.width * self.height
    }

    pub fn center(self) -> Pos {
        Pos { y: (self.y + (self.height / 2)) as i32, x: (self.x + (self.width / 2)) as i32 }
    }

    pub fn expanded(self, margin: usize) -> Self {
        let expanded_x = self.x.saturating_sub(margin);
        let expanded_y = self.y.saturating_sub(margin);
        let expanded_right = self.right().saturating_add(margin);
        let expanded_bottom = self.bottom().saturating_add(margin);
        Self {
            x: expanded_x,
            y: expanded_y,
            width: expanded_right - expanded_x + 1,
            height: expanded_bottom - expanded_y + 1,
        }
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn contains(self, pos: Pos) -> bool {
        if pos.x < 0 || pos.y < 0 {
            return false;
        }
        let px = pos.x as usize;
        let py = pos.y as usize;
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }
}

/// A floor-carved cell one unit outside a room rectangle, eligible for a
/// door. Orientation follows the edge the socket was found on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DoorSocket {
    pub tile: Pos,
    pub orientation: Orientation,
}

/// A pre-rolled enemy placement, not materialized until the room triggers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnSpec {
    pub kind: EnemyKind,
    pub pos: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoomPlan {
    pub rect: RoomRect,
    pub kind: RoomKind,
    pub is_exit: bool,
    /// Indices into `GeneratedLevel::door_sockets` for sockets on this
    /// room's boundary.
    pub socket_indices: Vec<usize>,
    pub roster: Vec<SpawnSpec>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedLevel {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub tiles: Vec<TileKind>,
    pub rooms: Vec<RoomPlan>,
    pub door_sockets: Vec<DoorSocket>,
    pub spawn_tile: Pos,
    pub exit_tile: Pos,
}

impl GeneratedLevel {
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

    pub fn tile_center(&self, pos: Pos) -> Vec2 {
        Vec2::new(
            pos.x as f32 * self.tile_size + self.tile_size / 2.0,
            pos.y as f32 * self.tile_size + self.tile_size / 2.0,
        )
    }

    /// True when every floor tile is reachable from the spawn tile by
    /// 4-connected floor traversal.
    pub fn all_floor_reachable_from_spawn(&self) -> bool {
        use std::collections::{BTreeSet, VecDeque};

        let floor_count =
            self.tiles.iter().filter(|&&tile| tile == TileKind::Floor).count();
        if floor_count == 0 {
            return false;
        }
        if self.tile_at(self.spawn_tile) != TileKind::Floor {
            return false;
        }

        let mut open = VecDeque::from([self.spawn_tile]);
        let mut seen = BTreeSet::from([self.spawn_tile]);
        while let Some(pos) = open.pop_front() {
            for next in [
                Pos { y: pos.y - 1, x: pos.x },
                Pos { y: pos.y, x: pos.x + 1 },
                Pos { y: pos.y + 1, x: pos.x },
                Pos { y: pos.y, x: pos.x - 1 },
            ] {
                if seen.contains(&next) || self.tile_at(next) != TileKind::Floor {
                    continue;
                }
                seen.insert(next);
                open.push_back(next);
            }
        }

        seen.len() == floor_count
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.tile_size.to_le_bytes());
        for tile in &self.tiles {
            bytes.push(match tile {
                TileKind::Wall => 0,
                TileKind::Floor => 1,
            });
        }
        bytes.extend(self.spawn_tile.y.to_le_bytes());
        bytes.extend(self.spawn_tile.x.to_le_bytes());
        bytes.extend(self.exit_tile.y.to_le_bytes());
        bytes.extend(self.exit_tile.x.to_le_bytes());

        bytes.extend((self.door_sockets.len() as u32).to_le_bytes());
        for socket in &self.door_sockets {
            bytes.extend(socket.tile.y.to_le_bytes());
            bytes.extend(socket.tile.x.to_le_bytes());
            bytes.push(match socket.orientation {
                Orientation::Horizontal => 0,
                Orientation::Vertical => 1,
            });
        }

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in &self.rooms {
            bytes.extend((room.rect.x as u32).to_le_bytes());
            bytes.extend((room.rect.y as u32).to_le_bytes());
            bytes.extend((room.rect.width as u32).to_le_bytes());
            bytes.extend((room.rect.height as u32).to_le_bytes());
            bytes.push(match room.kind {
                RoomKind::Spawn => 0,
                RoomKind::Combat => 1,
                RoomKind::Elite => 2,
                RoomKind::Loot => 3,
                RoomKind::Altar => 4,
                RoomKind::Boss => 5,
            });
            bytes.push(u8::from(room.is_exit));
            bytes.extend((room.roster.len() as u32).to_le_bytes());
            for spawn in &room.roster {
                bytes.push(match spawn.kind {
                    EnemyKind::Walker => 0,
                    EnemyKind::Shooter => 1,
                    EnemyKind::Smart => 2,
                    EnemyKind::Stealth => 3,
                    EnemyKind::Rapid => 4,
                    EnemyKind::Shotgun => 5,
                    EnemyKind::Heavy => 6,
                });
                bytes.extend(spawn.pos.x.to_le_bytes());
                bytes.extend(spawn.pos.y.to_le_bytes());
            }
        }

        bytes
    }
}
