//! Door-socket detection: after rooms and corridors are carved, any floor
//! cell one unit outside a room edge marks a boundary crossing. Top and
//! bottom edges yield horizontal doors, left and right edges vertical ones.

use crate::types::{Orientation, Pos, TileKind};

use super::grid::{in_bounds, tile_at};
use super::model::{DoorSocket, RoomRect};

pub(super) fn scan_door_sockets(
    tiles: &[TileKind],
    width: usize,
    height: usize,
    rooms: &[RoomRect],
) -> Vec<DoorSocket> {
    let mut sockets: Vec<DoorSocket> = Vec::new();

    let mut push_unique = |sockets: &mut Vec<DoorSocket>, tile: Pos, orientation: Orientation| {
        if !in_bounds(width, height, tile) || tile_at(tiles, width, tile) != TileKind::Floor {
            return;
        }
        if sockets.iter().any(|socket| socket.tile == tile) {
            return;
        }
        sockets.push(DoorSocket { tile, orientation });
    };

    for room in rooms {
        let top = room.y as i32 - 1;
        let bottom = (room.y + room.height) as i32;
        for x in room.x..room.x + room.width {
            push_unique(&mut sockets, Pos { y: top, x: x as i32 }, Orientation::Horizontal);
            push_unique(&mut sockets, Pos { y: bottom, x: x as i32 }, Orientation::Horizontal);
        }

        let left = room.x as i32 - 1;
        let right = (room.x + room.width) as i32;
        for y in room.y..room.y + room.height {
            push_unique(&mut sockets, Pos { y: y as i32, x: left }, Orientation::Vertical);
            push_unique(&mut sockets, Pos { y: y as i32, x: right }, Orientation::Vertical);
        }
    }

    sockets
}

/// A socket belongs to every room whose rectangle, expanded by one, contains
/// it. Sockets between two adjacent rooms therefore register with both.
pub(super) fn sockets_for_room(room: &RoomRect, sockets: &[DoorSocket]) -> Vec<usize> {
    let boundary = room.expanded(1);
    sockets
        .iter()
        .enumerate()
        .filter(|(_, socket)| boundary.contains(socket.tile))
        .map(|(index, _)| index)
        .collect()
}
