//! Room placement and corridor carving for the base level topology.
//!
//! Placement runs a fixed number of attempts; a candidate whose
//! padding-expanded rectangle touches an already-placed room's expanded
//! rectangle is skipped, never retried, so the accepted count can fall short
//! of the target. Every accepted room after the first is connected to the
//! previously accepted room, which keeps the whole carved region reachable
//! by construction.

use crate::config::LevelConfig;
use crate::types::{Pos, TileKind};

use super::model::RoomRect;
use super::seed::{mix_seed_stream, random_usize};

pub(super) fn place_rooms(level_seed: u64, config: &LevelConfig) -> Vec<RoomRect> {
    let mut rooms: Vec<RoomRect> = Vec::new();

    for attempt in 0..config.target_room_count as u64 {
        let room_width = random_usize(
            level_seed,
            attempt * 8 + 1,
            config.min_room_size,
            config.max_room_size,
        );
        let room_height = random_usize(
            level_seed,
            attempt * 8 + 2,
            config.min_room_size,
            config.max_room_size,
        );
        if room_width + 2 * config.padding + 2 >= config.width
            || room_height + 2 * config.padding + 2 >= config.height
        {
            continue;
        }

        let max_x = config.width - room_width - config.padding - 1;
        let max_y = config.height - room_height - config.padding - 1;
        let x = random_usize(level_seed, attempt * 8 + 3, config.padding, max_x);
        let y = random_usize(level_seed, attempt * 8 + 4, config.padding, max_y);

        let candidate = RoomRect { x, y, width: room_width, height: room_height };
        let candidate_with_margin = candidate.expanded(config.padding);
        if rooms.iter().any(|existing_room| {
            existing_room.expanded(config.padding).intersects(&candidate_with_margin)
        }) {
            continue;
        }
        rooms.push(candidate);
    }

    rooms
}

pub(super) fn carve_room(tiles: &mut [TileKind], width: usize, room: &RoomRect) {
    for y in room.y..=room.bottom() {
        for x in room.x..=room.right() {
            tiles[y * width + x] = TileKind::Floor;
        }
    }
}

/// Carves an L-shaped corridor between the centers of two rooms. Both legs
/// are two tiles wide so a diagonal corner can never pinch to one tile.
pub(super) fn carve_connecting_corridor(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    level_seed: u64,
    from_index: usize,
    from: &RoomRect,
    to: &RoomRect,
) {
    let start = from.center();
    let end = to.center();
    let horizontal_first = mix_seed_stream(level_seed, 0x4000 + from_index as u64) & 1 == 0;

    if horizontal_first {
        carve_horizontal_leg(tiles, width, height, start.y, start.x, end.x);
        carve_vertical_leg(tiles, width, height, end.x, start.y, end.y);
    } else {
        carve_vertical_leg(tiles, width, height, start.x, start.y, end.y);
        carve_horizontal_leg(tiles, width, height, end.y, start.x, end.x);
    }
}

fn carve_horizontal_leg(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    y: i32,
    left_x: i32,
    right_x: i32,
) {
    let from_x = left_x.min(right_x);
    let to_x = left_x.max(right_x);
    for x in from_x..=to_x {
        carve_floor_cell(tiles, width, height, Pos { y, x });
        carve_floor_cell(tiles, width, height, Pos { y: y + 1, x });
    }
}

fn carve_vertical_leg(
    tiles: &mut [TileKind],
    width: usize,
    height: usize,
    x: i32,
    top_y: i32,
    bottom_y: i32,
) {
    let from_y = top_y.min(bottom_y);
    let to_y = top_y.max(bottom_y);
    for y in from_y..=to_y {
        carve_floor_cell(tiles, width, height, Pos { y, x });
        carve_floor_cell(tiles, width, height, Pos { y, x: x + 1 });
    }
}

fn carve_floor_cell(tiles: &mut [TileKind], width: usize, height: usize, pos: Pos) {
    // The outermost ring stays wall so movement never has to bounds-check.
    if pos.x <= 0 || pos.y <= 0 {
        return;
    }
    let column = pos.x as usize;
    let row = pos.y as usize;
    if column >= width - 1 || row >= height - 1 {
        return;
    }
    tiles[row * width + column] = TileKind::Floor;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn placement_respects_padding_between_accepted_rooms() {
        let config = GameConfig::default().level;
        for seed in [7_u64, 42, 1_000, 77_777] {
            let rooms = place_rooms(seed, &config);
            for left_index in 0..rooms.len() {
                for right_index in (left_index + 1)..rooms.len() {
                    let left = rooms[left_index].expanded(config.padding);
                    let right = rooms[right_index].expanded(config.padding);
                    assert!(
                        !left.intersects(&right),
                        "rooms must not overlap or touch: {:?} vs {:?} (seed {seed})",
                        rooms[left_index],
                        rooms[right_index]
                    );
                }
            }
        }
    }

    #[test]
    fn placement_never_exceeds_the_attempt_target() {
        let config = GameConfig::default().level;
        for seed in 0..50_u64 {
            let rooms = place_rooms(seed, &config);
            assert!(rooms.len() <= config.target_room_count);
        }
    }

    #[test]
    fn corridor_legs_are_two_tiles_wide() {
        let config = GameConfig::default().level;
        let mut tiles = vec![TileKind::Wall; config.width * config.height];
        let from = RoomRect { x: 2, y: 2, width: 5, height: 5 };
        let to = RoomRect { x: 30, y: 2, width: 5, height: 5 };
        carve_room(&mut tiles, config.width, &from);
        carve_room(&mut tiles, config.width, &to);
        carve_connecting_corridor(&mut tiles, config.width, config.height, 11, 0, &from, &to);

        // A straight horizontal connection carves the center row plus the
        // row below it along the whole span.
        let y = from.center().y as usize;
        for x in from.center().x as usize..=to.center().x as usize {
            assert_eq!(tiles[y * config.width + x], TileKind::Floor);
            assert_eq!(tiles[(y + 1) * config.width + x], TileKind::Floor);
        }
    }
}
