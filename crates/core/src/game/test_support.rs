//! Shared fixtures for the game submodule test suites: a handcrafted
//! two-room level with a doored corridor, installed behind a normal `Game`.

use super::*;
use crate::config::enemy_stats;
use crate::levelgen::{DoorSocket, GeneratedLevel, RoomPlan, RoomRect, SpawnSpec};
use crate::state::{EnemyState, Entity, EntityKind};

/// Two 5-tile-tall rooms joined by a two-wide corridor at rows 5..=6, with
/// vertical door sockets on both sides of the gap. Room B is the exit and
/// carries a two-walker roster. The player starts at room A's center.
pub(super) fn two_room_fixture() -> Game {
    let mut game = Game::new(7, GameConfig::default());
    let level = handcrafted_level(game.config().level.tile_size);
    game.world =
        bootstrap::install_world(&game.config, &game.unlocked_upgrades, level, 1, None);
    game.log.clear();
    // Tests drive subsystems directly; start in play rather than loading.
    game.phase.apply_staged();
    game
}

fn handcrafted_level(tile_size: f32) -> GeneratedLevel {
    let width = 16;
    let height = 11;
    let room_a = RoomRect { x: 1, y: 3, width: 5, height: 5 };
    let room_b = RoomRect { x: 8, y: 3, width: 6, height: 5 };

    let mut tiles = vec![TileKind::Wall; width * height];
    let mut carve = |x: usize, y: usize| tiles[y * width + x] = TileKind::Floor;
    for room in [room_a, room_b] {
        for y in room.y..=room.bottom() {
            for x in room.x..=room.right() {
                carve(x, y);
            }
        }
    }
    for y in 5..=6 {
        for x in 6..=7 {
            carve(x, y);
        }
    }

    let door_sockets = vec![
        DoorSocket { tile: Pos { y: 5, x: 6 }, orientation: Orientation::Vertical },
        DoorSocket { tile: Pos { y: 6, x: 6 }, orientation: Orientation::Vertical },
        DoorSocket { tile: Pos { y: 5, x: 7 }, orientation: Orientation::Vertical },
        DoorSocket { tile: Pos { y: 6, x: 7 }, orientation: Orientation::Vertical },
    ];

    let roster = vec![
        SpawnSpec {
            kind: EnemyKind::Walker,
            pos: Vec2::new(11.0 * tile_size + 20.0, 4.0 * tile_size + 20.0),
        },
        SpawnSpec {
            kind: EnemyKind::Walker,
            pos: Vec2::new(12.0 * tile_size + 20.0, 6.0 * tile_size + 20.0),
        },
    ];

    GeneratedLevel {
        width,
        height,
        tile_size,
        tiles,
        rooms: vec![
            RoomPlan {
                rect: room_a,
                kind: RoomKind::Spawn,
                is_exit: false,
                socket_indices: vec![0, 1],
                roster: Vec::new(),
            },
            RoomPlan {
                rect: room_b,
                kind: RoomKind::Combat,
                is_exit: true,
                socket_indices: vec![2, 3],
                roster,
            },
        ],
        door_sockets,
        spawn_tile: Pos { y: 5, x: 3 },
        exit_tile: Pos { y: 5, x: 11 },
    }
}

/// Inserts a live enemy directly, bypassing the roster path.
pub(super) fn add_enemy(game: &mut Game, kind: EnemyKind, pos: Vec2, room: usize) -> EntityId {
    let stats = enemy_stats(kind);
    let enemy = Entity {
        id: EntityId::default(),
        pos,
        radius: stats.radius,
        collision: CollisionKind::Enemy,
        removed: false,
        affinity: RoomAffinity::Room(room),
        mass: 1.0,
        knockback: Vec2::ZERO,
        friction: 6.0,
        hp: stats.hp,
        max_hp: stats.hp,
        flash_timer: 0.0,
        kind: EntityKind::Enemy(EnemyState {
            kind,
            movement: crate::config::movement_strategy(kind),
            attack_cooldown: 0.0,
        }),
    };
    let id = game.world.entities.insert(enemy);
    game.world.entities[id].id = id;
    id
}

pub(super) fn idle_input() -> InputFrame {
    InputFrame::default()
}

pub(super) fn move_input(x: f32, y: f32) -> InputFrame {
    InputFrame { movement: Vec2::new(x, y), ..InputFrame::default() }
}
