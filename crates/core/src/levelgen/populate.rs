//! Lazy enemy rosters: per-room composition from room type, area, and depth,
//! plus door-distant placement. Produces immutable spawn specs only; nothing
//! is instantiated until the room triggers.

use crate::config::{ENEMY_WEIGHT_TABLE, FALLBACK_ENEMY_KIND, LevelConfig, PopulationConfig};
use crate::types::{EnemyKind, Pos, RoomKind, TileKind, Vec2};

use super::grid::tile_at;
use super::model::{RoomRect, SpawnSpec};
use super::seed::{random_f32, random_usize};

pub(super) struct PopulateContext<'a> {
    pub(super) level_seed: u64,
    pub(super) depth: u32,
    pub(super) tiles: &'a [TileKind],
    pub(super) level: &'a LevelConfig,
    pub(super) population: &'a PopulationConfig,
}

pub(super) fn populate_room(
    context: &PopulateContext<'_>,
    room_index: usize,
    rect: &RoomRect,
    kind: RoomKind,
    door_centers: &[Vec2],
) -> Vec<SpawnSpec> {
    let enemy_count = match kind {
        RoomKind::Spawn | RoomKind::Altar => return Vec::new(),
        RoomKind::Elite => context.population.elite_count,
        RoomKind::Boss => context.population.boss_count,
        RoomKind::Loot => context.population.loot_guard_count,
        RoomKind::Combat => combat_enemy_count(context, room_index, rect),
    };

    let mut roster = Vec::with_capacity(enemy_count);
    for enemy_index in 0..enemy_count {
        let kind = pick_enemy_kind(
            context.level_seed,
            context.depth,
            (room_index as u64) << 16 | enemy_index as u64,
        );
        let pos = resolve_spawn_point(context, room_index, enemy_index, rect, door_centers);
        roster.push(SpawnSpec { kind, pos });
    }
    roster
}

fn combat_enemy_count(
    context: &PopulateContext<'_>,
    room_index: usize,
    rect: &RoomRect,
) -> usize {
    let base = rect.area() / 50 + (context.depth / 3) as usize;
    let jitter =
        random_usize(context.level_seed, 0x2800 + room_index as u64, 0, 2) as isize - 1;
    let count = base as isize + jitter;
    count.clamp(
        context.population.min_room_enemies as isize,
        context.population.max_room_enemies as isize,
    ) as usize
}

/// Weighted draw over the depth-gated table: draw `r` in `[0, total)` and
/// subtract weights in table order. The weakest-kind fallback can only fire
/// on floating-point rounding at the tail and is kept as defense.
pub(super) fn pick_enemy_kind(level_seed: u64, depth: u32, stream: u64) -> EnemyKind {
    let eligible: Vec<_> =
        ENEMY_WEIGHT_TABLE.iter().filter(|rule| depth >= rule.unlock_depth).collect();
    let total_weight: u32 = eligible.iter().map(|rule| rule.weight_at(depth)).sum();
    if total_weight == 0 {
        return FALLBACK_ENEMY_KIND;
    }

    let mut roll = random_f32(level_seed, 0x2900 ^ stream) * total_weight as f32;
    for rule in eligible {
        roll -= rule.weight_at(depth) as f32;
        if roll <= 0.0 {
            return rule.kind;
        }
    }
    FALLBACK_ENEMY_KIND
}

/// Bounded retry search for a floor tile inside the room whose center keeps
/// the configured clearance from every door of that room. When the budget
/// runs out the last attempted position is accepted as-is; room setup never
/// fails outright.
fn resolve_spawn_point(
    context: &PopulateContext<'_>,
    room_index: usize,
    enemy_index: usize,
    rect: &RoomRect,
    door_centers: &[Vec2],
) -> Vec2 {
    let tile_size = context.level.tile_size;
    let room_center = Vec2::new(
        (rect.x as f32 + rect.width as f32 / 2.0) * tile_size,
        (rect.y as f32 + rect.height as f32 / 2.0) * tile_size,
    );

    let mut last_candidate = None;
    for attempt in 0..context.population.placement_attempts as u64 {
        let stream_base = 0x3000
            ^ ((room_index as u64) << 24)
            ^ ((enemy_index as u64) << 12)
            ^ (attempt << 1);
        let tx = rect.x + random_usize(context.level_seed, stream_base, 0, rect.width - 1);
        let ty = rect.y + random_usize(context.level_seed, stream_base | 1, 0, rect.height - 1);
        let tile = Pos { y: ty as i32, x: tx as i32 };
        if tile_at(context.tiles, context.level.width, tile) != TileKind::Floor {
            continue;
        }

        let candidate = Vec2::new(
            tx as f32 * tile_size + tile_size / 2.0,
            ty as f32 * tile_size + tile_size / 2.0,
        );
        last_candidate = Some(candidate);

        let clear_of_doors = door_centers
            .iter()
            .all(|door| door.distance(candidate) > context.population.door_clearance);
        if clear_of_doors {
            return candidate;
        }
    }

    last_candidate.unwrap_or(room_center)
}
