//! Semantic room typing: spawn, boss/exit, altar cadence, and the
//! loot/elite reroll applied to ordinary combat rooms.

use crate::config::PopulationConfig;
use crate::types::RoomKind;

use super::seed::{random_f32, random_usize};

/// Assigns a kind to every accepted room and marks exactly one exit.
/// Room 0 is always the spawn room. The last accepted room becomes the
/// boss room and the exit; with a single room the spawn doubles as the
/// exit (degenerate fallback layouts only).
pub(super) fn classify_rooms(
    level_seed: u64,
    depth: u32,
    room_count: usize,
    population: &PopulationConfig,
) -> Vec<(RoomKind, bool)> {
    let mut assigned: Vec<(RoomKind, bool)> = Vec::with_capacity(room_count);
    if room_count == 0 {
        return assigned;
    }
    if room_count == 1 {
        assigned.push((RoomKind::Spawn, true));
        return assigned;
    }

    let boss_index = room_count - 1;
    let altar_index = if depth % 2 == 1 && room_count >= 3 {
        Some(random_usize(level_seed, 0x2000, 1, boss_index - 1))
    } else {
        None
    };

    for index in 0..room_count {
        if index == 0 {
            assigned.push((RoomKind::Spawn, false));
        } else if index == boss_index {
            assigned.push((RoomKind::Boss, true));
        } else if altar_index == Some(index) {
            assigned.push((RoomKind::Altar, false));
        } else {
            let roll = random_f32(level_seed, 0x2100 + index as u64);
            let kind = if roll < population.loot_fraction {
                RoomKind::Loot
            } else if roll < population.loot_fraction + population.elite_fraction {
                RoomKind::Elite
            } else {
                RoomKind::Combat
            };
            assigned.push((kind, false));
        }
    }

    assigned
}
