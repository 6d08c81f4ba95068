//! Deferred level advancement. Reaching the open exit portal schedules a
//! pending transition; it is applied at the start of a later tick, never
//! inside the tick that detected the exit condition.

use super::*;
use crate::levelgen;

pub(super) struct PendingTransition {
    pub(super) next_depth: u32,
}

impl Game {
    /// Discards everything but the player, generates the next level, and
    /// installs it. The player entity carries its hp and position is reset
    /// to the new spawn point.
    pub(super) fn apply_pending_transition(&mut self) {
        let Some(pending) = self.pending_transition.take() else {
            return;
        };

        let outcome = levelgen::generate_level(self.run_seed, pending.next_depth, &self.config);
        if outcome.fell_back {
            self.log.push(LogEvent::GenerationFellBack { depth: pending.next_depth });
        }
        self.log.push(LogEvent::LevelGenerated {
            depth: pending.next_depth,
            room_count: outcome.level.rooms.len(),
            retries: outcome.retries,
        });

        let carried_player = self.world.entities[self.world.player_id].clone();
        self.world = bootstrap::install_world(
            &self.config,
            &self.unlocked_upgrades,
            outcome.level,
            pending.next_depth,
            Some(carried_player),
        );
        self.log.push(LogEvent::LevelAdvanced { depth: pending.next_depth });
        self.phase.request(GamePhase::Playing, &mut self.log);
    }
}
