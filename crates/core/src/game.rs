//! Runtime simulation over a generated level: doors, entity behavior,
//! physics, collision resolution, and room activation advanced by one fixed
//! step per `tick` call, in that order.

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::config::GameConfig;
use crate::spatial::SpatialHash;
use crate::state::WorldState;
use crate::types::*;

mod advance;
mod bootstrap;
mod collision;
mod combat;
mod doors;
mod hash;
mod movement;
mod pathfind;
mod phase;
mod physics;
mod rooms;
mod transition;

#[cfg(test)]
mod test_support;

use phase::PhaseMachine;
use transition::PendingTransition;

pub struct Game {
    run_seed: u64,
    tick: u64,
    config: GameConfig,
    rng: ChaCha8Rng,
    world: WorldState,
    /// Transient broad phase, cleared and rebuilt inside every tick's
    /// collision pass; never carries state across ticks.
    spatial: SpatialHash,
    phase: PhaseMachine,
    pending_transition: Option<PendingTransition>,
    unlocked_upgrades: BTreeSet<String>,
    score: u32,
    log: Vec<LogEvent>,
    effects: Vec<EffectEvent>,
}

impl Game {
    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.phase.current()
    }

    pub fn depth(&self) -> u32 {
        self.world.depth
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn unlocked_upgrades(&self) -> &BTreeSet<String> {
        &self.unlocked_upgrades
    }

    pub fn owns_upgrade(&self, key: &str) -> bool {
        self.unlocked_upgrades.contains(key)
    }

    /// Render-facing transient effects accumulated since the last drain.
    pub fn drain_effects(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.effects)
    }

    /// Uniform roll in `[0, 1)` from the runtime stream. Level generation
    /// never touches this; it stays a pure function of its seed inputs.
    fn roll_unit(&mut self) -> f32 {
        (self.rng.next_u64() >> 40) as f32 / (1_u64 << 24) as f32
    }
}
