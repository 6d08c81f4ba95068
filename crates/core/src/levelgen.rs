//! Procedural level generation split into coherent submodules: placement
//! and carving, door-socket detection, room classification, and lazy
//! population planning.

pub mod model;

mod classify;
mod generator;
mod grid;
mod layout;
mod populate;
mod seed;
mod sockets;

pub use generator::{GenerationOutcome, LevelGenerator, MAX_GENERATION_ATTEMPTS};
pub use model::{DoorSocket, GeneratedLevel, RoomPlan, RoomRect, SpawnSpec};

pub fn generate_level(
    run_seed: u64,
    depth: u32,
    config: &crate::config::GameConfig,
) -> GenerationOutcome {
    LevelGenerator::new(run_seed).generate(depth, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    #[test]
    fn generate_level_matches_generator_output() {
        let config = GameConfig::default();
        let from_helper = generate_level(123, 2, &config);
        let from_generator = LevelGenerator::new(123).generate(2, &config);
        assert_eq!(from_helper.level, from_generator.level);
    }
}
