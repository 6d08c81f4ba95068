//! Headless soak runner: generates and simulates a batch of seeds, checks
//! the level and lifecycle invariants on every tick, and prints a JSON
//! summary. Exits nonzero when any seed violates an invariant.

use anyhow::{Result, bail};
use clap::Parser;
use game_core::{Game, GameConfig, GamePhase, InputFrame, TileKind, Vec2, generate_level};
use serde::Serialize;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First seed of the batch
    #[arg(long, default_value_t = 0)]
    start_seed: u64,
    /// Number of consecutive seeds to run
    #[arg(long, default_value_t = 64)]
    seeds: u64,
    /// Dungeon depth to generate at
    #[arg(long, default_value_t = 1)]
    depth: u32,
    /// Simulated ticks per seed
    #[arg(long, default_value_t = 1_200)]
    ticks: u64,
}

#[derive(Serialize)]
struct SoakSummary {
    seeds_run: u64,
    generation_fallbacks: u64,
    min_rooms: usize,
    max_rooms: usize,
    total_ticks: u64,
    failures: Vec<String>,
}

fn wander_input(tick: u64) -> InputFrame {
    let angle = tick as f32 * 0.017;
    InputFrame {
        movement: Vec2::new(angle.cos(), (angle * 0.7).sin()),
        aim: Vec2::new(angle.sin(), angle.cos()),
        fire: tick % 15 < 5,
        interact: tick % 83 == 0,
    }
}

fn check_generation(seed: u64, depth: u32, config: &GameConfig) -> Result<(usize, bool), String> {
    let outcome = generate_level(seed, depth, config);
    let level = &outcome.level;

    if !level.all_floor_reachable_from_spawn() {
        return Err(format!("seed {seed}: disconnected floor"));
    }
    if level.rooms.iter().filter(|room| room.is_exit).count() != 1 {
        return Err(format!("seed {seed}: exit room count != 1"));
    }
    for left in 0..level.rooms.len() {
        for right in (left + 1)..level.rooms.len() {
            let padding = config.level.padding;
            if level.rooms[left]
                .rect
                .expanded(padding)
                .intersects(&level.rooms[right].rect.expanded(padding))
            {
                return Err(format!("seed {seed}: rooms {left} and {right} violate padding"));
            }
        }
    }

    Ok((level.rooms.len(), outcome.fell_back))
}

fn check_simulation(seed: u64, ticks: u64, config: &GameConfig) -> Result<(), String> {
    let mut game = Game::new(seed, *config);
    let mut lifecycle: Vec<(bool, bool)> = Vec::new();
    let mut last_depth = game.depth();

    for tick in 0..ticks {
        game.tick(1.0 / 60.0, &wander_input(tick));
        let world = game.world();

        if game.depth() < last_depth {
            return Err(format!("seed {seed}: depth decreased"));
        }
        if game.depth() != last_depth {
            last_depth = game.depth();
            lifecycle.clear();
        }

        let player = world.player();
        if player.hp > player.max_hp {
            return Err(format!("seed {seed}: hp above max at tick {tick}"));
        }
        if game.phase() == GamePhase::Playing {
            let tile = world.grid.world_to_tile(player.pos);
            if world.grid.tile_at(tile) != TileKind::Floor {
                return Err(format!("seed {seed}: player inside a wall at tick {tick}"));
            }
        }

        if lifecycle.len() != world.rooms.len() {
            lifecycle = world.rooms.iter().map(|room| (room.triggered, room.cleared)).collect();
        }
        for (index, room) in world.rooms.iter().enumerate() {
            let (was_triggered, was_cleared) = lifecycle[index];
            if (was_triggered && !room.triggered) || (was_cleared && !room.cleared) {
                return Err(format!("seed {seed}: room {index} lifecycle regressed"));
            }
            lifecycle[index] = (room.triggered, room.cleared);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig::default();

    let mut summary = SoakSummary {
        seeds_run: 0,
        generation_fallbacks: 0,
        min_rooms: usize::MAX,
        max_rooms: 0,
        total_ticks: 0,
        failures: Vec::new(),
    };

    for seed in args.start_seed..args.start_seed + args.seeds {
        summary.seeds_run += 1;

        match check_generation(seed, args.depth, &config) {
            Ok((room_count, fell_back)) => {
                summary.min_rooms = summary.min_rooms.min(room_count);
                summary.max_rooms = summary.max_rooms.max(room_count);
                if fell_back {
                    summary.generation_fallbacks += 1;
                }
            }
            Err(message) => summary.failures.push(message),
        }

        if let Err(message) = check_simulation(seed, args.ticks, &config) {
            summary.failures.push(message);
        }
        summary.total_ticks += args.ticks;
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !summary.failures.is_empty() {
        bail!("{} seed(s) failed invariants", summary.failures.len());
    }
    Ok(())
}
