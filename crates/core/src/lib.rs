pub mod config;
pub mod game;
pub mod levelgen;
pub mod progression;
pub mod snapshot_file;
pub mod spatial;
pub mod state;
pub mod types;

pub use config::GameConfig;
pub use game::Game;
pub use levelgen::{GeneratedLevel, generate_level};
pub use progression::ProgressionSnapshot;
pub use spatial::SpatialHash;
pub use state::{Entity, EntityKind, Room, TileGrid, WorldState};
pub use types::*;
