//! Stable snapshot hashing for determinism checks: same seed and same
//! input script must walk through identical hash traces.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.run_seed);
        hasher.write_u64(self.tick);
        hasher.write_u32(self.world.depth);
        hasher.write_u32(self.score);
        hasher.write_u8(self.phase.current() as u8);

        let player = self.world.player();
        hasher.write_u32(player.pos.x.to_bits());
        hasher.write_u32(player.pos.y.to_bits());
        hasher.write_i32(player.hp);

        for room in &self.world.rooms {
            hasher.write_u8(u8::from(room.triggered) | (u8::from(room.cleared) << 1));
        }

        for (_, entity) in &self.world.entities {
            hasher.write_u8(entity.collision as u8);
            hasher.write_u32(entity.pos.x.to_bits());
            hasher.write_u32(entity.pos.y.to_bits());
            hasher.write_u8(u8::from(entity.removed));
        }

        hasher.finish()
    }
}
