//! Uniform-grid broad phase. Cleared and rebuilt from the live entity set
//! once per tick; query results are a candidate superset that callers
//! narrow with exact circle tests. Never read across ticks.

use std::collections::BTreeMap;

use crate::types::{EntityId, Vec2};

pub struct SpatialHash {
    cell_size: f32,
    buckets: BTreeMap<(i32, i32), Vec<EntityId>>,
}

impl SpatialHash {
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0);
        Self { cell_size, buckets: BTreeMap::new() }
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Registers the entity in every cell its bounding circle overlaps. An
    /// entity spanning a cell boundary lands in multiple buckets.
    pub fn insert(&mut self, id: EntityId, center: Vec2, radius: f32) {
        let (min_x, min_y, max_x, max_y) = self.cell_range(center, radius);
        for cell_y in min_y..=max_y {
            for cell_x in min_x..=max_x {
                self.buckets.entry((cell_x, cell_y)).or_default().push(id);
            }
        }
    }

    /// Deduplicated union of every bucket the query circle overlaps. The
    /// result includes the query entity itself when it was inserted; callers
    /// exclude self.
    pub fn query(&self, center: Vec2, radius: f32) -> Vec<EntityId> {
        let (min_x, min_y, max_x, max_y) = self.cell_range(center, radius);
        let mut candidates = Vec::new();
        for cell_y in min_y..=max_y {
            for cell_x in min_x..=max_x {
                if let Some(bucket) = self.buckets.get(&(cell_x, cell_y)) {
                    candidates.extend_from_slice(bucket);
                }
            }
        }
        candidates.sort_unstable();
        candidates.dedup();
        candidates
    }

    /// Cell keys floor toward negative infinity so buckets stay consistent
    /// across the origin.
    fn cell_range(&self, center: Vec2, radius: f32) -> (i32, i32, i32, i32) {
        let min_x = ((center.x - radius) / self.cell_size).floor() as i32;
        let min_y = ((center.y - radius) / self.cell_size).floor() as i32;
        let max_x = ((center.x + radius) / self.cell_size).floor() as i32;
        let max_y = ((center.y + radius) / self.cell_size).floor() as i32;
        (min_x, min_y, max_x, max_y)
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;

    fn ids(count: usize) -> Vec<EntityId> {
        let mut arena: SlotMap<EntityId, ()> = SlotMap::with_key();
        (0..count).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn nearby_pair_in_one_cell_find_each_other() {
        let keys = ids(2);
        let mut hash = SpatialHash::new(80.0);
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(115.0, 100.0);
        hash.insert(keys[0], a, 10.0);
        hash.insert(keys[1], b, 10.0);

        assert!(hash.query(a, 10.0).contains(&keys[1]));
        assert!(hash.query(b, 10.0).contains(&keys[0]));
    }

    #[test]
    fn overlapping_pairs_are_never_missed_across_cell_boundaries() {
        let keys = ids(2);
        let mut hash = SpatialHash::new(80.0);
        // Centers straddle the x = 160 cell edge; circles overlap.
        let a = Vec2::new(155.0, 40.0);
        let b = Vec2::new(168.0, 40.0);
        hash.insert(keys[0], a, 10.0);
        hash.insert(keys[1], b, 10.0);

        assert!(hash.query(a, 10.0).contains(&keys[1]));
        assert!(hash.query(b, 10.0).contains(&keys[0]));
    }

    #[test]
    fn negative_coordinates_floor_instead_of_truncating() {
        let keys = ids(2);
        let mut hash = SpatialHash::new(80.0);
        // Truncation toward zero would merge cells -1 and 0 and could also
        // misfile an entity fully in negative space.
        let a = Vec2::new(-12.0, -12.0);
        let b = Vec2::new(6.0, 6.0);
        hash.insert(keys[0], a, 10.0);
        hash.insert(keys[1], b, 10.0);

        assert!(hash.query(a, 10.0).contains(&keys[1]));
        assert!(hash.query(b, 10.0).contains(&keys[0]));
    }

    #[test]
    fn wide_entity_lands_in_every_spanned_bucket() {
        let keys = ids(1);
        let mut hash = SpatialHash::new(80.0);
        hash.insert(keys[0], Vec2::new(80.0, 80.0), 90.0);

        // Reachable from queries far apart because it spans many cells.
        assert!(hash.query(Vec2::new(0.0, 0.0), 5.0).contains(&keys[0]));
        assert!(hash.query(Vec2::new(160.0, 160.0), 5.0).contains(&keys[0]));
    }

    #[test]
    fn query_results_are_deduplicated() {
        let keys = ids(1);
        let mut hash = SpatialHash::new(80.0);
        hash.insert(keys[0], Vec2::new(80.0, 80.0), 50.0);

        let found = hash.query(Vec2::new(80.0, 80.0), 50.0);
        assert_eq!(found, vec![keys[0]]);
    }

    #[test]
    fn requery_without_mutation_returns_the_same_set() {
        let keys = ids(3);
        let mut hash = SpatialHash::new(80.0);
        for (index, key) in keys.iter().enumerate() {
            hash.insert(*key, Vec2::new(20.0 * index as f32, 30.0), 12.0);
        }

        let first = hash.query(Vec2::new(20.0, 30.0), 12.0);
        let second = hash.query(Vec2::new(20.0, 30.0), 12.0);
        assert_eq!(first, second);
    }

    #[test]
    fn clear_empties_every_bucket() {
        let keys = ids(1);
        let mut hash = SpatialHash::new(80.0);
        hash.insert(keys[0], Vec2::new(10.0, 10.0), 8.0);
        hash.clear();
        assert!(hash.query(Vec2::new(10.0, 10.0), 8.0).is_empty());
    }
}
