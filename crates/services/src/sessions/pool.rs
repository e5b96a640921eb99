use rand::Rng;
use rand::seq::IndexedRandom;

use drill_core::model::{Record, RecordId};

/// Consumable set of records for one session.
///
/// Records live in an arena addressed by `RecordId`; `remaining` holds the
/// indices not yet retired. Draws are uniform over `remaining`.
#[derive(Debug, Clone)]
pub struct RecordPool {
    records: Vec<Record>,
    remaining: Vec<usize>,
}

impl RecordPool {
    /// Build a pool from records whose ids are their positions in `records`.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        let remaining = (0..records.len()).collect();
        Self { records, remaining }
    }

    /// Pick a random remaining record without removing it.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<RecordId> {
        self.remaining.choose(rng).copied().map(RecordId::new)
    }

    #[must_use]
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id.index())
    }

    /// Remove `id` from the remaining set. Returns false if it was already retired.
    pub fn retire(&mut self, id: RecordId) -> bool {
        match self.remaining.iter().position(|index| *index == id.index()) {
            Some(slot) => {
                self.remaining.swap_remove(slot);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, id: RecordId) -> bool {
        self.remaining.contains(&id.index())
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drill_core::model::{RecordDraft, ValidationRules};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn pool() -> RecordPool {
        let rules = ValidationRules::default();
        let records = [("你", "ni3"), ("好", "hao3"), ("我", "wo3"), ("他", "ta1")]
            .into_iter()
            .enumerate()
            .map(|(i, (phrase, phonetic))| {
                RecordDraft::new(phrase, phonetic, "x")
                    .validate(RecordId::new(i), &rules)
                    .unwrap()
            })
            .collect();
        RecordPool::new(records)
    }

    #[test]
    fn draining_visits_every_record_once() {
        let mut pool = pool();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();

        while let Some(id) = pool.draw(&mut rng) {
            assert!(seen.insert(id), "record {id} drawn twice");
            assert!(pool.retire(id));
        }

        assert_eq!(seen.len(), 4);
        assert!(pool.is_exhausted());
        assert_eq!(pool.total(), 4);
    }

    #[test]
    fn draw_does_not_remove() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(1);
        let id = pool.draw(&mut rng).unwrap();
        assert!(pool.contains(id));
        assert_eq!(pool.remaining(), 4);
    }

    #[test]
    fn retire_twice_is_a_no_op() {
        let mut pool = pool();
        assert!(pool.retire(RecordId::new(2)));
        assert!(!pool.retire(RecordId::new(2)));
        assert_eq!(pool.remaining(), 3);
        assert!(pool.get(RecordId::new(2)).is_some());
    }

    #[test]
    fn draws_cover_the_whole_pool() {
        let pool = pool();
        let mut rng = StdRng::seed_from_u64(42);
        let drawn: HashSet<_> = (0..200).filter_map(|_| pool.draw(&mut rng)).collect();
        assert_eq!(drawn.len(), 4);
    }

    #[test]
    fn empty_pool_draws_nothing() {
        let pool = RecordPool::new(Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(pool.draw(&mut rng).is_none());
        assert!(pool.is_exhausted());
    }
}
