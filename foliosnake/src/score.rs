//! Best score, kept across sessions in the folioOS key/value store.

use foliocore::storage::{load_score, save_score, KeyValueStore, SNAKE_HIGH_SCORE_KEY};

#[derive(Debug)]
pub struct BestScore {
    best: u32,
    /// `None` keeps the score in memory only.
    store: Option<KeyValueStore>,
}

impl BestScore {
    /// Read the stored best once. Absent or malformed values count as zero.
    pub fn load(store: KeyValueStore) -> Self {
        let best = load_score(&store, SNAKE_HIGH_SCORE_KEY);
        tracing::debug!(event = "snake.best.loaded", best, path = %store.path().display());
        Self { best, store: Some(store) }
    }

    pub fn in_memory() -> Self {
        Self { best: 0, store: None }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Record a live score. Writes through when it beats the best and
    /// returns whether it did.
    pub fn observe(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = save_score(store, SNAKE_HIGH_SCORE_KEY, score) {
                tracing::warn!(event = "snake.best.save_failed", score, error = %e);
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_best_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut best = BestScore::load(KeyValueStore::open_in(dir.path()));
        assert_eq!(best.best(), 0);
        assert!(best.observe(30));
        assert!(!best.observe(20));
        assert!(!best.observe(30));

        let reloaded = BestScore::load(KeyValueStore::open_in(dir.path()));
        assert_eq!(reloaded.best(), 30);
    }

    #[test]
    fn test_malformed_value_reads_as_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = KeyValueStore::open_in(dir.path());
        store.set(SNAKE_HIGH_SCORE_KEY, "lots").unwrap();
        assert_eq!(BestScore::load(store).best(), 0);
    }

    #[test]
    fn test_in_memory_tracks_without_store() {
        let mut best = BestScore::in_memory();
        assert!(best.observe(10));
        assert_eq!(best.best(), 10);
    }
}
