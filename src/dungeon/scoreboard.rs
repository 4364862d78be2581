//! Bounded high-score table.

use std::cmp::Ordering;

use super::types::Score;

pub const DEFAULT_CAPACITY: usize = 10;

/// Top-K scores ordered by score descending, then time ascending.
///
/// Entries that tie on both keys keep their insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    entries: Vec<Score>,
    capacity: usize,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ScoreBoard {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Rank a loaded list (in its given order) and keep the top entries.
    pub fn from_entries(entries: Vec<Score>, capacity: usize) -> Self {
        let mut board = Self { entries, capacity };
        board.rank();
        board
    }

    fn rank(&mut self) {
        // `sort_by` is stable, which keeps equal entries in insertion order.
        self.entries.sort_by(Score::rank_cmp);
        self.entries.truncate(self.capacity);
    }

    /// Insert a score; returns its zero-based rank if it was retained.
    pub fn insert(&mut self, score: Score) -> Option<usize> {
        let position = self
            .entries
            .partition_point(|e| e.rank_cmp(&score) != Ordering::Greater);
        self.entries.push(score);
        self.rank();
        (position < self.capacity).then_some(position)
    }

    pub fn entries(&self) -> &[Score] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
