//! Memo table of scored moves.
//!
//! Entries are keyed by the position the move is played from, the move, the
//! remaining depth it was searched to and the slice of game history the score
//! depends on. Scores are stored from the mover's point of view; the position
//! identity already fixes who the mover is. Hash collisions are not detected.

use std::collections::HashMap;

use chess_core::Move;

use crate::heuristics::BeforeMove;
use crate::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub position: u64,
    pub mv: u16,
    pub depth: u8,
    /// Key of the mover's previous move, 0 if unknown.
    pub previous_own: u16,
    pub halfmove_clock: u32,
    pub ply_count: u32,
    /// The position already occurred inside the repetition window.
    pub repeated: bool,
}

impl CacheKey {
    pub fn new(position: u64, mv: Move, depth: u8) -> Self {
        Self {
            position,
            mv: mv.key(),
            depth,
            previous_own: 0,
            halfmove_clock: 0,
            ply_count: 0,
            repeated: false,
        }
    }

    /// Add the history the position identity does not cover: reversal,
    /// stall and early-queen terms read it, and so do repetition draws.
    pub fn with_history(self, before: &BeforeMove, repeated: bool) -> Self {
        Self {
            previous_own: before.previous_own.map_or(0, |mv| mv.key()),
            halfmove_clock: before.halfmove_clock,
            ply_count: before.ply_count,
            repeated,
            ..self
        }
    }
}

#[derive(Debug, Clone)]
pub struct PositionCache {
    entries: HashMap<CacheKey, Score>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl PositionCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    pub fn lookup(&mut self, key: &CacheKey) -> Option<Score> {
        let found = self.entries.get(key).copied();
        match found {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        found
    }

    /// Insert a score. A full table is flushed first; there is no finer
    /// replacement policy.
    pub fn store(&mut self, key: CacheKey, score: Score) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            tracing::debug!(entries = self.entries.len(), "position cache full, flushing");
            self.entries.clear();
        }
        self.entries.insert(key, score);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
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

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl Default for PositionCache {
    fn default() -> Self {
        Self::with_capacity(1 << 20)
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod cache_tests;
