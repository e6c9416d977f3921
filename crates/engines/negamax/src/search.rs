//! Zero-sum recursive move scoring (negamax without pruning).
//!
//! `score_move` reports a move's value for the side that plays it;
//! `best_opponent_response` reports the best value the side to move can reach.
//! A move's value is its own heuristic adjustment minus the opponent's best
//! response one ply deeper.

use chess_core::Move;

use crate::cache::{CacheKey, PositionCache};
use crate::config::Weights;
use crate::error::SearchError;
use crate::eval::StaticEvaluator;
use crate::guard::MoveGuard;
use crate::heuristics::{BeforeMove, MoveHeuristics};
use crate::rules::GameRules;
use crate::Score;

/// Counters for one `choose_move` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Moves scored without a cache hit.
    pub nodes: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
}

#[derive(Debug, Clone)]
pub struct AdversarialSearch {
    evaluator: StaticEvaluator,
    heuristics: MoveHeuristics,
    cache: PositionCache,
    stats: SearchStats,
}

impl AdversarialSearch {
    pub fn new(weights: Weights, cache_capacity: usize) -> Self {
        Self {
            evaluator: StaticEvaluator::new(weights.clone()),
            heuristics: MoveHeuristics::new(weights),
            cache: PositionCache::with_capacity(cache_capacity),
            stats: SearchStats::default(),
        }
    }

    pub fn cache(&self) -> &PositionCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = SearchStats::default();
    }

    fn weights(&self) -> &Weights {
        self.evaluator.weights()
    }

    /// Value of playing `mv` in `pos`, for the side playing it, looking
    /// `remaining_depth` further plies ahead. `pos` is unchanged on return.
    pub fn score_move<R: GameRules>(
        &mut self,
        pos: &mut R,
        mv: Move,
        remaining_depth: u8,
    ) -> Result<Score, SearchError> {
        self.score_move_with(pos, mv, remaining_depth, None)
    }

    /// Like `score_move`, with the mover's previous move supplied for
    /// positions that carry no history of it.
    pub(crate) fn score_move_with<R: GameRules>(
        &mut self,
        pos: &mut R,
        mv: Move,
        remaining_depth: u8,
        remembered: Option<Move>,
    ) -> Result<Score, SearchError> {
        let before = BeforeMove::snapshot(pos, remembered);
        let key = CacheKey::new(pos.position_identity(), mv, remaining_depth)
            .with_history(&before, pos.is_repeated_position());
        if let Some(score) = self.cache.lookup(&key) {
            self.stats.cache_hits += 1;
            return Ok(score);
        }
        self.stats.cache_misses += 1;
        self.stats.nodes += 1;

        let mover = before.mover;
        let mut after = MoveGuard::apply(pos, mv);
        let mut replies = after.legal_moves();

        let score = if replies.is_empty() {
            self.terminal_score(&*after, remaining_depth)?
        } else if after.is_drawn() {
            self.heuristics.adjust(mv, &before, &*after) - self.weights().draw_penalty
        } else if remaining_depth == 0 {
            self.evaluator.evaluate_live(&*after, mover) + self.heuristics.adjust(mv, &before, &*after)
        } else {
            let adjust = self.heuristics.adjust(mv, &before, &*after);
            let best_reply = self.best_of(&mut *after, &mut replies, remaining_depth - 1)?;
            adjust - best_reply
        };
        drop(after);

        self.cache.store(key, score);
        Ok(score)
    }

    /// Best value the side to move in `pos` can reach by playing one of its
    /// legal moves scored `remaining_depth` plies deep.
    pub fn best_opponent_response<R: GameRules>(
        &mut self,
        pos: &mut R,
        remaining_depth: u8,
    ) -> Result<Score, SearchError> {
        let mut moves = pos.legal_moves();
        if moves.is_empty() {
            // Terminal for the side to move: negate the value its opponent
            // got from reaching it.
            return Ok(-self.terminal_score(&*pos, remaining_depth)?);
        }
        self.best_of(pos, &mut moves, remaining_depth)
    }

    fn best_of<R: GameRules>(
        &mut self,
        pos: &mut R,
        moves: &mut Vec<Move>,
        remaining_depth: u8,
    ) -> Result<Score, SearchError> {
        let mut best = Score::MIN;
        for mv in moves.drain(..) {
            let score = self.score_move(pos, mv, remaining_depth)?;
            best = best.max(score);
        }
        Ok(best)
    }

    /// Value, for the side that just moved, of a position with no legal
    /// replies. Faster mates score higher.
    fn terminal_score<R: GameRules>(&self, pos: &R, remaining_depth: u8) -> Result<Score, SearchError> {
        if pos.is_checkmate() {
            Ok(self.weights().mate_score + Score::from(remaining_depth))
        } else if pos.is_drawn() {
            Ok(-self.weights().draw_penalty)
        } else {
            let identity = pos.position_identity();
            tracing::warn!(identity, "no legal moves but neither checkmate nor draw");
            Err(SearchError::ContractViolation { identity })
        }
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
