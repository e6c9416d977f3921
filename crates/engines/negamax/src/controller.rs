//! Turn-level driver: iterative deepening under a time budget, with a
//! seeded random choice among equally scored moves.

use std::time::{Duration, Instant};

use chess_core::{Color, Move};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::SearchConfig;
use crate::error::{ConfigError, SearchError};
use crate::rules::GameRules;
use crate::search::{AdversarialSearch, SearchStats};
use crate::Score;

/// Every root move tied at the best score of one completed depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestMoveSet {
    pub depth: u8,
    pub score: Score,
    pub moves: Vec<Move>,
}

impl BestMoveSet {
    fn new(depth: u8) -> Self {
        Self {
            depth,
            score: Score::MIN,
            moves: Vec::new(),
        }
    }

    fn offer(&mut self, mv: Move, score: Score) {
        if score > self.score {
            self.score = score;
            self.moves.clear();
        }
        if score == self.score {
            self.moves.push(mv);
        }
    }
}

/// What the last `choose_move` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnStats {
    pub nodes: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Deepest fully completed iteration; 0 when no search was needed.
    pub depth: u8,
    /// Score of the chosen move at `depth`, when a search ran.
    pub score: Option<Score>,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct SearchController {
    config: SearchConfig,
    search: AdversarialSearch,
    rng: StdRng,
    /// Depth the next turn starts at when adaptive depth is on.
    carry_depth: Option<u8>,
    /// Each side's last chosen move, indexed by `Color::idx`.
    last_moves: [Option<Move>; 2],
    last_stats: TurnStats,
}

impl SearchController {
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            search: AdversarialSearch::new(config.weights.clone(), config.cache_capacity),
            config,
            rng,
            carry_depth: None,
            last_moves: [None; 2],
            last_stats: TurnStats::default(),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Change the deepening range. Rejected ranges leave the old one in place.
    pub fn set_depths(&mut self, base_depth: u8, max_depth: u8) -> Result<(), ConfigError> {
        let mut next = self.config.clone();
        next.base_depth = base_depth;
        next.max_depth = max_depth;
        next.validate()?;
        self.config = next;
        self.carry_depth = None;
        Ok(())
    }

    pub fn set_time_budget(&mut self, budget: Option<Duration>) {
        self.config.time_budget_millis =
            budget.map(|b| u64::try_from(b.as_millis()).unwrap_or(u64::MAX));
    }

    /// Restart the tie-break RNG from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.config.random_seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn last_stats(&self) -> TurnStats {
        self.last_stats
    }

    pub fn last_move(&self, side: Color) -> Option<Move> {
        self.last_moves[side.idx()]
    }

    /// Forget everything carried between turns of one game.
    pub fn new_game(&mut self) {
        self.search.clear_cache();
        self.carry_depth = None;
        self.last_moves = [None; 2];
        self.last_stats = TurnStats::default();
    }

    /// Pick a move for the side to move using the configured time budget.
    pub fn choose_move<R: GameRules>(&mut self, pos: &mut R) -> Result<Move, SearchError> {
        self.choose_move_within(pos, self.config.time_budget())
    }

    /// Pick a move for the side to move. `budget` is a soft limit: the first
    /// depth always completes, later depths stop between root moves once it
    /// has passed and their partial results are thrown away.
    pub fn choose_move_within<R: GameRules>(
        &mut self,
        pos: &mut R,
        budget: Option<Duration>,
    ) -> Result<Move, SearchError> {
        let started = Instant::now();
        let deadline = budget.map(|b| started + b);
        self.search.reset_stats();

        let moves = pos.legal_moves();
        let mover = pos.side_to_move();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        if let [only] = moves[..] {
            tracing::debug!("single legal move, skipping search");
            self.finish_turn(mover, only, None, 0, started);
            return Ok(only);
        }

        let remembered = self.last_moves[mover.idx()];
        let first_depth = self.first_depth();
        let mut best: Option<BestMoveSet> = None;

        for depth in first_depth..=self.config.max_depth {
            let interrupt = if best.is_some() { deadline } else { None };
            let Some(set) = self.search_depth(pos, &moves, depth, remembered, interrupt)? else {
                tracing::debug!(depth, "time budget ran out mid-depth, keeping previous depth");
                break;
            };
            tracing::debug!(
                depth,
                score = set.score,
                ties = set.moves.len(),
                nodes = self.search.stats().nodes,
                "depth complete"
            );

            let won = set.score >= self.config.won_score;
            best = Some(set);
            if won || deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
        }

        let best = best.ok_or(SearchError::NoLegalMoves)?;
        let chosen = *best.moves.choose(&mut self.rng).ok_or(SearchError::NoLegalMoves)?;
        self.finish_turn(mover, chosen, Some(best.score), best.depth, started);
        Ok(chosen)
    }

    fn first_depth(&self) -> u8 {
        let base = self.config.base_depth;
        match self.carry_depth {
            Some(carried) if self.config.adaptive_depth => carried.max(base).min(self.config.max_depth),
            _ => base,
        }
    }

    /// Score every root move `depth` plies deep. Returns `None` if
    /// `interrupt` passes before all root moves are scored.
    fn search_depth<R: GameRules>(
        &mut self,
        pos: &mut R,
        moves: &[Move],
        depth: u8,
        remembered: Option<Move>,
        interrupt: Option<Instant>,
    ) -> Result<Option<BestMoveSet>, SearchError> {
        let mut set = BestMoveSet::new(depth);
        for &mv in moves {
            if interrupt.is_some_and(|d| Instant::now() >= d) {
                return Ok(None);
            }
            let score = self
                .search
                .score_move_with(pos, mv, depth.saturating_sub(1), remembered)?;
            tracing::trace!(depth, mv = %chess_core::move_to_uci(mv), score, "root move");
            set.offer(mv, score);
        }
        Ok(Some(set))
    }

    fn finish_turn(&mut self, mover: Color, chosen: Move, score: Option<Score>, depth: u8, started: Instant) {
        let stats: SearchStats = self.search.stats();
        self.last_stats = TurnStats {
            nodes: stats.nodes,
            cache_hits: stats.cache_hits,
            cache_misses: stats.cache_misses,
            depth,
            score,
            elapsed: started.elapsed(),
        };
        self.last_moves[mover.idx()] = Some(chosen);
        if depth > 0 {
            self.carry_depth = Some(depth.saturating_sub(1));
        }
        tracing::info!(
            mv = %chess_core::move_to_uci(chosen),
            depth,
            score,
            nodes = stats.nodes,
            elapsed_ms = u64::try_from(self.last_stats.elapsed.as_millis()).unwrap_or(u64::MAX),
            "move chosen"
        );
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod controller_tests;
