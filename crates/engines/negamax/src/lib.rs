//! Negamax chess engine
//!
//! Exhaustive zero-sum search (no pruning) over a [`GameRules`] position,
//! with a material/structure evaluator, per-move heuristics, a memo cache and
//! an iterative-deepening controller that breaks ties at random.
//!
//! ```no_run
//! use chess_core::Position;
//! use negamax_engine::{SearchConfig, SearchController};
//!
//! let mut controller = SearchController::new(SearchConfig::fixed_depth(2, 7));
//! let mut pos = Position::startpos();
//! let mv = controller.choose_move(&mut pos)?;
//! # Ok::<(), negamax_engine::SearchError>(())
//! ```

mod cache;
mod config;
mod controller;
mod error;
mod eval;
mod guard;
mod heuristics;
mod rules;
mod search;

/// Centipawn score, positive when good for the side it is reported for.
pub type Score = i32;

pub use cache::{CacheKey, PositionCache};
pub use config::{SearchConfig, Weights};
pub use controller::{BestMoveSet, SearchController, TurnStats};
pub use error::{ConfigError, SearchError};
pub use eval::StaticEvaluator;
pub use guard::MoveGuard;
pub use heuristics::{BeforeMove, MoveHeuristics};
pub use rules::GameRules;
pub use search::{AdversarialSearch, SearchStats};
