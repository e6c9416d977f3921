//! Search configuration and evaluation weights.
//!
//! Everything is loadable from TOML; missing keys fall back to the defaults
//! below, so a config file only needs the values it changes.

use std::path::Path;
use std::time::Duration;

use chess_core::PieceKind;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::Score;

/// Bonus and penalty table shared by the evaluator and the move heuristics.
/// All values are centipawns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub pawn: Score,
    pub knight: Score,
    pub bishop: Score,
    pub rook: Score,
    pub queen: Score,

    pub pawn_center_bonus: Score,
    pub doubled_pawn_penalty: Score,
    pub isolated_pawn_penalty: Score,
    pub knight_edge_penalty: Score,
    pub castling_right_bonus: Score,

    pub mate_score: Score,
    pub check_bonus: Score,
    pub draw_penalty: Score,

    pub castle_bonus: Score,
    pub promotion_bonus: Score,
    pub capture_bonus: Score,
    pub king_move_penalty: Score,
    pub hanging_penalty: Score,
    pub reversal_penalty: Score,
    pub stalled_reversal_penalty: Score,
    /// No-progress plies after which reversals use the stalled penalty.
    pub stall_threshold: u32,
    pub early_queen_penalty: Score,
    /// Plies from the start of the game during which queen moves are penalised.
    pub early_queen_plies: u32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            pawn: 100,
            knight: 300,
            bishop: 320,
            rook: 500,
            queen: 900,

            pawn_center_bonus: 20,
            doubled_pawn_penalty: 30,
            isolated_pawn_penalty: 15,
            knight_edge_penalty: 10,
            castling_right_bonus: 10,

            mate_score: 100_000,
            check_bonus: 50,
            draw_penalty: 500,

            castle_bonus: 60,
            promotion_bonus: 50,
            capture_bonus: 10,
            king_move_penalty: 40,
            hanging_penalty: 30,
            reversal_penalty: 40,
            stalled_reversal_penalty: 150,
            stall_threshold: 10,
            early_queen_penalty: 20,
            early_queen_plies: 10,
        }
    }
}

impl Weights {
    /// Material value of a piece kind. Kings are never counted.
    #[inline]
    pub fn value(&self, kind: PieceKind) -> Score {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => 0,
        }
    }
}

/// Options recognised by the search controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Ply depth of the first iteration.
    pub base_depth: u8,
    /// Hard ceiling for iterative deepening.
    pub max_depth: u8,
    /// Soft deadline per move; `None` searches every depth up to `max_depth`.
    pub time_budget_millis: Option<u64>,
    /// Seed for the tie-break RNG. `None` seeds from the OS.
    pub random_seed: Option<u64>,
    /// Start the next turn at `last_depth - 1` instead of `base_depth`.
    pub adaptive_depth: bool,
    /// Best scores at or above this stop deepening early.
    pub won_score: Score,
    /// Cache entries kept before the cache is flushed.
    pub cache_capacity: usize,
    pub weights: Weights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_depth: 1,
            max_depth: 3,
            time_budget_millis: Some(1_000),
            random_seed: None,
            adaptive_depth: false,
            won_score: 50_000,
            cache_capacity: 1 << 20,
            weights: Weights::default(),
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_depth > self.max_depth {
            return Err(ConfigError::DepthRange {
                base: self.base_depth,
                max: self.max_depth,
            });
        }
        if self.cache_capacity == 0 {
            return Err(ConfigError::ZeroCacheCapacity);
        }
        Ok(())
    }

    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_millis.map(Duration::from_millis)
    }

    /// Fixed depth, no time limit, seeded tie-break: reproducible searches.
    pub fn fixed_depth(depth: u8, seed: u64) -> Self {
        Self {
            base_depth: depth,
            max_depth: depth,
            time_budget_millis: None,
            random_seed: Some(seed),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
