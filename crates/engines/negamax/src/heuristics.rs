//! Per-move adjustments, added once for the ply a move is played on.

use chess_core::{Color, Move, PieceKind};

use crate::config::Weights;
use crate::rules::GameRules;
use crate::Score;

/// The parts of the pre-move position the heuristics look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeforeMove {
    pub mover: Color,
    /// The mover's own previous move, if known.
    pub previous_own: Option<Move>,
    pub halfmove_clock: u32,
    pub ply_count: u32,
}

impl BeforeMove {
    /// Snapshot `pos` before a move. `remembered` stands in for the mover's
    /// previous move when the position carries no history for it.
    pub fn snapshot<R: GameRules>(pos: &R, remembered: Option<Move>) -> Self {
        Self {
            mover: pos.side_to_move(),
            previous_own: pos.previous_move(2).or(remembered),
            halfmove_clock: pos.halfmove_clock(),
            ply_count: pos.ply_count(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MoveHeuristics {
    weights: Weights,
}

impl MoveHeuristics {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    /// Sum of every effect that applies to `mv`. `after` is the position with
    /// `mv` already played.
    pub fn adjust<R: GameRules>(&self, mv: Move, before: &BeforeMove, after: &R) -> Score {
        let w = &self.weights;
        let mut delta = 0;

        if mv.is_castle {
            delta += w.castle_bonus;
        } else if mv.piece == PieceKind::King {
            delta -= w.king_move_penalty;
        }

        if let Some(kind) = mv.promo {
            delta += w.promotion_bonus + w.value(kind);
        }
        if let Some(kind) = mv.captured {
            delta += w.capture_bonus + w.value(kind);
        }

        if mv.piece != PieceKind::King
            && after.is_attacked_by(mv.to, before.mover.other())
            && !after.is_attacked_by(mv.to, before.mover)
        {
            delta -= w.hanging_penalty;
        }

        if let Some(prev) = before.previous_own
            && prev.to == mv.from
            && prev.from == mv.to
        {
            delta -= if before.halfmove_clock > w.stall_threshold {
                w.stalled_reversal_penalty
            } else {
                w.reversal_penalty
            };
        }

        if mv.piece == PieceKind::Queen && before.ply_count < w.early_queen_plies {
            delta -= w.early_queen_penalty;
        }

        delta
    }
}

#[cfg(test)]
#[path = "heuristics_tests.rs"]
mod heuristics_tests;
