//! Static position evaluation.
//!
//! Scores are always reported for a chosen side: positive is good for
//! `perspective`, negative is good for its opponent.

use chess_core::{file_of, rank_of, Color, PieceKind};

use crate::config::Weights;
use crate::rules::GameRules;
use crate::Score;

/// Files d and e, ranks 4 and 5 (0-based 3..=4 for both).
#[inline]
fn in_center_band(square: u8) -> bool {
    (3..=4).contains(&file_of(square)) && (3..=4).contains(&rank_of(square))
}

#[derive(Debug, Clone, Default)]
pub struct StaticEvaluator {
    weights: Weights,
}

impl StaticEvaluator {
    pub fn new(weights: Weights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Full evaluation: material, structure and terminal/tactical terms.
    pub fn evaluate<R: GameRules>(&self, pos: &R, perspective: Color) -> Score {
        self.positional(pos, perspective) + self.terminal(pos, perspective)
    }

    /// Material and placement terms only. Exactly antisymmetric:
    /// `positional(p, c) == -positional(p, c.other())`.
    pub fn positional<R: GameRules>(&self, pos: &R, perspective: Color) -> Score {
        self.side_score(pos, perspective) - self.side_score(pos, perspective.other())
    }

    /// Mate, check and draw adjustments. Mate and check are signed by which
    /// side suffers them; the draw penalty applies to whoever is asking.
    pub fn terminal<R: GameRules>(&self, pos: &R, perspective: Color) -> Score {
        let w = &self.weights;
        let sign = if pos.side_to_move() == perspective { -1 } else { 1 };

        if pos.is_checkmate() {
            return sign * w.mate_score;
        }
        let mut score = 0;
        if pos.is_in_check() {
            score += sign * w.check_bonus;
        }
        if pos.is_drawn() {
            score -= w.draw_penalty;
        }
        score
    }

    /// Evaluation of a position the search already knows has legal moves and
    /// is not a rule draw, so only the check term can apply.
    pub(crate) fn evaluate_live<R: GameRules>(&self, pos: &R, perspective: Color) -> Score {
        let sign = if pos.side_to_move() == perspective { -1 } else { 1 };
        let check = if pos.is_in_check() {
            sign * self.weights.check_bonus
        } else {
            0
        };
        self.positional(pos, perspective) + check
    }

    fn side_score<R: GameRules>(&self, pos: &R, side: Color) -> Score {
        let w = &self.weights;
        let mut score = 0;

        for kind in [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
            score += w.value(kind) * pos.piece_count(kind, side) as Score;
        }

        // Pawns and knights need their squares; one board sweep collects both.
        let mut pawn_files = [0u8; 8];
        let mut pawns = Vec::with_capacity(8);
        for square in 0..64u8 {
            let Some(pc) = pos.piece_at(square) else {
                continue;
            };
            if pc.color != side {
                continue;
            }
            match pc.kind {
                PieceKind::Pawn => {
                    pawn_files[file_of(square) as usize] += 1;
                    pawns.push(square);
                }
                PieceKind::Knight => {
                    score += w.knight;
                    if matches!(file_of(square), 0 | 7) {
                        score -= w.knight_edge_penalty;
                    }
                }
                _ => {}
            }
        }

        for &square in &pawns {
            let file = file_of(square) as usize;
            score += w.pawn;
            if in_center_band(square) {
                score += w.pawn_center_bonus;
            }
            if pawn_files[file] > 1 {
                score -= w.doubled_pawn_penalty;
            }
            let left = file.checked_sub(1).map_or(0, |f| pawn_files[f]);
            let right = pawn_files.get(file + 1).copied().unwrap_or(0);
            if left == 0 && right == 0 {
                score -= w.isolated_pawn_penalty;
            }
        }

        let (king_side, queen_side) = pos.castling_rights(side);
        score += w.castling_right_bonus * (king_side as Score + queen_side as Score);

        score
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
