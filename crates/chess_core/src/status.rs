//! Game-end predicates for the side to move.

use crate::{board::Position, movegen::has_legal_move};

impl Position {
    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && !has_legal_move(self)
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && !has_legal_move(self)
    }

    /// Any drawn state: stalemate, fifty-move rule, insufficient material, or a
    /// position that already occurred since the last irreversible move.
    pub fn is_draw(&self) -> bool {
        self.is_fifty_move_draw()
            || self.is_insufficient_material()
            || self.is_repetition()
            || self.is_stalemate()
    }
}
