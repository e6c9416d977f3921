//! The seam between the search and the game rules.
//!
//! The search never looks inside a position; it asks these questions and
//! mutates the position only through `apply` / `undo`.

use chess_core::{legal_moves_into, Color, Move, Piece, PieceKind, Position};

/// Operations the search consumes from a game-rules engine.
///
/// `apply` and `undo` follow stack discipline: `undo(mv)` always takes back
/// the most recent `apply(mv)`.
pub trait GameRules {
    fn legal_moves(&mut self) -> Vec<Move>;
    fn apply(&mut self, mv: Move);
    fn undo(&mut self, mv: Move);

    fn side_to_move(&self) -> Color;
    fn is_in_check(&self) -> bool;
    fn is_checkmate(&self) -> bool;
    /// Stalemate, fifty-move rule, insufficient material or repetition.
    fn is_draw(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;
    fn is_repeated_position(&self) -> bool;

    /// Any draw the search scores with the draw penalty. Engines whose
    /// `is_draw` leaves out material or repetition draws are still covered.
    fn is_drawn(&self) -> bool {
        self.is_draw() || self.is_insufficient_material() || self.is_repeated_position()
    }

    fn piece_at(&self, square: u8) -> Option<Piece>;
    fn piece_count(&self, kind: PieceKind, color: Color) -> u32;
    /// (king side, queen side) castling rights still held by `color`.
    fn castling_rights(&self, color: Color) -> (bool, bool);
    fn is_attacked_by(&self, square: u8, by: Color) -> bool;

    /// Plies since the last capture or pawn move.
    fn halfmove_clock(&self) -> u32;
    /// Plies played since the start of the game.
    fn ply_count(&self) -> u32;
    /// The move made `plies_back` plies ago (1 = most recent), if known.
    fn previous_move(&self, plies_back: usize) -> Option<Move>;

    /// 64-bit identity of the position. Collisions are tolerated.
    fn position_identity(&self) -> u64;
}

impl GameRules for Position {
    fn legal_moves(&mut self) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        legal_moves_into(self, &mut out);
        out
    }

    fn apply(&mut self, mv: Move) {
        self.make_move(mv);
    }

    fn undo(&mut self, mv: Move) {
        self.unmake_move(mv);
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn is_in_check(&self) -> bool {
        self.in_check(self.side_to_move)
    }

    fn is_checkmate(&self) -> bool {
        Position::is_checkmate(self)
    }

    fn is_draw(&self) -> bool {
        Position::is_draw(self)
    }

    fn is_insufficient_material(&self) -> bool {
        Position::is_insufficient_material(self)
    }

    fn is_repeated_position(&self) -> bool {
        self.is_repetition()
    }

    fn piece_at(&self, square: u8) -> Option<Piece> {
        Position::piece_at(self, square)
    }

    fn piece_count(&self, kind: PieceKind, color: Color) -> u32 {
        Position::piece_count(self, kind, color)
    }

    fn castling_rights(&self, color: Color) -> (bool, bool) {
        self.castling.for_color(color)
    }

    fn is_attacked_by(&self, square: u8, by: Color) -> bool {
        self.is_square_attacked(square, by)
    }

    fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    fn ply_count(&self) -> u32 {
        let base = (self.fullmove_number.saturating_sub(1)) * 2;
        base + u32::from(self.side_to_move == Color::Black)
    }

    fn previous_move(&self, plies_back: usize) -> Option<Move> {
        Position::previous_move(self, plies_back)
    }

    fn position_identity(&self) -> u64 {
        self.hash()
    }
}
