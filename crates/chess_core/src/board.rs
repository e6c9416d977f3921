use crate::types::*;
use crate::zobrist::ZOBRIST;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    pub fn none() -> Self {
        Self {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }

    /// (king side, queen side) rights still held by `c`.
    pub fn for_color(&self, c: Color) -> (bool, bool) {
        match c {
            Color::White => (self.wk, self.wq),
            Color::Black => (self.bk, self.bq),
        }
    }

    /// Rights in Zobrist key order: wk, wq, bk, bq.
    pub fn flags(&self) -> [bool; 4] {
        [self.wk, self.wq, self.bk, self.bq]
    }

    fn revoke_for_square(&mut self, square: u8) {
        match square {
            0 => self.wq = false,
            7 => self.wk = false,
            56 => self.bq = false,
            63 => self.bk = false,
            _ => {}
        }
    }
}

/// Everything needed to take a move back. Kept on the position's own stack so
/// callers only pair `make_move` with `unmake_move`.
#[derive(Clone, Debug)]
struct Undo {
    mv: Move,
    moved_piece: Piece,
    captured: Option<Piece>,
    castling: CastlingRights,
    en_passant: Option<u8>,
    halfmove_clock: u32,
    fullmove_number: u32,
    hash: u64,
    rook_move: Option<(u8, u8)>, // (rook_from, rook_to) for castling
    ep_captured_sq: Option<u8>,  // square actually captured in en-passant
}

#[derive(Clone, Debug)]
pub struct Position {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<u8>, // square behind a pawn that just advanced 2
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    hash: u64,
    /// Hashes of every earlier position reached through `make_move`.
    history: Vec<u64>,
    undo_stack: Vec<Undo>,
}

impl Position {
    pub fn startpos() -> Self {
        let mut board = [None; 64];
        for f in 0..8 {
            board[8 + f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            board[48 + f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            board[f] = Some(Piece::new(Color::White, kind));
            board[56 + f] = Some(Piece::new(Color::Black, kind));
        }
        Self::from_parts(board, Color::White, CastlingRights::all(), None, 0, 1)
    }

    pub(crate) fn from_parts(
        board: [Option<Piece>; 64],
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<u8>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Self {
        let mut p = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            hash: 0,
            history: Vec::new(),
            undo_stack: Vec::new(),
        };
        p.hash = ZOBRIST.hash_position(&p);
        p
    }

    /// Zobrist hash of the current position, maintained incrementally.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Number of moves made since this position was set up.
    pub fn ply_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// The move played `plies_back` half-moves ago (1 = the last move).
    pub fn previous_move(&self, plies_back: usize) -> Option<Move> {
        let len = self.undo_stack.len();
        if plies_back == 0 || plies_back > len {
            return None;
        }
        Some(self.undo_stack[len - plies_back].mv)
    }

    pub fn king_sq(&self, c: Color) -> Option<u8> {
        (0..64u8).find(|&s| self.board[s as usize] == Some(Piece::new(c, PieceKind::King)))
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.board[sq as usize]
    }

    pub fn piece_count(&self, kind: PieceKind, color: Color) -> u32 {
        self.board
            .iter()
            .filter(|pc| **pc == Some(Piece::new(color, kind)))
            .count() as u32
    }

    fn put(&mut self, sq: u8, pc: Option<Piece>) {
        if let Some(old) = self.board[sq as usize] {
            self.hash ^= ZOBRIST.piece_key(old, sq);
        }
        if let Some(new) = pc {
            self.hash ^= ZOBRIST.piece_key(new, sq);
        }
        self.board[sq as usize] = pc;
    }

    pub fn in_check(&self, c: Color) -> bool {
        match self.king_sq(c) {
            Some(ksq) => self.is_square_attacked(ksq, c.other()),
            None => false,
        }
    }

    fn holds(&self, s: u8, by: Color, kinds: &[PieceKind]) -> bool {
        matches!(self.piece_at(s), Some(pc) if pc.color == by && kinds.contains(&pc.kind))
    }

    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);

        // A pawn of `by` attacks from one rank behind its forward direction.
        let pr = tr - by.forward();
        for df in [-1, 1] {
            if let Some(s) = sq(tf + df, pr)
                && self.holds(s, by, &[PieceKind::Pawn])
            {
                return true;
            }
        }

        for (df, dr) in KNIGHT_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.holds(s, by, &[PieceKind::Knight])
            {
                return true;
            }
        }

        for (df, dr) in KING_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr)
                && self.holds(s, by, &[PieceKind::King])
            {
                return true;
            }
        }

        let rays = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, sliders) in rays {
            for (df, dr) in dirs {
                let mut f = tf + df;
                let mut r = tr + dr;
                while let Some(s) = sq(f, r) {
                    if self.piece_at(s).is_some() {
                        if self.holds(s, by, &sliders) {
                            return true;
                        }
                        break;
                    }
                    f += df;
                    r += dr;
                }
            }
        }

        false
    }

    pub fn make_move(&mut self, mv: Move) {
        let from = mv.from;
        let to = mv.to;
        let Some(moved) = self.piece_at(from) else {
            panic!("make_move: no piece on {}", sq_to_coord(from));
        };
        let mut captured = self.piece_at(to);

        let undo_base = Undo {
            mv,
            moved_piece: moved,
            captured: None,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            hash: self.hash,
            rook_move: None,
            ep_captured_sq: None,
        };
        self.history.push(self.hash);

        if let Some(ep) = self.en_passant.take() {
            self.hash ^= ZOBRIST.ep_key(file_of(ep) as u8);
        }
        let rights_before = self.castling;

        let mut reset_hmc = moved.kind == PieceKind::Pawn || captured.is_some();

        let mut ep_captured_sq = None;
        if mv.is_en_passant {
            if let Some(cs) = sq(file_of(to), rank_of(to) - moved.color.forward()) {
                captured = self.piece_at(cs);
                self.put(cs, None);
                ep_captured_sq = Some(cs);
                reset_hmc = true;
            }
        }

        self.put(from, None);
        let landed = match mv.promo {
            Some(kind) if moved.kind == PieceKind::Pawn => Piece::new(moved.color, kind),
            _ => moved,
        };
        self.put(to, Some(landed));

        let mut rook_move = None;
        if mv.is_castle && moved.kind == PieceKind::King {
            let rook_squares = match (from, to) {
                (4, 6) => Some((7, 5)),
                (4, 2) => Some((0, 3)),
                (60, 62) => Some((63, 61)),
                (60, 58) => Some((56, 59)),
                _ => None,
            };
            if let Some((rf, rt)) = rook_squares {
                let rook = self.piece_at(rf);
                self.put(rf, None);
                self.put(rt, rook);
                rook_move = Some((rf, rt));
            }
        }

        if moved.kind == PieceKind::King {
            match moved.color {
                Color::White => {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                Color::Black => {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
            }
        }
        self.castling.revoke_for_square(from);
        self.castling.revoke_for_square(to);
        for (i, (before, after)) in rights_before
            .flags()
            .into_iter()
            .zip(self.castling.flags())
            .enumerate()
        {
            if before != after {
                self.hash ^= ZOBRIST.castling_key(i);
            }
        }

        // Only record an en passant square an enemy pawn could actually use,
        // so identical positions keep identical hashes.
        if moved.kind == PieceKind::Pawn && (rank_of(to) - rank_of(from)).abs() == 2 {
            let enemy_pawn = Some(Piece::new(moved.color.other(), PieceKind::Pawn));
            let capturable = [-1, 1].into_iter().any(|df| {
                sq(file_of(to) + df, rank_of(to)).is_some_and(|s| self.piece_at(s) == enemy_pawn)
            });
            if capturable {
                let ep = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
                if let Some(ep) = ep {
                    self.hash ^= ZOBRIST.ep_key(file_of(ep) as u8);
                }
                self.en_passant = ep;
            }
        }

        self.halfmove_clock = if reset_hmc {
            0
        } else {
            self.halfmove_clock + 1
        };

        if self.side_to_move == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = self.side_to_move.other();
        self.hash ^= ZOBRIST.side_to_move;

        self.undo_stack.push(Undo {
            captured,
            rook_move,
            ep_captured_sq,
            ..undo_base
        });
    }

    /// Takes back the most recent `make_move`. `mv` must be that move.
    pub fn unmake_move(&mut self, mv: Move) {
        let Some(undo) = self.undo_stack.pop() else {
            panic!("unmake_move: no move to take back");
        };
        debug_assert_eq!(undo.mv, mv, "unmake_move out of order");
        self.history.pop();

        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;

        if let Some((rf, rt)) = undo.rook_move {
            self.board[rf as usize] = self.board[rt as usize].take();
        }

        self.board[mv.to as usize] = None;
        self.board[mv.from as usize] = Some(undo.moved_piece);

        match undo.ep_captured_sq {
            Some(cs) => self.board[cs as usize] = undo.captured,
            None => self.board[mv.to as usize] = undo.captured,
        }

        self.hash = undo.hash;
    }

    /// Times the current position appeared since the last irreversible move,
    /// including now.
    pub fn repetition_count(&self) -> usize {
        let window = (self.halfmove_clock as usize).min(self.history.len());
        1 + self.history[self.history.len() - window..]
            .iter()
            .filter(|&&h| h == self.hash)
            .count()
    }

    pub fn is_repetition(&self) -> bool {
        self.repetition_count() >= 2
    }

    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// bishops that all stand on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut bishop_shades = [false; 2];
        for (s, pc) in self.board.iter().enumerate() {
            let Some(pc) = pc else { continue };
            match pc.kind {
                PieceKind::King => {}
                PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
                PieceKind::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceKind::Bishop => {
                    minors += 1;
                    bishop_shades[is_dark(s as u8) as usize] = true;
                }
            }
        }
        minors <= 1 || (knights == 0 && !(bishop_shades[0] && bishop_shades[1]))
    }
}
