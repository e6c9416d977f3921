//! Zobrist hashing for chess positions.
//!
//! `Position` keeps its hash up to date inside `make_move`; `unmake_move`
//! restores the saved value. The hash is the position identity used for
//! repetition detection and as the search cache key.
//!
//! The hash is computed by XOR-ing together random values for:
//! - Each piece on each square (12 pieces × 64 squares = 768 values)
//! - Side to move (1 value, present when black is to move)
//! - Castling rights (4 values)
//! - En passant file (8 values)

use crate::board::Position;
use crate::types::{Color, Piece, file_of};

/// Pre-computed random values for Zobrist hashing.
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Random values for each piece on each square.
    /// Indexed by [color][piece_kind][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// Random value for black to move (XOR when black's turn)
    pub side_to_move: u64,
    /// Random values for castling rights [wk, wq, bk, bq]
    pub castling: [u64; 4],
    /// Random values for en passant file (0-7)
    pub en_passant: [u64; 8],
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

/// splitmix64 step; returns (next state, output).
const fn splitmix64(state: u64) -> (u64, u64) {
    let state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (state, z ^ (z >> 31))
}

impl ZobristKeys {
    /// Generate all keys at compile time from one fixed seed. Keys are drawn in
    /// a fixed order (pieces, side, castling, en passant) so hashes are stable
    /// across builds.
    pub const fn new() -> Self {
        let mut keys = ZobristKeys {
            pieces: [[[0u64; 64]; 6]; 2],
            side_to_move: 0,
            castling: [0u64; 4],
            en_passant: [0u64; 8],
        };
        let mut state = 0x5EED_C0DE_1234_ABCDu64;

        let mut n = 0;
        while n < 2 * 6 * 64 {
            let (next, key) = splitmix64(state);
            state = next;
            keys.pieces[n / 384][(n / 64) % 6][n % 64] = key;
            n += 1;
        }

        let (next, key) = splitmix64(state);
        state = next;
        keys.side_to_move = key;

        let mut i = 0;
        while i < 12 {
            let (next, key) = splitmix64(state);
            state = next;
            if i < 4 {
                keys.castling[i] = key;
            } else {
                keys.en_passant[i - 4] = key;
            }
            i += 1;
        }

        keys
    }

    /// Get the Zobrist key for a piece on a square.
    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }

    /// Get the Zobrist key for castling right index (0=wk, 1=wq, 2=bk, 3=bq).
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index]
    }

    /// Get the Zobrist key for en passant on a file (0-7).
    #[inline(always)]
    pub fn ep_key(&self, file: u8) -> u64 {
        self.en_passant[file as usize]
    }

    /// Hash a position from scratch. Used when a position is set up and to
    /// cross-check the incremental hash in tests.
    pub fn hash_position(&self, pos: &Position) -> u64 {
        let mut h = 0u64;
        for (sq, pc) in pos.board.iter().enumerate() {
            if let Some(pc) = pc {
                h ^= self.piece_key(*pc, sq as u8);
            }
        }
        if pos.side_to_move == Color::Black {
            h ^= self.side_to_move;
        }
        for (i, held) in pos.castling.flags().into_iter().enumerate() {
            if held {
                h ^= self.castling_key(i);
            }
        }
        if let Some(ep) = pos.en_passant {
            h ^= self.ep_key(file_of(ep) as u8);
        }
        h
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
