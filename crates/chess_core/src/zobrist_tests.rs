use super::*;
use crate::movegen::legal_moves;
use crate::types::{Color, PieceKind};

#[test]
fn test_zobrist_keys_unique() {
    let mut seen = std::collections::HashSet::new();

    for color in 0..2 {
        for piece in 0..6 {
            for sq in 0..64 {
                assert!(
                    seen.insert(ZOBRIST.pieces[color][piece][sq]),
                    "Duplicate Zobrist key found"
                );
            }
        }
    }
    assert!(seen.insert(ZOBRIST.side_to_move), "Side to move key collision");
    for key in ZOBRIST.castling.iter().chain(ZOBRIST.en_passant.iter()) {
        assert!(seen.insert(*key), "Castling/en passant key collision");
    }
}

#[test]
fn test_zobrist_piece_key() {
    let piece = Piece {
        color: Color::White,
        kind: PieceKind::Pawn,
    };
    assert_ne!(ZOBRIST.piece_key(piece, 0), ZOBRIST.piece_key(piece, 1));
}

#[test]
fn test_incremental_hash_matches_full_hash() {
    // Kiwipete exercises castling, en passant and promotions within two plies.
    let mut pos =
        Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -")
            .unwrap();
    let root = pos.hash();

    for mv in legal_moves(&pos) {
        pos.make_move(mv);
        assert_eq!(pos.hash(), ZOBRIST.hash_position(&pos), "after {mv:?}");
        for reply in legal_moves(&pos) {
            pos.make_move(reply);
            assert_eq!(pos.hash(), ZOBRIST.hash_position(&pos), "after {reply:?}");
            pos.unmake_move(reply);
        }
        pos.unmake_move(mv);
        assert_eq!(pos.hash(), root);
    }
}

#[test]
fn test_transposition_same_hash() {
    let mut a = Position::startpos();
    let mut b = Position::startpos();
    let moves = ["g1f3", "b8c6", "b1c3"];
    let other = ["b1c3", "b8c6", "g1f3"];
    for txt in moves {
        let mv = crate::uci::parse_uci_move(&a, txt).unwrap();
        a.make_move(mv);
    }
    for txt in other {
        let mv = crate::uci::parse_uci_move(&b, txt).unwrap();
        b.make_move(mv);
    }
    assert_eq!(a.hash(), b.hash());
}
