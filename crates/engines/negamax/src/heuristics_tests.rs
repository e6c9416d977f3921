use super::*;
use chess_core::{parse_uci_move, set_position_from_uci, Position};

fn fen(text: &str) -> Position {
    Position::from_fen(text).unwrap()
}

fn after_moves(moves: &[&str]) -> Position {
    let mut args = vec!["startpos", "moves"];
    args.extend_from_slice(moves);
    let mut pos = Position::startpos();
    set_position_from_uci(&mut pos, &args).unwrap();
    pos
}

/// Play `uci` on `pos` and return its adjustment.
fn adjust_for(pos: &mut Position, uci: &str) -> Score {
    let mv = parse_uci_move(pos, uci).unwrap();
    let before = BeforeMove::snapshot(&*pos, None);
    pos.make_move(mv);
    MoveHeuristics::default().adjust(mv, &before, &*pos)
}

#[test]
fn test_castling_bonus() {
    let mut pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert_eq!(adjust_for(&mut pos, "e1g1"), Weights::default().castle_bonus);
}

#[test]
fn test_plain_king_move_penalty() {
    let mut pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    assert_eq!(adjust_for(&mut pos, "e1f1"), -Weights::default().king_move_penalty);
}

#[test]
fn test_capture_bonus_includes_victim_value() {
    let mut pos = fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
    let w = Weights::default();
    assert_eq!(adjust_for(&mut pos, "e4d5"), w.capture_bonus + w.pawn);
}

#[test]
fn test_promotion_bonus_includes_new_piece_value() {
    let mut pos = fen("8/4P3/8/8/8/8/8/k3K3 w - - 0 1");
    let w = Weights::default();
    assert_eq!(adjust_for(&mut pos, "e7e8q"), w.promotion_bonus + w.queen);
}

#[test]
fn test_undefended_attacked_square_is_hanging() {
    let mut pos = fen("4k3/8/8/2p5/8/8/2N5/4K3 w - - 0 1");
    assert_eq!(adjust_for(&mut pos, "c2d4"), -Weights::default().hanging_penalty);
}

#[test]
fn test_defended_square_is_not_hanging() {
    let mut pos = fen("4k3/8/8/2p5/8/4P3/2N5/4K3 w - - 0 1");
    assert_eq!(adjust_for(&mut pos, "c2d4"), 0);
}

#[test]
fn test_reversing_own_previous_move() {
    let mut pos = after_moves(&["g1f3", "g8f6"]);
    assert_eq!(adjust_for(&mut pos, "f3g1"), -Weights::default().reversal_penalty);
}

#[test]
fn test_reversal_after_a_long_stall_costs_more() {
    let mut pos = after_moves(&["g1f3", "g8f6"]);
    let back = parse_uci_move(&pos, "f3g1").unwrap();
    let before = BeforeMove {
        halfmove_clock: 11,
        ..BeforeMove::snapshot(&pos, None)
    };
    pos.make_move(back);
    let w = Weights::default();
    assert_eq!(MoveHeuristics::default().adjust(back, &before, &pos), -w.stalled_reversal_penalty);
}

#[test]
fn test_remembered_move_stands_in_for_missing_history() {
    let mut pos = fen("4k3/8/8/8/8/5N2/8/4K3 w - - 4 20");
    let earlier = Move::new(6, 21, PieceKind::Knight); // g1f3
    let back = parse_uci_move(&pos, "f3g1").unwrap();

    let before = BeforeMove::snapshot(&pos, Some(earlier));
    assert_eq!(before.previous_own, Some(earlier));
    pos.make_move(back);
    assert_eq!(
        MoveHeuristics::default().adjust(back, &before, &pos),
        -Weights::default().reversal_penalty
    );
}

#[test]
fn test_early_queen_sortie() {
    let mut early = after_moves(&["e2e4", "e7e5"]);
    assert_eq!(adjust_for(&mut early, "d1h5"), -Weights::default().early_queen_penalty);

    let mut late = fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 10");
    assert_eq!(adjust_for(&mut late, "d1d4"), 0);
}

#[test]
fn test_effects_add_up() {
    // Early queen recapture on d5, attacked by the c3 knight and undefended.
    let mut pos = after_moves(&["e2e4", "d7d5", "e4d5", "a7a6", "b1c3"]);
    let w = Weights::default();
    let expected = w.capture_bonus + w.pawn - w.hanging_penalty - w.early_queen_penalty;
    assert_eq!(adjust_for(&mut pos, "d8d5"), expected);
}
