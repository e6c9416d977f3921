use super::*;
use chess_core::{parse_uci_move, set_position_from_uci, Position};

fn search() -> AdversarialSearch {
    AdversarialSearch::new(Weights::default(), 1 << 16)
}

fn after_moves(moves: &[&str]) -> Position {
    let mut args = vec!["startpos", "moves"];
    args.extend_from_slice(moves);
    let mut pos = Position::startpos();
    set_position_from_uci(&mut pos, &args).unwrap();
    pos
}

#[test]
fn test_score_move_leaves_position_unchanged() {
    let mut pos = Position::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    let hash = pos.hash();
    let mv = parse_uci_move(&pos, "e5f7").unwrap();
    search().score_move(&mut pos, mv, 2).unwrap();
    assert_eq!(pos.hash(), hash);
    assert_eq!(pos.ply_count(), 0);
}

#[test]
fn test_mate_scores_faster_mates_higher() {
    let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1").unwrap();
    let mate = parse_uci_move(&pos, "e1e8").unwrap();
    let mut s = search();
    let mate_score = Weights::default().mate_score;
    assert_eq!(s.score_move(&mut pos, mate, 0).unwrap(), mate_score);
    assert_eq!(s.score_move(&mut pos, mate, 2).unwrap(), mate_score + 2);
}

#[test]
fn test_stalemating_move_scores_draw_penalty() {
    let mut pos = Position::from_fen("k7/2K5/8/1Q6/8/8/8/8 w - - 0 1").unwrap();
    let stalemate = parse_uci_move(&pos, "b5b6").unwrap();
    let score = search().score_move(&mut pos, stalemate, 1).unwrap();
    assert_eq!(score, -Weights::default().draw_penalty);
}

#[test]
fn test_repetition_with_replies_scores_draw_plus_adjust() {
    // Black's knight returns home, repeating the start position.
    let mut pos = after_moves(&["g1f3", "g8f6", "f3g1"]);
    let back = parse_uci_move(&pos, "f6g8").unwrap();
    let w = Weights::default();
    let score = search().score_move(&mut pos, back, 3).unwrap();
    assert_eq!(score, -w.draw_penalty - w.reversal_penalty);
}

#[test]
fn test_depth_one_is_adjust_minus_best_reply() {
    let mut pos = after_moves(&["e2e4", "d7d5"]);
    let capture = parse_uci_move(&pos, "e4d5").unwrap();
    let mut s = search();

    let before = BeforeMove::snapshot(&pos, None);
    let (adjust, best_reply) = {
        let mut after = MoveGuard::apply(&mut pos, capture);
        let adjust = MoveHeuristics::new(Weights::default()).adjust(capture, &before, &*after);
        let mut fresh = search();
        (adjust, fresh.best_opponent_response(&mut *after, 0).unwrap())
    };

    assert_eq!(s.score_move(&mut pos, capture, 1).unwrap(), adjust - best_reply);
}

#[test]
fn test_best_opponent_response_is_max_over_replies() {
    let mut pos = after_moves(&["e2e4"]);
    let mut s = search();
    let best = s.best_opponent_response(&mut pos, 0).unwrap();

    let mut fresh = search();
    let max = pos
        .legal_moves()
        .into_iter()
        .map(|mv| fresh.score_move(&mut pos, mv, 0).unwrap())
        .max()
        .unwrap();
    assert_eq!(best, max);
}

#[test]
fn test_best_opponent_response_when_mated() {
    let mut pos = Position::from_fen("4Q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 1 1").unwrap();
    let score = search().best_opponent_response(&mut pos, 1).unwrap();
    assert_eq!(score, -(Weights::default().mate_score + 1));
}

#[test]
fn test_cache_hit_repeats_score_without_new_nodes() {
    let mut pos = Position::startpos();
    let mv = parse_uci_move(&pos, "e2e4").unwrap();
    let mut s = search();

    let first = s.score_move(&mut pos, mv, 2).unwrap();
    let nodes = s.stats().nodes;
    let second = s.score_move(&mut pos, mv, 2).unwrap();

    assert_eq!(first, second);
    assert_eq!(s.stats().nodes, nodes);
    assert!(s.stats().cache_hits >= 1);
}

#[test]
fn test_cached_score_matches_fresh_search() {
    let mut pos = after_moves(&["d2d4", "g8f6", "c2c4"]);
    let mut warm = search();
    let mut cold = search();
    for mv in pos.legal_moves() {
        let warm_score = warm.score_move(&mut pos, mv, 1).unwrap();
        assert_eq!(warm.score_move(&mut pos, mv, 1).unwrap(), warm_score);
        cold.clear_cache();
        assert_eq!(cold.score_move(&mut pos, mv, 1).unwrap(), warm_score);
    }
}

#[test]
fn test_clear_cache_empties_it() {
    let mut pos = Position::startpos();
    let mv = parse_uci_move(&pos, "g1f3").unwrap();
    let mut s = search();
    s.score_move(&mut pos, mv, 1).unwrap();
    assert!(!s.cache().is_empty());
    s.clear_cache();
    assert!(s.cache().is_empty());
}

#[test]
fn test_cache_respects_repetition_history() {
    let mut pos = Position::startpos();
    let knight_out = parse_uci_move(&pos, "g1f3").unwrap();
    let mut s = search();
    assert_eq!(s.score_move(&mut pos, knight_out, 0).unwrap(), 0);

    // Same placement and hash, but g1f3 now reverses f3g1 and repeats a
    // position already seen.
    let mut repeated = after_moves(&["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert_eq!(repeated.hash(), pos.hash());
    let cached = s.score_move(&mut repeated, knight_out, 0).unwrap();
    let fresh = search().score_move(&mut repeated, knight_out, 0).unwrap();
    let w = Weights::default();
    assert_eq!(fresh, -w.draw_penalty - w.reversal_penalty);
    assert_eq!(cached, fresh);
}

#[test]
fn test_cache_respects_remembered_move() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/5N2/8/4K3 w - - 4 20").unwrap();
    let back = parse_uci_move(&pos, "f3g1").unwrap();
    let earlier = Move::new(6, 21, chess_core::PieceKind::Knight);
    let mut s = search();

    let plain = s.score_move_with(&mut pos, back, 0, None).unwrap();
    let cached = s.score_move_with(&mut pos, back, 0, Some(earlier)).unwrap();
    let fresh = search().score_move_with(&mut pos, back, 0, Some(earlier)).unwrap();
    assert_eq!(cached, fresh);
    assert_eq!(fresh, plain - Weights::default().reversal_penalty);
}
