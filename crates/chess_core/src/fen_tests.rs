use super::*;

#[test]
fn test_startpos_fen_matches_startpos() {
    let parsed =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    let start = Position::startpos();
    assert_eq!(parsed.board, start.board);
    assert_eq!(parsed.hash(), start.hash());
}

#[test]
fn test_missing_counters_default() {
    let pos = Position::from_fen("8/8/8/4k3/8/4K3/8/8 b - -").unwrap();
    assert_eq!(pos.halfmove_clock, 0);
    assert_eq!(pos.fullmove_number, 1);
    assert_eq!(pos.side_to_move, Color::Black);
}

#[test]
fn test_rejects_bad_input() {
    assert_eq!(
        Position::from_fen("8/8/8 w - -").unwrap_err(),
        FenError::RankCount(3)
    );
    assert_eq!(
        Position::from_fen("8/8/8/4x3/8/4K3/8/8 w - -").unwrap_err(),
        FenError::Piece('x')
    );
    assert!(matches!(
        Position::from_fen("8/8/8/4k3/8/4K3/8/8 x - -"),
        Err(FenError::SideToMove(_))
    ));
    assert!(matches!(
        Position::from_fen("8/8/8/4k4/8/4K3/8/8 w - -"),
        Err(FenError::FileCount { rank: 3 })
    ));
    assert_eq!(
        Position::from_fen("8/8/8/4k3/8/4K3/8/8 w").unwrap_err(),
        FenError::MissingFields(2)
    );
}

#[test]
fn test_castling_rights_need_pieces_at_home() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w KQkq - 0 1").unwrap();
    assert_eq!(pos.castling.flags(), [true, false, false, false]);

    let moved_king = Position::from_fen("r3k2r/8/8/8/8/8/8/R4K1R w KQkq - 0 1").unwrap();
    assert_eq!(moved_king.castling.for_color(Color::White), (false, false));
    assert_eq!(moved_king.castling.for_color(Color::Black), (true, true));
}
