use super::*;
use chess_core::{parse_uci_move, Position};

#[test]
fn test_drop_restores_position() {
    let mut pos = Position::startpos();
    let before = pos.hash();
    let mv = parse_uci_move(&pos, "e2e4").unwrap();
    {
        let guard = MoveGuard::apply(&mut pos, mv);
        assert_ne!(guard.position_identity(), before);
        assert_eq!(guard.mv(), mv);
    }
    assert_eq!(pos.hash(), before);
    assert_eq!(pos.ply_count(), 0);
}

#[test]
fn test_nested_guards_unwind_in_order() {
    let mut pos = Position::startpos();
    let before = pos.hash();
    let first = parse_uci_move(&pos, "g1f3").unwrap();
    {
        let mut outer = MoveGuard::apply(&mut pos, first);
        let reply = parse_uci_move(&*outer, "g8f6").unwrap();
        let inner = MoveGuard::apply(&mut *outer, reply);
        assert_eq!(inner.ply_count(), 2);
    }
    assert_eq!(pos.hash(), before);
}

#[test]
fn test_early_error_return_restores_position() {
    fn probe(pos: &mut Position, mv: chess_core::Move) -> Result<(), &'static str> {
        let _guard = MoveGuard::apply(pos, mv);
        Err("bail out")
    }

    let mut pos = Position::startpos();
    let before = pos.hash();
    let mv = parse_uci_move(&pos, "d2d4").unwrap();
    assert!(probe(&mut pos, mv).is_err());
    assert_eq!(pos.hash(), before);
}

#[test]
fn test_unwinding_restores_position() {
    let mut pos = Position::startpos();
    let before = pos.hash();
    let mv = parse_uci_move(&pos, "b1c3").unwrap();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = MoveGuard::apply(&mut pos, mv);
        panic!("abort mid-search");
    }));
    assert!(result.is_err());
    assert_eq!(pos.hash(), before);
}
