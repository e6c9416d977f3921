//! Scoped make/undo.

use std::ops::{Deref, DerefMut};

use chess_core::Move;

use crate::rules::GameRules;

/// Holds a position with one move applied. Dropping the guard takes the move
/// back, so every exit path (early return, `?`, unwinding) restores the
/// position. Nested guards borrow through their parent and therefore unwind
/// in stack order.
pub struct MoveGuard<'a, R: GameRules> {
    pos: &'a mut R,
    mv: Move,
}

impl<'a, R: GameRules> MoveGuard<'a, R> {
    pub fn apply(pos: &'a mut R, mv: Move) -> Self {
        pos.apply(mv);
        Self { pos, mv }
    }

    pub fn mv(&self) -> Move {
        self.mv
    }
}

impl<R: GameRules> Deref for MoveGuard<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.pos
    }
}

impl<R: GameRules> DerefMut for MoveGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.pos
    }
}

impl<R: GameRules> Drop for MoveGuard<'_, R> {
    fn drop(&mut self) {
        self.pos.undo(self.mv);
    }
}

#[cfg(test)]
#[path = "guard_tests.rs"]
mod guard_tests;
