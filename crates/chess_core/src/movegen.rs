use crate::{board::Position, types::*};

/// Generate all legal moves, returning a freshly allocated vector.
/// Internally delegates to `legal_moves_into`, cloning the position only once.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
/// The position is left exactly as it was found.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    out.retain(|&mv| {
        pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv);
        !illegal
    });
}

/// True if the side to move has at least one legal move.
pub fn has_legal_move(pos: &Position) -> bool {
    let mut tmp = pos.clone();
    let mut pseudo = Vec::with_capacity(64);
    pseudo_moves(&tmp, &mut pseudo);
    let mover = tmp.side_to_move;
    pseudo.into_iter().any(|mv| {
        tmp.make_move(mv);
        let legal = !tmp.in_check(mover);
        tmp.unmake_move(mv);
        legal
    })
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    for from in 0..64u8 {
        let Some(pc) = pos.piece_at(from) else {
            continue;
        };
        if pc.color != pos.side_to_move {
            continue;
        }
        match pc.kind {
            PieceKind::Pawn => gen_pawn(pos, from, pc.color, out),
            PieceKind::Knight => gen_steps(pos, from, pc, &KNIGHT_DELTAS, out),
            PieceKind::Bishop => gen_slides(pos, from, pc, &DIAGONALS, out),
            PieceKind::Rook => gen_slides(pos, from, pc, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_slides(pos, from, pc, &DIAGONALS, out);
                gen_slides(pos, from, pc, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, pc, &KING_DELTAS, out);
                gen_castles(pos, from, pc.color, out);
            }
        }
    }
}

fn push_pawn_move(mv: Move, promo_rank: i8, out: &mut Vec<Move>) {
    if rank_of(mv.to) == promo_rank {
        out.extend(PieceKind::PROMOTIONS.iter().map(|&k| mv.promoting(k)));
    } else {
        out.push(mv);
    }
}

fn gen_pawn(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    let dir = c.forward();
    let (start_rank, promo_rank) = match c {
        Color::White => (1, 7),
        Color::Black => (6, 0),
    };

    if let Some(to) = sq(f, r + dir)
        && pos.piece_at(to).is_none()
    {
        push_pawn_move(Move::new(from, to, PieceKind::Pawn), promo_rank, out);

        if r == start_rank
            && let Some(to2) = sq(f, r + 2 * dir)
            && pos.piece_at(to2).is_none()
        {
            out.push(Move::new(from, to2, PieceKind::Pawn));
        }
    }

    for df in [-1, 1] {
        let Some(to) = sq(f + df, r + dir) else {
            continue;
        };
        match pos.piece_at(to) {
            Some(target) if target.color != c => {
                let mv = Move::new(from, to, PieceKind::Pawn).capturing(Some(target.kind));
                push_pawn_move(mv, promo_rank, out);
            }
            None if pos.en_passant == Some(to) => {
                let mut mv =
                    Move::new(from, to, PieceKind::Pawn).capturing(Some(PieceKind::Pawn));
                mv.is_en_passant = true;
                out.push(mv);
            }
            _ => {}
        }
    }
}

/// Single-step movers: knight and king.
fn gen_steps(pos: &Position, from: u8, pc: Piece, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let f = file_of(from);
    let r = rank_of(from);
    for (df, dr) in deltas {
        if let Some(to) = sq(f + df, r + dr) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to, pc.kind)),
                Some(t) if t.color != pc.color => {
                    out.push(Move::new(from, to, pc.kind).capturing(Some(t.kind)))
                }
                _ => {}
            }
        }
    }
}

fn gen_slides(pos: &Position, from: u8, pc: Piece, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let f0 = file_of(from);
    let r0 = rank_of(from);
    for (df, dr) in dirs {
        let mut f = f0 + df;
        let mut r = r0 + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to, pc.kind)),
                Some(t) if t.color != pc.color => {
                    out.push(Move::new(from, to, pc.kind).capturing(Some(t.kind)));
                    break;
                }
                _ => break,
            }
            f += df;
            r += dr;
        }
    }
}

/// Castling: king on its home square, right held, path empty, and the king
/// neither starts in, passes through, nor lands on an attacked square.
fn gen_castles(pos: &Position, from: u8, c: Color, out: &mut Vec<Move>) {
    let home = match c {
        Color::White => 4u8,
        Color::Black => 60u8,
    };
    if from != home || pos.in_check(c) {
        return;
    }
    let (king_side, queen_side) = pos.castling.for_color(c);
    let enemy = c.other();

    let rook = Some(Piece::new(c, PieceKind::Rook));

    // (right held, rook corner, king target, squares that must be empty, squares that must be safe)
    let wings = [
        (king_side, home + 3, home + 2, vec![home + 1, home + 2], [home + 1, home + 2]),
        (
            queen_side,
            home - 4,
            home - 2,
            vec![home - 1, home - 2, home - 3],
            [home - 1, home - 2],
        ),
    ];
    for (held, corner, to, empty, safe) in wings {
        if held
            && pos.piece_at(corner) == rook
            && empty.iter().all(|&s| pos.piece_at(s).is_none())
            && safe.iter().all(|&s| !pos.is_square_attacked(s, enemy))
        {
            let mut mv = Move::new(from, to, PieceKind::King);
            mv.is_castle = true;
            out.push(mv);
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
