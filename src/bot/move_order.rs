//! Move ordering for search.

use crate::board::{pick_best, pst_value, Board, Move, Piece, ScoredMove};

/// Known best move (previous iteration or TT) - highest priority
pub(crate) const HINT_SCORE: i32 = 1 << 20;

/// Ordering score: captured value plus promotion value plus the mover's
/// piece-square gain.
pub(crate) fn score_move(board: &Board, mv: Move, hint: Option<Move>) -> i32 {
    if hint == Some(mv) {
        return HINT_SCORE;
    }
    let us = board.side_to_move();
    let Some((_, mover)) = board.piece_at(mv.from()) else {
        return 0;
    };

    let captured = match board.piece_at(mv.to()) {
        Some((_, piece)) => piece.value(),
        // Diagonal pawn move onto an empty square is en passant
        None if mover == Piece::Pawn && mv.from().file() != mv.to().file() => Piece::Pawn.value(),
        None => 0,
    };
    let promotion = mv.promotion().map_or(0, Piece::value);

    captured + promotion + pst_value(mover, us, mv.to()) - pst_value(mover, us, mv.from())
}

pub(crate) fn score_moves(board: &Board, moves: &mut [ScoredMove], hint: Option<Move>) {
    for scored in moves.iter_mut() {
        scored.score = score_move(board, scored.mv, hint);
    }
}

/// The move to try at position `idx`. The first `top_k` positions are
/// selection-sorted on demand; later ones are taken as they stand.
#[inline]
pub(crate) fn next_move(moves: &mut [ScoredMove], idx: usize, top_k: usize) -> Option<Move> {
    if idx < top_k {
        pick_best(moves, idx).map(|scored| scored.mv)
    } else {
        moves.get(idx).map(|scored| scored.mv)
    }
}
