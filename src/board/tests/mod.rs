//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move generation node counts
//! - `draw.rs` - Draw detection (50-move rule, repetition)
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `status.rs` - Mate and stalemate detection
//! - `proptest.rs` - Property-based tests over random playouts

mod perft;
mod proptest;

use crate::board::{Bitboard, Board, CastlingRights, Color, Piece};

/// Every piece of state `unmake_move` must restore
#[derive(Debug, PartialEq, Eq)]
pub(super) struct Snapshot {
    squares: Vec<Option<(Color, Piece)>>,
    pieces: [[Bitboard; 6]; 2],
    occupied: [Bitboard; 2],
    all_occupied: Bitboard,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_file: Option<u8>,
    halfmove_clock: u32,
    fullmove_number: u32,
    hash: u64,
    history_len: usize,
    piece_count: [[u8; 6]; 2],
    king_square: [crate::board::Square; 2],
}

impl Snapshot {
    pub(super) fn of(board: &Board) -> Self {
        Snapshot {
            squares: board.squares.to_vec(),
            pieces: board.pieces,
            occupied: board.occupied,
            all_occupied: board.all_occupied,
            side_to_move: board.side_to_move,
            castling_rights: board.castling_rights,
            en_passant_file: board.en_passant_file,
            halfmove_clock: board.halfmove_clock,
            fullmove_number: board.fullmove_number,
            hash: board.hash,
            history_len: board.history.len(),
            piece_count: board.piece_count,
            king_square: board.king_square,
        }
    }
}

/// Views of the position that must always agree with each other
pub(super) fn assert_consistent(board: &Board) {
    let mut all = Bitboard::EMPTY;
    for color in Color::BOTH {
        let mut side = Bitboard::EMPTY;
        for piece in Piece::ALL {
            let bb = board.pieces(color, piece);
            assert_eq!(bb.popcount(), board.piece_count(color, piece));
            for sq in bb.iter() {
                assert_eq!(board.piece_at(sq), Some((color, piece)), "square {sq}");
            }
            side |= bb;
        }
        assert_eq!(side, board.occupied_by(color));
        all |= side;
        let king = board.king_square(color);
        assert_eq!(board.piece_at(king), Some((color, Piece::King)));
    }
    assert_eq!(all, board.occupied());
    assert_eq!(all.popcount() as usize, board.squares.iter().flatten().count());
    assert_eq!(board.hash(), board.calculate_hash());
}
