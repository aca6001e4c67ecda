//! Chess board representation and game logic.
//!
//! Uses bitboards with magic lookups for sliding pieces. Supports the full
//! rules including castling, en passant, promotions, threefold repetition
//! and the fifty-move rule.
//!
//! # Example
//! ```
//! use chess_bot::board::{Board, GameStatus};
//!
//! let mut board = Board::new();
//! let moves = board.generate_moves();
//! assert_eq!(moves.len(), 20);
//! assert_eq!(board.game_status(), GameStatus::NoMate);
//! ```

mod attack_tables;
mod error;
mod eval;
mod eval_terms;
mod fen;
mod make_unmake;
mod masks;
mod movegen;
mod san;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, MoveParseError, SquareError};
pub use fen::STARTING_FEN;
pub use state::{Board, GameStatus, UnmoveData};
pub use types::{
    Bitboard, BitboardIter, CastlingRights, Color, Move, MoveFlag, MoveList, MoveSink, Piece,
    ScoredMove, Square,
};

pub(crate) use eval::pst_value;
pub(crate) use types::{pick_best, MAX_MOVES, MAX_PLY, PROMOTION_PIECES};
