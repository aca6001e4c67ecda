//! Core chess types.
//!
//! - `Piece` and `Color` - chess piece types and colors
//! - `Square` - board square (0-63, a1 = 0)
//! - `Bitboard` - 64-bit square set
//! - `Move`, `MoveFlag` and `MoveList` - move representation
//! - `CastlingRights` - castling state

mod bitboard;
mod castling;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use castling::CastlingRights;
pub use moves::{Move, MoveFlag, MoveList, MoveSink, ScoredMove};
pub use piece::{Color, Piece};
pub use square::Square;

pub(crate) use moves::{pick_best, MAX_MOVES, MAX_PLY};
pub(crate) use piece::PROMOTION_PIECES;
