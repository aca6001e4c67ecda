//! Evaluation terms.
//!
//! Each term returns `(middlegame, endgame)` from White's point of view;
//! `Board::evaluate` tapers and sums them.
//! - Mobility (pseudo-legal moves, sliders measured against pawns only)
//! - Pawn structure (doubled, isolated, passed pawns)
//! - Pieces (bishop pair, rooks on open files, knight outposts)
//! - King safety (castling, pawn shield, endgame king distance)

mod king_safety;
mod mobility;
mod pawn_structure;
mod pieces;
pub(crate) mod tables;
