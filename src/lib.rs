//! A bitboard chess engine: legal move generation with magic sliding
//! attacks, and a bot that searches with iterative-deepening alpha-beta.

pub mod board;
pub mod book;
pub mod bot;
pub mod sync;
pub mod timer;
pub mod tt;
pub mod zobrist;

pub use board::{Board, Color, GameStatus, Move, Piece, Square};
pub use book::{BookTree, OpeningBook};
pub use bot::{Bot, BotConfig, SearchReport};
pub use tt::TranspositionTable;
