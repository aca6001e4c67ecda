//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position hashes for the
//! transposition table and repetition detection. Keys come from a seeded
//! generator, so hashes are identical across runs.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastlingRights, Color, Piece, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[color][piece_type][square_index]
    piece_keys: [[[u64; 64]; 6]; 2],
    black_to_move_key: u64,
    // One key per castling-rights bit: WK, WQ, BK, BQ
    castling_keys: [u64; 4],
    // Only the file matters for the en passant target
    en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64);
        let mut piece_keys = [[[0; 64]; 6]; 2];
        let mut castling_keys = [0; 4];
        let mut en_passant_keys = [0; 8];

        for color in &mut piece_keys {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        for key in &mut castling_keys {
            *key = rng.gen();
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, color: Color, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[color.index()][piece.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn side(&self) -> u64 {
        self.black_to_move_key
    }

    /// XOR of the keys of every right currently held
    #[inline]
    pub(crate) fn castling(&self, rights: CastlingRights) -> u64 {
        let bits = rights.as_u8();
        let mut key = 0;
        for (i, k) in self.castling_keys.iter().enumerate() {
            if bits & (1 << i) != 0 {
                key ^= k;
            }
        }
        key
    }

    #[inline]
    pub(crate) fn en_passant(&self, file: u8) -> u64 {
        self.en_passant_keys[usize::from(file & 7)]
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_distinct() {
        let mut seen = HashSet::new();
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in 0..64 {
                    assert!(seen.insert(ZOBRIST.piece(color, piece, Square::from_index(sq))));
                }
            }
        }
        assert!(seen.insert(ZOBRIST.side()));
        for file in 0..8 {
            assert!(seen.insert(ZOBRIST.en_passant(file)));
        }
    }

    #[test]
    fn test_castling_key_is_xor_of_bits() {
        let all = ZOBRIST.castling(CastlingRights::all());
        let mut split = 0;
        for bit in 0..4u8 {
            split ^= ZOBRIST.castling(CastlingRights::from_u8(1 << bit));
        }
        assert_eq!(all, split);
        assert_eq!(ZOBRIST.castling(CastlingRights::none()), 0);
    }
}
