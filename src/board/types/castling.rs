//! Castling rights type.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

pub(crate) const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Rights that survive a move touching each square (as origin or destination).
/// King squares clear both rights of that color, rook corners clear one.
const RIGHTS_KEPT: [u8; 64] = {
    let mut keep = [ALL_CASTLING_RIGHTS; 64];
    keep[0] = ALL_CASTLING_RIGHTS & !CASTLE_WHITE_Q;
    keep[4] = ALL_CASTLING_RIGHTS & !(CASTLE_WHITE_K | CASTLE_WHITE_Q);
    keep[7] = ALL_CASTLING_RIGHTS & !CASTLE_WHITE_K;
    keep[56] = ALL_CASTLING_RIGHTS & !CASTLE_BLACK_Q;
    keep[60] = ALL_CASTLING_RIGHTS & !(CASTLE_BLACK_K | CASTLE_BLACK_Q);
    keep[63] = ALL_CASTLING_RIGHTS & !CASTLE_BLACK_K;
    keep
};

/// Castling rights represented as a 4-bit mask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    #[inline]
    pub fn remove(&mut self, color: Color, kingside: bool) {
        self.0 &= !Self::bit_for(color, kingside);
    }

    /// Drop whatever rights a move between `from` and `to` revokes
    #[inline]
    pub(crate) fn update_for_move(&mut self, from: usize, to: usize) {
        self.0 &= RIGHTS_KEPT[from] & RIGHTS_KEPT[to];
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of rights held by one color (0-2)
    #[inline]
    #[must_use]
    pub const fn count_for(self, color: Color) -> u32 {
        (self.0 & (Self::bit_for(color, true) | Self::bit_for(color, false))).count_ones()
    }

    /// Raw bitmask value (for Zobrist hashing)
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        CastlingRights(value & ALL_CASTLING_RIGHTS)
    }

    #[inline]
    const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_king_move_revokes_both() {
        let mut rights = CastlingRights::all();
        rights.update_for_move(4, 12);
        assert!(!rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
    }

    #[test]
    fn test_rook_capture_revokes_one_side() {
        let mut rights = CastlingRights::all();
        // A piece lands on h8
        rights.update_for_move(47, 63);
        assert!(!rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
        assert_eq!(rights.count_for(Color::White), 2);
    }

    #[test]
    fn test_from_u8_masks_extra_bits() {
        assert_eq!(CastlingRights::from_u8(0xFF), CastlingRights::all());
        assert!(CastlingRights::none().is_empty());
    }
}
