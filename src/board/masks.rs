//! Pre-computed bitboard masks for evaluation.

use super::types::{Bitboard, Color};

/// Files adjacent to each file (0-7)
/// e.g., `ADJACENT_FILES`[3] = files c and e for file d
pub(crate) const ADJACENT_FILES: [Bitboard; 8] = {
    let mut masks = [Bitboard(0); 8];
    let mut f = 0;
    while f < 8 {
        let mut adj = 0u64;
        if f > 0 {
            adj |= Bitboard::FILE_A.0 << (f - 1);
        }
        if f < 7 {
            adj |= Bitboard::FILE_A.0 << (f + 1);
        }
        masks[f] = Bitboard(adj);
        f += 1;
    }
    masks
};

/// `PASSED_PAWN_MASK`[color][square]: squares ahead of a pawn on its own and
/// adjacent files. Any enemy pawn there stops it from being passed.
pub(crate) const PASSED_PAWN_MASK: [[Bitboard; 64]; 2] = {
    let mut masks = [[Bitboard(0); 64]; 2];

    let mut sq = 0;
    while sq < 64 {
        let rank = sq / 8;
        let file = sq % 8;
        let lo = if file > 0 { file - 1 } else { 0 };
        let hi = if file < 7 { file + 1 } else { 7 };

        let mut r = 0;
        while r < 8 {
            let mut f = lo;
            while f <= hi {
                let bit = 1u64 << (r * 8 + f);
                if r > rank {
                    masks[0][sq].0 |= bit;
                }
                if r < rank {
                    masks[1][sq].0 |= bit;
                }
                f += 1;
            }
            r += 1;
        }
        sq += 1;
    }
    masks
};

/// `PAWN_SHIELD_MASK`[color][king_file]: the two ranks in front of a king on
/// its back rank, on the king's file and its neighbours
pub(crate) const PAWN_SHIELD_MASK: [[Bitboard; 8]; 2] = {
    let mut masks = [[Bitboard(0); 8]; 2];
    let mut f = 0;
    while f < 8 {
        let files = ADJACENT_FILES[f].0 | (Bitboard::FILE_A.0 << f);
        masks[0][f] = Bitboard(files & (Bitboard::RANK_2.0 | (Bitboard::RANK_2.0 << 8)));
        masks[1][f] = Bitboard(files & (Bitboard::RANK_7.0 | (Bitboard::RANK_7.0 >> 8)));
        f += 1;
    }
    masks
};

/// Fill north from a bitboard (flood fill)
#[inline]
pub(crate) const fn fill_north(mut bb: u64) -> u64 {
    bb |= bb << 8;
    bb |= bb << 16;
    bb |= bb << 32;
    bb
}

/// Fill south from a bitboard (flood fill)
#[inline]
pub(crate) const fn fill_south(mut bb: u64) -> u64 {
    bb |= bb >> 8;
    bb |= bb >> 16;
    bb |= bb >> 32;
    bb
}

/// Forward fill for a color, including the starting squares
#[inline]
pub(crate) fn fill_forward(bb: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => Bitboard(fill_north(bb.0)),
        Color::Black => Bitboard(fill_south(bb.0)),
    }
}

/// Rank from a color's own side of the board (0-7)
#[inline]
pub(crate) const fn relative_rank(rank: usize, color: Color) -> usize {
    match color {
        Color::White => rank,
        Color::Black => 7 - rank,
    }
}
