//! Precomputed attack tables.
//!
//! Leaper tables (knight, king, pawn captures), the relevant-blocker masks
//! used by the magic lookup, and pawn "reverse push" masks. Everything is
//! built once on first use and read-only afterwards.

#![allow(clippy::needless_range_loop)] // Index loops are clearer for board coordinates

mod magic;

pub(crate) use magic::{bishop_attacks, queen_attacks, rook_attacks};

use once_cell::sync::Lazy;

use super::types::{Bitboard, Color, Square};

pub(crate) const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Square at (rank + dr, file + df), if it is on the board
#[inline]
fn step(sq: usize, dr: i32, df: i32) -> Option<usize> {
    let r = (sq / 8) as i32 + dr;
    let f = (sq % 8) as i32 + df;
    if (0..8).contains(&r) && (0..8).contains(&f) {
        Some((r * 8 + f) as usize)
    } else {
        None
    }
}

fn leaper_table(deltas: &[(i32, i32)]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        for &(dr, df) in deltas {
            if let Some(target) = step(sq, dr, df) {
                slot.0 |= 1u64 << target;
            }
        }
    }
    attacks
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));

pub(crate) static KING_ATTACKS: Lazy<[Bitboard; 64]> = Lazy::new(|| leaper_table(&KING_DELTAS));

/// `PAWN_ATTACKS[color][sq]`: squares a pawn of `color` on `sq` captures on
pub(crate) static PAWN_ATTACKS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    [
        leaper_table(&[(1, -1), (1, 1)]),
        leaper_table(&[(-1, -1), (-1, 1)]),
    ]
});

/// `PAWN_PUSH_ORIGINS[color][target]`: square a pawn of `color` single-pushes
/// from to reach `target`
pub(crate) static PAWN_PUSH_ORIGINS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    let mut origins = [[Bitboard::EMPTY; 64]; 2];
    for color in Color::BOTH {
        let back = -color.pawn_push().signum();
        for target in 0..64 {
            if let Some(from) = step(target, back, 0) {
                let rank = from / 8;
                // Pawns never stand on the first or last rank
                if rank != 0 && rank != 7 {
                    origins[color.index()][target].0 |= 1u64 << from;
                }
            }
        }
    }
    origins
});

/// `PAWN_DOUBLE_PUSH_ORIGINS[color][target]`: start square of a double push
/// landing on `target`
pub(crate) static PAWN_DOUBLE_PUSH_ORIGINS: Lazy<[[Bitboard; 64]; 2]> = Lazy::new(|| {
    let mut origins = [[Bitboard::EMPTY; 64]; 2];
    for color in Color::BOTH {
        let back = -color.pawn_push().signum();
        for target in 0..64 {
            if let Some(from) = step(target, 2 * back, 0) {
                if from / 8 == color.pawn_start_rank() {
                    origins[color.index()][target].0 |= 1u64 << from;
                }
            }
        }
    }
    origins
});

/// Open ray from `sq` in each direction, stopping one short of the edge.
/// Blockers on the edge square never change the attack set, so they are
/// irrelevant to the magic index.
fn relevant_mask(sq: usize, directions: &[(i32, i32)]) -> Bitboard {
    let mut mask = 0u64;
    for &(dr, df) in directions {
        let mut current = sq;
        while let Some(next) = step(current, dr, df) {
            // Only keep `next` if the ray continues past it
            if step(next, dr, df).is_none() {
                break;
            }
            mask |= 1u64 << next;
            current = next;
        }
    }
    Bitboard(mask)
}

pub(crate) static ROOK_MASKS: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    let mut masks = [Bitboard::EMPTY; 64];
    for sq in 0..64 {
        masks[sq] = relevant_mask(sq, &ROOK_DIRECTIONS);
    }
    masks
});

pub(crate) static BISHOP_MASKS: Lazy<[Bitboard; 64]> = Lazy::new(|| {
    let mut masks = [Bitboard::EMPTY; 64];
    for sq in 0..64 {
        masks[sq] = relevant_mask(sq, &BISHOP_DIRECTIONS);
    }
    masks
});

/// Attack set found by walking each ray until the edge or the first blocker
/// (the blocker itself is included).
pub(crate) fn ray_attacks(sq: usize, occupied: u64, directions: &[(i32, i32)]) -> Bitboard {
    let mut attacks = 0u64;
    for &(dr, df) in directions {
        let mut current = sq;
        while let Some(next) = step(current, dr, df) {
            attacks |= 1u64 << next;
            if occupied & (1u64 << next) != 0 {
                break;
            }
            current = next;
        }
    }
    Bitboard(attacks)
}

#[inline]
pub(crate) fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_ATTACKS[sq.index()]
}

#[inline]
pub(crate) fn king_attacks(sq: Square) -> Bitboard {
    KING_ATTACKS[sq.index()]
}

#[inline]
pub(crate) fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][sq.index()]
}
