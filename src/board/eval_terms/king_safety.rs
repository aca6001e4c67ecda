//! King safety evaluation.
//!
//! Castling status and pawn shield in the middlegame; in the endgame the
//! side ahead in material wants the other king on the edge.

use crate::board::masks::PAWN_SHIELD_MASK;
use crate::board::state::Board;
use crate::board::types::{Color, Piece, Square};

use super::tables::{
    CASTLED_BONUS_MG, CASTLING_RIGHT_BONUS_MG, KING_DISTANCE_MIN_LEAD, KING_EDGE_BONUS,
    KING_PROXIMITY_BONUS, KING_SHIELD_BONUS_MG,
};

impl Board {
    /// Returns `(middlegame_score, endgame_score)` from white's perspective.
    #[must_use]
    pub fn eval_king_safety(&self) -> (i32, i32) {
        let mut mg = 0;

        for color in Color::BOTH {
            let sign = color.sign();

            if self.has_castled(color) {
                mg += sign * CASTLED_BONUS_MG;
            } else {
                mg += sign * CASTLING_RIGHT_BONUS_MG * self.castling_rights.count_for(color) as i32;
            }

            let king = self.king_square(color);
            let back_rank = if color == Color::White { 0 } else { 7 };
            if king.rank() == back_rank {
                let shield = PAWN_SHIELD_MASK[color.index()][king.file()]
                    & self.pieces(color, Piece::Pawn);
                mg += sign * KING_SHIELD_BONUS_MG * shield.popcount() as i32;
            }
        }

        (mg, 0)
    }

    /// Endgame bonus for the side ahead by `material` (White minus Black):
    /// the losing king far from the centre, the kings close together.
    #[must_use]
    pub fn eval_king_distance(&self, material: i32) -> i32 {
        if material.abs() < KING_DISTANCE_MIN_LEAD {
            return 0;
        }
        let (winner, loser) = if material > 0 {
            (Color::White, Color::Black)
        } else {
            (Color::Black, Color::White)
        };
        let losing_king = self.king_square(loser);
        let winning_king = self.king_square(winner);

        let edge = center_distance(losing_king) as i32;
        let between = (losing_king.rank().abs_diff(winning_king.rank())
            + losing_king.file().abs_diff(winning_king.file())) as i32;
        let bonus = KING_EDGE_BONUS * edge + KING_PROXIMITY_BONUS * (14 - between);
        winner.sign() * bonus
    }
}

/// Manhattan distance to the nearest of the four centre squares (0-6)
fn center_distance(sq: Square) -> usize {
    let file = sq.file();
    let rank = sq.rank();
    let df = if file < 4 { 3 - file } else { file - 4 };
    let dr = if rank < 4 { 3 - rank } else { rank - 4 };
    df + dr
}
