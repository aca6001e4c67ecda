//! Pawn structure evaluation.
//!
//! Evaluates doubled, isolated and passed pawns.

use crate::board::masks::{fill_forward, relative_rank, ADJACENT_FILES, PASSED_PAWN_MASK};
use crate::board::state::Board;
use crate::board::types::{Bitboard, Color, Piece};

use super::tables::{
    DOUBLED_PAWN_EG, DOUBLED_PAWN_MG, ISOLATED_PAWN_EG, ISOLATED_PAWN_MG, PASSED_PAWN_BONUS_EG,
    PASSED_PAWN_BONUS_MG,
};

impl Board {
    /// Evaluate pawn structure.
    /// Returns `(middlegame_score, endgame_score)` from white's perspective.
    #[must_use]
    pub fn eval_pawn_structure(&self) -> (i32, i32) {
        let mut mg = 0;
        let mut eg = 0;

        for color in Color::BOTH {
            let sign = color.sign();
            let own_pawns = self.pieces(color, Piece::Pawn);
            let enemy_pawns = self.pieces(color.opponent(), Piece::Pawn);

            for sq in own_pawns.iter() {
                let here = Bitboard::from_square(sq);
                let ahead = fill_forward(here, color) & !here;

                // Doubled: the rear pawn of a pair takes the penalty
                let doubled = (ahead & own_pawns).any();
                if doubled {
                    mg += sign * DOUBLED_PAWN_MG;
                    eg += sign * DOUBLED_PAWN_EG;
                }

                if (ADJACENT_FILES[sq.file()] & own_pawns).is_empty() {
                    mg += sign * ISOLATED_PAWN_MG;
                    eg += sign * ISOLATED_PAWN_EG;
                }

                if !doubled && (PASSED_PAWN_MASK[color.index()][sq.index()] & enemy_pawns).is_empty()
                {
                    let rel_rank = relative_rank(sq.rank(), color);
                    mg += sign * PASSED_PAWN_BONUS_MG[rel_rank];
                    eg += sign * PASSED_PAWN_BONUS_EG[rel_rank];
                }
            }
        }

        (mg, eg)
    }
}
