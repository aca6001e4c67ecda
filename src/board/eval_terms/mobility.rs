//! Mobility evaluation.
//!
//! Counts pseudo-legal destinations per piece. Sliders only see pawns as
//! blockers, which approximates how far they could reach once pieces move.

use crate::board::attack_tables::{bishop_attacks, knight_attacks, queen_attacks, rook_attacks};
use crate::board::state::Board;
use crate::board::types::{Color, Piece};

use super::tables::{
    BISHOP_MOB_EG, BISHOP_MOB_MG, KNIGHT_MOB_EG, KNIGHT_MOB_MG, QUEEN_MOB_EG, QUEEN_MOB_MG,
    ROOK_MOB_EG, ROOK_MOB_MG,
};

impl Board {
    /// Evaluate mobility for all pieces.
    /// Returns `(middlegame_score, endgame_score)` from white's perspective.
    #[must_use]
    pub fn eval_mobility(&self) -> (i32, i32) {
        let mut mg = 0;
        let mut eg = 0;
        let pawns = self.pieces(Color::White, Piece::Pawn) | self.pieces(Color::Black, Piece::Pawn);

        for color in Color::BOTH {
            let sign = color.sign();
            let own = self.occupied_by(color);

            for sq in self.pieces(color, Piece::Knight).iter() {
                let count = (knight_attacks(sq) & !own).popcount() as usize;
                mg += sign * KNIGHT_MOB_MG[count.min(8)];
                eg += sign * KNIGHT_MOB_EG[count.min(8)];
            }

            for sq in self.pieces(color, Piece::Bishop).iter() {
                let count = (bishop_attacks(sq, pawns) & !own).popcount() as usize;
                mg += sign * BISHOP_MOB_MG[count.min(13)];
                eg += sign * BISHOP_MOB_EG[count.min(13)];
            }

            for sq in self.pieces(color, Piece::Rook).iter() {
                let count = (rook_attacks(sq, pawns) & !own).popcount() as usize;
                mg += sign * ROOK_MOB_MG[count.min(14)];
                eg += sign * ROOK_MOB_EG[count.min(14)];
            }

            for sq in self.pieces(color, Piece::Queen).iter() {
                let count = (queen_attacks(sq, pawns) & !own).popcount() as usize;
                mg += sign * QUEEN_MOB_MG[count.min(27)];
                eg += sign * QUEEN_MOB_EG[count.min(27)];
            }
        }

        (mg, eg)
    }
}
