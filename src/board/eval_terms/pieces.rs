use crate::board::attack_tables::pawn_attacks;
use crate::board::masks::{relative_rank, ADJACENT_FILES, PASSED_PAWN_MASK};
use crate::board::state::Board;
use crate::board::types::{Bitboard, Color, Piece};

use super::tables::{
    BISHOP_PAIR_EG, BISHOP_PAIR_MG, KNIGHT_OUTPOST_EG, KNIGHT_OUTPOST_MG, ROOK_OPEN_FILE_EG,
    ROOK_OPEN_FILE_MG, ROOK_SEMI_OPEN_EG, ROOK_SEMI_OPEN_MG,
};

impl Board {
    #[must_use]
    pub fn eval_bishop_pair(&self) -> (i32, i32) {
        let mut mg = 0;
        let mut eg = 0;
        for color in Color::BOTH {
            if self.piece_count(color, Piece::Bishop) >= 2 {
                mg += color.sign() * BISHOP_PAIR_MG;
                eg += color.sign() * BISHOP_PAIR_EG;
            }
        }
        (mg, eg)
    }

    /// Rooks on open (no pawns) and semi-open (no own pawns) files.
    #[must_use]
    pub fn eval_rooks(&self) -> (i32, i32) {
        let mut mg = 0;
        let mut eg = 0;
        for color in Color::BOTH {
            let sign = color.sign();
            let own_pawns = self.pieces(color, Piece::Pawn);
            let enemy_pawns = self.pieces(color.opponent(), Piece::Pawn);

            for sq in self.pieces(color, Piece::Rook).iter() {
                let file = Bitboard::file_mask(sq.file());
                if (file & own_pawns).any() {
                    continue;
                }
                if (file & enemy_pawns).is_empty() {
                    mg += sign * ROOK_OPEN_FILE_MG;
                    eg += sign * ROOK_OPEN_FILE_EG;
                } else {
                    mg += sign * ROOK_SEMI_OPEN_MG;
                    eg += sign * ROOK_SEMI_OPEN_EG;
                }
            }
        }
        (mg, eg)
    }

    /// Knights on ranks 4-6 (from their own side), defended by a pawn, that
    /// no enemy pawn can ever attack.
    #[must_use]
    pub fn eval_outposts(&self) -> (i32, i32) {
        let mut mg = 0;
        let mut eg = 0;
        for color in Color::BOTH {
            let own_pawns = self.pieces(color, Piece::Pawn);
            let enemy_pawns = self.pieces(color.opponent(), Piece::Pawn);

            for sq in self.pieces(color, Piece::Knight).iter() {
                if !(3..=5).contains(&relative_rank(sq.rank(), color)) {
                    continue;
                }
                let defended = (pawn_attacks(color.opponent(), sq) & own_pawns).any();
                let attackers_ahead =
                    PASSED_PAWN_MASK[color.index()][sq.index()] & ADJACENT_FILES[sq.file()];
                if defended && (attackers_ahead & enemy_pawns).is_empty() {
                    mg += color.sign() * KNIGHT_OUTPOST_MG;
                    eg += color.sign() * KNIGHT_OUTPOST_EG;
                }
            }
        }
        (mg, eg)
    }
}
