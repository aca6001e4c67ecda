//! Static evaluation.
//!
//! Material with diminishing returns, tapered piece-square tables and the
//! terms in `eval_terms`, summed from White's side and then turned to the
//! side to move.

use super::eval_terms::tables::{
    MATERIAL_CAP, MATERIAL_DIMINISH_SHIFT, MAX_PHASE, PHASE_WEIGHTS, PST_EG, PST_MG,
};
use super::{Board, Color, Piece, Square};

/// Shrink a material advantage: `m - sign(m) * m^2 >> 14`, capped first so
/// the curve stays increasing.
#[inline]
pub(crate) fn diminish_material(material: i32) -> i32 {
    let m = material.clamp(-MATERIAL_CAP, MATERIAL_CAP);
    m - m.signum() * ((m * m) >> MATERIAL_DIMINISH_SHIFT)
}

#[inline]
fn pst_index(color: Color, sq: Square) -> usize {
    match color {
        Color::White => sq.index(),
        Color::Black => sq.flip_vertical().index(),
    }
}

/// Middlegame piece-square value, used for move ordering
#[inline]
pub(crate) fn pst_value(piece: Piece, color: Color, sq: Square) -> i32 {
    PST_MG[piece.index()][pst_index(color, sq)]
}

impl Board {
    /// Static evaluation from the side to move's perspective (positive is
    /// good for the mover).
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        self.evaluate_white() * self.side_to_move.sign()
    }

    /// Static evaluation from White's perspective.
    #[must_use]
    pub fn evaluate_white(&self) -> i32 {
        let phase = self.game_phase();
        let material = self.material_balance();

        let (mut mg, mut eg) = self.eval_piece_squares();
        for (term_mg, term_eg) in [
            self.eval_mobility(),
            self.eval_pawn_structure(),
            self.eval_bishop_pair(),
            self.eval_rooks(),
            self.eval_outposts(),
            self.eval_king_safety(),
        ] {
            mg += term_mg;
            eg += term_eg;
        }
        eg += self.eval_king_distance(material);

        let tapered = (mg * phase + eg * (MAX_PHASE - phase)) / MAX_PHASE;
        diminish_material(material) + tapered
    }

    /// Remaining non-pawn material as a phase, `MAX_PHASE` at the start down
    /// to 0 with bare kings and pawns.
    #[must_use]
    pub fn game_phase(&self) -> i32 {
        let mut phase = 0;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                phase += PHASE_WEIGHTS[piece.index()] * self.piece_count(color, piece) as i32;
            }
        }
        phase.min(MAX_PHASE)
    }

    /// White material minus Black material, kings excluded.
    #[must_use]
    pub fn material_balance(&self) -> i32 {
        Piece::ALL
            .iter()
            .map(|&piece| {
                let diff = self.piece_count(Color::White, piece) as i32
                    - self.piece_count(Color::Black, piece) as i32;
                diff * piece.value()
            })
            .sum()
    }

    /// Piece-square table sums `(middlegame, endgame)` from White's side.
    #[must_use]
    pub fn eval_piece_squares(&self) -> (i32, i32) {
        let mut mg = 0;
        let mut eg = 0;
        for color in Color::BOTH {
            let sign = color.sign();
            for piece in Piece::ALL {
                for sq in self.pieces(color, piece).iter() {
                    let idx = pst_index(color, sq);
                    mg += sign * PST_MG[piece.index()][idx];
                    eg += sign * PST_EG[piece.index()][idx];
                }
            }
        }
        (mg, eg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_is_balanced() {
        let board = Board::new();
        assert_eq!(board.evaluate_white(), 0);
        assert_eq!(board.game_phase(), MAX_PHASE);
        assert_eq!(board.material_balance(), 0);
    }

    #[test]
    fn test_evaluation_is_side_relative() {
        // White is a queen up
        let white = Board::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
        let black = Board::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1");
        assert!(white.evaluate() > 500);
        assert_eq!(white.evaluate(), -black.evaluate());
    }

    #[test]
    fn test_mirrored_positions_negate() {
        let board = Board::from_fen(
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        );
        let mirrored = Board::from_fen(
            "rnbqk2r/pppp1ppp/5n2/2b1p3/4P3/2N2N2/PPPP1PPP/R1BQKB1R b KQkq - 4 4",
        );
        assert_eq!(board.evaluate_white(), -mirrored.evaluate_white());
    }

    #[test]
    fn test_diminishing_material() {
        assert_eq!(diminish_material(0), 0);
        assert_eq!(diminish_material(900), 900 - ((900 * 900) >> 14));
        assert_eq!(diminish_material(-900), -diminish_material(900));
        // Still monotonic up to the cap
        assert!(diminish_material(8000) > diminish_material(7000));
        assert_eq!(diminish_material(20000), diminish_material(8000));
    }

    #[test]
    fn test_pst_is_mirrored_for_black() {
        let e4: Square = "e4".parse().expect("square");
        let e5: Square = "e5".parse().expect("square");
        assert_eq!(
            pst_value(Piece::Pawn, Color::White, e4),
            pst_value(Piece::Pawn, Color::Black, e5)
        );
        // Knights prefer the centre to the rim
        let d4: Square = "d4".parse().expect("square");
        assert!(
            pst_value(Piece::Knight, Color::White, d4)
                > pst_value(Piece::Knight, Color::White, Square::A1)
        );
    }
}
