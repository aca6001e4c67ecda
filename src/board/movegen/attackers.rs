use super::super::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};
use super::super::{Bitboard, Board, Color, Piece, Square};

impl Board {
    /// Pieces of color `by` attacking `sq`, with sliders seeing through
    /// whatever is not in `occupied`.
    #[must_use]
    pub fn attackers_to(&self, sq: Square, by: Color, occupied: Bitboard) -> Bitboard {
        let queens = self.pieces(by, Piece::Queen);
        (pawn_attacks(by.opponent(), sq) & self.pieces(by, Piece::Pawn))
            | (knight_attacks(sq) & self.pieces(by, Piece::Knight))
            | (king_attacks(sq) & self.pieces(by, Piece::King))
            | (rook_attacks(sq, occupied) & (self.pieces(by, Piece::Rook) | queens))
            | (bishop_attacks(sq, occupied) & (self.pieces(by, Piece::Bishop) | queens))
    }

    /// Like `attackers_to` with the current occupancy, stopping at the first
    /// attacker found. Reads bitboards only, so it is valid between
    /// `quick_make` and `quick_unmake`.
    #[must_use]
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        if (knight_attacks(sq) & self.pieces(by, Piece::Knight)).any() {
            return true;
        }
        if (pawn_attacks(by.opponent(), sq) & self.pieces(by, Piece::Pawn)).any() {
            return true;
        }
        if (king_attacks(sq) & self.pieces(by, Piece::King)).any() {
            return true;
        }

        let queens = self.pieces(by, Piece::Queen);
        let occupied = self.all_occupied;
        let rook_like = self.pieces(by, Piece::Rook) | queens;
        if rook_like.any() && (rook_attacks(sq, occupied) & rook_like).any() {
            return true;
        }
        let bishop_like = self.pieces(by, Piece::Bishop) | queens;
        bishop_like.any() && (bishop_attacks(sq, occupied) & bishop_like).any()
    }

    /// Enemy pieces giving check to the side to move
    #[must_use]
    pub fn checkers(&self) -> Bitboard {
        let us = self.side_to_move;
        self.attackers_to(self.king_square(us), us.opponent(), self.all_occupied)
    }

    /// True if the side to move is in check
    #[must_use]
    pub fn is_in_check(&self) -> bool {
        let us = self.side_to_move;
        self.is_square_attacked(self.king_square(us), us.opponent())
    }
}
