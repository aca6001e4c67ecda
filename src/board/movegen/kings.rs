use super::super::attack_tables::king_attacks;
use super::super::{Board, Color, Move, MoveSink, Piece, Square};
use super::GenMode;

impl Board {
    pub(super) fn generate_king_moves<S: MoveSink>(
        &mut self,
        mode: GenMode,
        in_check: bool,
        sink: &mut S,
    ) {
        let us = self.side_to_move;
        let from = self.king_square(us);
        let mut targets = king_attacks(from) & !self.occupied_by(us);
        if mode == GenMode::Tactical {
            targets &= self.occupied_by(us.opponent());
        }
        for to in targets.iter() {
            self.push_if_legal(Move::new(from, to), sink);
        }

        if mode == GenMode::All && !in_check {
            self.generate_castling(from, sink);
        }
    }

    /// The caller guarantees the king is not in check. The landing square
    /// is left to the speculative make; only the pass square is tested here.
    fn generate_castling<S: MoveSink>(&mut self, king: Square, sink: &mut S) {
        let us = self.side_to_move;
        let them = us.opponent();
        let back_rank = if us == Color::White { 0 } else { 7 };
        if Square::new(back_rank, 4) != Some(king) || self.castling_rights.is_empty() {
            return;
        }

        let own_rook = Some((us, Piece::Rook));
        let at = |file: usize| king.offset(file as i32 - 4);

        if self.castling_rights.has(us, true)
            && self.squares[at(7).index()] == own_rook
            && self.squares[at(5).index()].is_none()
            && self.squares[at(6).index()].is_none()
            && !self.is_square_attacked(at(5), them)
        {
            self.push_if_legal(Move::new(king, at(6)), sink);
        }

        if self.castling_rights.has(us, false)
            && self.squares[at(0).index()] == own_rook
            && self.squares[at(1).index()].is_none()
            && self.squares[at(2).index()].is_none()
            && self.squares[at(3).index()].is_none()
            && !self.is_square_attacked(at(3), them)
        {
            self.push_if_legal(Move::new(king, at(2)), sink);
        }
    }
}
