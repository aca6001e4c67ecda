use super::super::attack_tables::{pawn_attacks, PAWN_DOUBLE_PUSH_ORIGINS, PAWN_PUSH_ORIGINS};
use super::super::{Bitboard, Board, Color, Move, MoveSink, Piece, Square, PROMOTION_PIECES};
use super::GenMode;

impl Board {
    /// Pawn moves landing in `targets`. En passant is also allowed when the
    /// captured pawn, rather than the landing square, is the target.
    pub(super) fn generate_pawn_moves<S: MoveSink>(
        &mut self,
        mode: GenMode,
        targets: Bitboard,
        in_check: bool,
        sink: &mut S,
    ) {
        let us = self.side_to_move;
        let them = us.opponent();
        let pawns = self.pieces(us, Piece::Pawn);
        if pawns.is_empty() {
            return;
        }
        let empty = !self.all_occupied;
        let enemy = self.occupied_by(them);

        for from in pawns.iter() {
            for to in (pawn_attacks(us, from) & enemy & targets).iter() {
                self.push_pawn_move(from, to, sink);
            }
        }

        if let Some(ep) = self.en_passant_square() {
            let victim = ep.offset(-us.pawn_push());
            if targets.contains(ep) || targets.contains(victim) {
                for from in (pawn_attacks(them, ep) & pawns).iter() {
                    self.push_if_legal(Move::new(from, ep), sink);
                }
            }
        }

        let mut push_targets = empty & targets;
        if mode == GenMode::Tactical {
            push_targets &= Bitboard::rank_mask(us.promotion_rank());
        }

        if in_check {
            // Only a handful of blocking squares: look up which pawn reaches each
            for to in push_targets.iter() {
                for from in (PAWN_PUSH_ORIGINS[us.index()][to.index()] & pawns).iter() {
                    self.push_pawn_move(from, to, sink);
                }
                if mode == GenMode::All {
                    for from in (PAWN_DOUBLE_PUSH_ORIGINS[us.index()][to.index()] & pawns).iter() {
                        if empty.contains(from.offset(us.pawn_push())) {
                            self.push_if_legal(Move::new(from, to), sink);
                        }
                    }
                }
            }
            return;
        }

        let (single, double_rank) = match us {
            Color::White => (pawns.shift_north() & empty, 3),
            Color::Black => (pawns.shift_south() & empty, 4),
        };
        for to in (single & push_targets).iter() {
            self.push_pawn_move(to.offset(-us.pawn_push()), to, sink);
        }

        if mode == GenMode::All {
            let second = match us {
                Color::White => single.shift_north(),
                Color::Black => single.shift_south(),
            };
            let double = second & empty & Bitboard::rank_mask(double_rank);
            for to in double.iter() {
                self.push_if_legal(Move::new(to.offset(-2 * us.pawn_push()), to), sink);
            }
        }
    }

    /// Push a pawn move, expanded into the four promotions on the last rank.
    /// The promotion piece cannot change whether the king is exposed, so
    /// legality is checked once.
    fn push_pawn_move<S: MoveSink>(&mut self, from: Square, to: Square, sink: &mut S) {
        if to.rank() != self.side_to_move.promotion_rank() {
            self.push_if_legal(Move::new(from, to), sink);
            return;
        }
        if self.leaves_king_safe(Move::new(from, to)) {
            for piece in PROMOTION_PIECES {
                sink.push_move(Move::with_promotion(from, to, piece));
            }
        }
    }
}
