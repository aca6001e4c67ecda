//! Legal move generation.
//!
//! Generation is check-aware: the pieces checking the side to move decide
//! which destinations are tried at all, and every candidate is confirmed with
//! a bitboard-only speculative make before it reaches the sink.

mod attackers;
mod kings;
mod pawns;

use super::attack_tables::{bishop_attacks, knight_attacks, queen_attacks, rook_attacks};
use super::state::GameStatus;
use super::types::{Bitboard, Move, MoveList, MoveSink, Piece, Square};
use super::Board;

/// Which moves a generation pass produces
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GenMode {
    /// Every legal move
    All,
    /// Captures (en passant included) and promotions
    Tactical,
}

const NON_PAWN_MOVERS: [Piece; 4] = [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen];

impl Board {
    /// All legal moves for the side to move.
    ///
    /// Takes `&mut self` because candidates are verified by briefly applying
    /// them to the bitboards; the board is unchanged on return.
    pub fn generate_moves(&mut self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_moves_into(&mut moves);
        moves
    }

    pub fn generate_moves_into<S: MoveSink>(&mut self, sink: &mut S) {
        self.generate(GenMode::All, sink);
    }

    /// Legal captures and promotions only, as searched in quiescence.
    pub fn generate_tactical_moves(&mut self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_tactical_moves_into(&mut moves);
        moves
    }

    pub fn generate_tactical_moves_into<S: MoveSink>(&mut self, sink: &mut S) {
        self.generate(GenMode::Tactical, sink);
    }

    fn generate<S: MoveSink>(&mut self, mode: GenMode, sink: &mut S) {
        let us = self.side_to_move;
        let king = self.king_square(us);
        let checkers = self.checkers();

        self.generate_king_moves(mode, checkers.any(), sink);
        // Double check: only the king can answer
        if checkers.has_several() {
            return;
        }

        let targets = match checkers.lsb() {
            Some(checker) => self.evasion_targets(king, checker),
            None => Bitboard::ALL,
        };

        self.generate_pawn_moves(mode, targets, checkers.any(), sink);

        let mut piece_targets = targets & !self.occupied_by(us);
        if mode == GenMode::Tactical {
            piece_targets &= self.occupied_by(us.opponent());
        }
        if piece_targets.is_empty() {
            return;
        }

        let occupied = self.all_occupied;
        for piece in NON_PAWN_MOVERS {
            for from in self.pieces(us, piece).iter() {
                let attacks = match piece {
                    Piece::Knight => knight_attacks(from),
                    Piece::Bishop => bishop_attacks(from, occupied),
                    Piece::Rook => rook_attacks(from, occupied),
                    _ => queen_attacks(from, occupied),
                };
                for to in (attacks & piece_targets).iter() {
                    self.push_if_legal(Move::new(from, to), sink);
                }
            }
        }
    }

    /// Squares a non-king move must land on to answer a single check: the
    /// checker itself, or for a slider, any square between it and the king.
    fn evasion_targets(&self, king: Square, checker: Square) -> Bitboard {
        let occupied = self.all_occupied;
        let between = match self.squares[checker.index()] {
            Some((_, Piece::Bishop | Piece::Rook | Piece::Queen)) => {
                if checker.rank() == king.rank() || checker.file() == king.file() {
                    rook_attacks(checker, occupied) & rook_attacks(king, occupied)
                } else {
                    bishop_attacks(checker, occupied) & bishop_attacks(king, occupied)
                }
            }
            _ => Bitboard::EMPTY,
        };
        between | Bitboard::from_square(checker)
    }

    /// True if playing `mv` does not leave the mover's king attacked.
    pub(crate) fn leaves_king_safe(&mut self, mv: Move) -> bool {
        let us = self.side_to_move;
        let undo = self.quick_make(mv);
        let safe = !self.is_square_attacked(self.king_square(us), us.opponent());
        self.quick_unmake(mv, undo);
        safe
    }

    #[inline]
    fn push_if_legal<S: MoveSink>(&mut self, mv: Move, sink: &mut S) {
        if self.leaves_king_safe(mv) {
            sink.push_move(mv);
        }
    }

    /// True if `mv` is among the legal moves of this position.
    pub fn is_legal(&mut self, mv: Move) -> bool {
        self.generate_moves().contains(mv)
    }

    /// Mate, stalemate or a rule draw for the side to move.
    pub fn game_status(&mut self) -> GameStatus {
        if self.generate_moves().is_empty() {
            if self.is_in_check() {
                GameStatus::Lose
            } else {
                GameStatus::Stalemate
            }
        } else if self.is_draw_by_rule() {
            GameStatus::Stalemate
        } else {
            GameStatus::NoMate
        }
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.is_in_check() && self.generate_moves().is_empty()
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.is_in_check() && self.generate_moves().is_empty()
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for &mv in &moves {
            let undo = self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move(mv, undo);
        }
        nodes
    }

    /// Perft split by root move, for comparing against another move generator.
    pub fn divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        let moves = self.generate_moves();
        let mut counts = Vec::with_capacity(moves.len());
        for &mv in &moves {
            let undo = self.make_move(mv);
            let nodes = if depth <= 1 { 1 } else { self.perft(depth - 1) };
            self.unmake_move(mv, undo);
            counts.push((mv, nodes));
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_has_twenty_moves() {
        let mut board = Board::new();
        assert_eq!(board.generate_moves().len(), 20);
        assert!(board.generate_tactical_moves().is_empty());
    }

    #[test]
    fn test_double_check_allows_only_king_moves() {
        // Rook on e8 and knight on f3 both check the king on e1
        let mut board = Board::from_fen("4r2k/8/8/8/8/5n2/8/R3K3 w - - 0 1");
        assert!(board.checkers().has_several());
        let moves = board.generate_moves();
        assert!(!moves.is_empty());
        let king = board.king_square(board.side_to_move());
        assert!(moves.iter().all(|mv| mv.from() == king));
    }

    #[test]
    fn test_single_check_block_or_capture() {
        // Bishop on b4 checks along b4-c3-d2; the knight can take it or block on c3
        let mut board = Board::from_fen("4k3/8/8/8/1b6/8/N7/4K3 w - - 0 1");
        let king = board.king_square(board.side_to_move());
        let mut others: Vec<String> = board
            .generate_moves()
            .iter()
            .filter(|mv| mv.from() != king)
            .map(|mv| mv.to_string())
            .collect();
        others.sort();
        assert_eq!(others, vec!["a2b4", "a2c3"]);
    }

    #[test]
    fn test_pinned_piece_cannot_leave_line() {
        // Knight on e2 is pinned by the rook on e8
        let mut board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let moves = board.generate_moves();
        assert!(moves.iter().all(|mv| mv.from() != "e2".parse().unwrap()));
    }

    #[test]
    fn test_en_passant_generated_and_checked_for_pins() {
        let mut board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let ep = Move::new("e5".parse().unwrap(), "d6".parse().unwrap());
        assert!(board.generate_moves().contains(ep));
        assert!(board.generate_tactical_moves().contains(ep));

        // Capturing would expose the king on a5 to the rook on h5
        let mut pinned = Board::from_fen("8/8/8/K2pP2r/8/8/8/7k w - d6 0 2");
        assert!(!pinned.generate_moves().contains(ep));
    }

    #[test]
    fn test_en_passant_captures_checking_pawn() {
        // The pawn on d5 just double-pushed and gives check
        let mut board = Board::from_fen("8/8/8/3pP3/4K3/8/8/7k w - d6 0 2");
        assert!(board.is_in_check());
        let ep = Move::new("e5".parse().unwrap(), "d6".parse().unwrap());
        assert!(board.generate_moves().contains(ep));
    }

    #[test]
    fn test_promotions_expand_to_four() {
        let mut board = Board::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
        let promos = board
            .generate_moves()
            .iter()
            .filter(|mv| mv.promotion().is_some())
            .count();
        assert_eq!(promos, 4);
        assert_eq!(board.generate_tactical_moves().len(), 4);
    }

    #[test]
    fn test_castling_conditions() {
        let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let moves = board.generate_moves();
        assert!(moves.contains(Move::new(Square::E1, Square::G1)));
        assert!(moves.contains(Move::new(Square::E1, Square::C1)));

        // f1 attacked by the rook on f8: no kingside castling
        let mut board = Board::from_fen("r4rk1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let moves = board.generate_moves();
        assert!(!moves.contains(Move::new(Square::E1, Square::G1)));
        assert!(moves.contains(Move::new(Square::E1, Square::C1)));

        // In check: no castling at all
        let mut board = Board::from_fen("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let moves = board.generate_moves();
        assert!(!moves.contains(Move::new(Square::E1, Square::G1)));
        assert!(!moves.contains(Move::new(Square::E1, Square::C1)));

        // b1 occupied blocks queenside only
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
        let moves = board.generate_moves();
        assert!(moves.contains(Move::new(Square::E1, Square::G1)));
        assert!(!moves.contains(Move::new(Square::E1, Square::C1)));
    }

    #[test]
    fn test_game_status() {
        let mut mate = Board::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1");
        assert_eq!(mate.game_status(), GameStatus::Lose);
        assert!(mate.is_checkmate());

        let mut stalemate = Board::from_fen("7k/8/6QK/8/8/8/8/8 b - - 0 1");
        assert_eq!(stalemate.game_status(), GameStatus::Stalemate);
        assert!(stalemate.is_stalemate());
        assert!(!stalemate.is_checkmate());

        let mut fifty = Board::from_fen("7k/8/8/8/8/8/8/R6K b - - 100 80");
        assert_eq!(fifty.game_status(), GameStatus::Stalemate);

        assert_eq!(Board::new().game_status(), GameStatus::NoMate);
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let mut board = Board::new();
        let split = board.divide(3);
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), board.perft(3));
    }
}
