//! Algebraic notation for display.
//!
//! Produces the human-readable form used in logs and scoresheets, e.g.
//! "e4", "Nbd7", "Bxc6+", "O-O-O", "e8=Q#", "exd6 e.p.". Input always goes
//! through coordinate notation (`Board::parse_move`).
//!
//! # Examples
//! ```
//! use chess_bot::board::Board;
//!
//! let mut board = Board::new();
//! let mv = board.parse_move("g1f3").unwrap();
//! assert_eq!(board.to_algebraic(mv), "Nf3");
//! ```

use super::{Board, Move, MoveFlag, Piece};

impl Board {
    /// Format a legal move of the side to move in algebraic notation.
    pub fn to_algebraic(&mut self, mv: Move) -> String {
        let (from, to) = (mv.from(), mv.to());
        let Some((_, piece)) = self.piece_at(from) else {
            return mv.to_string();
        };
        let captured = self.piece_at(to).map(|(_, p)| p);
        let flag = self.classify_move(mv, piece, captured);

        let mut san = String::new();
        match flag {
            MoveFlag::KingsideCastle => san.push_str("O-O"),
            MoveFlag::QueensideCastle => san.push_str("O-O-O"),
            _ => {
                let is_capture = captured.is_some() || flag == MoveFlag::EnPassant;
                if piece == Piece::Pawn {
                    if is_capture {
                        san.push(file_char(from.file()));
                    }
                } else {
                    san.push(piece.to_char().to_ascii_uppercase());
                    let (needs_file, needs_rank) = self.needs_disambiguation(mv, piece);
                    if needs_file {
                        san.push(file_char(from.file()));
                    }
                    if needs_rank {
                        san.push(rank_char(from.rank()));
                    }
                }
                if is_capture {
                    san.push('x');
                }
                san.push_str(&to.to_string());
                if let Some(promo) = mv.promotion() {
                    san.push('=');
                    san.push(promo.to_char().to_ascii_uppercase());
                }
                if flag == MoveFlag::EnPassant {
                    san.push_str(" e.p.");
                }
            }
        }

        let undo = self.make_move(mv);
        if self.is_checkmate() {
            san.push('#');
        } else if self.is_in_check() {
            san.push('+');
        }
        self.unmake_move(mv, undo);

        san
    }

    /// Whether the origin file and/or rank is needed to tell `mv` apart from
    /// another legal move of the same piece type to the same square.
    fn needs_disambiguation(&mut self, mv: Move, piece: Piece) -> (bool, bool) {
        let moves = self.generate_moves();
        let rivals: Vec<Move> = moves
            .iter()
            .copied()
            .filter(|m| {
                m.to() == mv.to()
                    && m.from() != mv.from()
                    && self.piece_at(m.from()).map(|(_, p)| p) == Some(piece)
            })
            .collect();

        if rivals.is_empty() {
            return (false, false);
        }

        let same_file = rivals.iter().any(|m| m.from().file() == mv.from().file());
        let same_rank = rivals.iter().any(|m| m.from().rank() == mv.from().rank());
        match (same_file, same_rank) {
            (false, _) => (true, false),
            (true, false) => (false, true),
            (true, true) => (true, true),
        }
    }
}

fn file_char(file: usize) -> char {
    (b'a' + file as u8) as char
}

fn rank_char(rank: usize) -> char {
    (b'1' + rank as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn algebraic(fen: &str, uci: &str) -> String {
        let mut board = Board::from_fen(fen);
        let mv = board.parse_move(uci).expect("legal move");
        board.to_algebraic(mv)
    }

    #[test]
    fn test_pawn_and_piece_moves() {
        let start = crate::board::STARTING_FEN;
        assert_eq!(algebraic(start, "e2e4"), "e4");
        assert_eq!(algebraic(start, "b1c3"), "Nc3");
    }

    #[test]
    fn test_captures() {
        let fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2";
        assert_eq!(algebraic(fen, "e4d5"), "exd5");
        let fen = "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";
        assert_eq!(algebraic(fen, "b5c6"), "Bxc6");
    }

    #[test]
    fn test_disambiguation() {
        // Knights on b1 and f1 can both reach d2
        assert_eq!(algebraic("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1", "b1d2"), "Nbd2");
        // Rooks on a1 and a5 share the file
        assert_eq!(algebraic("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1", "a1a3"), "R1a3");
        // Queens on a1, a3 and c1 all reach b2: both file and rank needed for a1
        assert_eq!(algebraic("4k3/8/8/8/8/Q7/8/Q1Q1K3 w - - 0 1", "a1b2"), "Qa1b2");
    }

    #[test]
    fn test_castling_and_promotion() {
        let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_eq!(algebraic(fen, "e1g1"), "O-O");
        assert_eq!(algebraic(fen, "e1c1"), "O-O-O");
        assert_eq!(algebraic("8/P6k/8/8/8/8/8/K7 w - - 0 1", "a7a8n"), "a8=N");
    }

    #[test]
    fn test_en_passant_suffix() {
        let fen = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2";
        assert_eq!(algebraic(fen, "e5d6"), "exd6 e.p.");
    }

    #[test]
    fn test_check_and_mate_markers() {
        let fen = "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4";
        assert_eq!(algebraic(fen, "h5f7"), "Qxf7#");
        assert_eq!(algebraic("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", "a1a8"), "Ra8+");
    }

    #[test]
    fn test_board_unchanged_after_formatting() {
        let mut board = Board::new();
        let before = board.to_fen();
        let mv = board.parse_move("d2d4").expect("legal move");
        board.to_algebraic(mv);
        assert_eq!(board.to_fen(), before);
        assert_eq!(board.moves_played().len(), 0);
    }
}
