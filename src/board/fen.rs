use std::str::FromStr;

use super::error::{FenError, MoveParseError};
use super::{Board, CastlingRights, Color, Move, Piece, Square};

/// FEN of the standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Board {
    /// Parse a board position from FEN notation.
    ///
    /// The halfmove clock and fullmove number may be omitted; they default
    /// to 0 and 1.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if !(4..=6).contains(&parts.len()) {
            return Err(FenError::WrongFieldCount { found: parts.len() });
        }

        // Piece placement, rank 8 first
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRank { rank: ranks.len() });
        }
        let mut kings = [0u32; 2];
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(run) = c.to_digit(10) {
                    if !(1..=8).contains(&run) {
                        return Err(FenError::InvalidPiece { char: c });
                    }
                    file += run as usize;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let Some(sq) = Square::new(rank, file) else {
                    return Err(FenError::BadRankLength {
                        rank: rank + 1,
                        files: file + 1,
                    });
                };
                if piece == Piece::King {
                    kings[color.index()] += 1;
                }
                board.put_piece(sq, color, piece);
                file += 1;
            }
            if file != 8 {
                return Err(FenError::BadRankLength {
                    rank: rank + 1,
                    files: file,
                });
            }
        }
        for color in Color::BOTH {
            match kings[color.index()] {
                0 => return Err(FenError::MissingKing { color }),
                1 => {}
                _ => return Err(FenError::TooManyKings { color }),
            }
        }

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut rights = CastlingRights::none();
        if parts[2] != "-" {
            for c in parts[2].chars() {
                match c {
                    'K' => rights.set(Color::White, true),
                    'Q' => rights.set(Color::White, false),
                    'k' => rights.set(Color::Black, true),
                    'q' => rights.set(Color::Black, false),
                    _ => return Err(FenError::InvalidCastling { char: c }),
                }
            }
        }
        board.castling_rights = rights;

        // Only the file is kept; the rank must match the side that just
        // double-pushed.
        board.en_passant_file = if parts[3] == "-" {
            None
        } else {
            let expected_rank = match board.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            match parts[3].parse::<Square>() {
                Ok(sq) if sq.rank() == expected_rank => Some(sq.file() as u8),
                _ => {
                    return Err(FenError::InvalidEnPassant {
                        found: parts[3].to_string(),
                    })
                }
            }
        };

        if let Some(field) = parts.get(4) {
            board.halfmove_clock = field.parse().map_err(|_| FenError::InvalidClock {
                field: "halfmove clock",
                found: (*field).to_string(),
            })?;
        }
        if let Some(field) = parts.get(5) {
            board.fullmove_number = field.parse().map_err(|_| FenError::InvalidClock {
                field: "fullmove number",
                found: (*field).to_string(),
            })?;
        }

        board.from_standard_start = parts[..4] == STARTING_FEN.split(' ').collect::<Vec<_>>()[..4];
        board.reset_hash_and_history();
        Ok(board)
    }

    /// Parse a board position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        match Self::try_from_fen(fen) {
            Ok(board) => board,
            Err(err) => panic!("invalid FEN '{fen}': {err}"),
        }
    }

    /// Convert the board position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = self.squares[rank * 8 + file] {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let mut castling = String::new();
        for (color, kingside, c) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if self.castling_rights.has(color, kingside) {
                castling.push(c);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }
        let ep = self
            .en_passant_square()
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in coordinate notation (e.g., "e2e4", "e7e8q") and
    /// return the matching legal move.
    ///
    /// # Example
    /// ```
    /// use chess_bot::board::Board;
    ///
    /// let mut board = Board::new();
    /// let mv = board.parse_move("e2e4").unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub fn parse_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        if !text.is_ascii() || text.len() < 4 || text.len() > 5 {
            return Err(MoveParseError::InvalidLength {
                len: text.chars().count(),
            });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from: Square = text[0..2].parse().map_err(|_| invalid_square())?;
        let to: Square = text[2..4].parse().map_err(|_| invalid_square())?;

        let promotion = match text[4..].chars().next() {
            Some(c) => match Piece::from_char(c) {
                Some(piece) if !matches!(piece, Piece::Pawn | Piece::King) => Some(piece),
                _ => return Err(MoveParseError::InvalidPromotion { char: c }),
            },
            None => None,
        };

        let legal_moves = self.generate_moves();
        legal_moves
            .iter()
            .copied()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: text.to_string(),
            })
    }

    /// Parse a coordinate-notation move and play it.
    pub fn make_move_str(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let mv = self.parse_move(text)?;
        self.make_move(mv);
        Ok(mv)
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_round_trip() {
        let board = Board::try_from_fen(STARTING_FEN).expect("valid fen");
        assert_eq!(board.to_fen(), STARTING_FEN);
        assert!(board.started_from_standard());
        assert_eq!(board.hash(), Board::new().hash());
    }

    #[test]
    fn test_fen_black_to_move() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let board = Board::try_from_fen(fen).expect("valid fen");
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.en_passant_file(), Some(4));
        assert_eq!(board.to_fen(), fen);
        assert!(!board.started_from_standard());
    }

    #[test]
    fn test_fen_short_form_defaults_clocks() {
        let board = Board::try_from_fen("8/8/8/8/8/8/8/K1k5 w - -").expect("valid fen");
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn test_fen_error_field_count() {
        let result = Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert!(matches!(result, Err(FenError::WrongFieldCount { found: 2 })));
        let result = Board::try_from_fen(&format!("{STARTING_FEN} extra"));
        assert!(matches!(result, Err(FenError::WrongFieldCount { found: 7 })));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let result =
            Board::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(result.err(), Some(FenError::InvalidPiece { char: 'x' }));
    }

    #[test]
    fn test_fen_error_rank_shape() {
        let result = Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(result.err(), Some(FenError::InvalidRank { rank: 7 }));
        let result =
            Board::try_from_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::BadRankLength { rank: 7, .. })));
        let result = Board::try_from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(
            result.err(),
            Some(FenError::BadRankLength { rank: 7, files: 7 })
        );
    }

    #[test]
    fn test_fen_error_kings() {
        let result = Board::try_from_fen("8/8/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(
            result.err(),
            Some(FenError::MissingKing {
                color: Color::Black
            })
        );
        let result = Board::try_from_fen("k7/8/8/8/8/8/8/K6K w - - 0 1");
        assert_eq!(
            result.err(),
            Some(FenError::TooManyKings {
                color: Color::White
            })
        );
    }

    #[test]
    fn test_fen_error_side_castling_ep_clock() {
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1");
        assert_eq!(result.err(), Some(FenError::InvalidCastling { char: 'X' }));
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        // Wrong rank for the side to move
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
        let result =
            Board::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1");
        assert!(matches!(result, Err(FenError::InvalidClock { .. })));
    }

    #[test]
    fn test_fen_partial_castling() {
        let board = Board::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").expect("valid fen");
        let rights = board.castling_rights();
        assert!(rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(!rights.has(Color::Black, true));
        assert!(rights.has(Color::Black, false));
    }

    #[test]
    fn test_parse_move() {
        let mut board = Board::new();
        let mv = board.parse_move("e2e4").expect("legal move");
        assert_eq!(mv.from(), Square::new(1, 4).expect("on board"));
        assert_eq!(mv.to(), Square::new(3, 4).expect("on board"));
    }

    #[test]
    fn test_parse_move_promotion() {
        let mut board = Board::try_from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1").expect("valid fen");
        let mv = board.parse_move("a7a8q").expect("legal move");
        assert_eq!(mv.promotion(), Some(Piece::Queen));
        // Bare promotion without a piece letter is not a legal move
        assert!(matches!(
            board.parse_move("a7a8"),
            Err(MoveParseError::IllegalMove { .. })
        ));
        assert_eq!(
            board.parse_move("a7a8p"),
            Err(MoveParseError::InvalidPromotion { char: 'p' })
        );
    }

    #[test]
    fn test_parse_move_errors() {
        let mut board = Board::new();
        assert_eq!(
            board.parse_move("e2"),
            Err(MoveParseError::InvalidLength { len: 2 })
        );
        assert!(matches!(
            board.parse_move("z9z9"),
            Err(MoveParseError::InvalidSquare { .. })
        ));
        assert!(matches!(
            board.parse_move("e2e5"),
            Err(MoveParseError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_make_move_str() {
        let mut board: Board = STARTING_FEN.parse().expect("valid fen");
        board.make_move_str("e2e4").expect("legal move");
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.en_passant_file(), Some(4));
        assert_eq!(
            board.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }
}
