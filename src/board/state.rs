use std::fmt;

use super::types::{Bitboard, CastlingRights, Color, Move, MoveFlag, Piece, Square};

/// Everything `make_move` overwrites that cannot be derived from the move
/// itself. Must be handed back to `unmake_move` with the same move, in
/// strict LIFO order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnmoveData {
    pub(crate) captured: Option<Piece>,
    pub(crate) flag: MoveFlag,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_file: Option<u8>,
    pub(crate) halfmove_clock: u32,
    pub(crate) hash: u64,
}

impl UnmoveData {
    #[must_use]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[must_use]
    pub fn flag(&self) -> MoveFlag {
        self.flag
    }
}

/// Outcome of a position for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// The game goes on
    NoMate,
    /// Side to move is checkmated
    Lose,
    /// Stalemate, threefold repetition or the fifty-move rule
    Stalemate,
}

#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) squares: [Option<(Color, Piece)>; 64],
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) all_occupied: Bitboard,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_file: Option<u8>,
    pub(crate) has_castled: [bool; 2],
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64,
    // One hash per position reached, including the starting one
    pub(crate) history: Vec<u64>,
    pub(crate) king_square: [Square; 2],
    pub(crate) piece_count: [[u8; 6]; 2],
    pub(crate) move_log: Vec<Move>,
    pub(crate) from_standard_start: bool,
}

impl Board {
    /// The standard starting position
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            board.put_piece(Square::from_index(file), Color::White, *piece);
            board.put_piece(Square::from_index(56 + file), Color::Black, *piece);
            board.put_piece(Square::from_index(8 + file), Color::White, Piece::Pawn);
            board.put_piece(Square::from_index(48 + file), Color::Black, Piece::Pawn);
        }

        board.castling_rights = CastlingRights::all();
        board.from_standard_start = true;
        board.reset_hash_and_history();
        board
    }

    /// A board with no pieces, White to move. Not a legal position on its own.
    pub(crate) fn empty() -> Self {
        Board {
            squares: [None; 64],
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            all_occupied: Bitboard::EMPTY,
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_file: None,
            has_castled: [false; 2],
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            history: Vec::with_capacity(256),
            king_square: [Square::E1, Square::E8],
            piece_count: [[0; 6]; 2],
            move_log: Vec::with_capacity(256),
            from_standard_start: false,
        }
    }

    /// Recompute the hash from scratch and restart the repetition history.
    /// Only used when a position is set up, never during play.
    pub(crate) fn reset_hash_and_history(&mut self) {
        self.hash = self.calculate_hash();
        self.history.clear();
        self.history.push(self.hash);
        self.move_log.clear();
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        self.squares[sq.index()]
    }

    #[must_use]
    pub fn pieces(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    #[must_use]
    pub fn occupied_by(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.all_occupied
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// File of the en passant target, only set right after a double push
    #[must_use]
    pub fn en_passant_file(&self) -> Option<u8> {
        self.en_passant_file
    }

    /// Square a pawn capturing en passant would land on
    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        let file = usize::from(self.en_passant_file?);
        let rank = match self.side_to_move {
            Color::White => 5,
            Color::Black => 2,
        };
        Square::new(rank, file)
    }

    #[must_use]
    pub fn has_castled(&self, color: Color) -> bool {
        self.has_castled[color.index()]
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_square[color.index()]
    }

    #[must_use]
    pub fn piece_count(&self, color: Color, piece: Piece) -> u32 {
        u32::from(self.piece_count[color.index()][piece.index()])
    }

    /// Moves played since the position was set up
    #[must_use]
    pub fn moves_played(&self) -> &[Move] {
        &self.move_log
    }

    /// True if the position was set up as the standard starting position,
    /// so `moves_played` is a line an opening book can follow.
    #[must_use]
    pub fn started_from_standard(&self) -> bool {
        self.from_standard_start
    }

    /// How many times the current position has occurred, counting this one.
    /// Only positions since the last capture or pawn move can repeat.
    #[must_use]
    pub fn repetition_count(&self) -> usize {
        let window = (self.halfmove_clock as usize + 1).min(self.history.len());
        self.history[self.history.len() - window..]
            .iter()
            .filter(|&&h| h == self.hash)
            .count()
    }

    /// Threefold repetition or the fifty-move rule
    #[must_use]
    pub fn is_draw_by_rule(&self) -> bool {
        self.halfmove_clock >= 100 || self.repetition_count() >= 3
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = match self.squares[rank * 8 + file] {
                    Some((color, piece)) => piece.to_fen_char(color),
                    None => '.',
                };
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        write!(f, "{} to move", self.side_to_move)
    }
}
