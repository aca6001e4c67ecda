use super::state::{Board, UnmoveData};
use super::types::{Bitboard, Color, Move, MoveFlag, Piece, Square};
use crate::zobrist::ZOBRIST;

/// What `quick_make` needs to revert itself.
#[derive(Clone, Copy, Debug)]
pub(crate) struct QuickUndo {
    mover: Piece,
    captured: Option<(Piece, Square)>,
    rook: Option<(Square, Square)>,
}

/// Rook origin and destination for a castling king move
#[inline]
fn castling_rook_squares(king_from: Square, kingside: bool) -> (Square, Square) {
    if kingside {
        (king_from.offset(3), king_from.offset(1))
    } else {
        (king_from.offset(-4), king_from.offset(-1))
    }
}

impl Board {
    /// Place a piece on an empty square, updating every view and the hash.
    pub(crate) fn put_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        debug_assert!(self.squares[sq.index()].is_none(), "square {sq} occupied");
        let bb = Bitboard::from_square(sq);
        let (c, p) = (color.index(), piece.index());
        self.squares[sq.index()] = Some((color, piece));
        self.pieces[c][p] |= bb;
        self.occupied[c] |= bb;
        self.all_occupied |= bb;
        self.piece_count[c][p] += 1;
        if piece == Piece::King {
            self.king_square[c] = sq;
        }
        self.hash ^= ZOBRIST.piece(color, piece, sq);
    }

    /// Remove whatever stands on `sq`, updating every view and the hash.
    pub(crate) fn remove_piece(&mut self, sq: Square) -> Option<(Color, Piece)> {
        let (color, piece) = self.squares[sq.index()].take()?;
        let bb = !Bitboard::from_square(sq);
        let (c, p) = (color.index(), piece.index());
        self.pieces[c][p] &= bb;
        self.occupied[c] &= bb;
        self.all_occupied &= bb;
        self.piece_count[c][p] -= 1;
        self.hash ^= ZOBRIST.piece(color, piece, sq);
        Some((color, piece))
    }

    fn move_piece(&mut self, from: Square, to: Square) {
        if let Some((color, piece)) = self.remove_piece(from) {
            self.put_piece(to, color, piece);
        }
    }

    /// Compute the Zobrist hash from scratch.
    #[must_use]
    pub fn calculate_hash(&self) -> u64 {
        let mut hash = 0;
        for (idx, slot) in self.squares.iter().enumerate() {
            if let Some((color, piece)) = slot {
                hash ^= ZOBRIST.piece(*color, *piece, Square::from_index(idx));
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.side();
        }
        hash ^= ZOBRIST.castling(self.castling_rights);
        if let Some(file) = self.en_passant_file {
            hash ^= ZOBRIST.en_passant(file);
        }
        hash
    }

    /// Derive the move classification from the board before the move is made.
    pub(crate) fn classify_move(&self, mv: Move, mover: Piece, captured: Option<Piece>) -> MoveFlag {
        let (from, to) = (mv.from(), mv.to());
        if mover == Piece::King && from.file().abs_diff(to.file()) == 2 {
            return if to.file() > from.file() {
                MoveFlag::KingsideCastle
            } else {
                MoveFlag::QueensideCastle
            };
        }
        if mv.promotion().is_some() {
            return MoveFlag::Promotion;
        }
        if mover == Piece::Pawn {
            if from.rank().abs_diff(to.rank()) == 2 {
                return MoveFlag::DoublePawnPush;
            }
            if captured.is_none() && from.file() != to.file() {
                return MoveFlag::EnPassant;
            }
        }
        if captured.is_some() {
            MoveFlag::Capture
        } else {
            MoveFlag::Normal
        }
    }

    /// Play a legal move, updating all state incrementally.
    ///
    /// # Panics
    ///
    /// Panics if there is no piece on the move's origin square. Callers only
    /// pass moves produced by legal move generation.
    pub fn make_move(&mut self, mv: Move) -> UnmoveData {
        let us = self.side_to_move;
        let (from, to) = (mv.from(), mv.to());
        let Some((color, mover)) = self.squares[from.index()] else {
            panic!("make_move {mv}: no piece on {from}");
        };
        debug_assert_eq!(color, us, "make_move {mv}: moving the opponent's piece");

        let target = self.squares[to.index()].map(|(_, p)| p);
        let flag = self.classify_move(mv, mover, target);
        let mut undo = UnmoveData {
            captured: target,
            flag,
            castling_rights: self.castling_rights,
            en_passant_file: self.en_passant_file,
            halfmove_clock: self.halfmove_clock,
            hash: self.hash,
        };

        if let Some(file) = self.en_passant_file.take() {
            self.hash ^= ZOBRIST.en_passant(file);
        }
        self.hash ^= ZOBRIST.castling(self.castling_rights);

        if flag == MoveFlag::EnPassant {
            self.remove_piece(to.offset(-us.pawn_push()));
            undo.captured = Some(Piece::Pawn);
        } else if target.is_some() {
            self.remove_piece(to);
        }

        if let Some(promo) = mv.promotion() {
            self.remove_piece(from);
            self.put_piece(to, us, promo);
        } else {
            self.move_piece(from, to);
        }

        match flag {
            MoveFlag::KingsideCastle | MoveFlag::QueensideCastle => {
                let (rook_from, rook_to) =
                    castling_rook_squares(from, flag == MoveFlag::KingsideCastle);
                self.move_piece(rook_from, rook_to);
                self.has_castled[us.index()] = true;
            }
            MoveFlag::DoublePawnPush => {
                let file = from.file() as u8;
                self.en_passant_file = Some(file);
                self.hash ^= ZOBRIST.en_passant(file);
            }
            _ => {}
        }

        self.castling_rights.update_for_move(from.index(), to.index());
        self.hash ^= ZOBRIST.castling(self.castling_rights);

        if mover == Piece::Pawn || undo.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = us.opponent();
        self.hash ^= ZOBRIST.side();
        self.history.push(self.hash);
        self.move_log.push(mv);

        undo
    }

    /// Reverse the most recent `make_move`. `mv` and `undo` must be the pair
    /// that call used and returned.
    pub fn unmake_move(&mut self, mv: Move, undo: UnmoveData) {
        debug_assert_eq!(self.history.last(), Some(&self.hash), "history out of sync");
        debug_assert_eq!(self.move_log.last(), Some(&mv), "unmake_move out of order");
        self.history.pop();
        self.move_log.pop();

        let us = self.side_to_move.opponent();
        let them = self.side_to_move;
        let (from, to) = (mv.from(), mv.to());
        self.side_to_move = us;
        if us == Color::Black {
            self.fullmove_number -= 1;
        }

        if undo.flag.is_castle() {
            let (rook_from, rook_to) =
                castling_rook_squares(from, undo.flag == MoveFlag::KingsideCastle);
            self.move_piece(rook_to, rook_from);
            self.has_castled[us.index()] = false;
        }

        if mv.promotion().is_some() {
            self.remove_piece(to);
            self.put_piece(from, us, Piece::Pawn);
        } else {
            self.move_piece(to, from);
        }

        if let Some(captured) = undo.captured {
            let sq = if undo.flag == MoveFlag::EnPassant {
                to.offset(-us.pawn_push())
            } else {
                to
            };
            self.put_piece(sq, them, captured);
        }

        self.castling_rights = undo.castling_rights;
        self.en_passant_file = undo.en_passant_file;
        self.halfmove_clock = undo.halfmove_clock;
        self.hash = undo.hash;
    }

    #[inline]
    fn toggle(&mut self, color: Color, piece: Piece, sq: Square) {
        let bb = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] ^= bb;
        self.occupied[color.index()] ^= bb;
        self.all_occupied ^= bb;
    }

    /// Apply a move to the bitboards and cached king square only. The square
    /// array, hash, counts and side to move are left alone, so this is only
    /// good for asking "is my king attacked afterwards" and must be reverted
    /// with `quick_unmake` before anything else touches the board.
    pub(crate) fn quick_make(&mut self, mv: Move) -> QuickUndo {
        let us = self.side_to_move;
        let them = us.opponent();
        let (from, to) = (mv.from(), mv.to());
        let mover = self.squares[from.index()].map_or(Piece::Pawn, |(_, p)| p);

        let captured = match self.squares[to.index()] {
            Some((_, piece)) => Some((piece, to)),
            None if mover == Piece::Pawn && from.file() != to.file() => {
                Some((Piece::Pawn, to.offset(-us.pawn_push())))
            }
            None => None,
        };
        if let Some((piece, sq)) = captured {
            self.toggle(them, piece, sq);
        }

        self.toggle(us, mover, from);
        self.toggle(us, mv.promotion().unwrap_or(mover), to);

        let mut rook = None;
        if mover == Piece::King {
            if from.file().abs_diff(to.file()) == 2 {
                let squares = castling_rook_squares(from, to.file() > from.file());
                self.toggle(us, Piece::Rook, squares.0);
                self.toggle(us, Piece::Rook, squares.1);
                rook = Some(squares);
            }
            self.king_square[us.index()] = to;
        }

        QuickUndo {
            mover,
            captured,
            rook,
        }
    }

    pub(crate) fn quick_unmake(&mut self, mv: Move, undo: QuickUndo) {
        let us = self.side_to_move;
        let (from, to) = (mv.from(), mv.to());

        if let Some((rook_from, rook_to)) = undo.rook {
            self.toggle(us, Piece::Rook, rook_to);
            self.toggle(us, Piece::Rook, rook_from);
        }
        self.toggle(us, mv.promotion().unwrap_or(undo.mover), to);
        self.toggle(us, undo.mover, from);
        if let Some((piece, sq)) = undo.captured {
            self.toggle(us.opponent(), piece, sq);
        }
        if undo.mover == Piece::King {
            self.king_square[us.index()] = from;
        }
    }
}
