//! Move storage reused across the whole search.
//!
//! Each node opens a frame on top of the stack, generates into it, and
//! closes it before returning. Frames must nest exactly like the recursion:
//! closing anything but the topmost frame corrupts the frames above it.

use crate::board::{Move, MoveSink, ScoredMove, MAX_MOVES, MAX_PLY};

/// Start offset of an open frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub(crate) struct Frame(usize);

#[derive(Debug)]
pub(crate) struct MoveStack {
    moves: Vec<ScoredMove>,
    open: Vec<usize>,
}

impl MoveStack {
    pub(crate) fn new() -> Self {
        MoveStack {
            // Typical search trees stay well below this
            moves: Vec::with_capacity(MAX_PLY * MAX_MOVES / 4),
            open: Vec::with_capacity(MAX_PLY),
        }
    }

    /// Open a new frame at the top; generated moves land in it.
    pub(crate) fn open_frame(&mut self) -> Frame {
        let start = self.moves.len();
        self.open.push(start);
        Frame(start)
    }

    /// Close the topmost frame, discarding its moves.
    pub(crate) fn close_frame(&mut self, frame: Frame) {
        let top = self.open.pop();
        debug_assert_eq!(top, Some(frame.0), "move stack frames closed out of order");
        self.moves.truncate(frame.0);
    }

    pub(crate) fn len(&self, frame: Frame) -> usize {
        self.moves.len() - frame.0
    }

    pub(crate) fn moves_mut(&mut self, frame: Frame) -> &mut [ScoredMove] {
        &mut self.moves[frame.0..]
    }

    #[cfg(test)]
    pub(crate) fn get(&self, frame: Frame, idx: usize) -> ScoredMove {
        self.moves[frame.0 + idx]
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.open.len()
    }

    pub(crate) fn clear(&mut self) {
        self.moves.clear();
        self.open.clear();
    }
}

impl MoveSink for MoveStack {
    #[inline]
    fn push_move(&mut self, mv: Move) {
        self.moves.push(ScoredMove { mv, score: 0 });
    }
}

impl Default for MoveStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_frames_nest() {
        let mut stack = MoveStack::new();
        let mut board = Board::new();

        let outer = stack.open_frame();
        board.generate_moves_into(&mut stack);
        assert_eq!(stack.len(outer), 20);

        let mv = stack.get(outer, 0).mv;
        let undo = board.make_move(mv);
        let inner = stack.open_frame();
        board.generate_moves_into(&mut stack);
        assert_eq!(stack.len(inner), board.generate_moves().len());
        assert_eq!(stack.depth(), 2);
        stack.close_frame(inner);
        board.unmake_move(mv, undo);

        // The outer frame is untouched by the inner one
        assert_eq!(stack.len(outer), 20);
        assert_eq!(stack.get(outer, 0).mv, mv);
        stack.close_frame(outer);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn test_scores_live_in_frame() {
        let mut stack = MoveStack::new();
        let mut board = Board::new();
        let frame = stack.open_frame();
        board.generate_moves_into(&mut stack);
        for (i, scored) in stack.moves_mut(frame).iter_mut().enumerate() {
            scored.score = i as i32;
        }
        assert_eq!(stack.get(frame, 19).score, 19);
        stack.close_frame(frame);
        stack.clear();
    }
}
