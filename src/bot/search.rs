//! Negamax alpha-beta with integrated quiescence.
//!
//! Scores are from the side to move's point of view. A cancelled search
//! returns 0 from every node; the caller throws those values away.

use crate::board::{Board, Color, Move, MAX_PLY};
use crate::sync::StopFlag;
use crate::tt::{Bound, TranspositionTable};

use super::arena::MoveStack;
use super::move_order::{next_move, score_moves};

/// Score of being checkmated at the root
pub const MATE_SCORE: i32 = 30000;

/// Scores with absolute value >= this are checkmate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

/// Larger than any score the search can return
pub(crate) const INFINITY: i32 = MATE_SCORE + 1;

#[inline]
#[must_use]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}

/// Mate scores are stored relative to the node, not the root.
#[inline]
pub(crate) fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

#[inline]
pub(crate) fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/// Whether a stored bound settles the node for this window
#[inline]
fn bound_allows_cutoff(bound: Bound, score: i32, alpha: i32, beta: i32) -> bool {
    match bound {
        Bound::Exact => true,
        Bound::Lower => score >= beta,
        Bound::Upper => score <= alpha,
    }
}

/// Everything one search needs, borrowed from the bot for its duration
pub(crate) struct Searcher<'a> {
    pub(crate) board: &'a mut Board,
    pub(crate) tt: &'a mut TranspositionTable,
    pub(crate) stack: &'a mut MoveStack,
    pub(crate) stop: &'a StopFlag,
    /// Side the bot is playing; contempt is applied against it
    pub(crate) root_side: Color,
    pub(crate) contempt: i32,
    pub(crate) quiescence_cap: Option<u32>,
    pub(crate) top_k: usize,
    pub(crate) nodes: u64,
    pub(crate) tt_hits: u64,
}

impl Searcher<'_> {
    #[inline]
    pub(crate) fn stopped(&self) -> bool {
        self.stop.is_stopped()
    }

    /// Value of a drawn position for the side to move
    #[inline]
    pub(crate) fn draw_score(&self) -> i32 {
        if self.board.side_to_move() == self.root_side {
            -self.contempt
        } else {
            self.contempt
        }
    }

    /// Full-width alpha-beta to `depth` plies, then quiescence.
    pub(crate) fn negamax(&mut self, depth: i32, ply: usize, mut alpha: i32, beta: i32) -> i32 {
        if self.stopped() {
            return 0;
        }
        if depth <= 0 {
            return self.quiescence(ply, alpha, beta, 0);
        }
        self.nodes += 1;

        if ply > 0 && self.board.is_draw_by_rule() {
            return self.draw_score();
        }
        if ply >= MAX_PLY - 1 {
            return self.board.evaluate();
        }

        let key = self.board.hash();
        let mut hint = None;
        if let Some(entry) = self.tt.probe(key) {
            hint = entry.best_move;
            if !entry.quiescence && entry.depth() >= depth as u32 {
                let score = score_from_tt(entry.score(), ply);
                // Mates found by an earlier search may no longer be reachable
                let stale_mate = is_mate_score(score) && entry.generation != self.tt.generation();
                if !stale_mate && bound_allows_cutoff(entry.bound, score, alpha, beta) {
                    self.tt_hits += 1;
                    return score;
                }
            }
        }

        let frame = self.stack.open_frame();
        self.board.generate_moves_into(self.stack);
        let count = self.stack.len(frame);
        if count == 0 {
            self.stack.close_frame(frame);
            return if self.board.is_in_check() {
                -(MATE_SCORE - ply as i32)
            } else {
                self.draw_score()
            };
        }

        // A forced reply costs nothing to look past
        let depth = if count == 1 { depth + 1 } else { depth };
        score_moves(self.board, self.stack.moves_mut(frame), hint);

        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut best_move = None;
        for idx in 0..count {
            let Some(mv) = next_move(self.stack.moves_mut(frame), idx, self.top_k) else {
                break;
            };

            let undo = self.board.make_move(mv);
            let score = -self.negamax(depth - 1, ply + 1, -beta, -alpha);
            self.board.unmake_move(mv, undo);

            if self.stopped() {
                self.stack.close_frame(frame);
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }
        self.stack.close_frame(frame);

        let bound = if best_score >= beta {
            Bound::Lower
        } else if best_score > original_alpha {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.tt.store(
            key,
            depth as u32,
            score_to_tt(best_score, ply),
            bound,
            best_move,
            false,
        );
        best_score
    }

    /// Captures and promotions until the position is quiet. In check every
    /// evasion is searched and there is no stand-pat, so mates are seen.
    pub(crate) fn quiescence(&mut self, ply: usize, mut alpha: i32, beta: i32, qdepth: u32) -> i32 {
        if self.stopped() {
            return 0;
        }
        self.nodes += 1;

        if self.board.is_draw_by_rule() {
            return self.draw_score();
        }
        let capped = self.quiescence_cap.is_some_and(|cap| qdepth >= cap);
        if ply >= MAX_PLY - 1 {
            return self.board.evaluate();
        }

        let key = self.board.hash();
        let mut hint = None;
        if let Some(entry) = self.tt.probe(key) {
            hint = entry.best_move;
            if entry.quiescence {
                let score = score_from_tt(entry.score(), ply);
                let stale_mate = is_mate_score(score) && entry.generation != self.tt.generation();
                if !stale_mate && bound_allows_cutoff(entry.bound, score, alpha, beta) {
                    self.tt_hits += 1;
                    return score;
                }
            }
        }

        let in_check = self.board.is_in_check();
        let original_alpha = alpha;
        let mut best_score = -INFINITY;

        if !in_check {
            let stand_pat = self.board.evaluate();
            if stand_pat >= beta || capped {
                return stand_pat;
            }
            best_score = stand_pat;
            alpha = alpha.max(stand_pat);
        } else if capped {
            return self.board.evaluate();
        }

        let frame = self.stack.open_frame();
        if in_check {
            self.board.generate_moves_into(self.stack);
        } else {
            self.board.generate_tactical_moves_into(self.stack);
        }
        let count = self.stack.len(frame);
        if count == 0 {
            self.stack.close_frame(frame);
            return if in_check {
                -(MATE_SCORE - ply as i32)
            } else {
                best_score
            };
        }
        score_moves(self.board, self.stack.moves_mut(frame), hint);

        let mut best_move = None;
        for idx in 0..count {
            let Some(mv) = next_move(self.stack.moves_mut(frame), idx, self.top_k) else {
                break;
            };

            let undo = self.board.make_move(mv);
            let score = -self.quiescence(ply + 1, -beta, -alpha, qdepth + 1);
            self.board.unmake_move(mv, undo);

            if self.stopped() {
                self.stack.close_frame(frame);
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }
        self.stack.close_frame(frame);

        let bound = if best_score >= beta {
            Bound::Lower
        } else if best_score > original_alpha {
            Bound::Exact
        } else {
            Bound::Upper
        };
        self.tt.store(key, 0, score_to_tt(best_score, ply), bound, best_move, true);
        best_score
    }

    /// Search every root move to `depth`. Returns the best move and score
    /// among the moves that finished, or `None` if cancellation came before
    /// the first one did. The flag is true when all root moves finished.
    pub(crate) fn search_root(&mut self, depth: i32, hint: Option<Move>) -> Option<(Move, i32, bool)> {
        let frame = self.stack.open_frame();
        self.board.generate_moves_into(self.stack);
        let count = self.stack.len(frame);
        score_moves(self.board, self.stack.moves_mut(frame), hint);

        let mut alpha = -INFINITY;
        let mut best: Option<(Move, i32)> = None;
        let mut completed = true;
        for idx in 0..count {
            if self.stopped() {
                completed = false;
                break;
            }
            // The root list is short; order all of it
            let Some(mv) = next_move(self.stack.moves_mut(frame), idx, count) else {
                break;
            };

            let undo = self.board.make_move(mv);
            let score = -self.negamax(depth - 1, 1, -INFINITY, -alpha);
            self.board.unmake_move(mv, undo);

            if self.stopped() {
                completed = false;
                break;
            }
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((mv, score));
                alpha = alpha.max(score);
            }
        }
        self.stack.close_frame(frame);

        let (mv, score) = best?;
        if completed {
            let key = self.board.hash();
            self.tt.store(key, depth as u32, score_to_tt(score, 0), Bound::Exact, Some(mv), false);
        }
        Some((mv, score, completed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(fen: &str, depth: i32) -> (Move, i32) {
        let mut board = Board::from_fen(fen);
        let mut tt = TranspositionTable::new(1);
        let mut stack = MoveStack::new();
        let stop = StopFlag::new();
        let root_side = board.side_to_move();
        let mut searcher = Searcher {
            board: &mut board,
            tt: &mut tt,
            stack: &mut stack,
            stop: &stop,
            root_side,
            contempt: 20,
            quiescence_cap: None,
            top_k: 8,
            nodes: 0,
            tt_hits: 0,
        };
        let (mv, score, completed) = searcher.search_root(depth, None).expect("root moves");
        assert!(completed);
        assert_eq!(stack.depth(), 0);
        (mv, score)
    }

    #[test]
    fn test_mate_score_rebasing() {
        let mate_in_3 = MATE_SCORE - 3;
        assert_eq!(score_from_tt(score_to_tt(mate_in_3, 2), 2), mate_in_3);
        assert_eq!(score_to_tt(mate_in_3, 2), MATE_SCORE - 1);
        assert_eq!(score_to_tt(-mate_in_3, 2), -(MATE_SCORE - 1));
        assert_eq!(score_to_tt(150, 7), 150);
        assert!(is_mate_score(-mate_in_3));
        assert!(!is_mate_score(900));
    }

    #[test]
    fn test_finds_mate_in_one() {
        let (mv, score) = search("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 2);
        assert_eq!(mv.to_string(), "a1a8");
        assert_eq!(score, MATE_SCORE - 1);
    }

    #[test]
    fn test_takes_hanging_queen() {
        let (mv, _) = search("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 3);
        assert_eq!(mv.to_string(), "d1d5");
    }

    #[test]
    fn test_quiescence_sees_recapture() {
        // Qxd5 loses the queen to exd5; depth 1 alone would grab the pawn
        let (mv, _) = search("4k3/8/4p3/3p4/8/8/8/3QK3 w - - 0 1", 1);
        assert_ne!(mv.to_string(), "d1d5");
    }

    #[test]
    fn test_quiescence_detects_mate_in_check() {
        let mut board = Board::from_fen("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        let mut tt = TranspositionTable::new(1);
        let mut stack = MoveStack::new();
        let stop = StopFlag::new();
        let mut searcher = Searcher {
            board: &mut board,
            tt: &mut tt,
            stack: &mut stack,
            stop: &stop,
            root_side: Color::White,
            contempt: 0,
            quiescence_cap: Some(2),
            top_k: 8,
            nodes: 0,
            tt_hits: 0,
        };
        assert_eq!(searcher.quiescence(0, -INFINITY, INFINITY, 0), -MATE_SCORE);
    }

    #[test]
    fn test_cancelled_search_returns_nothing() {
        let mut board = Board::new();
        let mut tt = TranspositionTable::new(1);
        let mut stack = MoveStack::new();
        let stop = StopFlag::new();
        stop.stop();
        let mut searcher = Searcher {
            board: &mut board,
            tt: &mut tt,
            stack: &mut stack,
            stop: &stop,
            root_side: Color::White,
            contempt: 0,
            quiescence_cap: None,
            top_k: 8,
            nodes: 0,
            tt_hits: 0,
        };
        assert!(searcher.search_root(3, None).is_none());
        assert_eq!(stack.depth(), 0);
        assert_eq!(board.to_fen(), crate::board::STARTING_FEN);
    }
}
