//! Iterative deepening driver.

use std::time::{Duration, Instant};

use log::{debug, warn};

use super::search::{is_mate_score, Searcher, MATE_SCORE};
use super::{Bot, SearchReport};
use crate::board::Move;

/// Deepest iteration tried when no depth cap is configured
const MAX_ITERATION_DEPTH: u32 = 64;

impl Bot {
    /// Search depth 1, 2, ... until time runs out, the depth cap is hit or
    /// a forced mate is found. A cut-short iteration still counts if it
    /// finished at least one root move, since the previous best is tried
    /// first.
    pub(super) fn iterative_deepening(&mut self, max_time: Duration) -> SearchReport {
        let start = Instant::now();
        let Some(first_legal) = self.board.generate_moves().first() else {
            return empty_report();
        };

        self.tt.new_search();
        self.stack.clear();
        self.timer.arm(max_time);
        let report = self.deepen(first_legal, start);
        self.timer.disarm();
        report
    }

    /// The deepening loop proper, run with the stop flag already armed.
    /// Plays `fallback` if not even one root move finished.
    fn deepen(&mut self, fallback: Move, start: Instant) -> SearchReport {
        let mut report = empty_report();
        let max_depth = self.config.max_depth.unwrap_or(MAX_ITERATION_DEPTH);
        let root_side = self.board.side_to_move();
        let mut searcher = Searcher {
            board: &mut self.board,
            tt: &mut self.tt,
            stack: &mut self.stack,
            stop: &self.stop,
            root_side,
            contempt: self.config.contempt,
            quiescence_cap: self.config.quiescence_depth,
            top_k: self.config.sort_top_k,
            nodes: 0,
            tt_hits: 0,
        };

        for depth in 1..=max_depth {
            let Some((mv, score, completed)) = searcher.search_root(depth as i32, report.best_move)
            else {
                break;
            };
            report.best_move = Some(mv);
            report.score = score;
            if !completed {
                break;
            }
            report.depth = depth;

            if self.config.log_search {
                debug!(
                    "depth {depth} score {score} nodes {} tt hits {} time {} ms best {mv}",
                    searcher.nodes,
                    searcher.tt_hits,
                    start.elapsed().as_millis()
                );
            }

            if is_mate_score(score) {
                let plies = MATE_SCORE - score.abs();
                report.mate_in = Some(if score > 0 { plies } else { -plies });
                break;
            }
        }

        report.nodes = searcher.nodes;
        report.tt_hits = searcher.tt_hits;

        if report.best_move.is_none() {
            warn!("search stopped before finishing a root move; playing the first legal move");
            report.best_move = Some(fallback);
        }
        report.elapsed = start.elapsed();
        report
    }
}

fn empty_report() -> SearchReport {
    SearchReport {
        best_move: None,
        score: 0,
        depth: 0,
        mate_in: None,
        nodes: 0,
        tt_hits: 0,
        from_book: false,
        elapsed: Duration::ZERO,
    }
}
