//! The chess bot: owns a game position and picks moves for it.
//!
//! A move comes from the opening book while the game is still in it, and
//! from a time-bounded iterative-deepening search otherwise.
//!
//! # Example
//! ```
//! use chess_bot::bot::{Bot, BotConfig};
//!
//! let mut bot = Bot::new(BotConfig::default().with_max_depth(2).with_book(false));
//! let report = bot.generate_move();
//! let mv = report.best_move.expect("the start position has moves");
//! bot.play_move(mv);
//! ```

mod arena;
mod config;
mod iterative;
mod move_order;
mod search;

use std::time::Duration;

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::board::{Board, FenError, Move, MoveParseError};
use crate::book::OpeningBook;
use crate::sync::StopFlag;
use crate::timer::SearchTimer;
use crate::tt::TranspositionTable;

use arena::MoveStack;
pub use config::{BotConfig, ConfigChange, Notation, DEFAULT_TT_MB};
pub use search::{is_mate_score, MATE_SCORE, MATE_THRESHOLD};

/// Outcome of one `generate_move` call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    /// `None` only when the side to move has no legal moves
    pub best_move: Option<Move>,
    /// Score of `best_move` for the side to move, in centipawns
    pub score: i32,
    /// Deepest iteration that finished
    pub depth: u32,
    /// Plies to a forced mate: positive when the bot mates, negative when
    /// it is mated
    pub mate_in: Option<i32>,
    pub nodes: u64,
    pub tt_hits: u64,
    pub from_book: bool,
    pub elapsed: Duration,
}

pub struct Bot {
    board: Board,
    config: BotConfig,
    tt: TranspositionTable,
    stack: MoveStack,
    stop: StopFlag,
    timer: SearchTimer,
    book: Option<Box<dyn OpeningBook>>,
    /// Cleared for good once the game leaves the book
    in_book: bool,
    rng: StdRng,
}

impl Bot {
    /// A bot at the standard starting position.
    #[must_use]
    pub fn new(config: BotConfig) -> Self {
        let stop = StopFlag::new();
        Bot {
            board: Board::new(),
            tt: TranspositionTable::new(config.tt_size_mb),
            stack: MoveStack::new(),
            timer: SearchTimer::new(stop.clone()),
            stop,
            book: None,
            in_book: true,
            rng: StdRng::from_entropy(),
            config,
        }
    }

    /// Use `book` for the opening. Replaces any previous book.
    #[must_use]
    pub fn with_book(mut self, book: impl OpeningBook + 'static) -> Self {
        self.set_book(book);
        self
    }

    pub fn set_book(&mut self, book: impl OpeningBook + 'static) {
        self.book = Some(Box::new(book));
        self.in_book = self.board.started_from_standard();
    }

    /// Make book choices reproducible.
    pub fn seed_book(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// True while book moves can still be played in this game
    #[must_use]
    pub fn in_book(&self) -> bool {
        self.in_book && self.book.is_some()
    }

    /// Apply a named option (see `BotConfig::apply_option`), rebuilding the
    /// transposition table if its size changed.
    pub fn apply_option(&mut self, name: &str, value: &str) {
        if let Some(ConfigChange::ResizeTable(mb)) = self.config.apply_option(name, value) {
            self.tt = TranspositionTable::new(mb);
        }
    }

    /// A handle that cancels the running search when stopped. The search
    /// clears it when it starts.
    #[must_use]
    pub fn stop_handle(&self) -> StopFlag {
        self.stop.clone()
    }

    /// Start a new game from the standard position.
    pub fn new_game(&mut self) {
        self.set_position(Board::new());
        self.tt.clear();
    }

    pub fn set_position(&mut self, board: Board) {
        self.in_book = board.started_from_standard();
        self.board = board;
    }

    pub fn set_position_fen(&mut self, fen: &str) -> Result<(), FenError> {
        self.set_position(Board::try_from_fen(fen)?);
        Ok(())
    }

    /// Play a move on the bot's board. It must be legal.
    pub fn play_move(&mut self, mv: Move) {
        debug_assert!(self.board.is_legal(mv), "play_move: {mv} is not legal");
        self.board.make_move(mv);
    }

    /// Play a move given in coordinate notation.
    pub fn play_move_str(&mut self, text: &str) -> Result<Move, MoveParseError> {
        self.board.make_move_str(text)
    }

    /// Pick a move for the side to move within the configured time.
    pub fn generate_move(&mut self) -> SearchReport {
        let budget = Duration::from_millis(self.config.max_time_ms);
        self.generate_move_within(budget)
    }

    /// Pick a move for the side to move within `max_time`. The bot's board
    /// is left unchanged; play the move with `play_move`.
    pub fn generate_move_within(&mut self, max_time: Duration) -> SearchReport {
        if let Some(report) = self.book_move() {
            return report;
        }
        let report = self.iterative_deepening(max_time);
        if let Some(mv) = report.best_move {
            info!(
                "bot plays {} (score {}, depth {})",
                self.format_move(mv),
                report.score,
                report.depth
            );
        }
        report
    }

    fn book_move(&mut self) -> Option<SearchReport> {
        if !self.config.use_book || !self.in_book || !self.board.started_from_standard() {
            return None;
        }
        let book = self.book.as_ref()?;
        let suggestion = book.next_move(self.board.moves_played(), &mut self.rng);
        match suggestion {
            Some(mv) if self.board.is_legal(mv) => {
                info!("book move {}", self.format_move(mv));
                Some(SearchReport {
                    best_move: Some(mv),
                    score: 0,
                    depth: 0,
                    mate_in: None,
                    nodes: 0,
                    tt_hits: 0,
                    from_book: true,
                    elapsed: Duration::ZERO,
                })
            }
            _ => {
                self.in_book = false;
                None
            }
        }
    }

    fn format_move(&mut self, mv: Move) -> String {
        match self.config.notation {
            Notation::Coordinate => mv.to_string(),
            Notation::Algebraic => self.board.to_algebraic(mv),
        }
    }

    /// Number of table entries used this search, per mille
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        self.tt.hashfull_per_mille()
    }

    pub fn clear_hash(&mut self) {
        self.tt.clear();
    }
}

impl Default for Bot {
    fn default() -> Self {
        Self::new(BotConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::BookTree;

    fn quick_config() -> BotConfig {
        BotConfig::default()
            .with_max_depth(3)
            .with_book(false)
            .with_tt_size_mb(1)
    }

    #[test]
    fn test_generate_move_is_legal_and_board_unchanged() {
        let mut bot = Bot::new(quick_config());
        let before = bot.board().to_fen();
        let report = bot.generate_move();
        let mv = report.best_move.expect("move");
        assert_eq!(bot.board().to_fen(), before);
        assert!(!report.from_book);
        assert_eq!(report.depth, 3);
        let mut board = bot.board().clone();
        assert!(board.is_legal(mv));
    }

    #[test]
    fn test_no_moves_reports_none() {
        let mut bot = Bot::new(quick_config());
        bot.set_position_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1")
            .expect("fen");
        let report = bot.generate_move();
        assert_eq!(report.best_move, None);
    }

    #[test]
    fn test_book_then_search() {
        let book = BookTree::from_lines([("e2e4 e7e5", 1)]).expect("book");
        let mut bot = Bot::new(quick_config().with_book(true)).with_book(book);
        bot.seed_book(1);

        let report = bot.generate_move();
        assert!(report.from_book);
        assert_eq!(report.best_move.map(|m| m.to_string()).as_deref(), Some("e2e4"));
        bot.play_move_str("e2e4").expect("legal");
        bot.play_move_str("c7c5").expect("legal");

        let report = bot.generate_move();
        assert!(!report.from_book);
        assert!(!bot.in_book());

        bot.new_game();
        assert!(bot.in_book());
    }

    #[test]
    fn test_book_ignored_for_custom_position() {
        let book = BookTree::from_lines([("e2e4", 1)]).expect("book");
        let mut bot = Bot::new(quick_config().with_book(true)).with_book(book);
        bot.set_position_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1")
            .expect("fen");
        assert!(!bot.generate_move().from_book);
    }

    #[test]
    fn test_apply_option_resizes_table() {
        let mut bot = Bot::new(quick_config());
        bot.apply_option("hash", "2");
        assert_eq!(bot.config().tt_size_mb, 2);
        assert_eq!(bot.tt.capacity(), TranspositionTable::new(2).capacity());
    }
}
