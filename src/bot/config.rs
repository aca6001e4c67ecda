//! Bot configuration and textual option handling.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default transposition table size in MB
pub const DEFAULT_TT_MB: usize = 64;

/// How moves are written in log output
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Notation {
    /// "g1f3", "e7e8q"
    #[default]
    Coordinate,
    /// "Nf3", "e8=Q+"
    Algebraic,
}

/// Side effects of an option change the owner has to carry out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigChange {
    /// The transposition table must be rebuilt with this many MB
    ResizeTable(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BotConfig {
    /// Wall-clock budget per move in milliseconds
    pub max_time_ms: u64,
    /// Hard depth cap, mostly for tests and analysis
    pub max_depth: Option<u32>,
    /// Quiescence ply cap; `None` searches captures until quiet
    pub quiescence_depth: Option<u32>,
    pub use_book: bool,
    pub tt_size_mb: usize,
    /// Moves per node that get fully ordered; the rest are tried as generated
    pub sort_top_k: usize,
    /// Draw penalty in centipawns for the bot's side
    pub contempt: i32,
    pub log_search: bool,
    pub notation: Notation,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            max_time_ms: 1000,
            max_depth: None,
            quiescence_depth: None,
            use_book: true,
            tt_size_mb: DEFAULT_TT_MB,
            sort_top_k: 8,
            contempt: 20,
            log_search: false,
            notation: Notation::Coordinate,
        }
    }
}

impl BotConfig {
    #[must_use]
    pub fn with_max_time_ms(mut self, ms: u64) -> Self {
        self.max_time_ms = ms;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(depth.max(1));
        self
    }

    #[must_use]
    pub fn with_quiescence_depth(mut self, depth: Option<u32>) -> Self {
        self.quiescence_depth = depth;
        self
    }

    #[must_use]
    pub fn with_book(mut self, use_book: bool) -> Self {
        self.use_book = use_book;
        self
    }

    #[must_use]
    pub fn with_tt_size_mb(mut self, mb: usize) -> Self {
        self.tt_size_mb = mb.max(1);
        self
    }

    #[must_use]
    pub fn with_sort_top_k(mut self, k: usize) -> Self {
        self.sort_top_k = k;
        self
    }

    #[must_use]
    pub fn with_contempt(mut self, contempt: i32) -> Self {
        self.contempt = contempt;
        self
    }

    #[must_use]
    pub fn with_log_search(mut self, on: bool) -> Self {
        self.log_search = on;
        self
    }

    #[must_use]
    pub fn with_notation(mut self, notation: Notation) -> Self {
        self.notation = notation;
        self
    }

    /// Apply a named option such as `("hash", "128")` or
    /// `("quiescence depth", "unlimited")`. Names are case-insensitive;
    /// unknown names and unparsable values are ignored.
    pub fn apply_option(&mut self, name: &str, value: &str) -> Option<ConfigChange> {
        let normalized = name.trim().to_ascii_lowercase();
        let value = value.trim();
        match normalized.as_str() {
            "max time" | "max time ms" => {
                if let Ok(v) = value.parse::<u64>() {
                    self.max_time_ms = v;
                }
            }
            "depth" | "max depth" => {
                if value.eq_ignore_ascii_case("unlimited") {
                    self.max_depth = None;
                } else if let Ok(v) = value.parse::<u32>() {
                    self.max_depth = Some(v.max(1));
                }
            }
            "quiescence depth" => {
                if value.eq_ignore_ascii_case("unlimited") {
                    self.quiescence_depth = None;
                } else if let Ok(v) = value.parse::<u32>() {
                    self.quiescence_depth = Some(v);
                }
            }
            "book" | "use book" => {
                if let Some(v) = parse_bool(value) {
                    self.use_book = v;
                }
            }
            "hash" => {
                let mb = value.parse::<usize>().ok()?.max(1);
                if mb != self.tt_size_mb {
                    self.tt_size_mb = mb;
                    return Some(ConfigChange::ResizeTable(mb));
                }
            }
            "top k" | "sort top k" => {
                if let Ok(v) = value.parse::<usize>() {
                    self.sort_top_k = v;
                }
            }
            "contempt" => {
                if let Ok(v) = value.parse::<i32>() {
                    self.contempt = v.clamp(-1000, 1000);
                }
            }
            "log search" => {
                if let Some(v) = parse_bool(value) {
                    self.log_search = v;
                }
            }
            "notation" => match value.to_ascii_lowercase().as_str() {
                "coordinate" | "uci" => self.notation = Notation::Coordinate,
                "algebraic" | "san" => self.notation = Notation::Algebraic,
                _ => {}
            },
            _ => {}
        }
        None
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}
