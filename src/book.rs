//! Opening book.
//!
//! The bot only needs one question answered: given the moves played from
//! the standard start, is the game still in the book, and if so what to
//! play next. `BookTree` answers it from lines held in memory, picking among
//! recorded continuations in proportion to how often each was played.

use std::fmt;

use rand::distributions::{Distribution, WeightedIndex};
use rand::RngCore;

use crate::board::{Board, Move, MoveParseError};

pub trait OpeningBook: Send {
    /// The book's reply after `played` (coordinate moves from the standard
    /// starting position), or `None` once the game has left the book.
    fn next_move(&self, played: &[Move], rng: &mut dyn RngCore) -> Option<Move>;
}

/// Error type for book construction failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    /// A line contains a move that is not legal where it is played
    IllegalMove { ply: usize, notation: String },
    /// A move could not be read at all
    Parse(MoveParseError),
    /// A line was given weight 0
    ZeroWeight,
}

impl fmt::Display for BookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookError::IllegalMove { ply, notation } => {
                write!(f, "Illegal book move '{notation}' at ply {ply}")
            }
            BookError::Parse(e) => write!(f, "Bad book move: {e}"),
            BookError::ZeroWeight => write!(f, "Book lines need a positive weight"),
        }
    }
}

impl std::error::Error for BookError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BookError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BookMove {
    pub mv: Move,
    /// Number of recorded games (or summed line weights) through this move
    pub weight: u32,
    node: usize,
}

#[derive(Clone, Debug, Default)]
struct BookNode {
    children: Vec<BookMove>,
}

/// Prefix tree of book lines
#[derive(Clone, Debug)]
pub struct BookTree {
    nodes: Vec<BookNode>,
}

impl BookTree {
    /// An empty book, which is never in book.
    #[must_use]
    pub fn new() -> Self {
        BookTree {
            nodes: vec![BookNode::default()],
        }
    }

    /// Build a book from `(line, weight)` pairs, where a line is
    /// space-separated coordinate moves from the standard start, e.g.
    /// `("e2e4 e7e5 g1f3", 12)`. Shared prefixes add up their weights.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, BookError>
    where
        I: IntoIterator<Item = (S, u32)>,
        S: AsRef<str>,
    {
        let mut book = BookTree::new();
        for (line, weight) in lines {
            book.add_line(line.as_ref(), weight)?;
        }
        Ok(book)
    }

    /// Add one line, validating each move by replaying it.
    pub fn add_line(&mut self, line: &str, weight: u32) -> Result<(), BookError> {
        if weight == 0 {
            return Err(BookError::ZeroWeight);
        }

        // Validate the whole line before touching the tree
        let mut board = Board::new();
        let mut moves = Vec::new();
        for (ply, notation) in line.split_whitespace().enumerate() {
            let mv = board.parse_move(notation).map_err(|e| match e {
                MoveParseError::IllegalMove { notation } => BookError::IllegalMove { ply, notation },
                other => BookError::Parse(other),
            })?;
            board.make_move(mv);
            moves.push(mv);
        }

        let mut node = 0;
        for mv in moves {
            let existing = self.nodes[node].children.iter().position(|c| c.mv == mv);
            node = match existing {
                Some(idx) => {
                    let child = &mut self.nodes[node].children[idx];
                    child.weight = child.weight.saturating_add(weight);
                    child.node
                }
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(BookNode::default());
                    self.nodes[node].children.push(BookMove {
                        mv,
                        weight,
                        node: next,
                    });
                    next
                }
            };
        }
        Ok(())
    }

    /// Recorded continuations after `played`, or `None` if `played` is not
    /// a prefix of any book line.
    #[must_use]
    pub fn continuations(&self, played: &[Move]) -> Option<&[BookMove]> {
        let mut node = 0;
        for mv in played {
            node = self.nodes[node].children.iter().find(|c| c.mv == *mv)?.node;
        }
        let children = &self.nodes[node].children;
        if children.is_empty() {
            None
        } else {
            Some(children)
        }
    }

    /// Number of distinct positions after the start
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for BookTree {
    fn default() -> Self {
        Self::new()
    }
}

impl OpeningBook for BookTree {
    fn next_move(&self, played: &[Move], rng: &mut dyn RngCore) -> Option<Move> {
        let choices = self.continuations(played)?;
        let dist = WeightedIndex::new(choices.iter().map(|c| c.weight)).ok()?;
        Some(choices[dist.sample(rng)].mv)
    }
}
