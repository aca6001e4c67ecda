//! Transposition table for caching search results.
//!
//! Direct-mapped: each key has exactly one slot (`key % capacity`) and a
//! collision simply evicts under the replacement policy in `store`. The
//! table is owned by a single search thread, so slots are plain words.

use std::mem;

use crate::board::Move;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact, // Score is the exact value
    Lower, // Score is at least this value (failed high - score >= beta)
    Upper, // Score is at most this value (failed low - score <= alpha)
}

impl Bound {
    fn to_bits(self) -> u64 {
        match self {
            Bound::Exact => 0,
            Bound::Lower => 1,
            Bound::Upper => 2,
        }
    }

    fn from_bits(v: u64) -> Self {
        match v & 0x3 {
            0 => Bound::Exact,
            1 => Bound::Lower,
            _ => Bound::Upper,
        }
    }
}

/// Unpacked TT entry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtEntry {
    pub depth: u8,
    pub score: i16,
    pub bound: Bound,
    pub best_move: Option<Move>,
    pub generation: u8,
    /// Stored by quiescence search rather than a full-width node
    pub quiescence: bool,
}

impl TtEntry {
    pub fn depth(&self) -> u32 {
        u32::from(self.depth)
    }

    pub fn score(&self) -> i32 {
        i32::from(self.score)
    }
}

// Packed data word:
// - bits 0-15:  move (u16, 0 = no move)
// - bits 16-31: score (i16 as u16)
// - bits 32-39: depth
// - bits 40-41: bound
// - bit 42:     quiescence flag
// - bit 43:     occupied marker, so a used slot is never all zero
// - bits 48-55: generation
const QUIESCENCE_BIT: u64 = 1 << 42;
const OCCUPIED_BIT: u64 = 1 << 43;

/// Entries this many generations old are always replaceable
const STALE_GENERATIONS: u8 = 3;

fn pack_entry(entry: &TtEntry) -> u64 {
    let mv = u64::from(entry.best_move.map_or(0, Move::as_u16));
    let score = u64::from(entry.score as u16);
    let mut data = mv
        | (score << 16)
        | (u64::from(entry.depth) << 32)
        | (entry.bound.to_bits() << 40)
        | OCCUPIED_BIT
        | (u64::from(entry.generation) << 48);
    if entry.quiescence {
        data |= QUIESCENCE_BIT;
    }
    data
}

fn unpack_entry(data: u64) -> TtEntry {
    let mv_bits = (data & 0xFFFF) as u16;
    TtEntry {
        depth: ((data >> 32) & 0xFF) as u8,
        score: ((data >> 16) & 0xFFFF) as u16 as i16,
        bound: Bound::from_bits(data >> 40),
        best_move: if mv_bits == 0 {
            None
        } else {
            Some(Move::from_u16(mv_bits))
        },
        generation: ((data >> 48) & 0xFF) as u8,
        quiescence: data & QUIESCENCE_BIT != 0,
    }
}

#[derive(Clone, Copy, Default)]
struct Slot {
    key: u64,
    data: u64,
}

impl Slot {
    fn is_empty(&self) -> bool {
        self.data == 0
    }
}

pub struct TranspositionTable {
    slots: Vec<Slot>,
    generation: u8,
}

impl TranspositionTable {
    /// Create a table using at most `size_mb` megabytes (at least one slot).
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let capacity = (size_mb.saturating_mul(1024 * 1024) / mem::size_of::<Slot>()).max(1);
        TranspositionTable {
            slots: vec![Slot::default(); capacity],
            generation: 0,
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key % self.slots.len() as u64) as usize
    }

    /// Number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn generation(&self) -> u8 {
        self.generation
    }

    /// Start a new search generation. Older entries stay usable but
    /// become easier to replace as they age.
    pub fn new_search(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Look up the entry for `key`. Misses are normal and silent.
    #[must_use]
    pub fn probe(&self, key: u64) -> Option<TtEntry> {
        let slot = &self.slots[self.index(key)];
        if slot.is_empty() || slot.key != key {
            return None;
        }
        Some(unpack_entry(slot.data))
    }

    /// Store a result for `key` in the current generation.
    ///
    /// The slot is overwritten only if it is empty, holds an entry at least
    /// three generations old, is shallower than the new result, or holds a
    /// quiescence result while the new one comes from a full-width node.
    /// The same rule applies whether or not the slot holds this position.
    pub fn store(
        &mut self,
        key: u64,
        depth: u32,
        score: i32,
        bound: Bound,
        best_move: Option<Move>,
        quiescence: bool,
    ) {
        let entry = TtEntry {
            depth: depth.min(u32::from(u8::MAX)) as u8,
            score: score.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16,
            bound,
            best_move: best_move.filter(|mv| !mv.is_null()),
            generation: self.generation,
            quiescence,
        };
        let generation = self.generation;
        let idx = self.index(key);
        let slot = &mut self.slots[idx];

        if slot.is_empty() {
            slot.key = key;
            slot.data = pack_entry(&entry);
            return;
        }

        let old = unpack_entry(slot.data);
        let age = generation.wrapping_sub(old.generation);
        let replace = age >= STALE_GENERATIONS
            || entry.depth > old.depth
            || (!quiescence && old.quiescence);
        if !replace {
            return;
        }

        // Keep a known best move for this position when the new result has none
        let mut entry = entry;
        if entry.best_move.is_none() && slot.key == key {
            entry.best_move = old.best_move;
        }
        slot.key = key;
        slot.data = pack_entry(&entry);
    }

    /// Returns hash table fullness in per mille (0-1000).
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        // Sample the first 1000 slots
        let sample = self.slots.len().min(1000);
        let used = self.slots[..sample]
            .iter()
            .filter(|slot| !slot.is_empty() && unpack_entry(slot.data).generation == self.generation)
            .count();
        ((used as u64 * 1000) / sample as u64) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&mut self) {
        self.slots.fill(Slot::default());
        self.generation = 0;
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(16)
    }
}
