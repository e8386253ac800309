//! Instruction word store.
//!
//! This module implements the program memory the bus responder serves. It
//! provides:
//! 1. **Construction:** A word sequence padded with the filler encoding up to the minimum size.
//! 2. **Reads:** Word-indexed lookup with the filler value for out-of-range indices.
//! 3. **Writes:** Byte-lane merge with out-of-range writes silently dropped.
//!
//! Out-of-range accesses model an idle or unmapped bus: reads see a no-op
//! word and writes go nowhere. Neither ends the run.

use crate::common::constants::{FILLER_WORD, MIN_STORE_WORDS};

/// Ordered, word-indexed program memory backing the bus.
///
/// Indices are word addresses (byte address divided by four). The store never
/// grows after construction; the bus responder is its only mutator.
#[derive(Debug, Clone)]
pub struct WordStore {
    words: Vec<u32>,
}

impl WordStore {
    /// Builds a store from loaded words, padding with [`FILLER_WORD`] up to
    /// [`MIN_STORE_WORDS`].
    ///
    /// # Arguments
    ///
    /// * `words` - Program words in file order; may be empty.
    pub fn from_words(mut words: Vec<u32>) -> Self {
        if words.len() < MIN_STORE_WORDS {
            words.resize(MIN_STORE_WORDS, FILLER_WORD);
        }
        Self { words }
    }

    /// Returns the word at `word_index`, or [`FILLER_WORD`] when the index is
    /// out of range. Out-of-range reads are defined behavior, not an error.
    pub fn read(&self, word_index: u32) -> u32 {
        self.words
            .get(word_index as usize)
            .copied()
            .unwrap_or(FILLER_WORD)
    }

    /// Merges `value`'s selected byte lanes into the word at `word_index`.
    ///
    /// `byte_mask` has a full byte of ones per selected lane (see
    /// [`crate::bus::expand_mask`]); unselected lanes keep their prior
    /// content exactly. Out-of-range writes are silently dropped; the store
    /// never grows.
    pub fn write(&mut self, word_index: u32, value: u32, byte_mask: u32) {
        if let Some(word) = self.words.get_mut(word_index as usize) {
            *word = (*word & !byte_mask) | (value & byte_mask);
        }
    }

    /// Returns whether `word_index` addresses a stored word.
    pub fn contains(&self, word_index: u32) -> bool {
        (word_index as usize) < self.words.len()
    }

    /// Returns the store size in words; at least [`MIN_STORE_WORDS`].
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`: construction pads every store to the minimum size.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for WordStore {
    /// An all-filler store of the minimum size.
    fn default() -> Self {
        Self::from_words(Vec::new())
    }
}
