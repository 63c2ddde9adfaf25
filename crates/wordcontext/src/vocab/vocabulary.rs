//! # Vocabulary

use crate::{
    WCResult,
    WordContextError,
    types::{IndexType, Token, WCHashMap, hash_map_with_capacity},
};

/// Display name of the reserved unknown-word slot.
pub const UNKNOWN_TOKEN: &str = "<UNK>";

/// Display name of the reserved padding slot.
pub const PADDING_TOKEN: &str = "<PAD>";

/// Where words and reserved symbols sit in the index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VocabLayout {
    /// Words at `0..n`; UNKNOWN at `n`. No padding slot.
    UnknownLast,

    /// PADDING at `0`; UNKNOWN at `1`; words at `2..`.
    PaddedUnknownFirst,
}

impl VocabLayout {
    /// The index of the first word.
    pub fn word_offset(&self) -> usize {
        match self {
            VocabLayout::UnknownLast => 0,
            VocabLayout::PaddedUnknownFirst => 2,
        }
    }
}

/// An immutable word to index mapping with reserved symbols.
///
/// Built once from a ranked word list; see [`crate::vocab::VocabCounts`].
#[derive(Debug, Clone)]
pub struct Vocabulary {
    layout: VocabLayout,
    words: Vec<Token>,
    word_index: WCHashMap<Token, usize>,
    table_size: usize,
}

impl Vocabulary {
    fn from_layout(
        layout: VocabLayout,
        words: Vec<Token>,
        table_size: usize,
    ) -> Self {
        let offset = layout.word_offset();
        let mut word_index = hash_map_with_capacity(words.len());
        for (idx, word) in words.iter().enumerate() {
            word_index.insert(word.clone(), idx + offset);
        }
        Self {
            layout,
            words,
            word_index,
            table_size,
        }
    }

    /// Build a [`VocabLayout::UnknownLast`] vocabulary.
    ///
    /// The table has `words.len() + 1` slots.
    pub fn unknown_last<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Token>,
    {
        let words: Vec<Token> = words.into_iter().map(Into::into).collect();
        let table_size = words.len() + 1;
        Self::from_layout(VocabLayout::UnknownLast, words, table_size)
    }

    /// Build a [`VocabLayout::PaddedUnknownFirst`] vocabulary of `n_features` slots.
    ///
    /// The ranked word list is truncated to `n_features - 2` words,
    /// leaving room for PADDING and UNKNOWN. The table keeps all
    /// `n_features` slots even when fewer words are given; it never has
    /// fewer than the two reserved slots.
    pub fn padded<I, S>(
        words: I,
        n_features: usize,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Token>,
    {
        let words = words
            .into_iter()
            .take(n_features.saturating_sub(2))
            .map(Into::into)
            .collect();
        Self::from_layout(VocabLayout::PaddedUnknownFirst, words, n_features.max(2))
    }

    /// The index layout.
    pub fn layout(&self) -> VocabLayout {
        self.layout
    }

    /// The words, in index order.
    pub fn words(&self) -> &[Token] {
        &self.words
    }

    /// The number of words, excluding reserved symbols.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Are there no words?
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The index of the UNKNOWN symbol.
    pub fn unknown_index(&self) -> usize {
        match self.layout {
            VocabLayout::UnknownLast => self.words.len(),
            VocabLayout::PaddedUnknownFirst => 1,
        }
    }

    /// The index of the PADDING symbol, if the layout has one.
    pub fn padding_index(&self) -> Option<usize> {
        match self.layout {
            VocabLayout::UnknownLast => None,
            VocabLayout::PaddedUnknownFirst => Some(0),
        }
    }

    /// The number of index slots; the row count of an embedding table.
    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// The index of a word, if it is in the vocabulary.
    pub fn index_of(
        &self,
        word: &str,
    ) -> Option<usize> {
        self.word_index.get(word).copied()
    }

    /// The index of a word, or the UNKNOWN index.
    pub fn index_or_unknown(
        &self,
        word: &str,
    ) -> usize {
        self.index_of(word).unwrap_or_else(|| self.unknown_index())
    }

    /// Map a word sequence to indices, substituting UNKNOWN.
    pub fn vectorize<S: AsRef<str>>(
        &self,
        words: &[S],
    ) -> Vec<usize> {
        words
            .iter()
            .map(|w| self.index_or_unknown(w.as_ref()))
            .collect()
    }

    /// The word (or reserved symbol name) at an index.
    pub fn token_of(
        &self,
        index: usize,
    ) -> Option<&str> {
        if index == self.unknown_index() {
            return Some(UNKNOWN_TOKEN);
        }
        if Some(index) == self.padding_index() {
            return Some(PADDING_TOKEN);
        }
        index
            .checked_sub(self.layout.word_offset())
            .and_then(|idx| self.words.get(idx))
            .map(|w| w.as_str())
    }

    /// Build a typed index lookup for vectorization.
    ///
    /// Fails with [`WordContextError::InvalidOption`] when the table does
    /// not fit `I`.
    pub fn index_lookup<I: IndexType>(&self) -> WCResult<IndexLookup<I>> {
        let overflow = || {
            WordContextError::InvalidOption(format!(
                "vocabulary table size ({}) exceeds index type capacity",
                self.table_size()
            ))
        };
        let unknown = I::from_usize(self.unknown_index()).ok_or_else(overflow)?;
        I::from_usize(self.table_size() - 1).ok_or_else(overflow)?;

        let mut map = hash_map_with_capacity(self.word_index.len());
        for (word, &idx) in &self.word_index {
            map.insert(word.clone(), I::from_usize(idx).ok_or_else(overflow)?);
        }
        Ok(IndexLookup { map, unknown })
    }
}

/// A word to `I` index map with an UNKNOWN fallback.
///
/// See [`Vocabulary::index_lookup`].
#[derive(Debug, Clone)]
pub struct IndexLookup<I: IndexType> {
    map: WCHashMap<Token, I>,
    unknown: I,
}

impl<I: IndexType> IndexLookup<I> {
    /// The UNKNOWN index.
    pub fn unknown(&self) -> I {
        self.unknown
    }

    /// Map a word to its index, substituting UNKNOWN.
    pub fn get(
        &self,
        word: &str,
    ) -> I {
        self.map.get(word).copied().unwrap_or(self.unknown)
    }

    /// Map a word sequence to indices, appending to `out`.
    pub fn extend_into<S: AsRef<str>>(
        &self,
        words: &[S],
        out: &mut Vec<I>,
    ) {
        out.extend(words.iter().map(|w| self.get(w.as_ref())));
    }
}
