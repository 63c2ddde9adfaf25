//! # Token Counter

use std::io::BufRead;

use crate::{
    WCResult,
    corpus::CaseMode,
    types::{Token, WCHashMap, hash_map_with_capacity},
};

/// Expected distinct-word count; used when pre-allocating the frequency table.
const EXPECTED_DISTINCT_WORDS: usize = 100_000;

/// Frequency table over corpus words.
///
/// Counts are kept in first-seen order, so that ranking by frequency
/// with a stable sort breaks ties by first appearance.
pub struct TokenCounter {
    /// The case mode applied to each line.
    case: CaseMode,

    /// Word to position in `counts`.
    index: WCHashMap<Token, usize>,

    /// `(word, count)` in first-seen order.
    counts: Vec<(Token, u64)>,
}

impl TokenCounter {
    /// Create a new, empty counter.
    pub fn new(case: CaseMode) -> Self {
        Self {
            case,
            index: hash_map_with_capacity(EXPECTED_DISTINCT_WORDS),
            counts: Vec::new(),
        }
    }

    /// Count a single, already-normalized word.
    pub fn update_from_word(
        &mut self,
        word: &str,
    ) {
        match self.index.get(word) {
            Some(&idx) => self.counts[idx].1 += 1,
            None => {
                let word = Token::from(word);
                self.index.insert(word.clone(), self.counts.len());
                self.counts.push((word, 1));
            }
        }
    }

    /// Count every word of a line.
    pub fn update_from_line(
        &mut self,
        line: &str,
    ) {
        let case = self.case;
        case.for_each_word(line, |word| self.update_from_word(word));
    }

    /// Count every word of a sample iterator.
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for sample in samples {
            self.update_from_line(sample.as_ref());
        }
    }

    /// Count every word of a line reader, in one streaming pass.
    pub fn update_from_reader<R: BufRead>(
        &mut self,
        reader: &mut R,
    ) -> WCResult<()> {
        let mut line = String::new();
        while reader.read_line(&mut line)? != 0 {
            self.update_from_line(&line);
            line.clear();
        }
        Ok(())
    }

    /// The number of distinct words seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Has nothing been counted?
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Look up the count of a word.
    pub fn count(
        &self,
        word: &str,
    ) -> u64 {
        self.index.get(word).map_or(0, |&idx| self.counts[idx].1)
    }

    /// The sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, c)| c).sum()
    }

    /// Release the `(word, count)` table, in first-seen order.
    pub fn release(self) -> Vec<(Token, u64)> {
        self.counts
    }

    /// The `n` most frequent words, by non-increasing count;
    /// ties keep first-seen order.
    pub fn most_common(
        &self,
        n: usize,
    ) -> Vec<(Token, u64)> {
        let mut ranked: Vec<&(Token, u64)> = self.counts.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.into_iter().take(n).cloned().collect()
    }
}
