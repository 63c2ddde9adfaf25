//! # Vocabulary Builder

use std::{io::BufRead, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    WCResult,
    corpus::{CaseMode, open_corpus},
    types::Token,
    vocab::TokenCounter,
};

/// The result of a vocabulary build.
///
/// This is also the persisted form of the symmetric-window vocabulary cache;
/// the field names are the archive's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabCounts {
    /// The selected words; non-increasing frequency, ties in first-seen order.
    pub words: Vec<Token>,

    /// The summed frequency of the selected words.
    pub n_tokens: u64,

    /// The summed frequency of every word, including those left out.
    pub n_total_tokens: u64,
}

impl VocabCounts {
    /// Select the `vocab_size` most frequent words of a counter.
    pub fn from_counter(
        counter: &TokenCounter,
        vocab_size: usize,
    ) -> Self {
        let mut words = Vec::with_capacity(vocab_size.min(counter.len()));
        let mut n_tokens = 0;
        for (word, count) in counter.most_common(vocab_size) {
            words.push(word);
            n_tokens += count;
        }
        Self {
            words,
            n_tokens,
            n_total_tokens: counter.total(),
        }
    }

    /// The number of tokens which fall outside the selected words.
    pub fn n_unknown_tokens(&self) -> u64 {
        self.n_total_tokens - self.n_tokens
    }
}

/// Build a vocabulary from a line reader, in a single streaming pass.
///
/// ## Arguments
/// * `reader` - the corpus lines.
/// * `vocab_size` - the maximum number of words to select.
/// * `case` - the word normalization.
pub fn build_vocabulary<R: BufRead>(
    reader: &mut R,
    vocab_size: usize,
    case: CaseMode,
) -> WCResult<VocabCounts> {
    let mut counter = TokenCounter::new(case);
    counter.update_from_reader(reader)?;
    log::debug!(
        "Counted {} distinct words; selecting {}.",
        counter.len(),
        vocab_size
    );
    Ok(VocabCounts::from_counter(&counter, vocab_size))
}

/// Build a vocabulary from a corpus file.
///
/// See [`build_vocabulary`].
pub fn build_vocabulary_path<P: AsRef<Path>>(
    corpus: P,
    vocab_size: usize,
    case: CaseMode,
) -> WCResult<VocabCounts> {
    let mut reader = open_corpus(corpus)?;
    build_vocabulary(&mut reader, vocab_size, case)
}
