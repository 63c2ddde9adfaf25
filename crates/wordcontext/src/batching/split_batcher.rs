//! # Split Window Batcher

use std::{
    fs::File,
    io::{BufRead, BufReader, Seek},
    path::Path,
};

use crate::{
    WCResult,
    WordContextError,
    batching::{IndexMatrix, SplitBatch},
    corpus::{CaseMode, LoopingReader},
    types::{IndexType, Token},
    vocab::{IndexLookup, VocabLayout, Vocabulary},
    windows::{DEFAULT_BUFFER_CEILING, SplitExample, SplitWindow},
};

/// Options for [`SplitBatcher`].
#[derive(Debug, Clone)]
pub struct SplitBatcherOptions {
    /// The left and right context length.
    pub window: usize,

    /// The number of triples per batch.
    pub batch_size: usize,

    /// The rolling buffer ceiling.
    pub buffer_ceiling: usize,

    /// The word normalization; must match the feature build.
    pub case: CaseMode,
}

impl Default for SplitBatcherOptions {
    fn default() -> Self {
        Self {
            window: 10,
            batch_size: 16,
            buffer_ceiling: DEFAULT_BUFFER_CEILING,
            case: CaseMode::Preserve,
        }
    }
}

impl SplitBatcherOptions {
    /// Set the context length.
    pub fn with_window(
        self,
        window: usize,
    ) -> Self {
        Self { window, ..self }
    }

    /// Set the batch size.
    pub fn with_batch_size(
        self,
        batch_size: usize,
    ) -> Self {
        Self { batch_size, ..self }
    }

    /// Set the rolling buffer ceiling.
    pub fn with_buffer_ceiling(
        self,
        buffer_ceiling: usize,
    ) -> Self {
        Self {
            buffer_ceiling,
            ..self
        }
    }

    /// Set the word normalization.
    pub fn with_case(
        self,
        case: CaseMode,
    ) -> Self {
        Self { case, ..self }
    }

    /// Build a [`SplitBatcher`] over a padded vocabulary.
    ///
    /// ## Errors
    /// * [`WordContextError::InvalidOption`] for a zero batch size, a
    ///   vocabulary without a padding slot, or one which does not fit `I`.
    pub fn init<I: IndexType>(
        self,
        vocab: &Vocabulary,
    ) -> WCResult<SplitBatcher<I>> {
        SplitBatcher::new(self, vocab)
    }
}

/// Accumulates split-window triples into fixed-size batches.
///
/// Tokens are pushed one at a time; a batch is emitted the instant
/// `batch_size` triples have accumulated. There is no shuffling, and no
/// partial batch is ever emitted.
pub struct SplitBatcher<I: IndexType = i32> {
    options: SplitBatcherOptions,
    lookup: IndexLookup<I>,
    window: SplitWindow,
    pending: Vec<SplitExample>,
}

impl<I: IndexType> SplitBatcher<I> {
    /// Create a new batcher.
    ///
    /// See [`SplitBatcherOptions::init`].
    pub fn new(
        options: SplitBatcherOptions,
        vocab: &Vocabulary,
    ) -> WCResult<Self> {
        if options.batch_size == 0 {
            return Err(WordContextError::InvalidOption(
                "batch_size must be > 0".to_string(),
            ));
        }
        if vocab.layout() != VocabLayout::PaddedUnknownFirst {
            return Err(WordContextError::InvalidOption(format!(
                "split batching requires a padded vocabulary, found {:?}",
                vocab.layout()
            )));
        }

        let lookup = vocab.index_lookup()?;
        let window = SplitWindow::new(options.window, options.buffer_ceiling);
        let pending = Vec::with_capacity(options.batch_size);

        Ok(Self {
            options,
            lookup,
            window,
            pending,
        })
    }

    /// The options.
    pub fn options(&self) -> &SplitBatcherOptions {
        &self.options
    }

    /// The number of triples waiting for a full batch.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drop the rolling buffer and any pending triples.
    pub fn reset(&mut self) {
        self.window.clear();
        self.pending.clear();
    }

    /// Append a token; returning the batch it completes, if any.
    pub fn push_token(
        &mut self,
        token: Token,
    ) -> Option<SplitBatch<I>> {
        self.pending.extend(self.window.push(token));
        if self.pending.len() < self.options.batch_size {
            return None;
        }
        let batch = self.vectorize(&self.pending);
        self.pending.clear();
        Some(batch)
    }

    /// Vectorize a run of triples, substituting UNKNOWN.
    pub fn vectorize(
        &self,
        examples: &[SplitExample],
    ) -> SplitBatch<I> {
        let width = self.options.window;
        let mut left = IndexMatrix::with_capacity(examples.len(), width);
        let mut right = IndexMatrix::with_capacity(examples.len(), width);
        let mut output = Vec::with_capacity(examples.len());
        for example in examples {
            left.push_row_with(|row| self.lookup.extend_into(&example.left, row));
            right.push_row_with(|row| self.lookup.extend_into(&example.right, row));
            output.push(self.lookup.get(&example.output));
        }
        SplitBatch {
            left,
            right,
            output,
        }
    }

    /// Drive the batcher from a looping corpus reader.
    ///
    /// ## Errors
    /// * [`WordContextError::InvalidOption`] if the reader normalizes words
    ///   differently than [`SplitBatcherOptions::case`].
    pub fn stream<R: BufRead + Seek>(
        self,
        reader: LoopingReader<R>,
    ) -> WCResult<SplitBatchStream<R, I>> {
        if reader.case() != self.options.case {
            return Err(WordContextError::InvalidOption(format!(
                "reader case {:?} does not match batcher case {:?}",
                reader.case(),
                self.options.case
            )));
        }
        let pass = reader.pass();
        Ok(SplitBatchStream {
            batcher: self,
            reader,
            pass,
            pass_batches: 0,
        })
    }

    /// Drive the batcher from a corpus file, read with the configured case.
    pub fn stream_path<P: AsRef<Path>>(
        self,
        corpus: P,
    ) -> WCResult<SplitBatchStream<BufReader<File>, I>> {
        let reader = LoopingReader::open(corpus, self.options.case)?;
        self.stream(reader)
    }
}

/// An endless stream of split-window batches.
///
/// Each new pass over the corpus resets the rolling buffer and the pending
/// triples, so no triple spans the wrap-around point. The stream ends when
/// the reader ends (an empty corpus), or when a complete pass produced no
/// batch at all; such a corpus would otherwise be re-read forever.
pub struct SplitBatchStream<R, I: IndexType = i32> {
    batcher: SplitBatcher<I>,
    reader: LoopingReader<R>,
    pass: usize,
    pass_batches: usize,
}

impl<R: BufRead + Seek, I: IndexType> SplitBatchStream<R, I> {
    /// The current pass over the corpus.
    pub fn pass(&self) -> usize {
        self.pass
    }

    /// The batcher.
    pub fn batcher(&self) -> &SplitBatcher<I> {
        &self.batcher
    }
}

impl<R: BufRead + Seek, I: IndexType> Iterator for SplitBatchStream<R, I> {
    type Item = WCResult<SplitBatch<I>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = match self.reader.next()? {
                Ok(token) => token,
                Err(err) => return Some(Err(err)),
            };

            if self.reader.pass() != self.pass {
                if self.pass_batches == 0 {
                    log::warn!(
                        "Corpus pass {} produced no batch of {}; stopping",
                        self.pass,
                        self.batcher.options.batch_size
                    );
                    return None;
                }
                log::debug!("Corpus pass {} complete", self.pass);
                self.pass = self.reader.pass();
                self.pass_batches = 0;
                self.batcher.reset();
            }

            if let Some(batch) = self.batcher.push_token(token) {
                self.pass_batches += 1;
                return Some(Ok(batch));
            }
        }
    }
}
