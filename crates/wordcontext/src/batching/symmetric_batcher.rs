//! # Symmetric Window Batcher

use std::io::{BufRead, Seek, SeekFrom};

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    WCResult,
    WordContextError,
    batching::{IndexMatrix, SymmetricBatch},
    corpus::{CaseMode, visit_line_chunk},
    types::IndexType,
    vocab::{IndexLookup, Vocabulary},
    windows::{SymmetricExample, extract_symmetric_examples},
};

/// Options for [`SymmetricBatcher`].
#[derive(Debug, Clone)]
pub struct SymmetricBatcherOptions {
    /// The window radius; contexts are `2 * window` wide.
    pub window: usize,

    /// The number of examples per batch.
    pub batch_size: usize,

    /// The maximum number of corpus lines ingested per chunk.
    pub lines_per_chunk: usize,

    /// The word normalization; must match the vocabulary build.
    pub case: CaseMode,

    /// Optional shuffle seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SymmetricBatcherOptions {
    fn default() -> Self {
        Self {
            window: 3,
            batch_size: 32,
            lines_per_chunk: 1_000_000,
            case: CaseMode::Lowercase,
            seed: None,
        }
    }
}

impl SymmetricBatcherOptions {
    /// Set the window radius.
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

    /// Set the maximum number of lines ingested per chunk.
    pub fn with_lines_per_chunk(
        self,
        lines_per_chunk: usize,
    ) -> Self {
        Self {
            lines_per_chunk,
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

    /// Set the shuffle seed.
    pub fn with_seed(
        self,
        seed: Option<u64>,
    ) -> Self {
        Self { seed, ..self }
    }

    /// Build a [`SymmetricBatcher`] over a vocabulary.
    ///
    /// ## Errors
    /// * [`WordContextError::InvalidOption`] for a zero batch size or chunk size,
    ///   or a vocabulary which does not fit `I`.
    pub fn init<I: IndexType>(
        self,
        vocab: &Vocabulary,
    ) -> WCResult<SymmetricBatcher<I>> {
        SymmetricBatcher::new(self, vocab)
    }
}

/// Chunked, shuffled symmetric-window batches over a seekable corpus.
///
/// Each epoch rewinds the corpus and reads it in chunks of at most
/// `lines_per_chunk` lines. A chunk is vectorized, its examples extracted
/// and shuffled, and then sliced into batches; the final batch of a chunk
/// may be short. Shuffling never crosses chunk boundaries.
///
/// An epoch ends at the first chunk which yields no tokens. Normally that
/// is end-of-file; but a chunk made entirely of blank lines also ends
/// the epoch, even when more text follows it.
pub struct SymmetricBatcher<I: IndexType = i32> {
    options: SymmetricBatcherOptions,
    lookup: IndexLookup<I>,
    rng: StdRng,
}

impl<I: IndexType> SymmetricBatcher<I> {
    /// Create a new batcher.
    ///
    /// See [`SymmetricBatcherOptions::init`].
    pub fn new(
        options: SymmetricBatcherOptions,
        vocab: &Vocabulary,
    ) -> WCResult<Self> {
        if options.batch_size == 0 {
            return Err(WordContextError::InvalidOption(
                "batch_size must be > 0".to_string(),
            ));
        }
        if options.lines_per_chunk == 0 {
            return Err(WordContextError::InvalidOption(
                "lines_per_chunk must be > 0".to_string(),
            ));
        }

        let lookup = vocab.index_lookup()?;
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            options,
            lookup,
            rng,
        })
    }

    /// The options.
    pub fn options(&self) -> &SymmetricBatcherOptions {
        &self.options
    }

    /// The UNKNOWN index.
    pub fn unknown(&self) -> I {
        self.lookup.unknown()
    }

    /// Read and vectorize the next chunk of the corpus.
    ///
    /// Returns an empty vector when the chunk held no tokens.
    pub fn read_chunk<R: BufRead>(
        &self,
        reader: &mut R,
    ) -> WCResult<Vec<I>> {
        let mut ids = Vec::new();
        visit_line_chunk(
            reader,
            self.options.lines_per_chunk,
            self.options.case,
            |word| ids.push(self.lookup.get(word)),
        )?;
        Ok(ids)
    }

    /// Extract and shuffle the examples of one vectorized chunk.
    pub fn chunk_examples(
        &mut self,
        ids: &[I],
    ) -> Vec<SymmetricExample<I>> {
        let mut examples = extract_symmetric_examples(ids, self.options.window, self.unknown());
        examples.shuffle(&mut self.rng);
        examples
    }

    /// Shape a run of examples into a batch.
    pub fn to_batch(
        &self,
        examples: &[SymmetricExample<I>],
    ) -> SymmetricBatch<I> {
        let mut contexts = IndexMatrix::with_capacity(examples.len(), 2 * self.options.window);
        let mut targets = IndexMatrix::with_capacity(examples.len(), 1);
        for example in examples {
            contexts.push_row(&example.context);
            targets.push_row(&[example.target]);
        }
        SymmetricBatch { contexts, targets }
    }

    /// Rewind the corpus and start an epoch.
    ///
    /// The returned iterator borrows both the batcher and the reader.
    pub fn epoch<'a, R: BufRead + Seek>(
        &'a mut self,
        reader: &'a mut R,
    ) -> WCResult<SymmetricEpoch<'a, R, I>> {
        reader.seek(SeekFrom::Start(0))?;
        Ok(SymmetricEpoch {
            batcher: self,
            reader,
            pending: Vec::new(),
            cursor: 0,
            finished: false,
        })
    }
}

/// One epoch of symmetric-window batches.
///
/// See [`SymmetricBatcher::epoch`].
pub struct SymmetricEpoch<'a, R, I: IndexType> {
    batcher: &'a mut SymmetricBatcher<I>,
    reader: &'a mut R,
    pending: Vec<SymmetricExample<I>>,
    cursor: usize,
    finished: bool,
}

impl<R: BufRead, I: IndexType> Iterator for SymmetricEpoch<'_, R, I> {
    type Item = WCResult<SymmetricBatch<I>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cursor < self.pending.len() {
                let end = (self.cursor + self.batcher.options.batch_size).min(self.pending.len());
                let batch = self.batcher.to_batch(&self.pending[self.cursor..end]);
                self.cursor = end;
                return Some(Ok(batch));
            }
            if self.finished {
                return None;
            }

            log::info!("Reading next data batch...");
            let ids = match self.batcher.read_chunk(&mut *self.reader) {
                Ok(ids) => ids,
                Err(err) => {
                    self.finished = true;
                    return Some(Err(err));
                }
            };
            if ids.is_empty() {
                log::info!("Batch empty.");
                self.finished = true;
                return None;
            }

            log::info!("Vectorizing...");
            self.pending = self.batcher.chunk_examples(&ids);
            self.cursor = 0;
            log::info!("Batch ready.");
        }
    }
}
