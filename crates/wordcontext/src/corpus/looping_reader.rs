//! # Looping Reader

use std::{
    fs::File,
    io::{BufRead, BufReader, Seek},
    path::Path,
};

use crate::{
    WCResult,
    corpus::{CaseMode, CorpusTokens, open_corpus},
    types::Token,
};

/// An endless token stream over a finite, seekable corpus.
///
/// At end-of-stream the underlying reader is rewound to offset zero and
/// reading continues; [`LoopingReader::pass`] counts completed rewinds.
///
/// A pass that yields no tokens at all ends the stream, rather than
/// rewinding forever over an empty corpus.
pub struct LoopingReader<R> {
    tokens: CorpusTokens<R>,
    pass: usize,
    pass_tokens: u64,
    exhausted: bool,
}

impl LoopingReader<BufReader<File>> {
    /// Open a looping reader over a corpus file.
    pub fn open<P: AsRef<Path>>(
        path: P,
        case: CaseMode,
    ) -> WCResult<Self> {
        Ok(Self::new(open_corpus(path)?, case))
    }
}

impl<R: BufRead + Seek> LoopingReader<R> {
    /// Wrap a seekable line reader; reading starts at its current position.
    pub fn new(
        reader: R,
        case: CaseMode,
    ) -> Self {
        Self {
            tokens: CorpusTokens::new(reader, case),
            pass: 0,
            pass_tokens: 0,
            exhausted: false,
        }
    }

    /// The zero-based index of the current pass over the corpus.
    pub fn pass(&self) -> usize {
        self.pass
    }

    /// The word normalization applied to every line.
    pub fn case(&self) -> CaseMode {
        self.tokens.case()
    }

    /// Restart from the beginning of the corpus, as a new pass.
    pub fn restart(&mut self) -> WCResult<()> {
        self.tokens.rewind()?;
        self.pass += 1;
        self.pass_tokens = 0;
        self.exhausted = false;
        Ok(())
    }
}

impl<R: BufRead + Seek> Iterator for LoopingReader<R> {
    type Item = WCResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        loop {
            match self.tokens.next() {
                Some(Ok(token)) => {
                    self.pass_tokens += 1;
                    return Some(Ok(token));
                }
                Some(Err(err)) => {
                    self.exhausted = true;
                    return Some(Err(err));
                }
                None => {
                    if self.pass_tokens == 0 {
                        log::warn!("Corpus pass {} produced no tokens; stopping.", self.pass);
                        self.exhausted = true;
                        return None;
                    }
                    log::debug!(
                        "Corpus pass {} done after {} tokens; rewinding.",
                        self.pass,
                        self.pass_tokens
                    );
                    if let Err(err) = self.restart() {
                        self.exhausted = true;
                        return Some(Err(err));
                    }
                }
            }
        }
    }
}
