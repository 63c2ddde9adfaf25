//! # Corpus Token Stream

use std::{
    collections::VecDeque,
    fs::File,
    io::{BufRead, BufReader, Seek, SeekFrom},
    path::Path,
};

use crate::{WCResult, corpus::CaseMode, types::Token};

/// Open a corpus file for buffered reading.
///
/// Fails fast with [`crate::WordContextError::Io`] when the path is unreadable.
pub fn open_corpus<P: AsRef<Path>>(path: P) -> WCResult<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

/// A lazy stream of normalized words from a line reader.
///
/// Reads one line at a time; memory is bounded by the longest line.
pub struct CorpusTokens<R> {
    reader: R,
    case: CaseMode,
    line: String,
    pending: VecDeque<Token>,
    done: bool,
}

impl CorpusTokens<BufReader<File>> {
    /// Open a token stream over a corpus file.
    pub fn open<P: AsRef<Path>>(
        path: P,
        case: CaseMode,
    ) -> WCResult<Self> {
        Ok(Self::new(open_corpus(path)?, case))
    }
}

impl<R: BufRead> CorpusTokens<R> {
    /// Wrap a line reader.
    pub fn new(
        reader: R,
        case: CaseMode,
    ) -> Self {
        Self {
            reader,
            case,
            line: String::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// The case mode applied to each line.
    pub fn case(&self) -> CaseMode {
        self.case
    }

    /// Release the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read lines until at least one word is pending, or the stream ends.
    fn fill(&mut self) -> WCResult<()> {
        while self.pending.is_empty() && !self.done {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                self.done = true;
                break;
            }
            let pending = &mut self.pending;
            self.case
                .for_each_word(&self.line, |word| pending.push_back(Token::from(word)));
        }
        Ok(())
    }
}

impl<R: BufRead + Seek> CorpusTokens<R> {
    /// Seek the underlying reader back to offset zero and drop pending words.
    pub fn rewind(&mut self) -> WCResult<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.pending.clear();
        self.done = false;
        Ok(())
    }
}

impl<R: BufRead> Iterator for CorpusTokens<R> {
    type Item = WCResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Err(err) = self.fill() {
            self.done = true;
            return Some(Err(err));
        }
        self.pending.pop_front().map(Ok)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn collect<R: BufRead>(tokens: CorpusTokens<R>) -> Vec<String> {
        tokens.map(|t| t.unwrap().to_string()).collect()
    }

    #[test]
    fn test_tokens_across_lines() {
        let text = "The cat\n\n  sat on\tthe MAT\n";
        let tokens = CorpusTokens::new(Cursor::new(text), CaseMode::Preserve);
        assert_eq!(
            collect(tokens),
            vec!["The", "cat", "sat", "on", "the", "MAT"]
        );

        let tokens = CorpusTokens::new(Cursor::new(text), CaseMode::Lowercase);
        assert_eq!(
            collect(tokens),
            vec!["the", "cat", "sat", "on", "the", "mat"]
        );
    }

    #[test]
    fn test_no_trailing_newline() {
        let tokens = CorpusTokens::new(Cursor::new("a b\nc"), CaseMode::Preserve);
        assert_eq!(collect(tokens), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rewind() {
        let mut tokens = CorpusTokens::new(Cursor::new("x y\nz\n"), CaseMode::Preserve);
        assert_eq!(tokens.next().unwrap().unwrap(), "x");
        tokens.rewind().unwrap();
        assert_eq!(collect(tokens), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_missing_corpus() {
        let err = CorpusTokens::open("/nonexistent/wordcontext/corpus.txt", CaseMode::Preserve)
            .err()
            .unwrap();
        assert!(matches!(err, crate::WordContextError::Io(_)));
    }
}
