//! # Corpus Readers
//!
//! A corpus is a plain-text file of pre-tokenized, whitespace-delimited words;
//! line breaks carry no meaning beyond separating words.
//!
//! * [`CorpusTokens`] - a lazy token stream over any [`std::io::BufRead`].
//! * [`visit_line_chunk`] - bounded line-count chunk reads, for block-wise pipelines.
//! * [`LoopingReader`] - an endless token stream that rewinds at end-of-stream.
//!
//! All readers normalize words through a [`CaseMode`].

mod case_mode;
mod corpus_tokens;
mod line_chunks;
mod looping_reader;

#[doc(inline)]
pub use case_mode::CaseMode;
#[doc(inline)]
pub use corpus_tokens::{CorpusTokens, open_corpus};
#[doc(inline)]
pub use line_chunks::visit_line_chunk;
#[doc(inline)]
pub use looping_reader::LoopingReader;
