//! # `wordcontext` Word-Context Training Pipelines
//!
//! Streaming corpus-to-training-example pipelines for two word-context
//! models over plain-text, pre-tokenized corpora:
//!
//! * a context-prediction (CBOW-style) model fed symmetric windows;
//! * a bidirectional sequence model fed split left/right windows around a
//!   masked center word.
//!
//! Data flows:
//! corpus file > [`corpus`] > [`vocab`] (offline, cached) > [`windows`] >
//! [`batching`] > [`consumer`].
//!
//! See:
//! * [`corpus`] to stream words from a corpus, once or endlessly.
//! * [`vocab`] to build, cache, and load vocabularies.
//! * [`windows`] for the two context window policies.
//! * [`batching`] to shape examples into index batches.
//! * [`consumer`] for the model contract and epoch drivers.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::WCHash{*}`` type alias machinery.
//!
//! ## Symmetric Window Pipeline
//!
//! ```rust,ignore
//! use wordcontext::batching::SymmetricBatcherOptions;
//! use wordcontext::consumer::TrainingLoopOptions;
//! use wordcontext::corpus::open_corpus;
//! use wordcontext::disk_cache::CorpusCache;
//! use wordcontext::vocab::{load_or_build_vocab, Vocabulary};
//!
//! let cache = CorpusCache::default();
//! let counts = load_or_build_vocab("corpus.txt", 100_000, false, &cache)?;
//! let vocab = Vocabulary::unknown_last(counts.words.clone());
//!
//! let mut batcher = SymmetricBatcherOptions::default()
//!     .with_window(3)
//!     .init::<i32>(&vocab)?;
//! let mut reader = open_corpus("corpus.txt")?;
//!
//! let mut training = TrainingLoopOptions::default().init()?;
//! training.run_symmetric_epochs(&mut model, &mut batcher, &mut reader, counts.n_tokens)?;
//! ```
//!
//! ## Split Window Pipeline
//!
//! ```rust,ignore
//! use wordcontext::batching::SplitBatcherOptions;
//! use wordcontext::consumer::TrainingLoopOptions;
//! use wordcontext::disk_cache::CorpusCache;
//! use wordcontext::vocab::{load_or_build_features, Vocabulary};
//!
//! let n_features = 100_000;
//! let features = load_or_build_features("corpus.txt", n_features, &CorpusCache::default())?;
//! let vocab = Vocabulary::padded(features.words().iter().cloned(), n_features);
//!
//! let batcher = SplitBatcherOptions::default().init::<i32>(&vocab)?;
//! let mut stream = batcher.stream_path("corpus.txt")?;
//!
//! let mut training = TrainingLoopOptions::default().init()?;
//! training.run_split_epochs(&mut model, &mut stream, features.n_total_tokens())?;
//! training.finish(&model, Some("weights.json".as_ref()))?;
//! ```
#![warn(missing_docs, unused)]

#[doc(inline)]
pub use wordcontext_disk_cache as disk_cache;

pub mod batching;
pub mod consumer;
pub mod corpus;
pub mod types;
pub mod vocab;
pub mod windows;

mod errors;

#[doc(inline)]
pub use errors::{WCResult, WordContextError};
