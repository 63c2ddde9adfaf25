//! # Vocabulary
//!
//! Vocabulary construction, index layouts, and persisted caches.
//!
//! * [`TokenCounter`] - the single-pass frequency table.
//! * [`build_vocabulary`] - top-K selection into [`VocabCounts`].
//! * [`Vocabulary`] - the immutable word to index mapping, in one of two
//!   [`VocabLayout`]s; and its typed [`IndexLookup`].
//! * [`load_or_build_vocab`] / [`load_or_build_features`] - cached builds.

mod token_counter;
mod vocab_builder;
mod vocab_cache;
mod vocabulary;

#[doc(inline)]
pub use token_counter::TokenCounter;
#[doc(inline)]
pub use vocab_builder::{VocabCounts, build_vocabulary, build_vocabulary_path};
#[doc(inline)]
pub use vocab_cache::{
    FeatureArchive,
    VOCAB_CACHE_SUFFIX,
    feature_cache_suffix,
    load_or_build_features,
    load_or_build_vocab,
    read_archive,
    write_archive,
};
#[doc(inline)]
pub use vocabulary::{IndexLookup, PADDING_TOKEN, UNKNOWN_TOKEN, VocabLayout, Vocabulary};
