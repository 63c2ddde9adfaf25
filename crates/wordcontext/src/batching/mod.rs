//! # Batching
//!
//! Vectorizes context examples into fixed-width index batches.
//!
//! * [`SymmetricBatcher`] - chunked, shuffled [`SymmetricBatch`]es, one
//!   epoch per rewind of the corpus.
//! * [`SplitBatcher`] - unshuffled [`SplitBatch`]es over an endless
//!   [`crate::corpus::LoopingReader`] stream.

mod batch_types;
mod index_matrix;
mod split_batcher;
mod symmetric_batcher;

#[doc(inline)]
pub use batch_types::{SplitBatch, SymmetricBatch};
#[doc(inline)]
pub use index_matrix::IndexMatrix;
#[doc(inline)]
pub use split_batcher::{SplitBatchStream, SplitBatcher, SplitBatcherOptions};
#[doc(inline)]
pub use symmetric_batcher::{SymmetricBatcher, SymmetricBatcherOptions, SymmetricEpoch};
