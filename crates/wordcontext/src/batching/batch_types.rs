//! # Batch Types

use crate::{batching::IndexMatrix, types::IndexType};

/// A symmetric-window batch.
///
/// * `contexts`: `[n, 2 * window]`
/// * `targets`: `[n, 1]`
///
/// `n` is the batch size, except for the final batch of a chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetricBatch<I: IndexType = i32> {
    /// The flattened context indices, one row per example.
    pub contexts: IndexMatrix<I>,

    /// The target indices, one single-column row per example.
    pub targets: IndexMatrix<I>,
}

impl<I: IndexType> SymmetricBatch<I> {
    /// The number of examples.
    pub fn len(&self) -> usize {
        self.targets.rows()
    }

    /// Is the batch empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A split-window batch.
///
/// * `left`: `[n, window]`
/// * `right`: `[n, window]`
/// * `output`: `[n]`
///
/// Index `0` is PADDING and is reserved as a mask sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitBatch<I: IndexType = i32> {
    /// The left context indices.
    pub left: IndexMatrix<I>,

    /// The right context indices.
    pub right: IndexMatrix<I>,

    /// The masked center indices.
    pub output: Vec<I>,
}

impl<I: IndexType> SplitBatch<I> {
    /// The number of examples.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// Is the batch empty?
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}
