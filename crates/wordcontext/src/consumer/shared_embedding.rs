//! # Shared Embedding Table
//!
//! Split-window models embed their left and right contexts with one tied
//! table; [`SharedEmbedding::lookup_split`] is the single entry point for
//! both sides, so the weights are shared by construction.

use std::path::Path;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    WCResult,
    WordContextError,
    batching::{IndexMatrix, SplitBatch},
    types::IndexType,
    vocab::{read_archive, write_archive},
};

/// Embedded rows of one index matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedRows {
    /// Row-major `[rows, cols, dim]` values.
    pub values: Vec<f32>,

    /// Per-position `[rows, cols]` mask; `false` at PADDING (index `0`).
    pub mask: Vec<bool>,

    /// The `(rows, cols, dim)` shape.
    pub shape: (usize, usize, usize),
}

/// A `[table_size, dim]` `f32` embedding table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedEmbedding {
    table_size: usize,
    dim: usize,
    weights: Vec<f32>,
}

impl SharedEmbedding {
    /// Create a table initialized uniformly in `[-1, 1]`.
    ///
    /// ## Arguments
    /// * `table_size` - the number of index slots; see
    ///   [`crate::vocab::Vocabulary::table_size`].
    /// * `dim` - the embedding width.
    /// * `seed` - optional initialization seed.
    pub fn new(
        table_size: usize,
        dim: usize,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let weights = (0..table_size * dim)
            .map(|_| rng.random_range(-1.0f32..=1.0))
            .collect();
        Self {
            table_size,
            dim,
            weights,
        }
    }

    /// The number of index slots.
    pub fn table_size(&self) -> usize {
        self.table_size
    }

    /// The embedding width.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The row-major weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// The mutable row-major weights.
    pub fn weights_mut(&mut self) -> &mut [f32] {
        &mut self.weights
    }

    /// The embedding vector of one index.
    pub fn row<I: IndexType>(
        &self,
        index: I,
    ) -> WCResult<&[f32]> {
        let idx = index
            .to_usize()
            .filter(|&idx| idx < self.table_size)
            .ok_or_else(|| {
                WordContextError::InvalidOption(format!(
                    "index {index} outside embedding table of {}",
                    self.table_size
                ))
            })?;
        Ok(&self.weights[idx * self.dim..(idx + 1) * self.dim])
    }

    /// Embed every position of an index matrix.
    ///
    /// ## Errors
    /// * [`WordContextError::InvalidOption`] for an index outside the table.
    pub fn lookup<I: IndexType>(
        &self,
        indices: &IndexMatrix<I>,
    ) -> WCResult<EmbeddedRows> {
        let (rows, cols) = indices.shape();
        let mut values = Vec::with_capacity(rows * cols * self.dim);
        let mut mask = Vec::with_capacity(rows * cols);
        for &index in indices.as_slice() {
            values.extend_from_slice(self.row(index)?);
            mask.push(index != I::zero());
        }
        Ok(EmbeddedRows {
            values,
            mask,
            shape: (rows, cols, self.dim),
        })
    }

    /// Embed the left and right contexts of a split batch with this table.
    pub fn lookup_split<I: IndexType>(
        &self,
        batch: &SplitBatch<I>,
    ) -> WCResult<(EmbeddedRows, EmbeddedRows)> {
        Ok((self.lookup(&batch.left)?, self.lookup(&batch.right)?))
    }

    /// Write the table as JSON.
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> WCResult<()> {
        write_archive(self, path)
    }

    /// Read a table written by [`SharedEmbedding::save`].
    pub fn load<P: AsRef<Path>>(path: P) -> WCResult<Self> {
        let path = path.as_ref();
        let table: Self = read_archive(path)?;
        if table.weights.len() != table.table_size * table.dim {
            return Err(WordContextError::Deserialization {
                path: path.to_path_buf(),
                message: format!(
                    "expected {} x {} weights, found {}",
                    table.table_size,
                    table.dim,
                    table.weights.len()
                ),
            });
        }
        Ok(table)
    }
}
