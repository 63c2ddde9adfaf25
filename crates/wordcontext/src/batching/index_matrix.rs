//! # Index Matrix

use crate::types::IndexType;

/// A dense, row-major `[rows, cols]` matrix of vocabulary indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMatrix<I: IndexType> {
    data: Vec<I>,
    rows: usize,
    cols: usize,
}

impl<I: IndexType> IndexMatrix<I> {
    /// Create an empty matrix with a fixed column count.
    pub fn with_capacity(
        rows: usize,
        cols: usize,
    ) -> Self {
        Self {
            data: Vec::with_capacity(rows * cols),
            rows: 0,
            cols,
        }
    }

    /// Append a row.
    ///
    /// ## Panics
    /// Panics if `row.len() != self.cols()`.
    pub fn push_row(
        &mut self,
        row: &[I],
    ) {
        assert_eq!(row.len(), self.cols, "row width mismatch");
        self.data.extend_from_slice(row);
        self.rows += 1;
    }

    /// Append a row produced by `fill`, which must push exactly `cols` values.
    ///
    /// ## Panics
    /// Panics if `fill` pushes the wrong number of values.
    pub fn push_row_with<F>(
        &mut self,
        fill: F,
    ) where
        F: FnOnce(&mut Vec<I>),
    {
        let before = self.data.len();
        fill(&mut self.data);
        assert_eq!(self.data.len() - before, self.cols, "row width mismatch");
        self.rows += 1;
    }

    /// The `(rows, cols)` shape.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// The row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get a row.
    pub fn row(
        &self,
        row: usize,
    ) -> Option<&[I]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    /// Iterate over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[I]> {
        (0..self.rows).map(move |r| &self.data[r * self.cols..(r + 1) * self.cols])
    }

    /// View the row-major values.
    pub fn as_slice(&self) -> &[I] {
        &self.data
    }

    /// Release the row-major values.
    pub fn into_vec(self) -> Vec<I> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows() {
        let mut m: IndexMatrix<i32> = IndexMatrix::with_capacity(2, 3);
        m.push_row(&[1, 2, 3]);
        m.push_row_with(|out| out.extend([4, 5, 6]));

        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.row(1), Some(&[4, 5, 6][..]));
        assert_eq!(m.row(2), None);
        assert_eq!(m.iter_rows().count(), 2);
        assert_eq!(m.into_vec(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_zero_width_rows() {
        let mut m: IndexMatrix<i32> = IndexMatrix::with_capacity(2, 0);
        m.push_row(&[]);
        m.push_row(&[]);
        assert_eq!(m.shape(), (2, 0));
        assert_eq!(m.row(1), Some(&[][..]));
    }

    #[test]
    #[should_panic(expected = "row width mismatch")]
    fn test_bad_row() {
        let mut m: IndexMatrix<i32> = IndexMatrix::with_capacity(1, 2);
        m.push_row(&[1]);
    }
}
