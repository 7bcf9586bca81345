//! Row-major grid buffer for sensor magnitudes.
//!
//! ## Purpose
//!
//! [`Grid`] is the owned rectangular buffer every layer of the crate works
//! on: the caller's input, the live working grid relaxed during a sweep and
//! the rounded output grid all share this type.
//!
//! ## Design notes
//!
//! * Values are stored in a single row-major `Vec<T>`; cell `(r, c)` lives
//!   at `r * cols + c`.
//! * Indexing with `grid[(r, c)]` panics on out-of-range indices like slice
//!   indexing does. Algorithms only index cells produced by
//!   [`CellPosition`](crate::primitives::position::CellPosition), which are
//!   in range by construction.
//! * Construction checks shape only. Value checks (finite, minimum size)
//!   belong to the validator.

use core::ops::{Index, IndexMut};
use num_traits::Float;

use crate::primitives::errors::CrosstalkError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rectangular grid of real-valued magnitudes, stored row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Float> Grid<T> {
    /// Create a grid from row-major data.
    pub fn new(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, CrosstalkError> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(CrosstalkError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a grid filled with a single value.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Create a grid from nested rows, rejecting ragged input.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, CrosstalkError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, |r| r.as_ref().len());

        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != n_cols {
                return Err(CrosstalkError::RaggedInput {
                    row,
                    expected: n_cols,
                    got: values.len(),
                });
            }
            data.extend_from_slice(values);
        }

        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Row-major view of all values.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Iterate over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks_exact panics on a zero chunk size.
        self.data.chunks_exact(self.cols.max(1))
    }

    /// Copy into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }

    /// Consume the grid, returning its row-major data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) out of range for {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) out of range for {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        &mut self.data[row * self.cols + col]
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + core::fmt::Display> core::fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let precision = f.precision().unwrap_or(2);
        for row in self.iter_rows() {
            for (c, value) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>9.*}", precision, value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
