//! Cell traversal orders for the relaxation sweep.
//!
//! The sweep is Gauss-Seidel: every committed update is visible to cells
//! visited later. The traversal order is therefore part of the result, not a
//! scheduling detail.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Order in which the sweep visits cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TraversalOrder {
    /// Row 0 left to right, then row 1, and so on.
    #[default]
    RowMajor,

    /// Column 0 top to bottom, then column 1, and so on.
    ColumnMajor,
}

impl TraversalOrder {
    /// Iterate over all `(row, col)` pairs of a `rows x cols` grid.
    pub fn cells(self, rows: usize, cols: usize) -> impl Iterator<Item = (usize, usize)> {
        let total = rows * cols;
        (0..total).map(move |k| match self {
            Self::RowMajor => (k / cols, k % cols),
            Self::ColumnMajor => (k % rows, k / rows),
        })
    }
}
