//! Topological classification of grid cells.
//!
//! ## Purpose
//!
//! Crosstalk is estimated from a different neighbourhood depending on where
//! a cell sits on the array. This module resolves a `(row, col)` pair into one
//! of nine [`CellPosition`] variants and exposes, per variant, the exact
//! neighbour set and the regulation-factor class used by the estimator.
//!
//! ## Key concepts
//!
//! ### Neighbour sets
//!
//! With `R = rows - 1` and `C = cols - 1`:
//!
//! ```text
//! TopLeft      (0,0)   -> (1,0)   (0,1)   (1,1)
//! BottomRight  (R,C)   -> (R-1,C) (R,C-1) (R-1,C-1)
//! BottomLeft   (R,0)   -> (R-1,0) (R,1)   (R-1,1)
//! TopRight     (0,C)   -> (0,C-1) (1,C-1) (1,C)
//! Top          (0,j)   -> (0,j+1) (0,j-1) (1,j)
//! Bottom       (R,j)   -> (R,j+1) (R,j-1) (R-1,j)
//! Left         (i,0)   -> (i-1,0) (i+1,0) (i,1)
//! Right        (i,C)   -> (i-1,C) (i+1,C) (i,C-1)
//! Interior     (i,j)   -> (i+1,j) (i,j+1) (i-1,j) (i,j-1)
//! ```
//!
//! Corners take precedence over edges. Neighbour order is the summation
//! order of the estimator.
//!
//! ## Invariants
//!
//! * Classification is total for any grid of at least 2x2.
//! * Every returned neighbour index is in range and differs from the cell.

/// Coarse topology class selecting the regulation factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopologyClass {
    /// One of the four corners (factor `k1`).
    Corner,
    /// Border cell that is not a corner (factor `k2`).
    Edge,
    /// Cell with four axis-adjacent neighbours (factor `k3`).
    Interior,
}

/// Position of a cell relative to the grid bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellPosition {
    /// `(0, 0)`.
    TopLeft,
    /// `(0, cols - 1)`.
    TopRight,
    /// `(rows - 1, 0)`.
    BottomLeft,
    /// `(rows - 1, cols - 1)`.
    BottomRight,
    /// First row, excluding corners.
    Top,
    /// Last row, excluding corners.
    Bottom,
    /// First column, excluding corners.
    Left,
    /// Last column, excluding corners.
    Right,
    /// Everything else.
    Interior,
}

/// Up to four neighbour coordinates, in summation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    cells: [(usize, usize); 4],
    len: usize,
}

impl Neighborhood {
    fn three(a: (usize, usize), b: (usize, usize), c: (usize, usize)) -> Self {
        Self {
            cells: [a, b, c, (0, 0)],
            len: 3,
        }
    }

    fn four(a: (usize, usize), b: (usize, usize), c: (usize, usize), d: (usize, usize)) -> Self {
        Self {
            cells: [a, b, c, d],
            len: 4,
        }
    }

    /// Neighbour coordinates.
    pub fn as_slice(&self) -> &[(usize, usize)] {
        &self.cells[..self.len]
    }

    /// Number of neighbours (3 or 4).
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when there are no neighbours.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl CellPosition {
    /// Classify `(row, col)` on a `rows x cols` grid.
    ///
    /// Callers must guarantee `rows >= 2`, `cols >= 2` and that the cell is
    /// in range; the validator enforces this before any sweep.
    pub fn classify(row: usize, col: usize, rows: usize, cols: usize) -> Self {
        debug_assert!(rows >= 2 && cols >= 2, "grid smaller than 2x2");
        debug_assert!(row < rows && col < cols, "cell out of range");

        let last_row = rows - 1;
        let last_col = cols - 1;

        match (row, col) {
            (0, 0) => Self::TopLeft,
            (r, c) if r == last_row && c == last_col => Self::BottomRight,
            (r, 0) if r == last_row => Self::BottomLeft,
            (0, c) if c == last_col => Self::TopRight,
            (0, _) => Self::Top,
            (r, _) if r == last_row => Self::Bottom,
            (_, 0) => Self::Left,
            (_, c) if c == last_col => Self::Right,
            _ => Self::Interior,
        }
    }

    /// Regulation-factor class for this position.
    pub fn class(self) -> TopologyClass {
        match self {
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight => {
                TopologyClass::Corner
            }
            Self::Top | Self::Bottom | Self::Left | Self::Right => TopologyClass::Edge,
            Self::Interior => TopologyClass::Interior,
        }
    }

    /// Neighbours contributing crosstalk to `(row, col)`.
    ///
    /// `self` must be the classification of `(row, col)` on a
    /// `rows x cols` grid.
    pub fn neighbors(self, row: usize, col: usize, rows: usize, cols: usize) -> Neighborhood {
        let (i, j) = (row, col);
        let last_row = rows - 1;
        let last_col = cols - 1;

        match self {
            Self::TopLeft => Neighborhood::three((1, 0), (0, 1), (1, 1)),
            Self::BottomRight => Neighborhood::three(
                (last_row - 1, last_col),
                (last_row, last_col - 1),
                (last_row - 1, last_col - 1),
            ),
            Self::BottomLeft => {
                Neighborhood::three((last_row - 1, 0), (last_row, 1), (last_row - 1, 1))
            }
            Self::TopRight => {
                Neighborhood::three((0, last_col - 1), (1, last_col - 1), (1, last_col))
            }
            Self::Top => Neighborhood::three((i, j + 1), (i, j - 1), (i + 1, j)),
            Self::Bottom => Neighborhood::three((i, j + 1), (i, j - 1), (i - 1, j)),
            Self::Left => Neighborhood::three((i - 1, j), (i + 1, j), (i, j + 1)),
            Self::Right => Neighborhood::three((i - 1, j), (i + 1, j), (i, j - 1)),
            Self::Interior => Neighborhood::four((i + 1, j), (i, j + 1), (i - 1, j), (i, j - 1)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn neighbour_set(row: usize, col: usize, rows: usize, cols: usize) -> BTreeSet<(usize, usize)> {
        let pos = CellPosition::classify(row, col, rows, cols);
        pos.neighbors(row, col, rows, cols)
            .as_slice()
            .iter()
            .copied()
            .collect()
    }

    #[test]
    fn corners_on_3x3() {
        assert_eq!(CellPosition::classify(0, 0, 3, 3), CellPosition::TopLeft);
        assert_eq!(CellPosition::classify(0, 2, 3, 3), CellPosition::TopRight);
        assert_eq!(CellPosition::classify(2, 0, 3, 3), CellPosition::BottomLeft);
        assert_eq!(CellPosition::classify(2, 2, 3, 3), CellPosition::BottomRight);

        assert_eq!(
            neighbour_set(0, 0, 3, 3),
            BTreeSet::from([(1, 0), (0, 1), (1, 1)])
        );
        assert_eq!(
            neighbour_set(2, 2, 3, 3),
            BTreeSet::from([(1, 2), (2, 1), (1, 1)])
        );
        assert_eq!(
            neighbour_set(2, 0, 3, 3),
            BTreeSet::from([(1, 0), (2, 1), (1, 1)])
        );
        assert_eq!(
            neighbour_set(0, 2, 3, 3),
            BTreeSet::from([(0, 1), (1, 1), (1, 2)])
        );
    }

    #[test]
    fn top_edge_on_3x5() {
        assert_eq!(CellPosition::classify(0, 2, 3, 5), CellPosition::Top);
        assert_eq!(
            neighbour_set(0, 2, 3, 5),
            BTreeSet::from([(0, 1), (0, 3), (1, 2)])
        );
    }

    #[test]
    fn other_edges_use_inward_neighbour() {
        assert_eq!(CellPosition::classify(2, 2, 3, 5), CellPosition::Bottom);
        assert_eq!(
            neighbour_set(2, 2, 3, 5),
            BTreeSet::from([(2, 1), (2, 3), (1, 2)])
        );

        assert_eq!(CellPosition::classify(2, 0, 5, 3), CellPosition::Left);
        assert_eq!(
            neighbour_set(2, 0, 5, 3),
            BTreeSet::from([(1, 0), (3, 0), (2, 1)])
        );

        assert_eq!(CellPosition::classify(2, 2, 5, 3), CellPosition::Right);
        assert_eq!(
            neighbour_set(2, 2, 5, 3),
            BTreeSet::from([(1, 2), (3, 2), (2, 1)])
        );
    }

    #[test]
    fn interior_on_5x5() {
        let pos = CellPosition::classify(2, 2, 5, 5);
        assert_eq!(pos, CellPosition::Interior);
        assert_eq!(pos.neighbors(2, 2, 5, 5).len(), 4);
        assert_eq!(
            neighbour_set(2, 2, 5, 5),
            BTreeSet::from([(1, 2), (3, 2), (2, 1), (2, 3)])
        );
    }

    #[test]
    fn every_cell_of_2x2_is_a_corner() {
        for row in 0..2 {
            for col in 0..2 {
                let pos = CellPosition::classify(row, col, 2, 2);
                assert_eq!(pos.class(), TopologyClass::Corner);
                let set = neighbour_set(row, col, 2, 2);
                assert_eq!(set.len(), 3);
                assert!(!set.contains(&(row, col)));
            }
        }
    }

    #[test]
    fn narrow_grids_have_no_interior() {
        for row in 0..2 {
            for col in 0..6 {
                let pos = CellPosition::classify(row, col, 2, 6);
                assert_ne!(pos.class(), TopologyClass::Interior);
            }
        }
    }

    #[test]
    fn neighbours_stay_in_range() {
        for &(rows, cols) in &[(2, 2), (2, 5), (5, 2), (3, 3), (4, 7)] {
            for row in 0..rows {
                for col in 0..cols {
                    let pos = CellPosition::classify(row, col, rows, cols);
                    for &(r, c) in pos.neighbors(row, col, rows, cols).as_slice() {
                        assert!(r < rows && c < cols);
                        assert_ne!((r, c), (row, col));
                    }
                }
            }
        }
    }

    #[test]
    fn class_counts_on_4x5() {
        let mut corners = 0;
        let mut edges = 0;
        let mut interior = 0;
        for row in 0..4 {
            for col in 0..5 {
                match CellPosition::classify(row, col, 4, 5).class() {
                    TopologyClass::Corner => corners += 1,
                    TopologyClass::Edge => edges += 1,
                    TopologyClass::Interior => interior += 1,
                }
            }
        }
        assert_eq!((corners, edges, interior), (4, 10, 6));
    }
}
