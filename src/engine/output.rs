//! Output types for crosstalk correction.
//!
//! ## Purpose
//!
//! This module defines [`CorrectionResult`], the container returned by every
//! adapter: the rounded corrected grid plus the unrounded answers, per-cell
//! iteration metadata and optional diagnostics.
//!
//! ## Design notes
//!
//! * `corrected` is the primary answer; everything else is supporting data.
//! * The mutated working grid is only kept when requested, as a diagnostic
//!   artifact. It is not a valid input for a second pass unless the caller
//!   deliberately treats it as new input.
//! * Implements `Display` with truncation for large grids.
//!
//! ## Invariants
//!
//! * All grids share one shape.
//! * `iterations` and `outcomes` are row-major with one entry per cell.

use num_traits::Float;

use crate::algorithms::crosstalk::RegulationFactors;
use crate::algorithms::relaxation::{CellOutcome, ConvergenceParameters};
use crate::evaluation::diagnostics::CorrectionDiagnostics;
use crate::primitives::grid::Grid;
use crate::primitives::traversal::TraversalOrder;

// ============================================================================
// Result Structure
// ============================================================================

/// Corrected grid with supporting per-cell data.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrectionResult<T> {
    /// Rounded corrected magnitudes.
    pub corrected: Grid<T>,

    /// Unrounded corrected magnitudes (last result of each cell's solve).
    pub refined: Grid<T>,

    /// Working grid after the sweep, if requested.
    pub working: Option<Grid<T>>,

    /// Local iterations per cell, row-major.
    pub iterations: Vec<usize>,

    /// Terminal state per cell, row-major.
    pub outcomes: Vec<CellOutcome>,

    /// Sweep statistics, if requested.
    pub diagnostics: Option<CorrectionDiagnostics<T>>,

    /// Factors the sweep ran with.
    pub factors_used: RegulationFactors<T>,

    /// Stopping rules the sweep ran with.
    pub convergence_used: ConvergenceParameters<T>,

    /// Traversal order the sweep ran with.
    pub traversal_order: TraversalOrder,
}

impl<T: Float> CorrectionResult<T> {
    // ========================================================================
    // Query Methods
    // ========================================================================

    /// `(rows, cols)` of the corrected grid.
    pub fn shape(&self) -> (usize, usize) {
        self.corrected.shape()
    }

    /// Local iterations spent on `(row, col)`.
    pub fn iterations_at(&self, row: usize, col: usize) -> Option<usize> {
        self.index_of(row, col).map(|k| self.iterations[k])
    }

    /// Terminal state of `(row, col)`.
    pub fn outcome_at(&self, row: usize, col: usize) -> Option<CellOutcome> {
        self.index_of(row, col).map(|k| self.outcomes[k])
    }

    /// True when every cell converged within budget.
    pub fn all_converged(&self) -> bool {
        self.outcomes.iter().all(|&o| o == CellOutcome::Converged)
    }

    /// Check if diagnostics were computed.
    pub fn has_diagnostics(&self) -> bool {
        self.diagnostics.is_some()
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        let (rows, cols) = self.shape();
        (row < rows && col < cols).then_some(row * cols + col)
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + core::fmt::Display> core::fmt::Display for CorrectionResult<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (rows, cols) = self.shape();
        let factors = &self.factors_used;

        writeln!(f, "Summary:")?;
        writeln!(f, "  Grid: {}x{}", rows, cols)?;
        writeln!(
            f,
            "  Factors: k1={} k2={} k3={} decay={}",
            factors.k1, factors.k2, factors.k3, factors.decay_rate
        )?;
        writeln!(
            f,
            "  Max iterations: {}  Tolerance: {}",
            self.convergence_used.max_iterations, self.convergence_used.tolerance
        )?;
        writeln!(f, "  Traversal: {:?}", self.traversal_order)?;
        writeln!(f)?;

        if let Some(diag) = &self.diagnostics {
            writeln!(f, "{}", diag)?;
            writeln!(f)?;
        }

        writeln!(f, "Corrected Grid:")?;

        // Show first 10 and last 10 rows if more than 20
        let show_all = rows <= 20;
        let rows_to_show: Vec<usize> = if show_all {
            (0..rows).collect()
        } else {
            (0..10).chain(rows - 10..rows).collect()
        };

        let mut prev_row = 0;
        for (i, &row) in rows_to_show.iter().enumerate() {
            if i > 0 && row != prev_row + 1 {
                writeln!(f, "{:>6}", "...")?;
            }
            prev_row = row;

            for (c, value) in self.corrected.row(row).iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>6.0}", value)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(rows: usize, cols: usize) -> CorrectionResult<f64> {
        let n = rows * cols;
        let mut outcomes = vec![CellOutcome::Converged; n];
        outcomes[n - 1] = CellOutcome::BudgetExceeded;
        CorrectionResult {
            corrected: Grid::filled(rows, cols, 3.0),
            refined: Grid::filled(rows, cols, 3.2),
            working: None,
            iterations: (0..n).collect(),
            outcomes,
            diagnostics: None,
            factors_used: RegulationFactors::default(),
            convergence_used: ConvergenceParameters::default(),
            traversal_order: TraversalOrder::RowMajor,
        }
    }

    #[test]
    fn per_cell_queries_are_row_major() {
        let r = result(2, 3);
        assert_eq!(r.iterations_at(1, 0), Some(3));
        assert_eq!(r.iterations_at(2, 0), None);
        assert_eq!(r.outcome_at(1, 2), Some(CellOutcome::BudgetExceeded));
        assert!(!r.all_converged());
        assert!(!r.has_diagnostics());
    }

    #[test]
    fn display_truncates_tall_grids() {
        let text = result(25, 2).to_string();
        assert!(text.contains("Grid: 25x2"));
        assert!(text.contains("..."));
        // header lines + 20 grid rows + ellipsis
        let grid_lines = text
            .lines()
            .skip_while(|l| !l.starts_with("Corrected Grid:"))
            .skip(1)
            .count();
        assert_eq!(grid_lines, 21);
    }
}
