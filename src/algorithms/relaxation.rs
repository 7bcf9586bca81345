//! Per-cell fixed-point relaxation.
//!
//! ## Purpose
//!
//! This module runs the bounded fixed-point iteration that removes crosstalk
//! from a single cell of the working grid. Each local iteration re-estimates
//! crosstalk from the current grid contents and refines the cell's value.
//!
//! ## Key concepts
//!
//! ### Local iteration
//!
//! For `it = 0, 1, ...` (at most `max_iterations + 2` passes):
//!
//! 1. `estimate = estimate_crosstalk(grid, cell, it)`
//! 2. `result = |grid[cell] - estimate|`
//! 3. `|result - grid[cell]| < tolerance` → converged, stop
//! 4. `it > max_iterations` → budget exceeded, stop
//! 5. otherwise `grid[cell] = result` and continue
//!
//! ### Write policy
//!
//! The stopping pass does not commit its `result`. The working grid keeps
//! the value committed by the previous pass (or the original input), while
//! the returned solution carries the newer `result`. Cells visited later in
//! the sweep therefore see a value one refinement step behind the cell's
//! reported answer.
//!
//! ## Invariants
//!
//! * At most `max_iterations + 2` estimates per cell.
//! * Only `grid[cell]` is written; neighbours are read-only here.
//! * The convergence check runs before the budget check.

use num_traits::Float;

use crate::algorithms::crosstalk::{estimate_at, RegulationFactors};
use crate::primitives::errors::CrosstalkError;
use crate::primitives::grid::Grid;
use crate::primitives::position::CellPosition;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Parameters and Outcomes
// ============================================================================

/// Stopping rules for the per-cell solve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConvergenceParameters<T> {
    /// Local iterations allowed before the budget check fires.
    pub max_iterations: usize,

    /// Absolute change below which a cell counts as converged.
    pub tolerance: T,
}

impl<T: Float> Default for ConvergenceParameters<T> {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            tolerance: T::from(Self::DEFAULT_TOLERANCE).unwrap(),
        }
    }
}

impl<T: Float> ConvergenceParameters<T> {
    /// Default iteration budget.
    pub const DEFAULT_MAX_ITERATIONS: usize = 100;

    /// Default convergence tolerance.
    pub const DEFAULT_TOLERANCE: f64 = 0.2;

    /// Create stopping rules.
    pub fn new(max_iterations: usize, tolerance: T) -> Self {
        Self {
            max_iterations,
            tolerance,
        }
    }

    /// Hard cap on local iterations per cell.
    pub fn iteration_cap(&self) -> usize {
        self.max_iterations.saturating_add(2)
    }

    /// Reject a non-positive or non-finite tolerance.
    pub fn validate(&self) -> Result<(), CrosstalkError> {
        if !self.tolerance.is_finite() || self.tolerance <= T::zero() {
            return Err(CrosstalkError::InvalidTolerance(
                self.tolerance.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }
}

/// How a cell's local solve terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellOutcome {
    /// Change fell below the tolerance.
    Converged,

    /// Iteration budget ran out first.
    BudgetExceeded,
}

/// Answer of one cell's local solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSolution<T> {
    /// Last computed `|value - estimate|`, committed or not.
    pub value: T,

    /// Number of estimates computed.
    pub iterations: usize,

    /// Terminal state.
    pub outcome: CellOutcome,
}

// ============================================================================
// Solver
// ============================================================================

/// Relax `(row, col)` of the working grid in place and return its answer.
///
/// The grid must be at least 2x2 and the cell in range; see
/// [`Validator`](crate::engine::validator::Validator).
pub fn relax_cell<T: Float>(
    grid: &mut Grid<T>,
    row: usize,
    col: usize,
    params: &ConvergenceParameters<T>,
    factors: &RegulationFactors<T>,
) -> CellSolution<T> {
    let (rows, cols) = grid.shape();
    let position = CellPosition::classify(row, col, rows, cols);
    let mut iteration = 0;

    loop {
        let current = grid[(row, col)];
        let estimate = estimate_at(grid, position, row, col, iteration, factors);
        let result = (current - estimate).abs();

        if (result - current).abs() < params.tolerance {
            return CellSolution {
                value: result,
                iterations: iteration + 1,
                outcome: CellOutcome::Converged,
            };
        }

        if iteration > params.max_iterations {
            return CellSolution {
                value: result,
                iterations: iteration + 1,
                outcome: CellOutcome::BudgetExceeded,
            };
        }

        grid[(row, col)] = result;
        iteration += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::crosstalk::estimate_crosstalk;
    use approx::assert_relative_eq;

    fn constant_factor(k: f64) -> RegulationFactors<f64> {
        RegulationFactors::new(k, k, k, 1.0)
    }

    #[test]
    fn converges_immediately_without_crosstalk() {
        let mut grid = Grid::from_rows(&[vec![3.2, 4.0], vec![5.0, 6.0]]).unwrap();
        let params = ConvergenceParameters::new(10, 0.2);

        let sol = relax_cell(&mut grid, 0, 0, &params, &RegulationFactors::disabled());

        assert_eq!(sol.outcome, CellOutcome::Converged);
        assert_eq!(sol.iterations, 1);
        assert_eq!(sol.value, 3.2);
        assert_eq!(grid[(0, 0)], 3.2);
    }

    #[test]
    fn budget_exceeded_after_max_plus_two() {
        // 2x2: (0,0) sees (1,0)+(0,1)+(1,1) = 1100, estimate 366.67 per pass.
        let mut grid = Grid::from_rows(&[vec![0.0, 100.0], vec![1000.0, 0.0]]).unwrap();
        let params = ConvergenceParameters::new(0, 1e-9);

        let sol = relax_cell(&mut grid, 0, 0, &params, &constant_factor(1.0));

        assert_eq!(sol.outcome, CellOutcome::BudgetExceeded);
        assert_eq!(sol.iterations, 2);
        // pass 0: |0 - 366.67| = 366.67, committed
        // pass 1: |366.67 - 366.67| = 0, not committed
        assert_relative_eq!(sol.value, 0.0, epsilon = 1e-9);
        assert_relative_eq!(grid[(0, 0)], 1100.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn stopping_pass_is_not_committed() {
        let mut grid = Grid::from_rows(&[
            vec![50.0, 10.0, 10.0],
            vec![10.0, 10.0, 10.0],
            vec![10.0, 10.0, 10.0],
        ])
        .unwrap();
        let params = ConvergenceParameters::new(3, 1e-12);
        let factors = RegulationFactors::new(0.5, 0.5, 0.5, 0.9);

        let sol = relax_cell(&mut grid, 0, 0, &params, &factors);

        // Recompute the final pass from the committed value.
        let last_it = sol.iterations - 1;
        let estimate = estimate_crosstalk(&grid, 0, 0, last_it, &factors);
        assert_relative_eq!(sol.value, (grid[(0, 0)] - estimate).abs());
        assert_ne!(sol.value, grid[(0, 0)]);
    }

    #[test]
    fn convergence_checked_before_budget() {
        // decay_rate 0: pass 0 subtracts 2.5, pass 1 subtracts nothing and
        // is both converged and over budget.
        let mut grid = Grid::filled(2, 2, 5.0_f64);
        let params = ConvergenceParameters::new(0, 0.1);
        let factors = RegulationFactors::new(0.5, 0.5, 0.5, 0.0);

        let sol = relax_cell(&mut grid, 1, 1, &params, &factors);

        assert_eq!(sol.outcome, CellOutcome::Converged);
        assert_eq!(sol.iterations, 2);
        assert_relative_eq!(sol.value, 2.5);
        assert_relative_eq!(grid[(1, 1)], 2.5);
    }

    #[test]
    fn only_target_cell_is_written() {
        let mut grid = Grid::from_rows(&[
            vec![1.0, 2.0, 3.0],
            vec![4.0, 50.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ])
        .unwrap();
        let before = grid.clone();
        let params = ConvergenceParameters::new(20, 1e-6);

        relax_cell(&mut grid, 1, 1, &params, &constant_factor(0.3));

        for r in 0..3 {
            for c in 0..3 {
                if (r, c) != (1, 1) {
                    assert_eq!(grid[(r, c)], before[(r, c)]);
                }
            }
        }
    }

    #[test]
    fn iteration_cap_holds() {
        let params = ConvergenceParameters::<f64>::new(7, 1e-15);
        assert_eq!(params.iteration_cap(), 9);

        let mut grid = Grid::from_rows(&[
            vec![0.0, 100.0, 0.0],
            vec![100.0, 0.0, 100.0],
            vec![0.0, 100.0, 0.0],
        ])
        .unwrap();
        for r in 0..3 {
            for c in 0..3 {
                let sol = relax_cell(&mut grid, r, c, &params, &constant_factor(1.0));
                assert!(sol.iterations <= 9);
            }
        }
    }

    #[test]
    fn validate_tolerance() {
        assert!(ConvergenceParameters::new(10, 0.2_f64).validate().is_ok());
        assert_eq!(
            ConvergenceParameters::new(10, 0.0_f64).validate(),
            Err(CrosstalkError::InvalidTolerance(0.0))
        );
        assert_eq!(
            ConvergenceParameters::new(10, -1.0_f64).validate(),
            Err(CrosstalkError::InvalidTolerance(-1.0))
        );
        assert!(ConvergenceParameters::new(10, f64::NAN).validate().is_err());
    }
}
