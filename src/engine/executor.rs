//! Execution engine for crosstalk correction sweeps.
//!
//! ## Purpose
//!
//! This module sweeps a working grid cell by cell, runs the per-cell
//! relaxation and assembles the rounded output grid. It is the central
//! component tying the estimator, solver and rounding together.
//!
//! ## Design notes
//!
//! * The working grid is taken by `&mut` and relaxed in place; the output
//!   grid is a separate buffer.
//! * Strictly sequential. Parallelism, where offered, happens across whole
//!   frames in the adapters, never inside a sweep.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Key concepts
//!
//! ### Gauss-Seidel sweep
//!
//! Cells are visited in [`TraversalOrder`] (row-major by default). Every
//! value a cell commits to the working grid is visible to every cell visited
//! after it. Changing the order changes the result.
//!
//! ### Execution Flow
//!
//! 1. For each cell in traversal order:
//!    - relax the cell in place ([`relax_cell`])
//!    - store the unrounded answer in `refined`
//!    - store the rounded answer in `corrected`
//! 2. Return [`ExecutorOutput`]
//!
//! ## Invariants
//!
//! * Output buffers have the same shape as the working grid.
//! * No cell performs more than `max_iterations + 2` local iterations.
//!
//! ## Non-goals
//!
//! * This module does not validate input (handled by `validator`).
//! * This module does not compute diagnostics (handled by adapters).

use num_traits::Float;
use tracing::{debug, trace};

use crate::algorithms::crosstalk::RegulationFactors;
use crate::algorithms::relaxation::{relax_cell, CellOutcome, ConvergenceParameters};
use crate::math::rounding::RoundingMode;
use crate::primitives::grid::Grid;
use crate::primitives::traversal::TraversalOrder;

// ============================================================================
// Configuration Types
// ============================================================================

/// Immutable configuration of one correction sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionConfig<T> {
    /// Per-cell stopping rules.
    pub convergence: ConvergenceParameters<T>,

    /// Regulation factors and decay rate.
    pub factors: RegulationFactors<T>,

    /// Cell visiting order.
    pub traversal_order: TraversalOrder,

    /// Rounding applied to the output grid.
    pub rounding_mode: RoundingMode,
}

impl<T: Float> Default for CorrectionConfig<T> {
    fn default() -> Self {
        Self {
            convergence: ConvergenceParameters::default(),
            factors: RegulationFactors::default(),
            traversal_order: TraversalOrder::default(),
            rounding_mode: RoundingMode::default(),
        }
    }
}

// ============================================================================
// Output Types
// ============================================================================

/// Output from one sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorOutput<T> {
    /// Rounded per-cell answers.
    pub corrected: Grid<T>,

    /// Unrounded per-cell answers.
    pub refined: Grid<T>,

    /// Local iterations per cell, row-major.
    pub iterations: Vec<usize>,

    /// Terminal state per cell, row-major.
    pub outcomes: Vec<CellOutcome>,
}

// ============================================================================
// Executor
// ============================================================================

/// Sequential Gauss-Seidel sweep over a working grid.
#[derive(Debug, Clone, Copy)]
pub struct CrosstalkExecutor;

impl CrosstalkExecutor {
    /// Sweep `working` in place under `config`.
    ///
    /// `working` must already be validated (at least 2x2, finite). After the
    /// call it holds the last committed value of every cell.
    pub fn run_with_config<T: Float>(
        working: &mut Grid<T>,
        config: &CorrectionConfig<T>,
    ) -> ExecutorOutput<T> {
        let (rows, cols) = working.shape();
        let n = rows * cols;

        let mut corrected = Grid::filled(rows, cols, T::zero());
        let mut refined = Grid::filled(rows, cols, T::zero());
        let mut iterations = vec![0; n];
        let mut outcomes = vec![CellOutcome::Converged; n];

        for (row, col) in config.traversal_order.cells(rows, cols) {
            let solution = relax_cell(working, row, col, &config.convergence, &config.factors);
            debug_assert!(solution.iterations <= config.convergence.iteration_cap());

            trace!(
                row,
                col,
                iterations = solution.iterations,
                outcome = ?solution.outcome,
                "cell relaxed"
            );

            refined[(row, col)] = solution.value;
            corrected[(row, col)] = config.rounding_mode.apply(solution.value);

            let k = row * cols + col;
            iterations[k] = solution.iterations;
            outcomes[k] = solution.outcome;
        }

        let budget_exceeded = outcomes
            .iter()
            .filter(|&&o| o == CellOutcome::BudgetExceeded)
            .count();
        debug!(
            rows,
            cols,
            converged = n - budget_exceeded,
            budget_exceeded,
            order = ?config.traversal_order,
            "crosstalk sweep complete"
        );

        ExecutorOutput {
            corrected,
            refined,
            iterations,
            outcomes,
        }
    }
}
