//! Diagnostic statistics for a correction sweep.
//!
//! ## Purpose
//!
//! This module summarises how a sweep went: how many cells converged, how
//! many ran out of budget, how much iteration work was spent and how large
//! the applied corrections were.
//!
//! ## Design notes
//!
//! * Corrections are measured on the unrounded per-cell answers, against the
//!   original input (not the mutated working grid).
//! * Computed on demand only; the sweep itself does not depend on it.
//!
//! ## Non-goals
//!
//! * No ground-truth comparison; the crate never sees the noise-free signal.

use num_traits::Float;

use crate::algorithms::relaxation::CellOutcome;

/// Summary statistics of one correction sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectionDiagnostics<T> {
    /// Cells whose local solve converged.
    pub converged_cells: usize,

    /// Cells that hit the iteration budget.
    pub budget_exceeded_cells: usize,

    /// Sum of local iterations over all cells.
    pub total_iterations: usize,

    /// Largest local iteration count of any cell.
    pub max_iterations_used: usize,

    /// Mean local iteration count.
    pub mean_iterations: T,

    /// Mean of `|original - refined|`.
    pub mean_abs_correction: T,

    /// Max of `|original - refined|`.
    pub max_abs_correction: T,
}

impl<T: Float> CorrectionDiagnostics<T> {
    /// Compute diagnostics from per-cell data in matching order.
    pub fn compute(
        original: &[T],
        refined: &[T],
        iterations: &[usize],
        outcomes: &[CellOutcome],
    ) -> Self {
        let n = original.len();
        debug_assert_eq!(n, refined.len());
        debug_assert_eq!(n, iterations.len());
        debug_assert_eq!(n, outcomes.len());

        let converged_cells = outcomes
            .iter()
            .filter(|&&o| o == CellOutcome::Converged)
            .count();

        let total_iterations: usize = iterations.iter().sum();
        let max_iterations_used = iterations.iter().copied().max().unwrap_or(0);

        let n_t = T::from(n.max(1)).unwrap();
        let (mean_abs_correction, max_abs) = original.iter().zip(refined).fold(
            (T::zero(), T::zero()),
            |(mean, max), (&o, &r)| {
                let d = (o - r).abs();
                (mean + d / n_t, max.max(d))
            },
        );
        let mean_iterations = T::from(total_iterations).unwrap() / n_t;

        Self {
            converged_cells,
            budget_exceeded_cells: n - converged_cells,
            total_iterations,
            max_iterations_used,
            mean_iterations,
            mean_abs_correction,
            max_abs_correction: max_abs,
        }
    }

    /// Fraction of cells that converged.
    pub fn convergence_rate(&self) -> T {
        let n = self.converged_cells + self.budget_exceeded_cells;
        if n == 0 {
            return T::one();
        }
        T::from(self.converged_cells).unwrap() / T::from(n).unwrap()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + core::fmt::Display> core::fmt::Display for CorrectionDiagnostics<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "Crosstalk Diagnostics:")?;
        writeln!(f, "  Converged cells:      {}", self.converged_cells)?;
        writeln!(f, "  Budget exceeded:      {}", self.budget_exceeded_cells)?;
        writeln!(f, "  Total iterations:     {}", self.total_iterations)?;
        writeln!(f, "  Max iterations/cell:  {}", self.max_iterations_used)?;
        writeln!(f, "  Mean iterations/cell: {:.2}", self.mean_iterations)?;
        writeln!(f, "  Mean |correction|:    {:.6}", self.mean_abs_correction)?;
        write!(f, "  Max |correction|:     {:.6}", self.max_abs_correction)
    }
}
