//! Batch adapter for single-grid crosstalk correction.
//!
//! ## Purpose
//!
//! This module provides the standard execution adapter: one complete grid in
//! memory, validated up front and swept sequentially.
//!
//! ## Design notes
//!
//! * Validation happens before any mutation; a rejected grid is untouched.
//! * `correct` copies the input into a fresh working grid.
//! * `correct_in_place` relaxes the caller's grid directly. The exclusive
//!   borrow makes the side effect explicit: afterwards the grid holds the
//!   last committed value of every cell, not the corrected output.
//! * Uses builder pattern for configuration.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Key concepts
//!
//! ### Batch Processing
//! The batch adapter:
//! 1. Validates configuration (at `build()`)
//! 2. Copies and validates the input grid
//! 3. Runs the sweep via the engine
//! 4. Computes optional diagnostics
//! 5. Packages everything into a `CorrectionResult`
//!
//! ## Non-goals
//!
//! * This adapter does not process several frames (use the frames adapter).
//! * This adapter does not repair non-finite input.

use num_traits::Float;

use crate::algorithms::crosstalk::RegulationFactors;
use crate::algorithms::relaxation::ConvergenceParameters;
use crate::engine::executor::{CorrectionConfig, CrosstalkExecutor};
use crate::engine::output::CorrectionResult;
use crate::engine::validator::Validator;
use crate::evaluation::diagnostics::CorrectionDiagnostics;
use crate::input::GridInput;
use crate::math::rounding::RoundingMode;
use crate::primitives::errors::CrosstalkError;
use crate::primitives::grid::Grid;
use crate::primitives::traversal::TraversalOrder;

// ============================================================================
// Batch Corrector Builder
// ============================================================================

/// Builder for the batch crosstalk corrector.
#[derive(Debug, Clone)]
pub struct BatchCorrectorBuilder<T: Float> {
    /// Per-cell stopping rules
    pub convergence: ConvergenceParameters<T>,

    /// Regulation factors and decay rate
    pub factors: RegulationFactors<T>,

    /// Cell visiting order
    pub traversal_order: TraversalOrder,

    /// Rounding of the corrected grid
    pub rounding_mode: RoundingMode,

    /// Whether to compute diagnostic statistics
    pub return_diagnostics: bool,

    /// Whether to keep the mutated working grid in the result
    pub return_working_grid: bool,

    /// Tracks if any parameter was set multiple times (for validation)
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for BatchCorrectorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> BatchCorrectorBuilder<T> {
    /// Create a new batch builder with default parameters.
    fn new() -> Self {
        Self {
            convergence: ConvergenceParameters::default(),
            factors: RegulationFactors::default(),
            traversal_order: TraversalOrder::default(),
            rounding_mode: RoundingMode::default(),
            return_diagnostics: false,
            return_working_grid: false,
            duplicate_param: None,
        }
    }

    // ========================================================================
    // Setters
    // ========================================================================

    /// Set the per-cell iteration budget.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.convergence.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.convergence.tolerance = tolerance;
        self
    }

    /// Replace all regulation factors.
    pub fn regulation_factors(mut self, factors: RegulationFactors<T>) -> Self {
        self.factors = factors;
        self
    }

    /// Set the traversal order.
    pub fn traversal_order(mut self, order: TraversalOrder) -> Self {
        self.traversal_order = order;
        self
    }

    /// Set the rounding mode.
    pub fn rounding_mode(mut self, mode: RoundingMode) -> Self {
        self.rounding_mode = mode;
        self
    }

    /// Enable returning diagnostics in the result.
    pub fn return_diagnostics(mut self, enabled: bool) -> Self {
        self.return_diagnostics = enabled;
        self
    }

    /// Enable keeping the mutated working grid in the result.
    pub fn return_working_grid(mut self, enabled: bool) -> Self {
        self.return_working_grid = enabled;
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the batch corrector.
    pub fn build(self) -> Result<BatchCorrector<T>, CrosstalkError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Validator::validate_convergence(&self.convergence)?;
        Validator::validate_factors(&self.factors)?;

        Ok(BatchCorrector { config: self })
    }
}

// ============================================================================
// Batch Corrector
// ============================================================================

/// Batch crosstalk corrector.
#[derive(Debug, Clone)]
pub struct BatchCorrector<T: Float> {
    config: BatchCorrectorBuilder<T>,
}

impl<T: Float> BatchCorrector<T> {
    /// Correct a copy of `input`.
    pub fn correct<I>(&self, input: &I) -> Result<CorrectionResult<T>, CrosstalkError>
    where
        I: GridInput<T> + ?Sized,
    {
        let working = self.prepare(input)?;
        Ok(self.run_validated(working))
    }

    /// Correct `grid` in place.
    ///
    /// On success `grid` holds the working state left by the sweep; the
    /// corrected values are in the returned result. On error `grid` is
    /// unchanged.
    pub fn correct_in_place(
        &self,
        grid: &mut Grid<T>,
    ) -> Result<CorrectionResult<T>, CrosstalkError> {
        Validator::validate_grid(grid)?;

        let original = self
            .config
            .return_diagnostics
            .then(|| grid.as_slice().to_vec());
        let mut result = self.sweep(grid, original.as_deref());
        if self.config.return_working_grid {
            result.working = Some(grid.clone());
        }
        Ok(result)
    }

    /// Sweep configuration used by this corrector.
    pub fn config(&self) -> CorrectionConfig<T> {
        CorrectionConfig {
            convergence: self.config.convergence,
            factors: self.config.factors,
            traversal_order: self.config.traversal_order,
            rounding_mode: self.config.rounding_mode,
        }
    }

    // ========================================================================
    // Shared Steps
    // ========================================================================

    /// Copy and validate an input grid.
    pub(crate) fn prepare<I>(&self, input: &I) -> Result<Grid<T>, CrosstalkError>
    where
        I: GridInput<T> + ?Sized,
    {
        let working = input.to_working_grid()?;
        Validator::validate_grid(&working)?;
        Ok(working)
    }

    /// Run a sweep on an already validated working grid it owns.
    pub(crate) fn run_validated(&self, mut working: Grid<T>) -> CorrectionResult<T> {
        let original = self
            .config
            .return_diagnostics
            .then(|| working.as_slice().to_vec());
        let mut result = self.sweep(&mut working, original.as_deref());
        if self.config.return_working_grid {
            result.working = Some(working);
        }
        result
    }

    fn sweep(&self, working: &mut Grid<T>, original: Option<&[T]>) -> CorrectionResult<T> {
        let config = self.config();
        let output = CrosstalkExecutor::run_with_config(working, &config);

        let diagnostics = original.map(|original| {
            CorrectionDiagnostics::compute(
                original,
                output.refined.as_slice(),
                &output.iterations,
                &output.outcomes,
            )
        });

        CorrectionResult {
            corrected: output.corrected,
            refined: output.refined,
            working: None,
            iterations: output.iterations,
            outcomes: output.outcomes,
            diagnostics,
            factors_used: config.factors,
            convergence_used: config.convergence,
            traversal_order: config.traversal_order,
        }
    }
}
