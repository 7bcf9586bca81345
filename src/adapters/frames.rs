//! Frames adapter for correcting many readouts of a sensor array.
//!
//! ## Purpose
//!
//! A sensor array is usually read out repeatedly. This adapter corrects a
//! batch of such frames with one configuration. Each frame is an independent
//! grid with its own working buffer, so frames can be processed on a `rayon`
//! thread pool while every individual sweep stays strictly sequential.
//!
//! ## Design notes
//!
//! * Every frame is copied and validated before any frame is swept; one bad
//!   frame fails the whole call with [`CrosstalkError::Frame`].
//! * Results are returned in input order.
//! * Parallel and sequential execution produce identical results.
//! * Parallel execution requires the `cpu` feature; without it the
//!   `parallel` flag is ignored.
//!
//! ## Non-goals
//!
//! * No temporal coupling between frames; frame `n` never reads frame `n-1`.

#[cfg(feature = "cpu")]
use rayon::prelude::*;

use num_traits::Float;
use tracing::debug;

use crate::adapters::batch::{BatchCorrector, BatchCorrectorBuilder};
use crate::algorithms::crosstalk::RegulationFactors;
use crate::engine::output::CorrectionResult;
use crate::input::GridInput;
use crate::math::rounding::RoundingMode;
use crate::primitives::errors::CrosstalkError;
use crate::primitives::grid::Grid;
use crate::primitives::traversal::TraversalOrder;

// ============================================================================
// Frames Corrector Builder
// ============================================================================

/// Builder for the multi-frame corrector.
#[derive(Debug, Clone)]
pub struct FramesCorrectorBuilder<T: Float> {
    /// Base single-grid builder
    pub base: BatchCorrectorBuilder<T>,

    /// Whether to process frames in parallel
    pub parallel: bool,
}

impl<T: Float> Default for FramesCorrectorBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FramesCorrectorBuilder<T> {
    /// Create a new frames builder with default parameters.
    ///
    /// # Defaults
    ///
    /// * All base parameters from `BatchCorrectorBuilder`
    /// * parallel: true
    fn new() -> Self {
        Self {
            base: BatchCorrectorBuilder::default(),
            parallel: true,
        }
    }

    /// Set parallel execution across frames.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set the per-cell iteration budget.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.base = self.base.max_iterations(max_iterations);
        self
    }

    /// Set the convergence tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.base = self.base.tolerance(tolerance);
        self
    }

    /// Replace all regulation factors.
    pub fn regulation_factors(mut self, factors: RegulationFactors<T>) -> Self {
        self.base = self.base.regulation_factors(factors);
        self
    }

    /// Set the traversal order.
    pub fn traversal_order(mut self, order: TraversalOrder) -> Self {
        self.base = self.base.traversal_order(order);
        self
    }

    /// Set the rounding mode.
    pub fn rounding_mode(mut self, mode: RoundingMode) -> Self {
        self.base = self.base.rounding_mode(mode);
        self
    }

    /// Enable returning diagnostics for every frame.
    pub fn return_diagnostics(mut self, enabled: bool) -> Self {
        self.base = self.base.return_diagnostics(enabled);
        self
    }

    /// Enable keeping every frame's working grid.
    pub fn return_working_grid(mut self, enabled: bool) -> Self {
        self.base = self.base.return_working_grid(enabled);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the frames corrector.
    pub fn build(self) -> Result<FramesCorrector<T>, CrosstalkError> {
        // Reuses the validation centralised in the batch builder
        let base = self.base.build()?;

        Ok(FramesCorrector {
            base,
            parallel: self.parallel,
        })
    }
}

// ============================================================================
// Frames Corrector
// ============================================================================

/// Corrector for a batch of independent frames.
#[derive(Debug, Clone)]
pub struct FramesCorrector<T: Float> {
    base: BatchCorrector<T>,
    parallel: bool,
}

impl<T: Float + Send + Sync> FramesCorrector<T> {
    /// Correct every frame, returning results in input order.
    pub fn correct_frames<I>(
        &self,
        frames: &[I],
    ) -> Result<Vec<CorrectionResult<T>>, CrosstalkError>
    where
        I: GridInput<T>,
    {
        let working = frames
            .iter()
            .enumerate()
            .map(|(index, frame)| {
                self.base
                    .prepare(frame)
                    .map_err(|source| CrosstalkError::Frame {
                        index,
                        source: Box::new(source),
                    })
            })
            .collect::<Result<Vec<Grid<T>>, _>>()?;

        debug!(
            frames = working.len(),
            parallel = self.parallel,
            "correcting frames"
        );

        Ok(self.run_all(working))
    }

    /// Single-grid corrector sharing this configuration.
    pub fn base(&self) -> &BatchCorrector<T> {
        &self.base
    }

    #[cfg(feature = "cpu")]
    fn run_all(&self, working: Vec<Grid<T>>) -> Vec<CorrectionResult<T>> {
        if self.parallel {
            working
                .into_par_iter()
                .map(|grid| self.base.run_validated(grid))
                .collect()
        } else {
            self.run_sequential(working)
        }
    }

    #[cfg(not(feature = "cpu"))]
    fn run_all(&self, working: Vec<Grid<T>>) -> Vec<CorrectionResult<T>> {
        self.run_sequential(working)
    }

    fn run_sequential(&self, working: Vec<Grid<T>>) -> Vec<CorrectionResult<T>> {
        working
            .into_iter()
            .map(|grid| self.base.run_validated(grid))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frames() -> Vec<Vec<Vec<f64>>> {
        (0..6)
            .map(|f| {
                (0..4)
                    .map(|r| {
                        (0..5)
                            .map(|c| ((f * 31 + r * 7 + c * 13) % 50) as f64 + 0.37 * c as f64)
                            .collect()
                    })
                    .collect()
            })
            .collect()
    }

    fn builder() -> FramesCorrectorBuilder<f64> {
        FramesCorrectorBuilder::default()
            .max_iterations(30)
            .tolerance(0.05)
            .regulation_factors(RegulationFactors::new(0.1, 0.08, 0.05, 0.9))
    }

    #[test]
    fn parallel_matches_sequential() {
        let input = frames();
        let par = builder().parallel(true).build().unwrap();
        let seq = builder().parallel(false).build().unwrap();

        let a = par.correct_frames(&input).unwrap();
        let b = seq.correct_frames(&input).unwrap();

        assert_eq!(a.len(), 6);
        assert_eq!(a, b);
    }

    #[test]
    fn results_keep_input_order() {
        let input = frames();
        let corrector = builder().build().unwrap();

        let results = corrector.correct_frames(&input).unwrap();

        for (frame, result) in input.iter().zip(&results) {
            let single = corrector.base().correct(frame).unwrap();
            assert_eq!(result.corrected, single.corrected);
        }
    }

    #[test]
    fn bad_frame_fails_whole_call() {
        let mut input = frames();
        input[3][1][2] = f64::INFINITY;
        let corrector = builder().build().unwrap();

        match corrector.correct_frames(&input) {
            Err(CrosstalkError::Frame { index, source }) => {
                assert_eq!(index, 3);
                assert!(matches!(
                    *source,
                    CrosstalkError::NonFiniteInput { row: 1, col: 2, .. }
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn empty_batch_is_ok() {
        let corrector = builder().build().unwrap();
        let results = corrector.correct_frames::<Vec<Vec<f64>>>(&[]).unwrap();
        assert!(results.is_empty());
    }
}
