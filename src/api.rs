//! High-level API for crosstalk correction.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point. It implements a
//! fluent builder for the correction parameters and hands them to an
//! execution adapter chosen with `.adapter(...)`.
//!
//! ## Design notes
//!
//! * Every parameter is optional on the generic builder; the adapter fills in
//!   defaults during conversion.
//! * Setting the same parameter twice is recorded and reported as
//!   [`CrosstalkError::DuplicateParameter`] by the adapter's `build()`.
//! * `regulation_factors` counts as setting `k1`, `k2`, `k3` and `decay_rate`.
//!
//! ## Key concepts
//!
//! ### Builder Pattern
//! ```text
//! Crosstalk::<f64>::new()
//!     .k3(0.02)
//!     .max_iterations(50)
//!     .tolerance(0.1)
//!     .adapter(Batch)
//!     .build()?
//!     .correct(&grid)
//! ```
//!
//! ### Adapter Selection
//! * **Batch**: One grid at a time, copied or in place
//! * **Frames**: Many independent grids (parallel by default)

use std::result;

use num_traits::Float;

// Publicly re-exported types
pub use crate::adapters::batch::{BatchCorrector, BatchCorrectorBuilder};
pub use crate::adapters::frames::{FramesCorrector, FramesCorrectorBuilder};
pub use crate::algorithms::crosstalk::{estimate_crosstalk, RegulationFactors};
pub use crate::algorithms::relaxation::{relax_cell, CellOutcome, CellSolution, ConvergenceParameters};
pub use crate::engine::output::CorrectionResult;
pub use crate::evaluation::diagnostics::CorrectionDiagnostics;
pub use crate::input::GridInput;
pub use crate::math::decay::decay;
pub use crate::math::rounding::RoundingMode;
pub use crate::primitives::errors::CrosstalkError;
pub use crate::primitives::grid::Grid;
pub use crate::primitives::position::{CellPosition, Neighborhood, TopologyClass};
pub use crate::primitives::traversal::TraversalOrder;

// ============================================================================
// Type Aliases
// ============================================================================

/// Result type alias for crosstalk operations.
pub type Result<T> = result::Result<T, CrosstalkError>;

// ============================================================================
// Adapter Module
// ============================================================================

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Batch, Frames};
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring crosstalk correction.
#[derive(Debug, Clone)]
pub struct CrosstalkBuilder<T> {
    /// Corner regulation factor.
    pub k1: Option<T>,

    /// Edge regulation factor.
    pub k2: Option<T>,

    /// Interior regulation factor.
    pub k3: Option<T>,

    /// Per-iteration decay of every factor.
    pub decay_rate: Option<T>,

    /// Per-cell iteration budget.
    pub max_iterations: Option<usize>,

    /// Convergence tolerance.
    pub tolerance: Option<T>,

    /// Cell visiting order.
    pub traversal_order: Option<TraversalOrder>,

    /// Rounding of the corrected grid.
    pub rounding_mode: Option<RoundingMode>,

    /// Process frames in parallel (Frames only).
    pub parallel: Option<bool>,

    /// Compute diagnostic statistics.
    pub return_diagnostics: bool,

    /// Keep the mutated working grid in the result.
    pub return_working_grid: bool,

    /// Tracks if any parameter was set multiple times (for validation).
    pub(crate) duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for CrosstalkBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> CrosstalkBuilder<T> {
    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: CrosstalkAdapter<T>,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            k1: None,
            k2: None,
            k3: None,
            decay_rate: None,
            max_iterations: None,
            tolerance: None,
            traversal_order: None,
            rounding_mode: None,
            parallel: None,
            return_diagnostics: false,
            return_working_grid: false,
            duplicate_param: None,
        }
    }

    /// Set the corner regulation factor.
    pub fn k1(mut self, k1: T) -> Self {
        if self.k1.is_some() {
            self.duplicate_param = Some("k1");
        }
        self.k1 = Some(k1);
        self
    }

    /// Set the edge regulation factor.
    pub fn k2(mut self, k2: T) -> Self {
        if self.k2.is_some() {
            self.duplicate_param = Some("k2");
        }
        self.k2 = Some(k2);
        self
    }

    /// Set the interior regulation factor.
    pub fn k3(mut self, k3: T) -> Self {
        if self.k3.is_some() {
            self.duplicate_param = Some("k3");
        }
        self.k3 = Some(k3);
        self
    }

    /// Set the per-iteration decay rate.
    pub fn decay_rate(mut self, rate: T) -> Self {
        if self.decay_rate.is_some() {
            self.duplicate_param = Some("decay_rate");
        }
        self.decay_rate = Some(rate);
        self
    }

    /// Set all regulation factors at once.
    pub fn regulation_factors(self, factors: RegulationFactors<T>) -> Self {
        self.k1(factors.k1)
            .k2(factors.k2)
            .k3(factors.k3)
            .decay_rate(factors.decay_rate)
    }

    /// Set the per-cell iteration budget.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set the convergence tolerance (must be positive).
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the cell visiting order.
    pub fn traversal_order(mut self, order: TraversalOrder) -> Self {
        if self.traversal_order.is_some() {
            self.duplicate_param = Some("traversal_order");
        }
        self.traversal_order = Some(order);
        self
    }

    /// Set the rounding mode of the corrected grid.
    pub fn rounding_mode(mut self, mode: RoundingMode) -> Self {
        if self.rounding_mode.is_some() {
            self.duplicate_param = Some("rounding_mode");
        }
        self.rounding_mode = Some(mode);
        self
    }

    /// Set parallel execution across frames.
    pub fn parallel(mut self, parallel: bool) -> Self {
        if self.parallel.is_some() {
            self.duplicate_param = Some("parallel");
        }
        self.parallel = Some(parallel);
        self
    }

    /// Include diagnostics in the output.
    pub fn return_diagnostics(mut self) -> Self {
        self.return_diagnostics = true;
        self
    }

    /// Include the mutated working grid in the output.
    pub fn return_working_grid(mut self) -> Self {
        self.return_working_grid = true;
        self
    }

    fn resolved_factors(&self) -> RegulationFactors<T> {
        let defaults = RegulationFactors::default();
        RegulationFactors::new(
            self.k1.unwrap_or(defaults.k1),
            self.k2.unwrap_or(defaults.k2),
            self.k3.unwrap_or(defaults.k3),
            self.decay_rate.unwrap_or(defaults.decay_rate),
        )
    }

    fn resolved_convergence(&self) -> ConvergenceParameters<T> {
        let defaults = ConvergenceParameters::default();
        ConvergenceParameters::new(
            self.max_iterations.unwrap_or(defaults.max_iterations),
            self.tolerance.unwrap_or(defaults.tolerance),
        )
    }
}

// ============================================================================
// Adapters
// ============================================================================

/// Trait for transitioning from the generic builder to an execution builder.
pub trait CrosstalkAdapter<T: Float> {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`CrosstalkBuilder`] into a specialized execution builder.
    fn convert(builder: CrosstalkBuilder<T>) -> Self::Output;
}

/// Marker for single-grid processing.
///
/// The `parallel` setting has no effect here; one sweep is always sequential.
#[derive(Debug, Clone, Copy)]
pub struct Batch;

impl<T: Float> CrosstalkAdapter<T> for Batch {
    type Output = BatchCorrectorBuilder<T>;

    fn convert(builder: CrosstalkBuilder<T>) -> Self::Output {
        BatchCorrectorBuilder {
            convergence: builder.resolved_convergence(),
            factors: builder.resolved_factors(),
            traversal_order: builder.traversal_order.unwrap_or_default(),
            rounding_mode: builder.rounding_mode.unwrap_or_default(),
            return_diagnostics: builder.return_diagnostics,
            return_working_grid: builder.return_working_grid,
            duplicate_param: builder.duplicate_param,
        }
    }
}

/// Marker for multi-frame processing.
#[derive(Debug, Clone, Copy)]
pub struct Frames;

impl<T: Float> CrosstalkAdapter<T> for Frames {
    type Output = FramesCorrectorBuilder<T>;

    fn convert(builder: CrosstalkBuilder<T>) -> Self::Output {
        let parallel = builder.parallel.unwrap_or(true);

        // Delegate to the batch conversion for the shared fields
        let base = <Batch as CrosstalkAdapter<T>>::convert(builder);

        FramesCorrectorBuilder { base, parallel }
    }
}
