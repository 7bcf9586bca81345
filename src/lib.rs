//! # Crosstalk Removal for Sensor Grids
//!
//! Iterative, topology-aware subtraction of inter-cell crosstalk from a 2-D
//! sensor readout.
//!
//! ## What is crosstalk removal?
//!
//! In a dense sensor array every cell picks up a fraction of the signal of its
//! direct neighbours. This crate estimates that leakage for each cell and
//! removes it with an in-place fixed-point relaxation:
//!
//! 1. Classify each cell as corner, edge or interior
//! 2. Estimate its crosstalk as the mean of its adjacent neighbours scaled by the
//!    class regulation factor, decayed per local iteration
//! 3. Replace the cell with `|value - estimate|` until the change drops below
//!    the tolerance or the iteration budget runs out
//! 4. Round the last result to an integer
//!
//! Cells are visited in row-major order and later cells read the values
//! already written by earlier ones (a Gauss-Seidel sweep), so the visiting
//! order is part of the result.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use crosstalk::prelude::*;
//!
//! let readout = vec![
//!     vec![12.4, 55.1, 3.9, 40.2],
//!     vec![61.7, 8.3, 27.5, 19.0],
//!     vec![33.3, 47.8, 2.6, 66.4],
//! ];
//!
//! let corrector = Crosstalk::new()
//!     .max_iterations(100)   // Per-cell iteration budget
//!     .tolerance(0.2)        // Convergence threshold
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = corrector.correct(&readout)?;
//!
//! assert_eq!(result.shape(), (3, 4));
//! println!("{}", result);
//! # Result::<(), CrosstalkError>::Ok(())
//! ```
//!
//! ### Disabling the Correction
//!
//! With every regulation factor at zero nothing is subtracted and the output
//! is the rounded input (half-to-even by default).
//!
//! ```rust
//! use crosstalk::prelude::*;
//!
//! let corrector = Crosstalk::new()
//!     .regulation_factors(RegulationFactors::disabled())
//!     .adapter(Batch)
//!     .build()?;
//!
//! let result = corrector.correct(&vec![vec![1.2, 2.5], vec![3.5, 9.9]])?;
//!
//! assert_eq!(result.corrected.as_slice(), &[1.0, 2.0, 4.0, 10.0]);
//! # Result::<(), CrosstalkError>::Ok(())
//! ```
//!
//! ### ndarray Integration
//!
//! ```rust
//! use crosstalk::prelude::*;
//! use ndarray::array;
//!
//! let readout = array![[10.0, 20.0, 30.0], [40.0, 50.0, 60.0], [70.0, 80.0, 90.0]];
//!
//! let result = Crosstalk::new().adapter(Batch).build()?.correct(&readout)?;
//!
//! assert_eq!(result.corrected.rows(), 3);
//! # Result::<(), CrosstalkError>::Ok(())
//! ```
//!
//! ## Parameters
//!
//! | Parameter             | Default     | Meaning                                    |
//! |-----------------------|-------------|--------------------------------------------|
//! | `k1`                  | 0.01        | Corner regulation factor                   |
//! | `k2`                  | 0.01        | Edge regulation factor                     |
//! | `k3`                  | 0.01        | Interior regulation factor                 |
//! | `decay_rate`          | 0.95        | Per-iteration factor shrink                |
//! | `max_iterations`      | 100         | Per-cell budget (at most budget + 2 steps) |
//! | `tolerance`           | 0.2         | Convergence threshold (must be positive)   |
//! | `traversal_order`     | `RowMajor`  | Cell visiting order                        |
//! | `rounding_mode`       | `HalfEven`  | Rounding of the corrected grid             |
//! | `parallel`            | true        | Parallel frames (Frames adapter only)      |
//!
//! Setting any parameter twice fails `build()` with
//! [`CrosstalkError::DuplicateParameter`](prelude::CrosstalkError).
//!
//! ## Adapters
//!
//! * **Batch**: one grid. `correct` works on a copy; `correct_in_place`
//!   relaxes a caller-owned [`Grid`](prelude::Grid) and leaves the working
//!   state in it.
//! * **Frames**: many independent grids with one configuration. Frames are
//!   distributed over a rayon pool when the `cpu` feature is enabled (the
//!   default); each individual sweep stays sequential.
//!
//! ```rust
//! use crosstalk::prelude::*;
//!
//! let frames = vec![
//!     vec![vec![5.0, 7.0], vec![9.0, 11.0]],
//!     vec![vec![6.0, 8.0], vec![10.0, 12.0]],
//! ];
//!
//! let results = Crosstalk::new()
//!     .adapter(Frames)
//!     .build()?
//!     .correct_frames(&frames)?;
//!
//! assert_eq!(results.len(), 2);
//! # Result::<(), CrosstalkError>::Ok(())
//! ```
//!
//! ## Result and Error Handling
//!
//! Every error is raised before the working grid is touched. Grids smaller
//! than 2x2, ragged rows, non-finite cells, a non-positive tolerance and
//! negative or non-finite factors are all rejected.
//!
//! ```rust
//! use crosstalk::prelude::*;
//!
//! let corrector = Crosstalk::<f64>::new().adapter(Batch).build()?;
//!
//! let err = corrector.correct(&vec![vec![1.0]]).unwrap_err();
//! assert_eq!(err, CrosstalkError::InvalidDimension { rows: 1, cols: 1 });
//! # Result::<(), CrosstalkError>::Ok(())
//! ```
//!
//! ## Logging
//!
//! The sweep emits `tracing` events: one `trace` event per cell and one
//! `debug` event per sweep and per frames call. Install any subscriber to see
//! them.
//!
//! ## Features
//!
//! * `cpu` (default): parallel frame processing via rayon
//! * `serde`: `Serialize`/`Deserialize` for grids and configuration values
//! * `dev`: exposes internal modules under `internals` for testing

#![deny(missing_docs)]

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - grid buffer, cell topology, traversal, errors.
mod primitives;

// Layer 2: Math - factor decay and rounding.
mod math;

// Layer 3: Algorithms - crosstalk estimation and per-cell relaxation.
mod algorithms;

// Layer 4: Evaluation - sweep diagnostics.
mod evaluation;

// Layer 5: Engine - sweep execution, validation and result assembly.
mod engine;

// Layer 6: Adapters - batch and multi-frame execution.
mod adapters;

// High-level fluent API.
//
// Provides the `Crosstalk` builder and the adapter markers.
mod api;

// Input data handling.
//
// Contains the `GridInput` trait for nested vectors and ndarray arrays.
mod input;

// ============================================================================
// Prelude
// ============================================================================

/// Standard crosstalk prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Batch, Frames},
        BatchCorrector, CellOutcome, CellPosition, CellSolution, ConvergenceParameters,
        CorrectionDiagnostics, CorrectionResult, CrosstalkBuilder as Crosstalk, CrosstalkError,
        FramesCorrector, Grid, GridInput, RegulationFactors,
        RoundingMode::{self, HalfAwayFromZero, HalfEven},
        TopologyClass,
        TraversalOrder::{self, ColumnMajor, RowMajor},
    };

    /// Single-cell building blocks of the sweep.
    pub use crate::api::{decay, estimate_crosstalk, relax_cell};
}

pub use crate::api::Result;

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitives.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal math.
    pub mod math {
        pub use crate::math::*;
    }
    /// Internal algorithms.
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    /// Internal execution engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal evaluation and diagnostics.
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    /// Internal adapters.
    pub mod adapters {
        pub use crate::adapters::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
