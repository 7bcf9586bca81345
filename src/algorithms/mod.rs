//! Layer 3: Algorithms
//!
//! Crosstalk estimation and per-cell relaxation.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine (executor, output, validator)
//!   ↓
//! Layer 4: Evaluation (diagnostics)
//!   ↓
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math (decay, rounding)
//!   ↓
//! Layer 1: Primitives (errors, grid, position, traversal)
//! ```

/// Crosstalk estimation.
///
/// Provides:
/// - `RegulationFactors` configuration value
/// - Neighbourhood-mean estimate scaled by the decayed class factor
pub mod crosstalk;

/// Per-cell fixed-point relaxation.
///
/// Provides:
/// - `ConvergenceParameters` stopping rules
/// - Bounded in-place solve returning a `CellSolution`
pub mod relaxation;
