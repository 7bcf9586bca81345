//! Layer 4: Evaluation
//!
//! Post-processing statistics for correction sweeps.
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms (crosstalk, relaxation)
//!   ↓
//! Layer 2: Math (decay, rounding)
//!   ↓
//! Layer 1: Primitives (errors, grid, position, traversal)
//! ```

/// Sweep diagnostics.
///
/// Provides:
/// - Converged / budget-exceeded counts
/// - Iteration work statistics
/// - Correction magnitude statistics
pub mod diagnostics;
