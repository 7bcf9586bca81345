//! Layer 2: Math
//!
//! Pure mathematical functions.
//!
//! These are reusable numeric building blocks with no grid-specific logic.
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
//! Layer 3: Algorithms (crosstalk, relaxation)
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives (errors, grid, position, traversal)
//! ```

/// Regulation-factor decay.
///
/// Provides:
/// - Exponential per-iteration decay
pub mod decay;

/// Rounding of corrected values.
///
/// Provides:
/// - Half-to-even and half-away-from-zero modes
pub mod rounding;
