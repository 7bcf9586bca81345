//! Layer 5: Engine
//!
//! Core execution logic for crosstalk correction.
//!
//! This layer orchestrates the sweep by coordinating the primitives (grid,
//! topology, traversal) and the algorithms (estimator, relaxation). It owns
//! the sweep loop, the fail-fast validation rules and the result type.
//!
//! # Module Organization
//!
//! - **executor**: Sequential Gauss-Seidel sweep
//! - **validator**: Input and configuration validation rules
//! - **output**: Structured results (corrected grid, metadata, diagnostics)
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation (diagnostics)
//!   ↓
//! Layer 3: Algorithms (crosstalk, relaxation)
//!   ↓
//! Layer 2: Math (decay, rounding)
//!   ↓
//! Layer 1: Primitives (errors, grid, position, traversal)
//! ```

/// Sweep execution engine.
///
/// Provides:
/// - `CorrectionConfig`, the immutable sweep configuration
/// - Row-major (or column-major) in-place relaxation
/// - Rounded and unrounded output assembly
pub mod executor;

/// Validation utilities.
///
/// Provides:
/// - Grid shape and finiteness checks
/// - Parameter bound checks
/// - Builder misuse checks
pub mod validator;

/// Output types.
///
/// Provides:
/// - The `CorrectionResult` container
/// - Per-cell query helpers and `Display`
pub mod output;
