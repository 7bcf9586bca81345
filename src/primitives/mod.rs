//! Layer 1: Primitives
//!
//! Core building blocks and types.
//!
//! This layer provides the grid buffer, the cell topology classifier, the
//! traversal orders and the shared error type. It has zero internal
//! dependencies within the crate.
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
//! Layer 2: Math (decay, rounding)
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
///
/// Provides:
/// - Unified `CrosstalkError` enum
/// - Context-carrying variants for validation failures
pub mod errors;

/// Grid buffer.
///
/// Provides:
/// - Row-major `Grid` storage
/// - Construction from flat or nested data
/// - `(row, col)` indexing
pub mod grid;

/// Cell topology.
///
/// Provides:
/// - Nine-way `CellPosition` classification
/// - Per-position neighbour sets
/// - Corner / edge / interior classes
pub mod position;

/// Traversal orders.
///
/// Provides:
/// - Row-major and column-major cell iteration
pub mod traversal;
