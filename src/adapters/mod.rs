//! Layer 6: Adapters
//!
//! Execution adapters for crosstalk correction.
//!
//! - **Batch**: One grid, copied or corrected in place
//! - **Frames**: Many independent grids, optionally in parallel
//!
//! # Choosing an Adapter
//!
//! - **Batch**: Default choice for a single readout
//! - **Frames**: Repeated readouts of the same array
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine (executor, output, validator)
//!   ↓
//! Layer 4: Evaluation (diagnostics)
//!   ↓
//! Layer 3: Algorithms (crosstalk, relaxation)
//!   ↓
//! Layer 2: Math (decay, rounding)
//!   ↓
//! Layer 1: Primitives (errors, grid, position, traversal)
//! ```

// ============================================================================
// Batch Adapter
// ============================================================================

/// Single-grid adapter.
///
/// Provides:
/// - Copy-in correction of any `GridInput`
/// - In-place correction of a caller-owned `Grid`
/// - Optional diagnostics and working-grid capture
pub mod batch;

// ============================================================================
// Frames Adapter
// ============================================================================

/// Multi-frame adapter.
///
/// Provides:
/// - Up-front validation of every frame
/// - Parallel execution across frames (via rayon, enabled by default)
/// - Sequential execution (when parallel=false)
pub mod frames;
