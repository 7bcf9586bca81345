//! Error types for crosstalk correction.
//!
//! ## Purpose
//!
//! This module defines [`CrosstalkError`], the single error type returned by
//! every fallible operation in the crate. All errors are raised during
//! validation, before the working grid is touched, so a failed call never
//! leaves a partially corrected grid behind.
//!
//! ## Design notes
//!
//! * Numeric payloads are stored as `f64` regardless of the grid's float type.
//! * Variants carry the offending indices or values for context.

use thiserror::Error;

/// Errors raised while validating or correcting a sensor grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CrosstalkError {
    /// The grid has fewer than 2 rows or 2 columns.
    #[error("grid must be at least 2x2 to classify corners and edges, got {rows}x{cols}")]
    InvalidDimension {
        /// Number of rows supplied.
        rows: usize,
        /// Number of columns supplied.
        cols: usize,
    },

    /// Rows of a nested input have different lengths.
    #[error("row {row} has {got} columns, expected {expected}")]
    RaggedInput {
        /// Index of the first offending row.
        row: usize,
        /// Column count of row 0.
        expected: usize,
        /// Column count of the offending row.
        got: usize,
    },

    /// Flat data length does not match `rows * cols`.
    #[error("grid data has {got} values, expected {expected}")]
    ShapeMismatch {
        /// `rows * cols`.
        expected: usize,
        /// Length of the supplied buffer.
        got: usize,
    },

    /// Convergence tolerance is not a positive finite number.
    #[error("tolerance must be positive and finite, got {0}")]
    InvalidTolerance(f64),

    /// A regulation factor or the decay rate is negative or not finite.
    #[error("regulation factor `{name}` must be non-negative and finite, got {value}")]
    InvalidRegulationFactor {
        /// Factor name (`k1`, `k2`, `k3` or `decay_rate`).
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// A cell of the input grid is NaN or infinite.
    #[error("input cell ({row}, {col}) is not finite: {value}")]
    NonFiniteInput {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// Offending value.
        value: f64,
    },

    /// A builder parameter was set more than once.
    #[error("parameter `{parameter}` was set multiple times")]
    DuplicateParameter {
        /// Name of the duplicated parameter.
        parameter: &'static str,
    },

    /// One frame of a multi-frame correction failed validation.
    #[error("frame {index}: {source}")]
    Frame {
        /// Position of the frame in the input batch.
        index: usize,
        /// Underlying validation error.
        source: Box<CrosstalkError>,
    },
}
