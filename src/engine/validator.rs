//! Input validation for crosstalk configuration and grids.
//!
//! ## Purpose
//!
//! This module checks grids and parameters before any correction begins, so
//! a failed call never mutates the working grid.
//!
//! ## Design notes
//!
//! * Validation is fail-fast: returns on the first error encountered.
//! * Checks run from cheap to expensive (shape before a full value scan).
//! * Error messages include the offending indices and values.
//!
//! ## Validated parameters
//!
//! * **Grid shape**: at least 2 rows and 2 columns
//! * **Grid values**: all finite (non-finite input is rejected, not propagated)
//! * **Tolerance**: positive and finite
//! * **Regulation factors**: non-negative and finite
//! * **Builder usage**: no parameter set twice
//!
//! ## Non-goals
//!
//! * This module does not clamp or repair invalid inputs.
//! * `max_iterations` needs no check: `usize` already excludes negatives.

use num_traits::Float;

use crate::algorithms::crosstalk::RegulationFactors;
use crate::algorithms::relaxation::ConvergenceParameters;
use crate::primitives::errors::CrosstalkError;
use crate::primitives::grid::Grid;

/// Minimum extent of either grid axis.
pub const MIN_EXTENT: usize = 2;

/// Validation utility for crosstalk configuration and input grids.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Grid Validation
    // ========================================================================

    /// Validate shape and values of an input grid.
    pub fn validate_grid<T: Float>(grid: &Grid<T>) -> Result<(), CrosstalkError> {
        Self::validate_dimensions(grid.rows(), grid.cols())?;

        let cols = grid.cols();
        for (k, &value) in grid.as_slice().iter().enumerate() {
            if !value.is_finite() {
                return Err(CrosstalkError::NonFiniteInput {
                    row: k / cols,
                    col: k % cols,
                    value: value.to_f64().unwrap_or(f64::NAN),
                });
            }
        }

        Ok(())
    }

    /// Validate the grid extent.
    pub fn validate_dimensions(rows: usize, cols: usize) -> Result<(), CrosstalkError> {
        if rows < MIN_EXTENT || cols < MIN_EXTENT {
            return Err(CrosstalkError::InvalidDimension { rows, cols });
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the convergence tolerance.
    pub fn validate_convergence<T: Float>(
        params: &ConvergenceParameters<T>,
    ) -> Result<(), CrosstalkError> {
        params.validate()
    }

    /// Validate the regulation factors.
    pub fn validate_factors<T: Float>(
        factors: &RegulationFactors<T>,
    ) -> Result<(), CrosstalkError> {
        factors.validate()
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), CrosstalkError> {
        if let Some(parameter) = duplicate_param {
            return Err(CrosstalkError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_small_grids() {
        let one = Grid::filled(1, 1, 0.0_f64);
        assert_eq!(
            Validator::validate_grid(&one),
            Err(CrosstalkError::InvalidDimension { rows: 1, cols: 1 })
        );

        let thin = Grid::filled(5, 1, 0.0_f64);
        assert!(Validator::validate_grid(&thin).is_err());

        let empty = Grid::<f64>::from_rows::<Vec<f64>>(&[]).unwrap();
        assert_eq!(
            Validator::validate_grid(&empty),
            Err(CrosstalkError::InvalidDimension { rows: 0, cols: 0 })
        );

        assert!(Validator::validate_grid(&Grid::filled(2, 2, 0.0_f64)).is_ok());
    }

    #[test]
    fn reports_first_non_finite_cell() {
        let grid = Grid::from_rows(&[
            vec![1.0, 2.0, 3.0],
            vec![4.0, f64::INFINITY, f64::NAN],
        ])
        .unwrap();
        match Validator::validate_grid(&grid) {
            Err(CrosstalkError::NonFiniteInput { row, col, value }) => {
                assert_eq!((row, col), (1, 1));
                assert!(value.is_infinite());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn duplicate_parameters() {
        assert!(Validator::validate_no_duplicates(None).is_ok());
        assert_eq!(
            Validator::validate_no_duplicates(Some("tolerance")),
            Err(CrosstalkError::DuplicateParameter {
                parameter: "tolerance"
            })
        );
    }
}
