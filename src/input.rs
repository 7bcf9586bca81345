//! Input abstraction for sensor grids.
//!
//! This module defines the `GridInput` trait which allows the correctors to
//! accept owned grids, nested vectors and 2-D ndarray arrays interchangeably.
//! Every input is copied into a fresh working grid; callers who want the
//! in-place behaviour pass a `Grid` to `correct_in_place` instead.

use ndarray::{ArrayBase, Data, Ix2};
use num_traits::Float;

use crate::primitives::errors::CrosstalkError;
use crate::primitives::grid::Grid;

/// Trait for types that can be used as input for crosstalk correction.
pub trait GridInput<T: Float> {
    /// Copy the input into a row-major working grid.
    fn to_working_grid(&self) -> Result<Grid<T>, CrosstalkError>;
}

impl<T: Float> GridInput<T> for Grid<T> {
    fn to_working_grid(&self) -> Result<Grid<T>, CrosstalkError> {
        Ok(self.clone())
    }
}

impl<T: Float> GridInput<T> for [Vec<T>] {
    fn to_working_grid(&self) -> Result<Grid<T>, CrosstalkError> {
        Grid::from_rows(self)
    }
}

impl<T: Float> GridInput<T> for Vec<Vec<T>> {
    fn to_working_grid(&self) -> Result<Grid<T>, CrosstalkError> {
        Grid::from_rows(self.as_slice())
    }
}

impl<T: Float, S> GridInput<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn to_working_grid(&self) -> Result<Grid<T>, CrosstalkError> {
        let (rows, cols) = self.dim();
        // iter() walks in logical row-major order regardless of memory layout.
        Grid::new(rows, cols, self.iter().copied().collect())
    }
}
