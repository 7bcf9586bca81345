//! Crosstalk estimation from neighbouring cells.
//!
//! ## Purpose
//!
//! This module estimates how much of a cell's reading is spurious signal
//! coupled in from its neighbours. The estimate is the mean of the cell's
//! neighbourhood scaled by a regulation factor that depends on the cell's
//! topology class and decays with the local iteration index.
//!
//! ## Design notes
//!
//! * Regulation factors are an explicit immutable value passed to every
//!   call; there is no process-wide factor state.
//! * The nine-way position branch lives in
//!   [`CellPosition`](crate::primitives::position::CellPosition) and is
//!   resolved once per estimate.
//! * Neighbours are read from the live working grid, so they reflect
//!   whatever the sweep has already committed.
//!
//! ## Key concepts
//!
//! ```text
//! estimate = decay(k_class, it, rate) * sum(neighbour / count)
//! ```
//!
//! where `k_class` is `k1` for corners, `k2` for edges and `k3` for interior
//! cells, and `count` is 3 for corners and edges, 4 for interior cells.
//!
//! ## Invariants
//!
//! * Only in-range neighbours are read (grid is at least 2x2).
//! * With all factors at 0 the estimate is exactly 0.
//! * The neighbour mean of finite cells is finite, even near `T::max_value()`.

use num_traits::Float;

use crate::math::decay::decay;
use crate::primitives::errors::CrosstalkError;
use crate::primitives::grid::Grid;
use crate::primitives::position::{CellPosition, TopologyClass};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Regulation Factors
// ============================================================================

/// Crosstalk regulation strengths per topology class plus the decay rate.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegulationFactors<T> {
    /// Corner cells.
    pub k1: T,

    /// Edge cells (border, excluding corners).
    pub k2: T,

    /// Interior cells.
    pub k3: T,

    /// Per-local-iteration multiplicative shrink of every factor.
    pub decay_rate: T,
}

impl<T: Float> Default for RegulationFactors<T> {
    fn default() -> Self {
        Self::new(
            T::from(Self::DEFAULT_K).unwrap(),
            T::from(Self::DEFAULT_K).unwrap(),
            T::from(Self::DEFAULT_K).unwrap(),
            T::from(Self::DEFAULT_DECAY_RATE).unwrap(),
        )
    }
}

impl<T: Float> RegulationFactors<T> {
    /// Default strength for every class.
    pub const DEFAULT_K: f64 = 0.01;

    /// Default decay rate.
    pub const DEFAULT_DECAY_RATE: f64 = 0.95;

    /// Create a factor set.
    pub fn new(k1: T, k2: T, k3: T, decay_rate: T) -> Self {
        Self {
            k1,
            k2,
            k3,
            decay_rate,
        }
    }

    /// Factors that subtract nothing.
    pub fn disabled() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Undecayed factor for a topology class.
    pub fn base_for(&self, class: TopologyClass) -> T {
        match class {
            TopologyClass::Corner => self.k1,
            TopologyClass::Edge => self.k2,
            TopologyClass::Interior => self.k3,
        }
    }

    /// Factor for a topology class at local iteration `iteration`.
    pub fn decayed_for(&self, class: TopologyClass, iteration: usize) -> T {
        decay(self.base_for(class), iteration, self.decay_rate)
    }

    /// Reject negative or non-finite factors.
    pub fn validate(&self) -> Result<(), CrosstalkError> {
        let named = [
            ("k1", self.k1),
            ("k2", self.k2),
            ("k3", self.k3),
            ("decay_rate", self.decay_rate),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < T::zero() {
                return Err(CrosstalkError::InvalidRegulationFactor {
                    name,
                    value: value.to_f64().unwrap_or(f64::NAN),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Estimator
// ============================================================================

/// Estimate the crosstalk picked up by `(row, col)` at local iteration
/// `iteration`.
pub fn estimate_crosstalk<T: Float>(
    grid: &Grid<T>,
    row: usize,
    col: usize,
    iteration: usize,
    factors: &RegulationFactors<T>,
) -> T {
    let (rows, cols) = grid.shape();
    let position = CellPosition::classify(row, col, rows, cols);
    estimate_at(grid, position, row, col, iteration, factors)
}

/// Same as [`estimate_crosstalk`] with the position already classified.
pub fn estimate_at<T: Float>(
    grid: &Grid<T>,
    position: CellPosition,
    row: usize,
    col: usize,
    iteration: usize,
    factors: &RegulationFactors<T>,
) -> T {
    let (rows, cols) = grid.shape();
    let neighbours = position.neighbors(row, col, rows, cols);

    let factor = factors.decayed_for(position.class(), iteration);
    if factor == T::zero() {
        return T::zero();
    }

    // Scale each term before adding so the mean of finite values stays finite
    let count = T::from(neighbours.len()).unwrap();
    let mean = neighbours
        .as_slice()
        .iter()
        .fold(T::zero(), |acc, &cell| acc + grid[cell] / count);

    factor * mean
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid_3x3() -> Grid<f64> {
        Grid::from_rows(&[
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![7.0, 8.0, 9.0],
        ])
        .unwrap()
    }

    fn flat(k: f64) -> RegulationFactors<f64> {
        RegulationFactors::new(k, k, k, 1.0)
    }

    #[test]
    fn defaults_match_reference_constants() {
        let f = RegulationFactors::<f64>::default();
        assert_eq!((f.k1, f.k2, f.k3, f.decay_rate), (0.01, 0.01, 0.01, 0.95));
    }

    #[test]
    fn corner_averages_l_shape() {
        let g = grid_3x3();
        // (0,0): (1,0)=4 (0,1)=2 (1,1)=5
        assert_relative_eq!(estimate_crosstalk(&g, 0, 0, 0, &flat(1.0)), 11.0 / 3.0);
        // (2,2): (1,2)=6 (2,1)=8 (1,1)=5
        assert_relative_eq!(estimate_crosstalk(&g, 2, 2, 0, &flat(1.0)), 19.0 / 3.0);
        // (2,0): (1,0)=4 (2,1)=8 (1,1)=5
        assert_relative_eq!(estimate_crosstalk(&g, 2, 0, 0, &flat(1.0)), 17.0 / 3.0);
        // (0,2): (0,1)=2 (1,1)=5 (1,2)=6
        assert_relative_eq!(estimate_crosstalk(&g, 0, 2, 0, &flat(1.0)), 13.0 / 3.0);
    }

    #[test]
    fn edge_averages_row_pair_and_inward_cell() {
        let g = grid_3x3();
        // (0,1): (0,2)=3 (0,0)=1 (1,1)=5
        assert_relative_eq!(estimate_crosstalk(&g, 0, 1, 0, &flat(1.0)), 3.0);
        // (1,0): (0,0)=1 (2,0)=7 (1,1)=5
        assert_relative_eq!(estimate_crosstalk(&g, 1, 0, 0, &flat(1.0)), 13.0 / 3.0);
    }

    #[test]
    fn interior_averages_four_neighbours() {
        let g = grid_3x3();
        // 2 + 4 + 6 + 8
        assert_relative_eq!(estimate_crosstalk(&g, 1, 1, 0, &flat(1.0)), 5.0);
    }

    #[test]
    fn class_selects_factor() {
        let g = Grid::filled(3, 3, 6.0_f64);
        let factors = RegulationFactors::new(0.1, 0.2, 0.3, 1.0);
        assert_relative_eq!(estimate_crosstalk(&g, 0, 0, 0, &factors), 0.6);
        assert_relative_eq!(estimate_crosstalk(&g, 0, 1, 0, &factors), 1.2);
        assert_relative_eq!(estimate_crosstalk(&g, 1, 1, 0, &factors), 1.8);
    }

    #[test]
    fn factor_decays_with_iteration() {
        let g = Grid::filled(3, 3, 10.0_f64);
        let factors = RegulationFactors::new(0.5, 0.5, 0.5, 0.5);
        assert_relative_eq!(estimate_crosstalk(&g, 1, 1, 0, &factors), 5.0);
        assert_relative_eq!(estimate_crosstalk(&g, 1, 1, 1, &factors), 2.5);
        assert_relative_eq!(estimate_crosstalk(&g, 1, 1, 2, &factors), 1.25);
    }

    #[test]
    fn zero_decay_rate_silences_later_iterations() {
        let g = grid_3x3();
        let factors = RegulationFactors::new(0.7, 0.8, 0.9, 0.0);
        assert!(estimate_crosstalk(&g, 1, 1, 0, &factors) > 0.0);
        for it in 1..4 {
            for (r, c) in [(0, 0), (0, 1), (1, 1)] {
                assert_eq!(estimate_crosstalk(&g, r, c, it, &factors), 0.0);
            }
        }
    }

    #[test]
    fn disabled_factors_estimate_nothing() {
        let g = grid_3x3();
        let factors = RegulationFactors::disabled();
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(estimate_crosstalk(&g, r, c, 0, &factors), 0.0);
            }
        }
    }

    #[test]
    fn near_max_neighbours_stay_finite() {
        let big = f64::MAX / 2.0;
        let g = Grid::filled(3, 3, big);

        for (r, c) in [(0, 0), (0, 1), (1, 1)] {
            assert_eq!(estimate_crosstalk(&g, r, c, 0, &RegulationFactors::disabled()), 0.0);

            let est = estimate_crosstalk(&g, r, c, 0, &RegulationFactors::default());
            assert!(est.is_finite());
            assert_relative_eq!(est, 0.01 * big, max_relative = 1e-12);
        }
    }

    #[test]
    fn validate_rejects_bad_factors() {
        assert!(RegulationFactors::<f64>::default().validate().is_ok());
        assert!(RegulationFactors::<f64>::disabled().validate().is_ok());

        let err = RegulationFactors::new(0.01, -0.1, 0.01, 0.95)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            CrosstalkError::InvalidRegulationFactor { name: "k2", .. }
        ));

        let err = RegulationFactors::new(0.01, 0.01, 0.01, f64::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            CrosstalkError::InvalidRegulationFactor {
                name: "decay_rate",
                ..
            }
        ));
    }
}
