//! Rounding of corrected magnitudes.
//!
//! The corrected grid holds whole numbers. Ties are resolved half-to-even
//! by default.

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rule for rounding a corrected value to an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// Round to nearest, ties to even (`2.5 -> 2`, `3.5 -> 4`).
    #[default]
    HalfEven,

    /// Round to nearest, ties away from zero (`2.5 -> 3`, `-2.5 -> -3`).
    HalfAwayFromZero,
}

impl RoundingMode {
    /// Round `value` under this mode.
    pub fn apply<T: Float>(self, value: T) -> T {
        match self {
            Self::HalfEven => round_half_even(value),
            Self::HalfAwayFromZero => value.round(),
        }
    }
}

/// Round to nearest integer with ties going to the even neighbour.
pub fn round_half_even<T: Float>(value: T) -> T {
    let rounded = value.round();
    let half = T::from(0.5).unwrap();

    if (value - value.trunc()).abs() != half {
        return rounded;
    }

    let two = T::one() + T::one();
    if (rounded / two).fract() == T::zero() {
        rounded
    } else {
        // `round` moved away from zero onto an odd integer; step back.
        rounded - value.signum()
    }
}
