//! Exponential decay of regulation factors.
//!
//! ## Purpose
//!
//! Later refinement steps of a cell's local solve should subtract less
//! crosstalk than earlier ones. This module provides the decay law applied to
//! each regulation factor at every local iteration:
//!
//! ```text
//! k(it) = k0 * rate^it
//! ```
//!
//! ## Invariants
//!
//! * `decay(k0, 0, rate) == k0` for every rate, including `rate == 0`.
//! * For `rate` in (0, 1) the result shrinks monotonically toward 0.
//! * Underflow to 0 is not an error; it means no further correction.
//!
//! ## Non-goals
//!
//! * The iteration index is local to one cell; this module does not track
//!   sweep-wide iteration counts.

use num_traits::Float;

/// Decay `initial_value` by `decay_rate` raised to `iteration`.
#[inline]
pub fn decay<T: Float>(initial_value: T, iteration: usize, decay_rate: T) -> T {
    // pow(0, 0) is one, so the first iteration keeps the undecayed factor.
    initial_value * decay_rate.powf(T::from(iteration).unwrap())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn iteration_zero_is_identity() {
        assert_eq!(decay(0.01_f64, 0, 0.95), 0.01);
        assert_eq!(decay(0.3_f64, 0, 0.0), 0.3);
    }

    #[test]
    fn matches_closed_form() {
        assert_relative_eq!(decay(0.01_f64, 3, 0.95), 0.01 * 0.95_f64.powi(3));
        assert_relative_eq!(decay(2.0_f32, 2, 0.5), 0.5);
    }

    #[test]
    fn zero_rate_vanishes_after_first_iteration() {
        for it in 1..5 {
            assert_eq!(decay(0.8_f64, it, 0.0), 0.0);
        }
    }

    #[test]
    fn shrinks_monotonically() {
        let mut prev = decay(1.0_f64, 0, 0.9);
        for it in 1..50 {
            let next = decay(1.0_f64, it, 0.9);
            assert!(next < prev);
            prev = next;
        }
    }

    #[test]
    fn huge_iterations_underflow_to_zero() {
        assert_eq!(decay(0.01_f64, 100_000, 0.5), 0.0);
    }
}
