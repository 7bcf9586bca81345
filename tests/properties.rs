use crosstalk::prelude::*;
use proptest::prelude::*;

fn grid_strategy() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (2usize..8, 2usize..8).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(prop::collection::vec(0.0..500.0, cols), rows)
    })
}

fn factors_strategy() -> impl Strategy<Value = RegulationFactors<f64>> {
    (0.0..1.0, 0.0..1.0, 0.0..1.0, 0.0..1.0)
        .prop_map(|(k1, k2, k3, rate)| RegulationFactors::new(k1, k2, k3, rate))
}

#[test]
fn shape_is_preserved() {
    proptest!(|(grid in grid_strategy(), factors in factors_strategy())| {
        let result = Crosstalk::new()
            .regulation_factors(factors)
            .adapter(Batch)
            .build()
            .unwrap()
            .correct(&grid)
            .unwrap();

        prop_assert_eq!(result.shape(), (grid.len(), grid[0].len()));
        prop_assert_eq!(result.iterations.len(), grid.len() * grid[0].len());
    });
}

#[test]
fn iteration_cap_holds() {
    proptest!(|(grid in grid_strategy(), factors in factors_strategy(), max in 0usize..20)| {
        let result = Crosstalk::new()
            .regulation_factors(factors)
            .max_iterations(max)
            .tolerance(1e-9)
            .adapter(Batch)
            .build()
            .unwrap()
            .correct(&grid)
            .unwrap();

        for &it in &result.iterations {
            prop_assert!(it >= 1 && it <= max + 2);
        }
    });
}

#[test]
fn output_is_integral_and_non_negative() {
    proptest!(|(grid in grid_strategy(), factors in factors_strategy())| {
        let result = Crosstalk::new()
            .regulation_factors(factors)
            .adapter(Batch)
            .build()
            .unwrap()
            .correct(&grid)
            .unwrap();

        for &v in result.corrected.as_slice() {
            prop_assert_eq!(v, v.round());
            prop_assert!(v >= 0.0);
        }
    });
}

#[test]
fn correction_is_deterministic() {
    proptest!(|(grid in grid_strategy(), factors in factors_strategy())| {
        let corrector = Crosstalk::new()
            .regulation_factors(factors)
            .adapter(Batch)
            .build()
            .unwrap();

        let a = corrector.correct(&grid).unwrap();
        let b = corrector.correct(&grid).unwrap();
        prop_assert_eq!(a, b);
    });
}

#[test]
fn disabled_factors_only_round() {
    proptest!(|(grid in grid_strategy())| {
        let result = Crosstalk::new()
            .regulation_factors(RegulationFactors::disabled())
            .rounding_mode(HalfAwayFromZero)
            .adapter(Batch)
            .build()
            .unwrap()
            .correct(&grid)
            .unwrap();

        for (row, values) in grid.iter().enumerate() {
            for (col, &v) in values.iter().enumerate() {
                prop_assert_eq!(result.corrected[(row, col)], v.round());
            }
        }
    });
}
