//! Correct a synthetic noisy readout and print the grids.
//!
//! Run with `RUST_LOG=crosstalk=debug` to see the sweep summary, or
//! `RUST_LOG=crosstalk=trace` for one event per cell.

use crosstalk::prelude::*;
use rand::Rng;
use tracing_subscriber::EnvFilter;

const ROWS: usize = 8;
const COLS: usize = 16;

fn main() -> Result<(), CrosstalkError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = rand::thread_rng();
    let original: Vec<Vec<f64>> = (0..ROWS)
        .map(|_| (0..COLS).map(|_| rng.gen_range(0..70) as f64).collect())
        .collect();
    let noisy: Vec<Vec<f64>> = original
        .iter()
        .map(|row| row.iter().map(|&v| v + rng.gen::<f64>() * 10.0).collect())
        .collect();

    let corrector = Crosstalk::new()
        .max_iterations(100)
        .tolerance(0.2)
        .return_diagnostics()
        .adapter(Batch)
        .build()?;

    let result = corrector.correct(&noisy)?;

    println!("Original Grid:");
    println!("{:.0}", Grid::from_rows(&original)?);
    println!("Noisy Grid:");
    println!("{}", Grid::from_rows(&noisy)?);
    println!("{}", result);

    Ok(())
}
