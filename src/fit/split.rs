//! Seeded train/test partitioning.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::error::AppError;

/// Index sets for the two partitions. Together they cover `0..n` exactly once;
/// no ordering guarantee beyond reproducibility under a fixed seed.
#[derive(Debug, Clone)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` and carve off a test fraction.
///
/// The test side gets at least one example; both sides must end up non-empty.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Result<SplitIndices, AppError> {
    if !(test_fraction.is_finite() && test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(AppError::input("Test fraction must be in (0, 1)."));
    }
    if n < 2 {
        return Err(AppError::no_model(format!(
            "Need at least 2 examples to split, got {n}."
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let n_test = ((n as f64 * test_fraction).round() as usize).clamp(1, n - 1);
    let test = indices.split_off(n - n_test);

    Ok(SplitIndices {
        train: indices,
        test,
    })
}
