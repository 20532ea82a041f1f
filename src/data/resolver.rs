//! Locate the optional real dataset.
//!
//! A missing dataset is not an error: the pipeline falls back to synthetic
//! generation. Only an explicitly requested path that does not exist is fatal,
//! since silently ignoring a user-supplied `--data` would be surprising.

use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Environment variable that overrides the search path.
pub const DATASET_ENV: &str = "FARE_DATASET";

/// Fixed search path for the Kaggle export.
const SEARCH_PATHS: [&str; 3] = [
    "Clean_Dataset.csv",
    "data/Clean_Dataset.csv",
    "datasets/Clean_Dataset.csv",
];

/// Resolve the dataset location.
///
/// Precedence: explicit `--data` path (must exist), then `FARE_DATASET`, then
/// the fixed search path. `Ok(None)` means "train on synthetic data".
pub fn resolve_dataset(explicit: Option<&Path>) -> Result<Option<PathBuf>, AppError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(AppError::input(format!(
                "Dataset '{}' does not exist.",
                path.display()
            )));
        }
        return Ok(Some(path.to_path_buf()));
    }

    dotenvy::dotenv().ok();
    if let Ok(value) = std::env::var(DATASET_ENV) {
        let path = PathBuf::from(value);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    for candidate in SEARCH_PATHS {
        let path = Path::new(candidate);
        if path.exists() {
            return Ok(Some(path.to_path_buf()));
        }
    }

    Ok(None)
}
