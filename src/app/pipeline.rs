//! Shared training pipeline used by the CLI front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! resolve dataset -> (ingest + engineer | synthesize) -> train/select ->
//! distill -> bundle
//!
//! The CLI then focuses on presentation and persistence.

use std::path::PathBuf;

use crate::data::{generate_synthetic, load_flight_rows, resolve_dataset};
use crate::distill::{assemble_bundle, distill};
use crate::domain::{CoefficientBundle, Dataset, TrainConfig};
use crate::error::AppError;
use crate::features::engineer_features;
use crate::fit::TrainSelection;

/// Where the training data actually came from, with ingest diagnostics.
#[derive(Debug, Clone)]
pub enum SourceReport {
    Csv {
        path: PathBuf,
        rows_read: usize,
        rows_used: usize,
        rows_skipped: usize,
        /// Share of business-class rows (diagnostic, not a model input).
        business_share: f64,
        /// Share of premium-carrier rows (diagnostic, not a model input).
        premium_airline_share: f64,
    },
    Synthetic {
        count: usize,
        seed: u64,
    },
}

/// All computed outputs of a single `fare train` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub source: SourceReport,
    pub dataset: Dataset,
    pub selection: TrainSelection,
    pub bundle: CoefficientBundle,
}

/// Execute the full training pipeline and return the computed outputs.
///
/// A missing real dataset is not an error: the run falls back to synthetic
/// generation and tags the bundle accordingly.
pub fn run_train(config: &TrainConfig) -> Result<RunOutput, AppError> {
    let (dataset, source) = match resolve_dataset(config.data_path.as_deref())? {
        Some(path) => {
            let ingested = load_flight_rows(&path)?;
            let engineered = engineer_features(&ingested.rows, config.seed)?;
            let source = SourceReport::Csv {
                path,
                rows_read: ingested.rows_read,
                rows_used: ingested.rows.len(),
                rows_skipped: ingested.row_errors.len(),
                business_share: engineered.business_share,
                premium_airline_share: engineered.premium_airline_share,
            };
            (engineered.dataset, source)
        }
        None => {
            let dataset = generate_synthetic(config.sample_count, config.seed)?;
            let source = SourceReport::Synthetic {
                count: config.sample_count,
                seed: config.seed,
            };
            (dataset, source)
        }
    };

    let selection = crate::fit::train_and_select(&dataset, config)?;
    let coefficients = distill(&selection.best.model);
    let bundle = assemble_bundle(&selection, &dataset, coefficients);

    Ok(RunOutput {
        source,
        dataset,
        selection,
        bundle,
    })
}
