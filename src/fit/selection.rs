//! Candidate training and selection.
//!
//! All three families are fitted independently on the training partition and
//! evaluated on the held-out partition. Selection rule: lowest MAE wins.
//! Ties are not explicitly broken — the first candidate encountered in
//! [`ModelFamily::ALL`] order keeps the win (strict `<` comparison).
//!
//! A candidate that fails to fit is excluded with a recorded reason, not
//! fatal; the run only aborts when every candidate fails.

use crate::domain::{
    Dataset, EvalMetrics, FEATURE_COUNT, ModelFamily, TEST_FRACTION, TrainConfig,
};
use crate::error::AppError;
use crate::fit::metrics::evaluate;
use crate::fit::split::train_test_split;
use crate::models::{
    BoostingParams, FittedModel, ForestParams, fit_boosting, fit_forest, fit_linear,
};

/// Confidence bounds applied to the winner's R².
pub const CONFIDENCE_MIN: f64 = 0.70;
pub const CONFIDENCE_MAX: f64 = 0.95;

/// One fitted, evaluated candidate.
#[derive(Debug, Clone)]
pub struct CandidateFit {
    pub family: ModelFamily,
    pub model: FittedModel,
    pub metrics: EvalMetrics,
}

/// Output of training + selection.
#[derive(Debug, Clone)]
pub struct TrainSelection {
    pub best: CandidateFit,
    /// Fits for all candidates that trained successfully.
    pub fits: Vec<CandidateFit>,
    /// Candidates that failed to fit and why (for diagnostics).
    pub skipped: Vec<(ModelFamily, String)>,
    /// Winner's R² clamped to [`CONFIDENCE_MIN`, `CONFIDENCE_MAX`].
    pub confidence: f64,
    pub n_train: usize,
    pub n_test: usize,
}

/// Fit all candidate families and select the best by held-out MAE.
pub fn train_and_select(dataset: &Dataset, config: &TrainConfig) -> Result<TrainSelection, AppError> {
    let n = dataset.examples.len();
    let split = train_test_split(n, TEST_FRACTION, config.seed)?;

    let (x_train, y_train) = gather(dataset, &split.train);
    let (x_test, y_test) = gather(dataset, &split.test);

    let mut fits = Vec::new();
    let mut skipped = Vec::new();

    for family in ModelFamily::ALL {
        match fit_candidate(family, &x_train, &y_train, config.seed) {
            Ok(model) => {
                let y_pred: Vec<f64> = x_test.iter().map(|f| model.predict(f)).collect();
                let metrics = evaluate(&y_test, &y_pred);
                fits.push(CandidateFit {
                    family,
                    model,
                    metrics,
                });
            }
            Err(reason) => skipped.push((family, reason)),
        }
    }

    if fits.is_empty() {
        let detail: Vec<String> = skipped
            .iter()
            .map(|(f, r)| format!("{}: {r}", f.display_name()))
            .collect();
        return Err(AppError::no_model(format!(
            "All candidate models failed to fit. {}",
            detail.join(" | ")
        )));
    }

    let best = select_by_mae(&fits).clone();
    let confidence = best.metrics.r2.clamp(CONFIDENCE_MIN, CONFIDENCE_MAX);

    Ok(TrainSelection {
        best,
        fits,
        skipped,
        confidence,
        n_train: split.train.len(),
        n_test: split.test.len(),
    })
}

fn fit_candidate(
    family: ModelFamily,
    x: &[[f64; FEATURE_COUNT]],
    y: &[f64],
    seed: u64,
) -> Result<FittedModel, String> {
    match family {
        ModelFamily::RandomForest => {
            let params = ForestParams { seed, ..ForestParams::default() };
            fit_forest(x, y, &params).map(FittedModel::Forest)
        }
        ModelFamily::GradientBoosting => {
            fit_boosting(x, y, &BoostingParams::default()).map(FittedModel::Boosting)
        }
        ModelFamily::Linear => fit_linear(x, y).map(FittedModel::Linear),
    }
}

/// Extract the selected rows into matrix form.
///
/// Non-finite feature values are defaulted to zero here: every candidate
/// family requires a complete fixed-width matrix, so a bad column is recovered
/// rather than fatal.
fn gather(dataset: &Dataset, indices: &[usize]) -> (Vec<[f64; FEATURE_COUNT]>, Vec<f64>) {
    let mut x = Vec::with_capacity(indices.len());
    let mut y = Vec::with_capacity(indices.len());
    for &i in indices {
        let ex = &dataset.examples[i];
        let mut features = ex.features;
        for v in &mut features {
            if !v.is_finite() {
                *v = 0.0;
            }
        }
        x.push(features);
        y.push(ex.price_usd);
    }
    (x, y)
}

fn select_by_mae(fits: &[CandidateFit]) -> &CandidateFit {
    let mut best = &fits[0];
    for f in &fits[1..] {
        if f.metrics.mae < best.metrics.mae {
            best = f;
        }
    }
    best
}
