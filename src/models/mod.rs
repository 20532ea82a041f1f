//! Candidate regressor implementations.
//!
//! Three families are trained and compared:
//!
//! - [`LinearModel`] — intercept + per-feature weights via least squares
//! - [`RandomForest`] — bagged regression trees
//! - [`GradientBoosting`] — additive shallow trees on residuals
//!
//! Each fit is an opaque blocking call that returns a fitted model or a
//! failure reason; internal parallelism (rayon in the forest) is invisible to
//! callers.

pub mod boosting;
pub mod forest;
pub mod linear;
pub mod tree;

pub use boosting::*;
pub use forest::*;
pub use linear::*;
pub use tree::*;

use crate::domain::{FEATURE_COUNT, ModelFamily};

/// A fitted regressor, tagged by family.
///
/// Distillation dispatches on this tag: linear models expose weights by name,
/// ensembles expose feature importances.
#[derive(Debug, Clone)]
pub enum FittedModel {
    Linear(LinearModel),
    Forest(RandomForest),
    Boosting(GradientBoosting),
}

impl FittedModel {
    pub fn family(&self) -> ModelFamily {
        match self {
            FittedModel::Linear(_) => ModelFamily::Linear,
            FittedModel::Forest(_) => ModelFamily::RandomForest,
            FittedModel::Boosting(_) => ModelFamily::GradientBoosting,
        }
    }

    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        match self {
            FittedModel::Linear(m) => m.predict(features),
            FittedModel::Forest(m) => m.predict(features),
            FittedModel::Boosting(m) => m.predict(features),
        }
    }
}
