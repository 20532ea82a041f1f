//! Gradient boosting regressor.
//!
//! Least-squares boosting: start from the target mean, then repeatedly fit a
//! shallow tree to the current residuals and add it with shrinkage. Stages are
//! inherently sequential, so unlike the forest there is no parallel fitting.

use crate::domain::FEATURE_COUNT;
use crate::models::forest::aggregate_importances;
use crate::models::tree::{RegressionTree, TreeParams, fit_tree};

#[derive(Debug, Clone, Copy)]
pub struct BoostingParams {
    pub n_stages: usize,
    pub max_depth: usize,
    pub learning_rate: f64,
}

impl Default for BoostingParams {
    fn default() -> Self {
        Self {
            n_stages: 100,
            max_depth: 6,
            learning_rate: 0.1,
        }
    }
}

/// A fitted gradient boosting model.
#[derive(Debug, Clone)]
pub struct GradientBoosting {
    base: f64,
    learning_rate: f64,
    trees: Vec<RegressionTree>,
}

impl GradientBoosting {
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let boost: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        self.base + self.learning_rate * boost
    }

    pub fn feature_importances(&self) -> [f64; FEATURE_COUNT] {
        aggregate_importances(&self.trees)
    }
}

/// Fit a boosted ensemble on the full training partition.
pub fn fit_boosting(
    x: &[[f64; FEATURE_COUNT]],
    y: &[f64],
    params: &BoostingParams,
) -> Result<GradientBoosting, String> {
    let n = x.len();
    if n == 0 {
        return Err("No training examples.".to_string());
    }
    if !(params.learning_rate.is_finite() && params.learning_rate > 0.0) {
        return Err("Learning rate must be finite and > 0.".to_string());
    }

    let base = y.iter().sum::<f64>() / n as f64;
    let mut residuals: Vec<f64> = y.iter().map(|&v| v - base).collect();
    let indices: Vec<usize> = (0..n).collect();

    let tree_params = TreeParams {
        max_depth: params.max_depth,
        min_samples_split: 2,
    };

    let mut trees = Vec::with_capacity(params.n_stages);
    for _ in 0..params.n_stages {
        let tree = fit_tree(x, &residuals, &indices, &tree_params)?;
        for (r, row) in residuals.iter_mut().zip(x.iter()) {
            *r -= params.learning_rate * tree.predict(row);
        }
        trees.push(tree);
    }

    Ok(GradientBoosting {
        base,
        learning_rate: params.learning_rate,
        trees,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Feature;

    fn example(duration: f64) -> [f64; FEATURE_COUNT] {
        let mut f = [0.0; FEATURE_COUNT];
        f[Feature::DurationMinutes.index()] = duration;
        f
    }

    #[test]
    fn beats_the_mean_predictor() {
        let x: Vec<_> = (0..50).map(|i| example(60.0 + 12.0 * i as f64)).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|f| 20.0 + 0.4 * f[Feature::DurationMinutes.index()])
            .collect();

        let model = fit_boosting(&x, &y, &BoostingParams::default()).unwrap();

        let mean = y.iter().sum::<f64>() / y.len() as f64;
        let (mut err_model, mut err_mean) = (0.0, 0.0);
        for (f, &target) in x.iter().zip(y.iter()) {
            err_model += (model.predict(f) - target).abs();
            err_mean += (mean - target).abs();
        }
        assert!(
            err_model < err_mean / 10.0,
            "boosting error {err_model:.1} vs mean baseline {err_mean:.1}"
        );
    }

    #[test]
    fn constant_target_predicts_the_constant() {
        let x: Vec<_> = (0..10).map(|i| example(i as f64)).collect();
        let y = vec![42.0; 10];

        let model = fit_boosting(&x, &y, &BoostingParams::default()).unwrap();
        assert!((model.predict(&example(3.0)) - 42.0).abs() < 1e-9);
    }
}
