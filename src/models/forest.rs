//! Random forest regressor: bagged regression trees.
//!
//! Per-tree seeds are drawn from the master RNG before any fitting starts, so
//! the forest is reproducible under a fixed seed even though the trees
//! themselves are fitted in parallel.

use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;

use crate::domain::FEATURE_COUNT;
use crate::models::tree::{RegressionTree, TreeParams, fit_tree};

#[derive(Debug, Clone, Copy)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 12,
            seed: 42,
        }
    }
}

/// A fitted random forest.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<RegressionTree>,
}

impl RandomForest {
    /// Mean prediction across trees.
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.predict(features)).sum();
        sum / self.trees.len() as f64
    }

    /// Per-feature importances: each tree's importances normalized to sum to
    /// one, averaged across trees, renormalized.
    pub fn feature_importances(&self) -> [f64; FEATURE_COUNT] {
        aggregate_importances(&self.trees)
    }
}

/// Fit a forest on bootstrap samples of the training partition.
pub fn fit_forest(
    x: &[[f64; FEATURE_COUNT]],
    y: &[f64],
    params: &ForestParams,
) -> Result<RandomForest, String> {
    let n = x.len();
    if n == 0 {
        return Err("No training examples.".to_string());
    }
    if params.n_trees == 0 {
        return Err("Forest needs at least one tree.".to_string());
    }

    let mut rng = StdRng::seed_from_u64(params.seed);
    let seeds: Vec<u64> = (0..params.n_trees).map(|_| rng.next_u64()).collect();

    let tree_params = TreeParams {
        max_depth: params.max_depth,
        min_samples_split: 2,
    };

    let trees: Result<Vec<RegressionTree>, String> = seeds
        .into_par_iter()
        .map(|seed| {
            let mut tree_rng = StdRng::seed_from_u64(seed);
            let indices: Vec<usize> = (0..n).map(|_| tree_rng.gen_range(0..n)).collect();
            fit_tree(x, y, &indices, &tree_params)
        })
        .collect();

    Ok(RandomForest { trees: trees? })
}

/// Shared importance aggregation for tree ensembles.
pub(crate) fn aggregate_importances(trees: &[RegressionTree]) -> [f64; FEATURE_COUNT] {
    let mut total = [0.0; FEATURE_COUNT];
    for tree in trees {
        let raw = tree.importances();
        let sum: f64 = raw.iter().sum();
        if sum <= 0.0 {
            continue; // single-leaf tree carries no signal
        }
        for (acc, &v) in total.iter_mut().zip(raw.iter()) {
            *acc += v / sum;
        }
    }

    let grand: f64 = total.iter().sum();
    if grand > 0.0 {
        for v in &mut total {
            *v /= grand;
        }
    }
    total
}
