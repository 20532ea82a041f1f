//! CART regression tree.
//!
//! Splits minimize the weighted sum of child variances (equivalently,
//! maximize variance reduction). Candidate thresholds are midpoints between
//! consecutive distinct sorted feature values; all features are considered at
//! every node.
//!
//! Each tree also accumulates per-feature impurity decrease, normalized by the
//! size of its training sample — the raw material for ensemble feature
//! importances.

use crate::domain::FEATURE_COUNT;

/// Hyperparameters shared by standalone trees and ensemble members.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth: usize,
    pub min_samples_split: usize,
}

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// A fitted regression tree.
#[derive(Debug, Clone)]
pub struct RegressionTree {
    nodes: Vec<Node>,
    importances: [f64; FEATURE_COUNT],
}

impl RegressionTree {
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    /// Raw per-feature impurity decrease accumulated during fitting.
    ///
    /// Not normalized to sum to one; ensembles normalize after aggregating
    /// across trees.
    pub fn importances(&self) -> &[f64; FEATURE_COUNT] {
        &self.importances
    }
}

/// Fit a tree on the examples selected by `indices` (duplicates allowed, so
/// bootstrap samples work without copying rows).
pub fn fit_tree(
    x: &[[f64; FEATURE_COUNT]],
    y: &[f64],
    indices: &[usize],
    params: &TreeParams,
) -> Result<RegressionTree, String> {
    if indices.is_empty() {
        return Err("No training examples.".to_string());
    }
    if x.len() != y.len() {
        return Err(format!(
            "Design/target length mismatch: {} vs {}",
            x.len(),
            y.len()
        ));
    }

    let mut builder = TreeBuilder {
        x,
        y,
        params,
        n_total: indices.len() as f64,
        nodes: Vec::new(),
        importances: [0.0; FEATURE_COUNT],
    };
    let mut indices = indices.to_vec();
    builder.build(&mut indices, 0);

    Ok(RegressionTree {
        nodes: builder.nodes,
        importances: builder.importances,
    })
}

struct TreeBuilder<'a> {
    x: &'a [[f64; FEATURE_COUNT]],
    y: &'a [f64],
    params: &'a TreeParams,
    n_total: f64,
    nodes: Vec<Node>,
    importances: [f64; FEATURE_COUNT],
}

/// Best split found for one node.
struct SplitChoice {
    feature: usize,
    threshold: f64,
    /// Summed child SSE (lower is better).
    children_sse: f64,
}

impl TreeBuilder<'_> {
    /// Build the subtree over `indices`, returning its node id.
    fn build(&mut self, indices: &mut [usize], depth: usize) -> usize {
        let n = indices.len();
        let (mean, sse) = mean_and_sse(self.y, indices);

        let is_leaf = depth >= self.params.max_depth
            || n < self.params.min_samples_split
            || sse <= f64::EPSILON * n as f64;

        if !is_leaf {
            if let Some(split) = self.best_split(indices) {
                // Weighted impurity decrease, relative to this tree's sample.
                let decrease = (sse - split.children_sse) / self.n_total;
                if decrease > 0.0 {
                    self.importances[split.feature] += decrease;

                    let mid = partition(self.x, indices, split.feature, split.threshold);
                    let id = self.nodes.len();
                    self.nodes.push(Node::Leaf { value: mean }); // placeholder
                    let (left_idx, right_idx) = indices.split_at_mut(mid);
                    let left = self.build(left_idx, depth + 1);
                    let right = self.build(right_idx, depth + 1);
                    self.nodes[id] = Node::Split {
                        feature: split.feature,
                        threshold: split.threshold,
                        left,
                        right,
                    };
                    return id;
                }
            }
        }

        let id = self.nodes.len();
        self.nodes.push(Node::Leaf { value: mean });
        id
    }

    /// Scan every feature for the threshold minimizing summed child SSE.
    fn best_split(&self, indices: &[usize]) -> Option<SplitChoice> {
        let n = indices.len();
        let mut best: Option<SplitChoice> = None;
        let mut sorted = indices.to_vec();

        for feature in 0..FEATURE_COUNT {
            sorted.sort_by(|&a, &b| {
                self.x[a][feature]
                    .partial_cmp(&self.x[b][feature])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            // Prefix sums over the sorted order let us evaluate every split
            // position in one pass: SSE = Σy² - (Σy)²/n on each side.
            let mut left_sum = 0.0;
            let mut left_sq = 0.0;
            let mut total_sum = 0.0;
            let mut total_sq = 0.0;
            for &i in &sorted {
                total_sum += self.y[i];
                total_sq += self.y[i] * self.y[i];
            }

            for pos in 1..n {
                let i = sorted[pos - 1];
                left_sum += self.y[i];
                left_sq += self.y[i] * self.y[i];

                let lo = self.x[sorted[pos - 1]][feature];
                let hi = self.x[sorted[pos]][feature];
                if hi <= lo {
                    continue; // no threshold separates equal values
                }

                let n_left = pos as f64;
                let n_right = (n - pos) as f64;
                let right_sum = total_sum - left_sum;
                let right_sq = total_sq - left_sq;

                let sse_left = left_sq - left_sum * left_sum / n_left;
                let sse_right = right_sq - right_sum * right_sum / n_right;
                let children_sse = sse_left.max(0.0) + sse_right.max(0.0);

                let better = match &best {
                    Some(b) => children_sse < b.children_sse,
                    None => true,
                };
                if better {
                    best = Some(SplitChoice {
                        feature,
                        threshold: lo + (hi - lo) / 2.0,
                        children_sse,
                    });
                }
            }
        }

        best
    }
}

/// Reorder `indices` so rows with `x[feature] <= threshold` come first; returns
/// the boundary position.
fn partition(
    x: &[[f64; FEATURE_COUNT]],
    indices: &mut [usize],
    feature: usize,
    threshold: f64,
) -> usize {
    let mut mid = 0;
    for pos in 0..indices.len() {
        if x[indices[pos]][feature] <= threshold {
            indices.swap(pos, mid);
            mid += 1;
        }
    }
    mid
}

fn mean_and_sse(y: &[f64], indices: &[usize]) -> (f64, f64) {
    let n = indices.len() as f64;
    let mut sum = 0.0;
    let mut sq = 0.0;
    for &i in indices {
        sum += y[i];
        sq += y[i] * y[i];
    }
    let mean = sum / n;
    (mean, (sq - sum * sum / n).max(0.0))
}
