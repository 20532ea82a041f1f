//! Ordinary least squares linear regressor.
//!
//! The design matrix is `n × (1 + FEATURE_COUNT)` with a leading intercept
//! column. We solve with SVD rather than QR:
//!
//! - the matrix is tall (many rows, 13 columns), and nalgebra's `QR::solve`
//!   is intended for square systems
//! - binary features make near-collinear columns likely on small or skewed
//!   datasets, so we want a solver that degrades gracefully
//!
//! With only 13 columns, SVD cost is negligible next to the ensemble fits.

use nalgebra::{DMatrix, DVector};

use crate::domain::{FEATURE_COUNT, Feature};

/// A fitted linear model: intercept plus one weight per canonical feature.
#[derive(Debug, Clone)]
pub struct LinearModel {
    pub intercept: f64,
    pub weights: [f64; FEATURE_COUNT],
}

impl LinearModel {
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> f64 {
        let mut y = self.intercept;
        for (w, v) in self.weights.iter().zip(features.iter()) {
            y += w * v;
        }
        y
    }

    /// Learned weight for a named feature.
    pub fn weight(&self, feature: Feature) -> f64 {
        self.weights[feature.index()]
    }
}

/// Fit a linear model by least squares.
///
/// Returns a failure reason (not a process error) so selection can exclude
/// this candidate and continue with the others.
pub fn fit_linear(x: &[[f64; FEATURE_COUNT]], y: &[f64]) -> Result<LinearModel, String> {
    let n = x.len();
    if n == 0 {
        return Err("No training examples.".to_string());
    }
    if n != y.len() {
        return Err(format!("Design/target length mismatch: {n} vs {}", y.len()));
    }

    let cols = 1 + FEATURE_COUNT;
    let mut design = DMatrix::zeros(n, cols);
    for (i, row) in x.iter().enumerate() {
        design[(i, 0)] = 1.0;
        for (j, &v) in row.iter().enumerate() {
            design[(i, 1 + j)] = v;
        }
    }
    let targets = DVector::from_column_slice(y);

    let beta = solve_least_squares(&design, &targets)
        .ok_or_else(|| "Least-squares solve failed (ill-conditioned design matrix).".to_string())?;

    let mut weights = [0.0; FEATURE_COUNT];
    for (j, w) in weights.iter_mut().enumerate() {
        *w = beta[1 + j];
    }

    Ok(LinearModel {
        intercept: beta[0],
        weights,
    })
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example(duration: f64, direct: f64) -> [f64; FEATURE_COUNT] {
        let mut f = [0.0; FEATURE_COUNT];
        f[Feature::DurationMinutes.index()] = duration;
        f[Feature::IsDirect.index()] = direct;
        f
    }

    #[test]
    fn recovers_known_linear_relation() {
        // price = 50 + 0.3 * duration + 20 * is_direct
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..40 {
            let duration = 60.0 + 10.0 * i as f64;
            let direct = f64::from(i % 2);
            x.push(example(duration, direct));
            y.push(50.0 + 0.3 * duration + 20.0 * direct);
        }

        let model = fit_linear(&x, &y).unwrap();
        assert!((model.intercept - 50.0).abs() < 1e-6, "intercept {}", model.intercept);
        assert!((model.weight(Feature::DurationMinutes) - 0.3).abs() < 1e-6);
        assert!((model.weight(Feature::IsDirect) - 20.0).abs() < 1e-6);

        let pred = model.predict(&example(120.0, 1.0));
        assert!((pred - (50.0 + 36.0 + 20.0)).abs() < 1e-6);
    }

    #[test]
    fn empty_input_is_a_fit_failure() {
        assert!(fit_linear(&[], &[]).is_err());
    }
}
