//! Held-out evaluation metrics: MAE, RMSE, R².
//!
//! All three are guaranteed finite for finite inputs; selection and the
//! confidence clamp rely on that.

use crate::domain::EvalMetrics;

pub fn mean_absolute_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len().max(1) as f64;
    y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p).abs())
        .sum::<f64>()
        / n
}

pub fn root_mean_squared_error(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len().max(1) as f64;
    let mse = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p) * (t - p))
        .sum::<f64>()
        / n;
    mse.sqrt()
}

/// Coefficient of determination.
///
/// Degenerate cases (constant targets): 1.0 for a perfect fit, 0.0 otherwise,
/// so downstream clamping never sees a NaN.
pub fn r2_score(y_true: &[f64], y_pred: &[f64]) -> f64 {
    let n = y_true.len() as f64;
    if n == 0.0 {
        return 0.0;
    }
    let mean = y_true.iter().sum::<f64>() / n;

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(t, p)| (t - p) * (t - p))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - mean) * (t - mean)).sum();

    if ss_tot <= f64::EPSILON * n {
        return if ss_res <= f64::EPSILON * n { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}

/// Compute all three metrics at once.
pub fn evaluate(y_true: &[f64], y_pred: &[f64]) -> EvalMetrics {
    EvalMetrics {
        mae: mean_absolute_error(y_true, y_pred),
        rmse: root_mean_squared_error(y_true, y_pred),
        r2: r2_score(y_true, y_pred),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        let y_true = [1.0, 2.0, 3.0, 4.0];
        let y_pred = [1.0, 2.0, 3.0, 2.0];

        assert!((mean_absolute_error(&y_true, &y_pred) - 0.5).abs() < 1e-12);
        assert!((root_mean_squared_error(&y_true, &y_pred) - 1.0).abs() < 1e-12);

        // ss_res = 4, ss_tot = 5 -> r2 = 0.2
        assert!((r2_score(&y_true, &y_pred) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn perfect_fit() {
        let y = [3.0, 1.0, 4.0, 1.0, 5.0];
        let m = evaluate(&y, &y);
        assert_eq!(m.mae, 0.0);
        assert_eq!(m.rmse, 0.0);
        assert_eq!(m.r2, 1.0);
    }

    #[test]
    fn constant_targets_stay_finite() {
        let y_true = [5.0, 5.0, 5.0];
        assert_eq!(r2_score(&y_true, &[5.0, 5.0, 5.0]), 1.0);
        assert_eq!(r2_score(&y_true, &[4.0, 5.0, 6.0]), 0.0);
    }
}
