//! Coefficient distillation: compress the winning model into a fixed 7-slot
//! pricing formula.
//!
//! Two extraction strategies, dispatched on the fitted model's variant:
//!
//! - **Linear**: coefficients are read directly from the learned weights by
//!   feature name; the intercept becomes the base price.
//! - **Ensembles**: trees have no coefficients, so relative feature
//!   importances are rescaled through fixed conversion factors into the same
//!   slots. The base price is a constant since importances carry no intercept
//!   information.
//!
//! Either way the output schema is identical — downstream pricing code never
//! needs to know which family won.

use std::collections::BTreeMap;

use chrono::Local;

use crate::domain::{
    CoefficientBundle, DATASET_URL, Dataset, FEATURE_COUNT, FEATURE_NAMES, Feature,
    PricingCoefficients,
};
use crate::fit::TrainSelection;
use crate::models::FittedModel;

/// Base price substituted for ensemble winners.
const ENSEMBLE_BASE_PRICE: f64 = 60.0;

/// Per-slot (default importance, scale) conversion factors for ensembles.
///
/// Chosen so the rescaled importances land in the same ballpark as the
/// corresponding linear weights on representative data. The default covers a
/// feature missing from the importance map.
const DURATION_IMP: (f64, f64) = (0.18, 100.0);
const PEAK_HOUR_IMP: (f64, f64) = (0.05, 500.0);
const WEEKEND_IMP: (f64, f64) = (0.05, 600.0);
const DIRECT_IMP: (f64, f64) = (0.05, 800.0);
const INTERNATIONAL_IMP: (f64, f64) = (0.1, 0.9);
const BUSY_MONTH_IMP: (f64, f64) = (0.05, 0.15);

/// Distill the winning model into the 7-slot pricing formula.
pub fn distill(model: &FittedModel) -> PricingCoefficients {
    match model {
        FittedModel::Linear(m) => PricingCoefficients {
            base_price: m.intercept,
            duration_coef: m.weight(Feature::DurationMinutes),
            peak_hour_coef: m.weight(Feature::IsPeakHour),
            weekend_coef: m.weight(Feature::IsWeekend),
            direct_flight_premium: m.weight(Feature::IsDirect),
            international_multiplier: 1.0 + m.weight(Feature::IsInternational) / 100.0,
            busy_month_multiplier: 1.0 + m.weight(Feature::IsBusyMonth) / 100.0,
        },
        FittedModel::Forest(m) => from_importances(&named_importances(&m.feature_importances())),
        FittedModel::Boosting(m) => from_importances(&named_importances(&m.feature_importances())),
    }
}

/// Importances keyed by canonical feature name.
fn named_importances(importances: &[f64; FEATURE_COUNT]) -> BTreeMap<&'static str, f64> {
    FEATURE_NAMES.iter().copied().zip(importances.iter().copied()).collect()
}

fn from_importances(imp: &BTreeMap<&'static str, f64>) -> PricingCoefficients {
    let get = |feature: Feature, (default, scale): (f64, f64)| {
        imp.get(feature.name()).copied().unwrap_or(default) * scale
    };

    PricingCoefficients {
        base_price: ENSEMBLE_BASE_PRICE,
        duration_coef: get(Feature::DurationMinutes, DURATION_IMP),
        peak_hour_coef: get(Feature::IsPeakHour, PEAK_HOUR_IMP),
        weekend_coef: get(Feature::IsWeekend, WEEKEND_IMP),
        direct_flight_premium: get(Feature::IsDirect, DIRECT_IMP),
        international_multiplier: 1.0 + get(Feature::IsInternational, INTERNATIONAL_IMP),
        busy_month_multiplier: 1.0 + get(Feature::IsBusyMonth, BUSY_MONTH_IMP),
    }
}

/// Assemble the full persisted bundle from a finished training run.
///
/// Confidence is rounded to 3 decimals, every metric to 4; only candidates
/// that actually fitted appear in the metrics map.
pub fn assemble_bundle(
    selection: &TrainSelection,
    dataset: &Dataset,
    coefficients: PricingCoefficients,
) -> CoefficientBundle {
    let mut metrics = BTreeMap::new();
    for fit in &selection.fits {
        let mut m = fit.metrics;
        m.mae = round_to(m.mae, 4);
        m.rmse = round_to(m.rmse, 4);
        m.r2 = round_to(m.r2, 4);
        metrics.insert(fit.family.display_name().to_string(), m);
    }

    CoefficientBundle {
        model: selection.best.family.bundle_id(),
        trained_on: dataset.provenance.tag().to_string(),
        dataset_url: DATASET_URL.to_string(),
        training_date: Local::now().to_rfc3339(),
        training_samples: dataset.examples.len(),
        confidence: round_to(selection.confidence, 3),
        metrics,
        features: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        coefficients,
    }
}

fn round_to(v: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (v * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FEATURE_COUNT;
    use crate::models::{BoostingParams, ForestParams, LinearModel, fit_boosting, fit_forest};

    #[test]
    fn linear_weights_map_to_slots_by_name() {
        let mut weights = [0.0; FEATURE_COUNT];
        weights[Feature::DurationMinutes.index()] = 0.25;
        weights[Feature::IsPeakHour.index()] = 18.0;
        weights[Feature::IsWeekend.index()] = 11.0;
        weights[Feature::IsDirect.index()] = 24.0;
        weights[Feature::IsInternational.index()] = 30.0;
        weights[Feature::IsBusyMonth.index()] = 15.0;

        let model = FittedModel::Linear(LinearModel {
            intercept: 42.5,
            weights,
        });
        let c = distill(&model);

        assert_eq!(c.base_price, 42.5);
        assert_eq!(c.duration_coef, 0.25);
        assert_eq!(c.peak_hour_coef, 18.0);
        assert_eq!(c.weekend_coef, 11.0);
        assert_eq!(c.direct_flight_premium, 24.0);
        assert!((c.international_multiplier - 1.3).abs() < 1e-12);
        assert!((c.busy_month_multiplier - 1.15).abs() < 1e-12);
    }

    #[test]
    fn importances_rescale_through_fixed_factors() {
        let mut imp = BTreeMap::new();
        imp.insert("duration_minutes", 0.5);
        imp.insert("is_peak_hour", 0.1);
        imp.insert("is_weekend", 0.1);
        imp.insert("is_direct", 0.1);
        imp.insert("is_international", 0.0);
        imp.insert("is_busy_month", 0.2);

        let c = from_importances(&imp);
        assert_eq!(c.base_price, ENSEMBLE_BASE_PRICE);
        assert!((c.duration_coef - 50.0).abs() < 1e-12);
        assert!((c.peak_hour_coef - 50.0).abs() < 1e-12);
        assert!((c.weekend_coef - 60.0).abs() < 1e-12);
        assert!((c.direct_flight_premium - 80.0).abs() < 1e-12);
        assert!((c.international_multiplier - 1.0).abs() < 1e-12);
        assert!((c.busy_month_multiplier - 1.03).abs() < 1e-12);
    }

    #[test]
    fn missing_importances_fall_back_to_defaults() {
        let c = from_importances(&BTreeMap::new());
        assert!((c.duration_coef - 18.0).abs() < 1e-12);
        assert!((c.peak_hour_coef - 25.0).abs() < 1e-12);
        assert!((c.international_multiplier - 1.09).abs() < 1e-12);
    }

    #[test]
    fn both_families_serialize_to_the_same_key_set() {
        let x: Vec<[f64; FEATURE_COUNT]> = (0..30)
            .map(|i| {
                let mut f = [0.0; FEATURE_COUNT];
                f[Feature::DurationMinutes.index()] = 60.0 + 10.0 * i as f64;
                f[Feature::IsDirect.index()] = f64::from(i % 2);
                f
            })
            .collect();
        let y: Vec<f64> = x
            .iter()
            .map(|f| 30.0 + 0.4 * f[Feature::DurationMinutes.index()])
            .collect();

        let linear = distill(&FittedModel::Linear(
            crate::models::fit_linear(&x, &y).unwrap(),
        ));
        let forest = distill(&FittedModel::Forest(
            fit_forest(&x, &y, &ForestParams { n_trees: 5, max_depth: 4, seed: 1 }).unwrap(),
        ));
        let boosting = distill(&FittedModel::Boosting(
            fit_boosting(&x, &y, &BoostingParams::default()).unwrap(),
        ));

        let keys = |c: &PricingCoefficients| {
            let value = serde_json::to_value(c).unwrap();
            let map = value.as_object().unwrap();
            assert!(map.values().all(|v| v.as_f64().is_some()));
            map.keys().cloned().collect::<Vec<_>>()
        };

        let expected = vec![
            "basePrice",
            "busyMonthMultiplier",
            "directFlightPremium",
            "durationCoef",
            "internationalMultiplier",
            "peakHourCoef",
            "weekendCoef",
        ];
        let mut linear_keys = keys(&linear);
        linear_keys.sort();
        assert_eq!(linear_keys, expected);
        let mut forest_keys = keys(&forest);
        forest_keys.sort();
        assert_eq!(forest_keys, expected);
        let mut boosting_keys = keys(&boosting);
        boosting_keys.sort();
        assert_eq!(boosting_keys, expected);
    }

    #[test]
    fn bundle_rounds_confidence_and_metrics() {
        use crate::data::generate_synthetic;
        use crate::domain::TrainConfig;
        use std::path::PathBuf;

        let dataset = generate_synthetic(120, 42).unwrap();
        let config = TrainConfig {
            data_path: None,
            sample_count: 120,
            seed: 42,
            output_path: PathBuf::from("model_coefficients.json"),
        };
        let selection = crate::fit::train_and_select(&dataset, &config).unwrap();
        let coefficients = distill(&selection.best.model);
        let bundle = assemble_bundle(&selection, &dataset, coefficients);

        assert_eq!(bundle.training_samples, 120);
        assert_eq!(bundle.model, selection.best.family.bundle_id());
        assert_eq!(bundle.trained_on, "synthetic-fallback");
        let expected_features: Vec<String> = FEATURE_NAMES.iter().map(|s| s.to_string()).collect();
        assert_eq!(bundle.features, expected_features);
        assert!((0.70..=0.95).contains(&bundle.confidence));
        assert_eq!(bundle.confidence, round_to(bundle.confidence, 3));
        for m in bundle.metrics.values() {
            assert_eq!(m.mae, round_to(m.mae, 4));
            assert_eq!(m.rmse, round_to(m.rmse, 4));
            assert_eq!(m.r2, round_to(m.r2, 4));
        }
    }
}
