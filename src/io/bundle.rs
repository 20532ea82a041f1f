//! Read/write coefficient bundle JSON files.
//!
//! The bundle is the "portable" representation of a trained run: model family,
//! provenance, per-candidate metrics, the canonical feature order, and the
//! 7-slot pricing formula. The schema is defined by `domain::CoefficientBundle`.
//!
//! Writes go through a temp file in the target directory followed by a rename,
//! so a failed run never leaves a partial bundle behind.

use std::fs::File;
use std::path::Path;

use crate::domain::CoefficientBundle;
use crate::error::AppError;

/// Write a bundle JSON file, replacing any previous bundle wholesale.
pub fn write_bundle_json(path: &Path, bundle: &CoefficientBundle) -> Result<(), AppError> {
    let tmp_path = path.with_extension("json.tmp");

    let file = File::create(&tmp_path).map_err(|e| {
        AppError::input(format!(
            "Failed to create bundle JSON '{}': {e}",
            tmp_path.display()
        ))
    })?;

    serde_json::to_writer_pretty(file, bundle)
        .map_err(|e| AppError::input(format!("Failed to write bundle JSON: {e}")))?;

    std::fs::rename(&tmp_path, path).map_err(|e| {
        AppError::input(format!(
            "Failed to move bundle into place at '{}': {e}",
            path.display()
        ))
    })?;

    Ok(())
}

/// Read a bundle JSON file.
pub fn read_bundle_json(path: &Path) -> Result<CoefficientBundle, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!(
            "Failed to open bundle JSON '{}': {e}",
            path.display()
        ))
    })?;
    let bundle: CoefficientBundle = serde_json::from_reader(file)
        .map_err(|e| AppError::input(format!("Invalid bundle JSON: {e}")))?;
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EvalMetrics, FEATURE_NAMES, PricingCoefficients};
    use std::collections::BTreeMap;

    fn sample_bundle() -> CoefficientBundle {
        let mut metrics = BTreeMap::new();
        metrics.insert(
            "LinearRegression".to_string(),
            EvalMetrics {
                mae: 12.3456,
                rmse: 20.9876,
                r2: 0.8123,
            },
        );

        CoefficientBundle {
            model: "linearregression-v3".to_string(),
            trained_on: "synthetic-fallback".to_string(),
            dataset_url: crate::domain::DATASET_URL.to_string(),
            training_date: "2026-08-05T12:00:00+00:00".to_string(),
            training_samples: 100,
            confidence: 0.812,
            metrics,
            features: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            coefficients: PricingCoefficients {
                base_price: 42.5,
                duration_coef: 0.25,
                peak_hour_coef: 18.0,
                weekend_coef: 11.0,
                direct_flight_premium: 24.0,
                international_multiplier: 1.3,
                busy_month_multiplier: 1.15,
            },
        }
    }

    #[test]
    fn round_trips_through_disk() {
        let path = std::env::temp_dir().join("fare_bundle_roundtrip.json");
        let bundle = sample_bundle();

        write_bundle_json(&path, &bundle).unwrap();
        let loaded = read_bundle_json(&path).unwrap();

        assert_eq!(loaded.model, bundle.model);
        assert_eq!(loaded.training_samples, 100);
        assert_eq!(loaded.confidence, 0.812);
        assert_eq!(loaded.features.len(), FEATURE_NAMES.len());
        assert_eq!(loaded.coefficients.base_price, 42.5);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn coefficient_keys_are_camel_case() {
        let json = serde_json::to_value(sample_bundle()).unwrap();
        let coefficients = json["coefficients"].as_object().unwrap();
        for key in [
            "basePrice",
            "durationCoef",
            "peakHourCoef",
            "weekendCoef",
            "directFlightPremium",
            "internationalMultiplier",
            "busyMonthMultiplier",
        ] {
            assert!(coefficients.contains_key(key), "missing {key}");
        }
        assert_eq!(coefficients.len(), 7);
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_bundle_json(Path::new("/nonexistent/bundle.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
