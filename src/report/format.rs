//! Terminal output for training runs and saved bundles.

use crate::app::pipeline::{RunOutput, SourceReport};
use crate::domain::{CoefficientBundle, PricingCoefficients, TrainConfig};

/// Format the full run summary (data source + diagnostics + chosen model +
/// distilled coefficients).
pub fn format_run_summary(run: &RunOutput, config: &TrainConfig) -> String {
    let mut out = String::new();

    out.push_str("=== fare - Flight Price Model Training ===\n");

    match &run.source {
        SourceReport::Csv {
            path,
            rows_read,
            rows_used,
            rows_skipped,
            business_share,
            premium_airline_share,
        } => {
            out.push_str(&format!("Data source: {} (kaggle export)\n", path.display()));
            out.push_str(&format!(
                "Rows: read={rows_read} | used={rows_used} | skipped={rows_skipped}\n"
            ));
            out.push_str(&format!(
                "Mix: business={:.1}% | premium carriers={:.1}%\n",
                business_share * 100.0,
                premium_airline_share * 100.0
            ));
        }
        SourceReport::Synthetic { count, seed } => {
            out.push_str(&format!(
                "Data source: synthetic fallback (n={count}, seed={seed})\n"
            ));
        }
    }

    let stats = &run.dataset.stats;
    out.push_str(&format!(
        "Samples: n={} | duration=[{:.0}, {:.0}]min | price=[${:.2}, ${:.2}] | direct={:.1}%\n",
        stats.n_examples,
        stats.duration_min,
        stats.duration_max,
        stats.price_min,
        stats.price_max,
        stats.direct_share * 100.0
    ));
    out.push_str(&format!(
        "Split: train={} | test={} (seed={})\n",
        run.selection.n_train, run.selection.n_test, config.seed
    ));

    out.push_str("\nModel diagnostics:\n");
    for fit in &run.selection.fits {
        let chosen = if fit.family == run.selection.best.family { "*" } else { " " };
        out.push_str(&format!(
            "{chosen} {:<18} MAE=${:.2} RMSE=${:.2} R2={:.4}\n",
            fit.family.display_name(),
            fit.metrics.mae,
            fit.metrics.rmse,
            fit.metrics.r2
        ));
    }
    for (family, reason) in &run.selection.skipped {
        out.push_str(&format!("  (skipped {}) {reason}\n", family.display_name()));
    }

    out.push_str(&format!(
        "\nChosen model: {} (confidence {:.3})\n",
        run.selection.best.family.display_name(),
        run.bundle.confidence
    ));
    out.push_str(&format_coefficients(&run.bundle.coefficients));
    out.push_str(&format!("\nSaved to: {}\n", config.output_path.display()));

    out
}

/// Format a previously saved bundle (`fare show`).
pub fn format_bundle(bundle: &CoefficientBundle) -> String {
    let mut out = String::new();

    out.push_str("=== fare - Coefficient Bundle ===\n");
    out.push_str(&format!("Model: {}\n", bundle.model));
    out.push_str(&format!("Trained on: {}\n", bundle.trained_on));
    out.push_str(&format!("Dataset: {}\n", bundle.dataset_url));
    out.push_str(&format!("Date: {}\n", bundle.training_date));
    out.push_str(&format!("Samples: {}\n", bundle.training_samples));
    out.push_str(&format!("Confidence: {:.3}\n", bundle.confidence));

    out.push_str("\nMetrics:\n");
    for (family, m) in &bundle.metrics {
        out.push_str(&format!(
            "  {:<18} MAE=${:.4} RMSE=${:.4} R2={:.4}\n",
            family, m.mae, m.rmse, m.r2
        ));
    }

    out.push_str(&format!("\nFeatures: {}\n", bundle.features.join(", ")));
    out.push_str(&format_coefficients(&bundle.coefficients));

    out
}

fn format_coefficients(c: &PricingCoefficients) -> String {
    let mut out = String::new();
    out.push_str("Coefficients:\n");
    out.push_str(&format!("  basePrice              {:>12.4}\n", c.base_price));
    out.push_str(&format!("  durationCoef           {:>12.4}\n", c.duration_coef));
    out.push_str(&format!("  peakHourCoef           {:>12.4}\n", c.peak_hour_coef));
    out.push_str(&format!("  weekendCoef            {:>12.4}\n", c.weekend_coef));
    out.push_str(&format!("  directFlightPremium    {:>12.4}\n", c.direct_flight_premium));
    out.push_str(&format!("  internationalMultiplier{:>12.4}\n", c.international_multiplier));
    out.push_str(&format!("  busyMonthMultiplier    {:>12.4}\n", c.busy_month_multiplier));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_train;
    use crate::domain::TrainConfig;
    use std::path::PathBuf;

    fn config() -> TrainConfig {
        TrainConfig {
            data_path: None,
            sample_count: 80,
            seed: 42,
            output_path: PathBuf::from("model_coefficients.json"),
        }
    }

    #[test]
    fn summary_stars_the_winner_and_lists_all_fits() {
        let config = config();
        let run = run_train(&config).unwrap();
        let summary = format_run_summary(&run, &config);

        assert!(summary.contains("synthetic fallback (n=80, seed=42)"));
        let starred = format!("* {:<18}", run.selection.best.family.display_name());
        assert!(summary.contains(&starred), "no starred winner in:\n{summary}");
        for fit in &run.selection.fits {
            assert!(summary.contains(fit.family.display_name()));
        }
        assert!(summary.contains("basePrice"));
        assert!(summary.contains("Saved to: model_coefficients.json"));
    }

    #[test]
    fn bundle_listing_covers_every_slot() {
        let run = run_train(&config()).unwrap();
        let listing = format_bundle(&run.bundle);

        for key in [
            "basePrice",
            "durationCoef",
            "peakHourCoef",
            "weekendCoef",
            "directFlightPremium",
            "internationalMultiplier",
            "busyMonthMultiplier",
        ] {
            assert!(listing.contains(key), "missing {key} in:\n{listing}");
        }
        assert!(listing.contains(&run.bundle.model));
        assert!(listing.contains("duration_minutes, departure_hour"));
    }
}
