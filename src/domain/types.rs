//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during training
//! - exported to the coefficient bundle JSON
//! - reloaded later for inspection (`fare show`)

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Number of features in the canonical schema.
pub const FEATURE_COUNT: usize = 12;

/// Canonical feature names, in schema order.
///
/// Order is significant: the training matrix, the learned linear weights, the
/// ensemble importances, and the `features` list in the bundle all index by
/// position. Downstream consumers rely on this exact ordering.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "duration_minutes",
    "departure_hour",
    "day_of_week",
    "month",
    "days_advance",
    "is_direct",
    "is_international",
    "is_weekend",
    "is_peak_hour",
    "is_busy_month",
    "is_major_hub",
    "distance_km",
];

/// One feature slot in the canonical schema.
///
/// The discriminant doubles as the column index into a feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    DurationMinutes,
    DepartureHour,
    DayOfWeek,
    Month,
    DaysAdvance,
    IsDirect,
    IsInternational,
    IsWeekend,
    IsPeakHour,
    IsBusyMonth,
    IsMajorHub,
    DistanceKm,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::DurationMinutes,
        Feature::DepartureHour,
        Feature::DayOfWeek,
        Feature::Month,
        Feature::DaysAdvance,
        Feature::IsDirect,
        Feature::IsInternational,
        Feature::IsWeekend,
        Feature::IsPeakHour,
        Feature::IsBusyMonth,
        Feature::IsMajorHub,
        Feature::DistanceKm,
    ];

    /// Column index into a feature vector.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }
}

/// A raw flight offer as it appears in the source CSV.
///
/// Categorical fields stay as strings here; mapping to numbers is the feature
/// engineering pipeline's job, and every mapping there is total (unmapped
/// values get deterministic defaults, never nulls).
#[derive(Debug, Clone)]
pub struct FlightRow {
    pub airline: String,
    pub source_city: String,
    pub destination_city: String,
    /// Departure time bin (Early_Morning, Morning, Afternoon, Evening, Night, Late_Night).
    pub departure_time: String,
    /// Arrival time bin. Present in the source data but unused by the schema.
    pub arrival_time: Option<String>,
    /// Stop count bin (zero, one, two_or_more).
    pub stops: String,
    /// Seat class (Economy, Business).
    pub cabin_class: String,
    /// Flight duration in hours.
    pub duration_hours: f64,
    /// Days between booking and travel.
    pub days_left: u32,
    /// Ticket price in INR.
    pub price_inr: f64,
}

/// One engineered observation: feature vector + target price in USD.
#[derive(Debug, Clone, Copy)]
pub struct TrainingExample {
    pub features: [f64; FEATURE_COUNT],
    pub price_usd: f64,
}

/// Where the training data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Kaggle,
    Synthetic,
}

impl Provenance {
    /// Provenance tag recorded in the bundle's `trained_on` field.
    pub fn tag(self) -> &'static str {
        match self {
            Provenance::Kaggle => "kaggle-flight-price-prediction",
            Provenance::Synthetic => "synthetic-fallback",
        }
    }
}

/// Summary stats about the examples actually used for training.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub n_examples: usize,
    pub duration_min: f64,
    pub duration_max: f64,
    pub price_min: f64,
    pub price_max: f64,
    /// Share of direct flights, in [0, 1].
    pub direct_share: f64,
}

/// An ordered set of training examples with provenance and summary stats.
///
/// Ephemeral: built and discarded within one training run.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub examples: Vec<TrainingExample>,
    pub provenance: Provenance,
    pub stats: DatasetStats,
}

/// Compute dataset stats, or `None` when the examples are empty or produce
/// non-finite bounds.
pub fn compute_stats(examples: &[TrainingExample]) -> Option<DatasetStats> {
    let mut duration_min = f64::INFINITY;
    let mut duration_max = f64::NEG_INFINITY;
    let mut price_min = f64::INFINITY;
    let mut price_max = f64::NEG_INFINITY;
    let mut direct = 0usize;

    for ex in examples {
        let d = ex.features[Feature::DurationMinutes.index()];
        duration_min = duration_min.min(d);
        duration_max = duration_max.max(d);
        price_min = price_min.min(ex.price_usd);
        price_max = price_max.max(ex.price_usd);
        if ex.features[Feature::IsDirect.index()] > 0.5 {
            direct += 1;
        }
    }

    if !duration_min.is_finite()
        || !duration_max.is_finite()
        || !price_min.is_finite()
        || !price_max.is_finite()
    {
        return None;
    }

    Some(DatasetStats {
        n_examples: examples.len(),
        duration_min,
        duration_max,
        price_min,
        price_max,
        direct_share: direct as f64 / examples.len() as f64,
    })
}

/// Candidate regressor family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFamily {
    RandomForest,
    GradientBoosting,
    Linear,
}

impl ModelFamily {
    /// Candidate iteration order. Selection breaks MAE ties by first-seen in
    /// this order, so changing it changes which model wins a tie.
    pub const ALL: [ModelFamily; 3] = [
        ModelFamily::RandomForest,
        ModelFamily::GradientBoosting,
        ModelFamily::Linear,
    ];

    /// Human-readable label, also the key in the bundle's metrics map.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelFamily::RandomForest => "RandomForest",
            ModelFamily::GradientBoosting => "GradientBoosting",
            ModelFamily::Linear => "LinearRegression",
        }
    }

    /// Model identifier recorded in the bundle (`<family>-v3`).
    pub fn bundle_id(self) -> String {
        format!("{}-v3", self.display_name().to_lowercase())
    }
}

/// Held-out evaluation metrics for one candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvalMetrics {
    pub mae: f64,
    pub rmse: f64,
    pub r2: f64,
}

/// The 7-slot pricing formula distilled from the winning model.
///
/// Schema-identical regardless of which family won; downstream pricing code
/// must not need to know the model family.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingCoefficients {
    pub base_price: f64,
    pub duration_coef: f64,
    pub peak_hour_coef: f64,
    pub weekend_coef: f64,
    pub direct_flight_premium: f64,
    pub international_multiplier: f64,
    pub busy_month_multiplier: f64,
}

/// The persisted artifact: everything a downstream pricing component needs.
///
/// Overwritten wholesale on each run; the embedded `training_date` is the only
/// versioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoefficientBundle {
    /// Winning model family identifier (`<family>-v3`).
    pub model: String,
    /// Provenance tag (`kaggle-flight-price-prediction` or `synthetic-fallback`).
    pub trained_on: String,
    pub dataset_url: String,
    /// ISO-8601 timestamp of the run.
    pub training_date: String,
    pub training_samples: usize,
    /// Winner's R², clamped to [0.70, 0.95] and rounded to 3 decimals.
    pub confidence: f64,
    /// Per-family held-out metrics, rounded to 4 decimals.
    pub metrics: BTreeMap<String, EvalMetrics>,
    /// The 12 feature names in canonical order.
    pub features: Vec<String>,
    pub coefficients: PricingCoefficients,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct TrainConfig {
    /// Explicit dataset path; overrides the resolver's search path.
    pub data_path: Option<PathBuf>,
    /// Synthetic sample count used when no real dataset is found.
    pub sample_count: usize,
    /// Seed for the split shuffle, ensemble bootstraps, synthetic generation,
    /// and the calendar injector.
    pub seed: u64,
    /// Where the coefficient bundle is written.
    pub output_path: PathBuf,
}

/// Held-out fraction for the train/test split.
pub const TEST_FRACTION: f64 = 0.2;

/// Source prices are INR; targets are normalized to USD with this constant.
pub const INR_TO_USD: f64 = 0.012;

/// Reference URL recorded in the bundle.
pub const DATASET_URL: &str =
    "https://www.kaggle.com/datasets/shubhambathwal/flight-price-prediction";
