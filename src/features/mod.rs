//! Feature engineering: raw flight rows → the canonical 12-feature schema.
//!
//! Every per-field transform is total: unmapped categorical values get
//! deterministic defaults, never nulls, so the output matrix is always
//! complete and finite.
//!
//! The source data carries no calendar dates, so weekend/month/weekday flags
//! cannot be derived from it. They are drawn by [`CalendarInjector`] with
//! fixed marginal probabilities — a documented limitation of the dataset, kept
//! for fidelity with the downstream pricing formula. On real data these
//! columns are noise, not signal.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::{
    Dataset, FEATURE_COUNT, Feature, FlightRow, INR_TO_USD, Provenance, TrainingExample,
    compute_stats,
};
use crate::error::AppError;
use crate::geo;

/// Carriers counted as premium for the diagnostic share.
const PREMIUM_AIRLINES: [&str; 2] = ["Vistara", "Air_India"];

/// Representative hour for an unmapped departure bin.
const DEFAULT_DEPARTURE_HOUR: f64 = 12.0;

/// Engineered dataset plus diagnostics that fall outside the 12-feature
/// schema (cabin class and premium-carrier shares are informative about the
/// data but deliberately not model inputs on this domestic dataset).
#[derive(Debug, Clone)]
pub struct Engineered {
    pub dataset: Dataset,
    pub business_share: f64,
    pub premium_airline_share: f64,
}

/// Map raw rows into the canonical schema.
pub fn engineer_features(rows: &[FlightRow], seed: u64) -> Result<Engineered, AppError> {
    if rows.is_empty() {
        return Err(AppError::no_model("No rows to engineer features from."));
    }

    let mut injector = CalendarInjector::new(seed);
    let mut examples = Vec::with_capacity(rows.len());
    let mut business = 0usize;
    let mut premium = 0usize;

    for row in rows {
        if row.cabin_class.eq_ignore_ascii_case("Business") {
            business += 1;
        }
        if PREMIUM_AIRLINES.contains(&row.airline.as_str()) {
            premium += 1;
        }

        let hour = departure_hour(&row.departure_time);
        let stops = stop_count(&row.stops);
        let calendar = injector.draw();

        let mut features = [0.0; FEATURE_COUNT];
        features[Feature::DurationMinutes.index()] = row.duration_hours * 60.0;
        features[Feature::DepartureHour.index()] = hour;
        features[Feature::DayOfWeek.index()] = f64::from(calendar.day_of_week);
        features[Feature::Month.index()] = f64::from(calendar.month);
        features[Feature::DaysAdvance.index()] = f64::from(row.days_left);
        features[Feature::IsDirect.index()] = f64::from(u8::from(stops == 0));
        features[Feature::IsInternational.index()] = 0.0; // domestic-only dataset
        features[Feature::IsWeekend.index()] = f64::from(u8::from(calendar.is_weekend));
        features[Feature::IsPeakHour.index()] = f64::from(u8::from(peak_hour(hour)));
        features[Feature::IsBusyMonth.index()] = f64::from(u8::from(calendar.is_busy_month));
        features[Feature::IsMajorHub.index()] =
            f64::from(u8::from(geo::is_major_hub_route(&row.source_city, &row.destination_city)));
        features[Feature::DistanceKm.index()] =
            geo::distance_km(&row.source_city, &row.destination_city);

        examples.push(TrainingExample {
            features,
            price_usd: row.price_inr * INR_TO_USD,
        });
    }

    let stats = compute_stats(&examples)
        .ok_or_else(|| AppError::internal("Failed to compute engineered dataset stats."))?;

    let n = rows.len() as f64;
    Ok(Engineered {
        dataset: Dataset {
            examples,
            provenance: Provenance::Kaggle,
            stats,
        },
        business_share: business as f64 / n,
        premium_airline_share: premium as f64 / n,
    })
}

/// Representative hour for a departure time bin; unmapped bins land at noon.
fn departure_hour(bin: &str) -> f64 {
    match bin {
        "Early_Morning" => 5.0,
        "Morning" => 8.0,
        "Afternoon" => 14.0,
        "Evening" => 18.0,
        "Night" => 21.0,
        "Late_Night" => 1.0,
        _ => DEFAULT_DEPARTURE_HOUR,
    }
}

/// Stop count from the stops bin; unmapped bins count as direct.
fn stop_count(bin: &str) -> u32 {
    match bin {
        "zero" => 0,
        "one" => 1,
        "two_or_more" => 2,
        _ => 0,
    }
}

fn peak_hour(hour: f64) -> bool {
    (6.0..=9.0).contains(&hour) || (17.0..=20.0).contains(&hour)
}

/// Fields drawn for one row.
#[derive(Debug, Clone, Copy)]
pub struct CalendarDraw {
    pub is_weekend: bool,
    pub is_busy_month: bool,
    /// Zero-based month, 0..12.
    pub month: u32,
    /// Zero-based weekday, 0..7.
    pub day_of_week: u32,
}

/// Seeded source for the calendar fields the dataset cannot supply.
///
/// Marginals: P(weekend) = 0.3, P(busy month) = 0.4, month and weekday
/// uniform. The weekend/busy flags are drawn independently of the month and
/// weekday values, mirroring the original training data construction.
#[derive(Debug)]
pub struct CalendarInjector {
    rng: StdRng,
}

impl CalendarInjector {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn draw(&mut self) -> CalendarDraw {
        CalendarDraw {
            is_weekend: self.rng.gen_bool(0.3),
            is_busy_month: self.rng.gen_bool(0.4),
            month: self.rng.gen_range(0..12),
            day_of_week: self.rng.gen_range(0..7),
        }
    }
}
