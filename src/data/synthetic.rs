//! Synthetic training data for when no real dataset is available.
//!
//! Samples are drawn from a fixed catalog of route archetypes and perturbed
//! stochastically under a caller-supplied seed, so two runs with the same
//! `(count, seed)` produce identical datasets. The numeric constants here are
//! design choices, not learned values; the rest of the pipeline treats the
//! output exactly like an engineered real dataset.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::{
    Dataset, FEATURE_COUNT, Feature, Provenance, TrainingExample, compute_stats,
};
use crate::error::AppError;

/// A parametric route: endpoints, distance, and a plausible price range (USD).
#[derive(Debug, Clone, Copy)]
pub struct RouteArchetype {
    pub origin: &'static str,
    pub destination: &'static str,
    pub distance_km: f64,
    pub min_price: f64,
    pub max_price: f64,
}

/// Fixed route catalog spanning short hops to long-haul.
pub const ROUTES: [RouteArchetype; 10] = [
    RouteArchetype { origin: "IST", destination: "DXB", distance_km: 3100.0, min_price: 350.0, max_price: 450.0 },
    RouteArchetype { origin: "IST", destination: "JFK", distance_km: 7800.0, min_price: 600.0, max_price: 1200.0 },
    RouteArchetype { origin: "IST", destination: "LHR", distance_km: 2500.0, min_price: 250.0, max_price: 500.0 },
    RouteArchetype { origin: "IST", destination: "AYT", distance_km: 480.0, min_price: 80.0, max_price: 150.0 },
    RouteArchetype { origin: "JFK", destination: "LAX", distance_km: 4000.0, min_price: 300.0, max_price: 600.0 },
    RouteArchetype { origin: "JFK", destination: "MIA", distance_km: 1800.0, min_price: 200.0, max_price: 400.0 },
    RouteArchetype { origin: "LHR", destination: "CDG", distance_km: 340.0, min_price: 100.0, max_price: 250.0 },
    RouteArchetype { origin: "DXB", destination: "SIN", distance_km: 6200.0, min_price: 400.0, max_price: 800.0 },
    RouteArchetype { origin: "BOM", destination: "HYD", distance_km: 620.0, min_price: 60.0, max_price: 150.0 },
    RouteArchetype { origin: "DEL", destination: "BOM", distance_km: 1148.0, min_price: 70.0, max_price: 180.0 },
];

/// Assumed cruise speed for deriving duration from distance.
const AVG_SPEED_KMH: f64 = 800.0;

/// Duration bounds (minutes) after jitter.
const DURATION_MIN: f64 = 60.0;
const DURATION_MAX: f64 = 720.0;

/// Months treated as high season (Jan, Jul, Aug, Dec; zero-based).
const BUSY_MONTHS: [u32; 4] = [0, 6, 7, 11];

/// Generate `count` synthetic examples under a deterministic seed.
pub fn generate_synthetic(count: usize, seed: u64) -> Result<Dataset, AppError> {
    if count == 0 {
        return Err(AppError::input("Synthetic sample count must be > 0."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut examples = Vec::with_capacity(count);

    for _ in 0..count {
        let route = ROUTES[rng.gen_range(0..ROUTES.len())];

        let nominal = route.distance_km / AVG_SPEED_KMH * 60.0;
        let jitter = rng.gen_range(-30.0..30.0);
        let duration_minutes = (nominal + jitter).clamp(DURATION_MIN, DURATION_MAX).round();

        let departure_hour = rng.gen_range(0..24u32);
        let day_of_week = rng.gen_range(0..7u32);
        let month = rng.gen_range(0..12u32);
        let days_advance = rng.gen_range(0..60u32);

        let is_direct = rng.gen_bool(0.7);
        let is_weekend = day_of_week >= 5;
        let is_peak_hour = peak_hour(departure_hour);
        let is_busy_month = BUSY_MONTHS.contains(&month);

        let price = compose_price(
            &route,
            duration_minutes,
            is_peak_hour,
            is_weekend,
            is_busy_month,
            days_advance,
            is_direct,
            rng.gen_range(0.85..1.15),
        );

        let mut features = [0.0; FEATURE_COUNT];
        features[Feature::DurationMinutes.index()] = duration_minutes;
        features[Feature::DepartureHour.index()] = f64::from(departure_hour);
        features[Feature::DayOfWeek.index()] = f64::from(day_of_week);
        features[Feature::Month.index()] = f64::from(month);
        features[Feature::DaysAdvance.index()] = f64::from(days_advance);
        features[Feature::IsDirect.index()] = f64::from(u8::from(is_direct));
        features[Feature::IsInternational.index()] = 1.0;
        features[Feature::IsWeekend.index()] = f64::from(u8::from(is_weekend));
        features[Feature::IsPeakHour.index()] = f64::from(u8::from(is_peak_hour));
        features[Feature::IsBusyMonth.index()] = f64::from(u8::from(is_busy_month));
        features[Feature::IsMajorHub.index()] = 1.0;
        features[Feature::DistanceKm.index()] = route.distance_km;

        examples.push(TrainingExample {
            features,
            price_usd: (price * 100.0).round() / 100.0,
        });
    }

    let stats = compute_stats(&examples)
        .ok_or_else(|| AppError::internal("Failed to compute synthetic dataset stats."))?;

    Ok(Dataset {
        examples,
        provenance: Provenance::Synthetic,
        stats,
    })
}

fn peak_hour(hour: u32) -> bool {
    (6..=9).contains(&hour) || (17..=20).contains(&hour)
}

/// Compose a price from the archetype's range plus multiplicative adjustments.
#[allow(clippy::too_many_arguments)]
fn compose_price(
    route: &RouteArchetype,
    duration_minutes: f64,
    is_peak_hour: bool,
    is_weekend: bool,
    is_busy_month: bool,
    days_advance: u32,
    is_direct: bool,
    noise: f64,
) -> f64 {
    let base = route.min_price + (route.max_price - route.min_price) * 0.5;
    let mut price = base + (duration_minutes - 120.0) * 0.2;

    if is_peak_hour {
        price *= 1.15;
    }
    if is_weekend {
        price *= 1.12;
    }
    if is_busy_month {
        price *= 1.20;
    }
    // Last-minute bookings pay up to +50%, fading out by one week ahead.
    if days_advance < 7 {
        price *= 1.5 - (f64::from(days_advance) / 7.0) * 0.3;
    }
    // Far-ahead bookings get up to 25% off, growing past two weeks.
    if days_advance > 14 {
        price *= 1.0 - (0.25_f64).min((f64::from(days_advance) - 14.0) * 0.01);
    }
    if is_direct {
        price *= 1.08;
    }

    price *= noise;
    price.clamp(route.min_price * 0.8, route.max_price * 1.2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reproducible_under_fixed_seed() {
        let a = generate_synthetic(100, 42).unwrap();
        let b = generate_synthetic(100, 42).unwrap();

        assert_eq!(a.examples.len(), 100);
        for (ea, eb) in a.examples.iter().zip(b.examples.iter()) {
            assert_eq!(ea.features, eb.features);
            assert_eq!(ea.price_usd, eb.price_usd);
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = generate_synthetic(50, 1).unwrap();
        let b = generate_synthetic(50, 2).unwrap();
        let same = a
            .examples
            .iter()
            .zip(b.examples.iter())
            .all(|(x, y)| x.features == y.features);
        assert!(!same);
    }

    #[test]
    fn samples_respect_bounds() {
        let dataset = generate_synthetic(500, 7).unwrap();
        assert_eq!(dataset.provenance, Provenance::Synthetic);
        assert_eq!(dataset.stats.n_examples, 500);

        for ex in &dataset.examples {
            let duration = ex.features[Feature::DurationMinutes.index()];
            assert!((DURATION_MIN..=DURATION_MAX).contains(&duration));

            let hour = ex.features[Feature::DepartureHour.index()];
            assert!((0.0..24.0).contains(&hour));

            // Price stays inside the widest possible archetype envelope.
            let max_allowed = ROUTES
                .iter()
                .map(|r| r.max_price * 1.2)
                .fold(f64::NEG_INFINITY, f64::max);
            let min_allowed = ROUTES
                .iter()
                .map(|r| r.min_price * 0.8)
                .fold(f64::INFINITY, f64::min);
            assert!(ex.price_usd >= min_allowed && ex.price_usd <= max_allowed);

            assert!(ex.features.iter().all(|v| v.is_finite()));
            assert_eq!(ex.features[Feature::IsInternational.index()], 1.0);
            assert_eq!(ex.features[Feature::IsMajorHub.index()], 1.0);
        }
    }

    #[test]
    fn weekend_flag_matches_weekday() {
        let dataset = generate_synthetic(300, 11).unwrap();
        for ex in &dataset.examples {
            let dow = ex.features[Feature::DayOfWeek.index()];
            let weekend = ex.features[Feature::IsWeekend.index()];
            assert_eq!(weekend, f64::from(u8::from(dow >= 5.0)));
        }
    }
}
