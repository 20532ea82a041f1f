//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the canonical feature schema (`Feature`, `FEATURE_NAMES`)
//! - raw and engineered data (`FlightRow`, `TrainingExample`, `Dataset`)
//! - training outputs (`ModelFamily`, `EvalMetrics`)
//! - the persisted artifact (`PricingCoefficients`, `CoefficientBundle`)

pub mod types;

pub use types::*;
