//! Reporting utilities: formatted terminal output for runs and bundles.
//!
//! Formatting code stays in one place so:
//! - the training/distillation code stays clean and testable
//! - output changes are localized

pub mod format;

pub use format::*;
