//! Training orchestration.
//!
//! Responsibilities:
//!
//! - seeded train/test partitioning (`split`)
//! - held-out evaluation metrics (`metrics`)
//! - fitting all candidate families and picking the winner (`selection`)

pub mod metrics;
pub mod selection;
pub mod split;

pub use metrics::*;
pub use selection::*;
pub use split::*;
