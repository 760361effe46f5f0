//! Baseline forecasting models.
//!
//! Simple methods that serve as benchmarks for more complex models.

mod naive;
mod seasonal_naive;

pub use naive::Naive;
pub use seasonal_naive::SeasonalNaive;
