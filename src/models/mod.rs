//! Forecasting models and the forecaster that drives them.

mod forecaster;
mod traits;

pub mod baseline;

pub use forecaster::{Evaluation, Forecaster};
pub use traits::{BoxedModel, Model};
