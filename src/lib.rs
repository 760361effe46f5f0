//! # salescast
//!
//! Retail fuel-station sales analytics: cleaning and aggregating raw sales
//! rows, per-group seasonal decomposition with low-sales anomaly flags, and
//! a train/validation/scaling pipeline feeding pluggable forecasting models.
//!
//! Control flow:
//!
//! ```text
//! RawTable -> Preprocessor -> Decomposer              -> decomposition table
//!                          -> DataTransformPipeline   -> Forecaster (fit/evaluate/predict)
//! ```
//!
//! Grouping is chosen with a [`strategy::GroupingStrategy`]; column names with
//! a [`core::Schema`]. Progress is reported through a
//! [`observer::PipelineObserver`], by default forwarded to `tracing`.

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod decompose;
pub mod error;
pub mod models;
pub mod observer;
pub mod preprocess;
pub mod seasonality;
pub mod strategy;
pub mod transform;
pub mod utils;

pub use error::{Result, SalesError};

pub mod prelude {
    pub use crate::core::{Frequency, MissingValuePolicy, RawTable, Schema, TimeSeries};
    pub use crate::decompose::{
        decomposition_table, Decomposer, DecompositionConfig, DecompositionResult,
        GroupFailurePolicy,
    };
    pub use crate::error::{ErrorKind, Result, SalesError};
    pub use crate::models::{Evaluation, Forecaster, Model};
    pub use crate::observer::{NoopObserver, PipelineEvent, PipelineObserver, TracingObserver};
    pub use crate::preprocess::{AggregatedRow, Preprocessor};
    pub use crate::seasonality::DecompositionModel;
    pub use crate::strategy::{GroupIdentifier, GroupingStrategy};
    pub use crate::transform::{BaseForecastConfig, DataSplit, DataTransformPipeline};
    pub use crate::utils::{calculate_metrics, AccuracyMetrics};
}
