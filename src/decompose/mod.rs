//! Per-group seasonal decomposition with low-sales anomaly flags.
//!
//! For each group produced by the preprocessor the [`Decomposer`]:
//!
//! 1. places the group's dates on a regular calendar grid, treating absent
//!    dates as zero sales;
//! 2. rejects series shorter than [`DecompositionConfig::required_points`];
//! 3. runs a classical decomposition with the configured period and model;
//! 4. computes [`SalesStatistics`] over the gap-filled series;
//! 5. flags every date strictly below `mean - k * std` of that same group.
//!
//! Groups are processed in ascending key order. Under the default
//! [`GroupFailurePolicy::Abort`] the first failing group aborts the batch;
//! [`GroupFailurePolicy::Skip`] drops failing groups and reports them to the
//! observer instead.

mod config;
mod result;

pub use config::{DecompositionConfig, GroupFailurePolicy};
pub use result::{decomposition_table, DecompositionResult, DecompositionRow, SalesStatistics};

use crate::core::{RawTable, Schema, TimeSeries};
use crate::error::{Result, SalesError};
use crate::observer::{PipelineEvent, PipelineObserver, TRACING_OBSERVER};
use crate::preprocess::{group_series, AggregatedRow, Preprocessor};
use crate::seasonality::ClassicalDecomposition;
use crate::strategy::{GroupIdentifier, GroupingStrategy};
use chrono::NaiveDate;

/// Decomposes every group of a preprocessed sales table.
pub struct Decomposer<'a> {
    schema: &'a Schema,
    strategy: &'a GroupingStrategy,
    config: DecompositionConfig,
    observer: &'a dyn PipelineObserver,
}

impl<'a> Decomposer<'a> {
    pub fn new(
        schema: &'a Schema,
        strategy: &'a GroupingStrategy,
        config: DecompositionConfig,
    ) -> Self {
        Self {
            schema,
            strategy,
            config,
            observer: &TRACING_OBSERVER,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn PipelineObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &DecompositionConfig {
        &self.config
    }

    /// Preprocess a raw table, then decompose every resulting group.
    pub fn decompose_table(&self, table: &RawTable) -> Result<Vec<DecompositionResult>> {
        let rows = Preprocessor::new(self.schema, self.strategy)
            .with_observer(self.observer)
            .preprocess(table)?;
        self.decompose(&rows)
    }

    /// Decompose every group of preprocessor output.
    pub fn decompose(&self, rows: &[AggregatedRow]) -> Result<Vec<DecompositionResult>> {
        self.config.validate()?;
        if rows.is_empty() {
            return Err(SalesError::EmptyData);
        }

        let mut results = Vec::new();
        let mut skipped = 0;

        for (key, points) in group_series(rows) {
            let identifier = self.strategy.identify(&key);

            match self.decompose_group(identifier.clone(), &points) {
                Ok(result) => {
                    self.observer.on_event(&PipelineEvent::GroupDecomposed {
                        identifier,
                        points: result.len(),
                        flagged: result.flagged_count(),
                    });
                    results.push(result);
                }
                Err(err) => match self.config.failure_policy {
                    GroupFailurePolicy::Abort => return Err(err),
                    GroupFailurePolicy::Skip => {
                        skipped += 1;
                        self.observer.on_event(&PipelineEvent::GroupSkipped {
                            identifier,
                            reason: err.to_string(),
                        });
                    }
                },
            }
        }

        self.observer.on_event(&PipelineEvent::DecompositionFinished {
            groups: results.len(),
            skipped,
        });

        Ok(results)
    }

    fn decompose_group(
        &self,
        identifier: GroupIdentifier,
        points: &[(NaiveDate, f64)],
    ) -> Result<DecompositionResult> {
        let series = TimeSeries::reindexed(points, self.config.frequency, 0.0)?;

        let needed = self.config.required_points();
        if series.len() < needed {
            return Err(SalesError::InsufficientData {
                needed,
                got: series.len(),
            });
        }

        let components = ClassicalDecomposition::new(self.config.seasonal_period)
            .with_model(self.config.model_type)
            .decompose(series.values())?;

        let statistics =
            SalesStatistics::compute(series.values(), self.config.low_sales_std_multiplier);
        let unusually_low = series
            .values()
            .iter()
            .map(|&v| statistics.is_unusually_low(v))
            .collect();

        Ok(DecompositionResult {
            identifier,
            dates: series.timestamps().to_vec(),
            observed: components.observed,
            trend: components.trend,
            seasonal: components.seasonal,
            residual: components.residual,
            statistics,
            unusually_low,
        })
    }
}
