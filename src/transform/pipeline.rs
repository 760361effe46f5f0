use super::{DataSplit, RobustScaler, SeriesBuilder, Splitter};
use crate::core::{Frequency, MissingValuePolicy, RawTable, Schema, TimeSeries};
use crate::error::{Result, SalesError};
use crate::observer::{PipelineEvent, PipelineObserver, TRACING_OBSERVER};
use crate::preprocess::{AggregatedRow, Preprocessor};
use crate::strategy::GroupingStrategy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Series preparation settings shared by every forecaster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseForecastConfig {
    pub frequency: Frequency,
    /// Insert and fill absent grid dates instead of rejecting them.
    pub fill_missing_dates: bool,
    /// Length of the validation window, in series-frequency units.
    pub validation_days: usize,
    pub fill_policy: MissingValuePolicy,
}

impl Default for BaseForecastConfig {
    fn default() -> Self {
        Self {
            frequency: Frequency::Daily,
            fill_missing_dates: true,
            validation_days: 30,
            fill_policy: MissingValuePolicy::Interpolate,
        }
    }
}

impl BaseForecastConfig {
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn with_fill_missing_dates(mut self, fill: bool) -> Self {
        self.fill_missing_dates = fill;
        self
    }

    pub fn with_validation_days(mut self, days: usize) -> Self {
        self.validation_days = days;
        self
    }

    pub fn with_fill_policy(mut self, policy: MissingValuePolicy) -> Self {
        self.fill_policy = policy;
        self
    }
}

/// Preprocess, build, split and scale the series of a single group.
///
/// Each pipeline owns its scaler and may transform exactly once: the scaler
/// is fitted on the first training window and never refitted.
pub struct DataTransformPipeline<'a> {
    schema: &'a Schema,
    strategy: &'a GroupingStrategy,
    config: BaseForecastConfig,
    scaler: RobustScaler,
    unscaled: Option<DataSplit>,
    observer: &'a dyn PipelineObserver,
}

impl<'a> DataTransformPipeline<'a> {
    pub fn new(
        schema: &'a Schema,
        strategy: &'a GroupingStrategy,
        config: BaseForecastConfig,
    ) -> Self {
        Self {
            schema,
            strategy,
            config,
            scaler: RobustScaler::new(),
            unscaled: None,
            observer: &TRACING_OBSERVER,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn PipelineObserver) -> Self {
        self.observer = observer;
        self
    }

    /// A pipeline with the same settings and observer and an unfitted scaler.
    pub fn unfitted(&self) -> Self {
        Self {
            schema: self.schema,
            strategy: self.strategy,
            config: self.config.clone(),
            scaler: RobustScaler::new(),
            unscaled: None,
            observer: self.observer,
        }
    }

    pub fn config(&self) -> &BaseForecastConfig {
        &self.config
    }

    pub fn observer(&self) -> &'a dyn PipelineObserver {
        self.observer
    }

    /// Run the full pipeline on a raw table and return the scaled split.
    pub fn transform(&mut self, table: &RawTable) -> Result<DataSplit> {
        let rows = Preprocessor::new(self.schema, self.strategy)
            .with_observer(self.observer)
            .preprocess(table)?;
        self.transform_rows(&rows)
    }

    /// Build, split and scale already preprocessed rows of one group.
    pub fn transform_rows(&mut self, rows: &[AggregatedRow]) -> Result<DataSplit> {
        let groups = rows.iter().map(|r| &r.key).collect::<BTreeSet<_>>().len();
        if groups > 1 {
            return Err(SalesError::MultipleGroups(groups));
        }

        let series = SeriesBuilder::new(self.config.frequency)
            .with_fill_missing_dates(self.config.fill_missing_dates)
            .with_fill_policy(self.config.fill_policy)
            .build_rows(rows)?;

        let split = Splitter::new(self.config.validation_days).split(&series)?;
        self.observer.on_event(&PipelineEvent::SplitComputed {
            train_size: split.train_size(),
            val_size: split.val_size(),
        });

        self.scaler.fit(split.train.values())?;
        let scaled = DataSplit {
            train: self.scaler.apply_series(&split.train)?,
            val: self.scaler.apply_series(&split.val)?,
        };

        self.unscaled = Some(split);
        Ok(scaled)
    }

    /// The split in original units, once [`transform`](Self::transform) ran.
    pub fn unscaled_split(&self) -> Option<&DataSplit> {
        self.unscaled.as_ref()
    }

    pub fn scaler(&self) -> &RobustScaler {
        &self.scaler
    }

    /// Map a scaled series (e.g. a forecast) back to original units.
    pub fn inverse(&self, series: &TimeSeries) -> Result<TimeSeries> {
        self.scaler.invert_series(series)
    }
}
