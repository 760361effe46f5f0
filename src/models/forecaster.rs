//! Fit, evaluate and predict a [`Model`] on one group's sales series.

use super::Model;
use crate::core::{RawTable, Schema, TimeSeries};
use crate::error::{Result, SalesError};
use crate::observer::{PipelineEvent, PipelineObserver};
use crate::strategy::GroupingStrategy;
use crate::transform::{BaseForecastConfig, DataSplit, DataTransformPipeline};
use crate::utils::{calculate_metrics, AccuracyMetrics};

/// Validation-window accuracy of a fitted model, in original units.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub metrics: AccuracyMetrics,
    pub train: TimeSeries,
    pub actual: TimeSeries,
    /// Forecast over the validation dates.
    pub forecast: TimeSeries,
}

/// Couples a [`DataTransformPipeline`] with a model.
///
/// The model is trained on the scaled training window and its output is
/// mapped back through the same scaler. Each [`fit`](Self::fit) runs on a
/// fresh pipeline that replaces the current one only once the model trains,
/// so a failed fit leaves the forecaster as it was.
///
/// # Example
///
/// ```
/// use chrono::{Duration, NaiveDate};
/// use salescast::core::{RawTable, Schema};
/// use salescast::models::{baseline::SeasonalNaive, Forecaster};
/// use salescast::strategy::GroupingStrategy;
/// use salescast::transform::BaseForecastConfig;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let mut table = RawTable::new(["Station #", "Product", "Transaction Date", "Sales Vol"]);
/// for i in 0..60 {
///     let date = (start + Duration::days(i)).format("%Y-%m-%d").to_string();
///     let sales = format!("{}", 100 + (i % 7) * 10);
///     table.push_row(vec!["796".into(), "ADO".into(), date, sales]).unwrap();
/// }
///
/// let schema = Schema::default();
/// let strategy = GroupingStrategy::by_product(Some("ADO"));
/// let config = BaseForecastConfig::default().with_validation_days(14);
/// let mut forecaster = Forecaster::new(&schema, &strategy, config, SeasonalNaive::new(7));
///
/// forecaster.fit(&table).unwrap();
/// let evaluation = forecaster.evaluate().unwrap();
/// assert!(evaluation.metrics.mae < 1e-9);
/// assert_eq!(forecaster.predict(5).unwrap().len(), 5);
/// ```
pub struct Forecaster<'a, M: Model> {
    pipeline: DataTransformPipeline<'a>,
    model: M,
}

impl<'a, M: Model> Forecaster<'a, M> {
    pub fn new(
        schema: &'a Schema,
        strategy: &'a GroupingStrategy,
        config: BaseForecastConfig,
        model: M,
    ) -> Self {
        Self {
            pipeline: DataTransformPipeline::new(schema, strategy, config),
            model,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn PipelineObserver) -> Self {
        self.pipeline = self.pipeline.with_observer(observer);
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn pipeline(&self) -> &DataTransformPipeline<'a> {
        &self.pipeline
    }

    pub fn is_fitted(&self) -> bool {
        self.pipeline.unscaled_split().is_some() && self.model.is_fitted()
    }

    /// Transform `table` and train the model on the scaled training window.
    pub fn fit(&mut self, table: &RawTable) -> Result<()> {
        let mut pipeline = self.pipeline.unfitted();
        let scaled = pipeline.transform(table)?;
        let observer = pipeline.observer();
        let model = self.model.name().to_string();

        observer.on_event(&PipelineEvent::TrainingStarted {
            model: model.clone(),
        });
        self.model.fit(&scaled.train)?;
        observer.on_event(&PipelineEvent::TrainingFinished { model });

        self.pipeline = pipeline;
        Ok(())
    }

    /// Forecast the validation window and score it against the actuals.
    pub fn evaluate(&self) -> Result<Evaluation> {
        let split = self.trained("evaluate")?;

        let scaled = self.model.predict(split.val_size())?;
        let forecast = split.val.with_values(self.pipeline.scaler().invert(&scaled)?)?;
        let metrics = calculate_metrics(split.val.values(), forecast.values())?;

        Ok(Evaluation {
            metrics,
            train: split.train.clone(),
            actual: split.val.clone(),
            forecast,
        })
    }

    /// Forecast `horizon` steps past the end of the training window, in
    /// original units.
    pub fn predict(&self, horizon: usize) -> Result<TimeSeries> {
        let split = self.trained("predict")?;
        let train = &split.train;
        let last = train
            .last_date()
            .ok_or(SalesError::ModelNotTrained("predict"))?;

        let scaled = self.model.predict(horizon)?;
        let values = self.pipeline.scaler().invert(&scaled)?;
        let start = train.frequency().advance(last, 1)?;

        TimeSeries::regular(start, train.frequency(), values)
    }

    fn trained(&self, operation: &'static str) -> Result<&DataSplit> {
        match self.pipeline.unscaled_split() {
            Some(split) if self.model.is_fitted() => Ok(split),
            _ => Err(SalesError::ModelNotTrained(operation)),
        }
    }
}
