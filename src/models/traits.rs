//! Model trait defining the common interface for forecasting models.

use crate::core::TimeSeries;
use crate::error::Result;

/// Common interface for all forecasting models.
///
/// Models see only scaled values; dating the forecast and mapping it back to
/// original units is the job of [`Forecaster`](super::Forecaster). This
/// trait is object-safe and can be used with `Box<dyn Model>`.
pub trait Model {
    /// Fit the model to the time series data.
    fn fit(&mut self, series: &TimeSeries) -> Result<()>;

    /// Generate exactly `horizon` point predictions.
    fn predict(&self, horizon: usize) -> Result<Vec<f64>>;

    /// Get the fitted values (in-sample predictions).
    fn fitted_values(&self) -> Option<&[f64]>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool {
        self.fitted_values().is_some()
    }
}

/// Type alias for boxed model trait objects.
///
/// # Example
///
/// ```
/// use salescast::models::{BoxedModel, Model};
/// use salescast::models::baseline::Naive;
///
/// let model: BoxedModel = Box::new(Naive::new());
/// assert_eq!(model.name(), "Naive");
/// assert!(!model.is_fitted());
/// ```
pub type BoxedModel = Box<dyn Model>;

impl<M: Model + ?Sized> Model for Box<M> {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        (**self).fit(series)
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        (**self).predict(horizon)
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        (**self).fitted_values()
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn is_fitted(&self) -> bool {
        (**self).is_fitted()
    }
}
