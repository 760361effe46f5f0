//! Naive forecasting model.
//!
//! The naive method simply forecasts the last observed value for all future periods.

use crate::core::TimeSeries;
use crate::error::{Result, SalesError};
use crate::models::Model;

/// Naive forecaster that repeats the last value.
#[derive(Debug, Clone, Default)]
pub struct Naive {
    last_value: Option<f64>,
    fitted: Option<Vec<f64>>,
}

impl Naive {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Model for Naive {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        let values = series.values();
        let Some(&last) = values.last() else {
            return Err(SalesError::EmptyData);
        };

        self.last_value = Some(last);

        // Fitted values are shifted history (y_hat[t] = y[t-1])
        let mut fitted = Vec::with_capacity(values.len());
        fitted.push(f64::NAN);
        fitted.extend_from_slice(&values[..values.len() - 1]);
        self.fitted = Some(fitted);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        let last = self
            .last_value
            .ok_or(SalesError::ModelNotTrained("predict"))?;
        Ok(vec![last; horizon])
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn name(&self) -> &str {
        "Naive"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Frequency;
    use chrono::NaiveDate;

    fn daily(values: Vec<f64>) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        TimeSeries::regular(start, Frequency::Daily, values).unwrap()
    }

    #[test]
    fn naive_repeats_last_value() {
        let mut model = Naive::new();
        model.fit(&daily(vec![1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();

        assert_eq!(model.predict(3).unwrap(), vec![5.0, 5.0, 5.0]);
        assert!(model.predict(0).unwrap().is_empty());
    }

    #[test]
    fn naive_fitted_values_are_shifted_history() {
        let mut model = Naive::new();
        model.fit(&daily(vec![1.0, 3.0, 6.0, 10.0, 15.0])).unwrap();

        let fitted = model.fitted_values().unwrap();
        assert!(fitted[0].is_nan());
        assert_eq!(&fitted[1..], &[1.0, 3.0, 6.0, 10.0]);
        assert!(model.is_fitted());
    }

    #[test]
    fn naive_handles_empty_data() {
        let mut model = Naive::new();
        assert_eq!(model.fit(&daily(vec![])).unwrap_err(), SalesError::EmptyData);
        assert!(!model.is_fitted());
    }

    #[test]
    fn naive_requires_fit_before_predict() {
        let model = Naive::new();
        assert_eq!(
            model.predict(5).unwrap_err(),
            SalesError::ModelNotTrained("predict")
        );
    }
}
