//! Seasonal Naive forecasting model.
//!
//! Forecasts by repeating the value from the same season in the previous cycle.

use crate::core::TimeSeries;
use crate::error::{Result, SalesError};
use crate::models::Model;

/// Seasonal Naive forecaster.
///
/// Each forecast is equal to the observation from the same season in the
/// last observed cycle.
#[derive(Debug, Clone)]
pub struct SeasonalNaive {
    period: usize,
    last_cycle: Option<Vec<f64>>,
    fitted: Option<Vec<f64>>,
}

impl SeasonalNaive {
    /// Create a new SeasonalNaive model with the given seasonal period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            last_cycle: None,
            fitted: None,
        }
    }

    /// Get the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for SeasonalNaive {
    fn default() -> Self {
        Self::new(7) // weekly cycle of daily sales
    }
}

impl Model for SeasonalNaive {
    fn fit(&mut self, series: &TimeSeries) -> Result<()> {
        if self.period == 0 {
            return Err(SalesError::InvalidParameter(
                "seasonal period must be positive".to_string(),
            ));
        }
        let values = series.values();
        let n = values.len();
        if n < self.period {
            return Err(SalesError::InsufficientData {
                needed: self.period,
                got: n,
            });
        }

        // y_hat[t] = y[t - period]
        let fitted: Vec<f64> = (0..n)
            .map(|i| {
                if i < self.period {
                    f64::NAN
                } else {
                    values[i - self.period]
                }
            })
            .collect();
        self.last_cycle = Some(values[n - self.period..].to_vec());
        self.fitted = Some(fitted);

        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        let cycle = self
            .last_cycle
            .as_ref()
            .ok_or(SalesError::ModelNotTrained("predict"))?;

        Ok(cycle.iter().copied().cycle().take(horizon).collect())
    }

    fn fitted_values(&self) -> Option<&[f64]> {
        self.fitted.as_deref()
    }

    fn name(&self) -> &str {
        "SeasonalNaive"
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
    fn seasonal_naive_repeats_last_cycle() {
        let values: Vec<f64> = (0..14)
            .map(|i| (i % 7) as f64 + if i >= 7 { 100.0 } else { 0.0 })
            .collect();
        let mut model = SeasonalNaive::new(7);
        model.fit(&daily(values)).unwrap();

        let forecast = model.predict(10).unwrap();
        assert_eq!(forecast.len(), 10);
        assert_eq!(&forecast[..7], &[100.0, 101.0, 102.0, 103.0, 104.0, 105.0, 106.0]);
        assert_eq!(&forecast[7..], &[100.0, 101.0, 102.0]);
    }

    #[test]
    fn seasonal_naive_fitted_values_lag_one_season() {
        let mut model = SeasonalNaive::new(2);
        model.fit(&daily(vec![1.0, 2.0, 4.0, 7.0])).unwrap();

        let fitted = model.fitted_values().unwrap();
        assert!(fitted[0].is_nan() && fitted[1].is_nan());
        assert_eq!(&fitted[2..], &[1.0, 2.0]);
    }

    #[test]
    fn seasonal_naive_requires_full_season() {
        let mut model = SeasonalNaive::new(7);
        assert_eq!(
            model.fit(&daily(vec![1.0; 5])).unwrap_err(),
            SalesError::InsufficientData { needed: 7, got: 5 }
        );
        assert_eq!(
            model.predict(3).unwrap_err(),
            SalesError::ModelNotTrained("predict")
        );
    }

    #[test]
    fn seasonal_naive_name_is_correct() {
        assert_eq!(SeasonalNaive::default().name(), "SeasonalNaive");
        assert_eq!(SeasonalNaive::default().period(), 7);
    }
}
