//! Robust scaling using median and IQR.
//!
//! x_scaled = (x - median) / IQR
//!
//! More robust to outliers than standardization, which matters for sales
//! series with promotion spikes and zero-filled gaps.

use crate::core::TimeSeries;
use crate::error::{Result, SalesError};
use crate::utils::stats::{median, quantile};

/// Center and scale learned by [`RobustScaler::fit`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleParams {
    /// Median of the fitted data.
    pub center: f64,
    /// Interquartile range of the fitted data, or 1 when it is degenerate.
    pub scale: f64,
}

impl ScaleParams {
    /// Learn parameters from `series`.
    pub fn from_data(series: &[f64]) -> Result<Self> {
        if series.is_empty() {
            return Err(SalesError::EmptyData);
        }

        let center = median(series);
        let q1 = quantile(series, 0.25);
        let q3 = quantile(series, 0.75);
        let iqr = q3 - q1;
        let scale = if iqr < 1e-10 { 1.0 } else { iqr };

        Ok(Self { center, scale })
    }

    pub fn transform(&self, data: &[f64]) -> Vec<f64> {
        data.iter().map(|&x| (x - self.center) / self.scale).collect()
    }

    pub fn inverse(&self, data: &[f64]) -> Vec<f64> {
        data.iter().map(|&x| x * self.scale + self.center).collect()
    }
}

/// Median/IQR scaler that is fitted exactly once.
#[derive(Debug, Clone, Default)]
pub struct RobustScaler {
    params: Option<ScaleParams>,
}

impl RobustScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn center and scale from the training window.
    pub fn fit(&mut self, train: &[f64]) -> Result<()> {
        if self.params.is_some() {
            return Err(SalesError::ScalerAlreadyFitted);
        }
        self.params = Some(ScaleParams::from_data(train)?);
        Ok(())
    }

    pub fn is_fitted(&self) -> bool {
        self.params.is_some()
    }

    pub fn params(&self) -> Option<ScaleParams> {
        self.params
    }

    pub fn apply(&self, data: &[f64]) -> Result<Vec<f64>> {
        Ok(self.fitted("apply")?.transform(data))
    }

    pub fn invert(&self, data: &[f64]) -> Result<Vec<f64>> {
        Ok(self.fitted("invert")?.inverse(data))
    }

    /// Scale the values of `series`, keeping its dates.
    pub fn apply_series(&self, series: &TimeSeries) -> Result<TimeSeries> {
        series.with_values(self.apply(series.values())?)
    }

    /// Map scaled values of `series` back to original units.
    pub fn invert_series(&self, series: &TimeSeries) -> Result<TimeSeries> {
        series.with_values(self.invert(series.values())?)
    }

    fn fitted(&self, operation: &'static str) -> Result<ScaleParams> {
        self.params.ok_or(SalesError::ScalerNotFitted(operation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn learns_median_and_iqr() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let mut scaler = RobustScaler::new();
        scaler.fit(&data).unwrap();

        let params = scaler.params().unwrap();
        assert_relative_eq!(params.center, 3.5, epsilon = 1e-10);
        // q1 = 2.25, q3 = 4.75
        assert_relative_eq!(params.scale, 2.5, epsilon = 1e-10);

        let scaled = scaler.apply(&data).unwrap();
        assert_relative_eq!(scaled[0], -1.0, epsilon = 1e-10);
        assert_relative_eq!(scaled[5], 38.6, epsilon = 1e-10);
    }

    #[test]
    fn round_trip_recovers_values() {
        let data = vec![120.0, 80.0, 0.0, 310.5, 99.0, 101.0];
        let mut scaler = RobustScaler::new();
        scaler.fit(&data).unwrap();

        let restored = scaler.invert(&scaler.apply(&data).unwrap()).unwrap();
        for (a, b) in data.iter().zip(&restored) {
            assert_relative_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn constant_data_uses_unit_scale() {
        let mut scaler = RobustScaler::new();
        scaler.fit(&[5.0; 10]).unwrap();

        assert_eq!(scaler.params().unwrap().scale, 1.0);
        assert_eq!(scaler.apply(&[5.0, 7.0]).unwrap(), vec![0.0, 2.0]);
    }

    #[test]
    fn unfitted_scaler_is_an_error() {
        let scaler = RobustScaler::new();
        assert_eq!(
            scaler.apply(&[1.0]).unwrap_err(),
            SalesError::ScalerNotFitted("apply")
        );
        assert_eq!(
            scaler.invert(&[1.0]).unwrap_err(),
            SalesError::ScalerNotFitted("invert")
        );
    }

    #[test]
    fn second_fit_is_rejected() {
        let mut scaler = RobustScaler::new();
        scaler.fit(&[1.0, 2.0, 3.0]).unwrap();
        let before = scaler.params();

        assert_eq!(
            scaler.fit(&[10.0, 20.0]).unwrap_err(),
            SalesError::ScalerAlreadyFitted
        );
        assert_eq!(scaler.params(), before);
    }

    #[test]
    fn empty_fit_is_rejected() {
        let mut scaler = RobustScaler::new();
        assert_eq!(scaler.fit(&[]).unwrap_err(), SalesError::EmptyData);
        assert!(!scaler.is_fitted());
    }
}
