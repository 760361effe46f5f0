//! Classical moving-average seasonal decomposition.
//!
//! The trend is a centred moving average over one full cycle (a 2×m average
//! for even periods), so it is undefined for the first and last `period / 2`
//! points. Those positions hold `NaN` in both trend and residual. The seasonal
//! component is the per-phase mean of the detrended series, normalized to sum
//! to zero (additive) or average to one (multiplicative), and repeated over
//! the whole series.

use crate::error::{Result, SalesError};
use crate::utils::stats::{mean, nan_mean};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the components combine into the observed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecompositionModel {
    /// observed = trend + seasonal + residual
    #[default]
    Additive,
    /// observed = trend * seasonal * residual
    Multiplicative,
}

impl fmt::Display for DecompositionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Additive => f.write_str("additive"),
            Self::Multiplicative => f.write_str("multiplicative"),
        }
    }
}

impl FromStr for DecompositionModel {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "additive" | "add" => Ok(Self::Additive),
            "multiplicative" | "mul" => Ok(Self::Multiplicative),
            other => Err(SalesError::Configuration(format!(
                "unknown decomposition model '{other}'"
            ))),
        }
    }
}

/// Components of a decomposed series, all aligned with the input.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalComponents {
    pub observed: Vec<f64>,
    /// `NaN` where the centred average is undefined.
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    /// `NaN` wherever the trend is.
    pub residual: Vec<f64>,
}

impl SeasonalComponents {
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }
}

/// Classical decomposition with a fixed cycle length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassicalDecomposition {
    period: usize,
    model: DecompositionModel,
}

impl ClassicalDecomposition {
    /// Additive decomposition with the given seasonal period.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            model: DecompositionModel::Additive,
        }
    }

    pub fn with_model(mut self, model: DecompositionModel) -> Self {
        self.model = model;
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Decompose `series`, which must hold at least two full cycles.
    pub fn decompose(&self, series: &[f64]) -> Result<SeasonalComponents> {
        let period = self.period;
        if period < 2 {
            return Err(SalesError::InvalidParameter(format!(
                "seasonal period must be at least 2, got {period}"
            )));
        }
        let n = series.len();
        if n < 2 * period {
            return Err(SalesError::InsufficientData {
                needed: 2 * period,
                got: n,
            });
        }
        if series.iter().any(|v| !v.is_finite()) {
            return Err(SalesError::Decomposition(
                "series contains missing values".to_string(),
            ));
        }
        if self.model == DecompositionModel::Multiplicative && series.iter().any(|&v| v <= 0.0) {
            return Err(SalesError::Decomposition(
                "multiplicative model requires strictly positive values".to_string(),
            ));
        }

        let trend = centred_moving_average(series, period);

        let detrended: Vec<f64> = series
            .iter()
            .zip(&trend)
            .map(|(&y, &t)| match self.model {
                DecompositionModel::Additive => y - t,
                DecompositionModel::Multiplicative => y / t,
            })
            .collect();

        let mut phase_means: Vec<f64> = (0..period)
            .map(|phase| {
                let phase_values: Vec<f64> =
                    detrended.iter().skip(phase).step_by(period).copied().collect();
                nan_mean(&phase_values)
            })
            .collect();
        let level = mean(&phase_means);
        for value in &mut phase_means {
            match self.model {
                DecompositionModel::Additive => *value -= level,
                DecompositionModel::Multiplicative => *value /= level,
            }
        }

        let seasonal: Vec<f64> = (0..n).map(|i| phase_means[i % period]).collect();

        let residual: Vec<f64> = series
            .iter()
            .zip(&trend)
            .zip(&seasonal)
            .map(|((&y, &t), &s)| match self.model {
                DecompositionModel::Additive => y - t - s,
                DecompositionModel::Multiplicative => y / (t * s),
            })
            .collect();

        Ok(SeasonalComponents {
            observed: series.to_vec(),
            trend,
            seasonal,
            residual,
        })
    }
}

/// Two-sided moving average over one cycle; `NaN` where the window does not fit.
fn centred_moving_average(series: &[f64], period: usize) -> Vec<f64> {
    let weights: Vec<f64> = if period % 2 == 0 {
        // 2×m average: half weight on both ends of an (m + 1)-wide window
        let mut w = vec![1.0 / period as f64; period + 1];
        w[0] /= 2.0;
        w[period] /= 2.0;
        w
    } else {
        vec![1.0 / period as f64; period]
    };

    let half = weights.len() / 2;
    let n = series.len();
    let mut trend = vec![f64::NAN; n];
    for (i, slot) in trend.iter_mut().enumerate().take(n - half).skip(half) {
        *slot = weights
            .iter()
            .enumerate()
            .map(|(j, w)| w * series[i - half + j])
            .sum();
    }
    trend
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn weekly_pattern(n: usize) -> Vec<f64> {
        let pattern = [10.0, 12.0, 14.0, 13.0, 11.0, 20.0, 25.0];
        (0..n).map(|i| 100.0 + i as f64 + pattern[i % 7]).collect()
    }

    #[test]
    fn additive_components_sum_to_observed() {
        let series = weekly_pattern(28);
        let result = ClassicalDecomposition::new(7).decompose(&series).unwrap();

        assert_eq!(result.len(), 28);
        let mut defined = 0;
        for i in 0..28 {
            if result.trend[i].is_nan() {
                continue;
            }
            defined += 1;
            assert_relative_eq!(
                result.observed[i],
                result.trend[i] + result.seasonal[i] + result.residual[i],
                epsilon = 1e-9
            );
        }
        assert_eq!(defined, 28 - 6);
    }

    #[test]
    fn trend_undefined_at_edges_only() {
        let series = weekly_pattern(21);
        let result = ClassicalDecomposition::new(7).decompose(&series).unwrap();

        assert!(result.trend[..3].iter().all(|t| t.is_nan()));
        assert!(result.trend[18..].iter().all(|t| t.is_nan()));
        assert!(result.trend[3..18].iter().all(|t| t.is_finite()));
        assert!(result.residual[0].is_nan());
        assert!(result.seasonal.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn seasonal_component_repeats_and_is_centred() {
        let series = weekly_pattern(35);
        let result = ClassicalDecomposition::new(7).decompose(&series).unwrap();

        for i in 7..35 {
            assert_relative_eq!(result.seasonal[i], result.seasonal[i - 7], epsilon = 1e-12);
        }
        let cycle_sum: f64 = result.seasonal[..7].iter().sum();
        assert_relative_eq!(cycle_sum, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn pure_linear_trend_is_recovered() {
        let series: Vec<f64> = (0..20).map(|i| 3.0 + 2.0 * i as f64).collect();
        let result = ClassicalDecomposition::new(4).decompose(&series).unwrap();

        for i in 2..18 {
            assert_relative_eq!(result.trend[i], series[i], epsilon = 1e-9);
            assert_relative_eq!(result.seasonal[i], 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn multiplicative_components_multiply_to_observed() {
        let series = weekly_pattern(28);
        let result = ClassicalDecomposition::new(7)
            .with_model(DecompositionModel::Multiplicative)
            .decompose(&series)
            .unwrap();

        for i in 3..25 {
            assert_relative_eq!(
                result.observed[i],
                result.trend[i] * result.seasonal[i] * result.residual[i],
                epsilon = 1e-9
            );
        }
        let cycle_mean: f64 = result.seasonal[..7].iter().sum::<f64>() / 7.0;
        assert_relative_eq!(cycle_mean, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn multiplicative_rejects_zero_values() {
        let mut series = weekly_pattern(28);
        series[5] = 0.0;
        let result = ClassicalDecomposition::new(7)
            .with_model(DecompositionModel::Multiplicative)
            .decompose(&series);
        assert!(matches!(result, Err(SalesError::Decomposition(_))));
    }

    #[test]
    fn requires_two_full_cycles() {
        let result = ClassicalDecomposition::new(7).decompose(&weekly_pattern(13));
        assert_eq!(
            result.unwrap_err(),
            SalesError::InsufficientData { needed: 14, got: 13 }
        );

        let result = ClassicalDecomposition::new(1).decompose(&weekly_pattern(13));
        assert!(matches!(result, Err(SalesError::InvalidParameter(_))));
    }

    #[test]
    fn model_parses_from_config_strings() {
        assert_eq!(
            "additive".parse::<DecompositionModel>().unwrap(),
            DecompositionModel::Additive
        );
        assert_eq!(
            "Multiplicative".parse::<DecompositionModel>().unwrap(),
            DecompositionModel::Multiplicative
        );
        assert!("stl".parse::<DecompositionModel>().is_err());
    }
}
