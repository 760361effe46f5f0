use crate::strategy::GroupIdentifier;
use crate::utils::stats::{mean, population_std};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-group summary of the gap-filled series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalesStatistics {
    pub mean: f64,
    /// Population standard deviation.
    pub std: f64,
    /// `std / mean`; `None` when the mean is zero.
    pub coefficient_of_variation: Option<f64>,
    /// `mean - k * std`.
    pub low_threshold: f64,
}

impl SalesStatistics {
    /// Compute statistics of one group's series with threshold multiplier `k`.
    pub fn compute(values: &[f64], k: f64) -> Self {
        let mean = mean(values);
        let std = population_std(values);
        let coefficient_of_variation = if mean == 0.0 { None } else { Some(std / mean) };

        Self {
            mean,
            std,
            coefficient_of_variation,
            low_threshold: mean - k * std,
        }
    }

    /// Whether `value` lies strictly below the low-sales threshold.
    pub fn is_unusually_low(&self, value: f64) -> bool {
        value < self.low_threshold
    }
}

/// Decomposition of one group. All vectors are aligned with `dates`.
#[derive(Debug, Clone, PartialEq)]
pub struct DecompositionResult {
    pub identifier: GroupIdentifier,
    pub dates: Vec<NaiveDate>,
    pub observed: Vec<f64>,
    /// `NaN` where the centred average is undefined.
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    /// `NaN` where the trend is.
    pub residual: Vec<f64>,
    pub statistics: SalesStatistics,
    pub unusually_low: Vec<bool>,
}

impl DecompositionResult {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Number of dates flagged as unusually low.
    pub fn flagged_count(&self) -> usize {
        self.unusually_low.iter().filter(|&&low| low).count()
    }

    /// Flatten into one table row per date, broadcasting the statistics.
    pub fn to_rows(&self) -> Vec<DecompositionRow> {
        let defined = |v: f64| if v.is_finite() { Some(v) } else { None };

        (0..self.len())
            .map(|i| DecompositionRow {
                station: self.identifier.station,
                group: self.identifier.category.clone(),
                date: self.dates[i],
                observed: self.observed[i],
                trend: defined(self.trend[i]),
                seasonal: self.seasonal[i],
                residual: defined(self.residual[i]),
                mean_sales_volume: self.statistics.mean,
                std_deviation: self.statistics.std,
                coefficient_of_variation: self.statistics.coefficient_of_variation,
                low_threshold: self.statistics.low_threshold,
                is_unusually_low: self.unusually_low[i],
            })
            .collect()
    }
}

/// One (group, date) row of the flat decomposition table handed to reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecompositionRow {
    #[serde(rename = "Station")]
    pub station: Option<i64>,
    #[serde(rename = "Group")]
    pub group: String,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Observed")]
    pub observed: f64,
    #[serde(rename = "Trend")]
    pub trend: Option<f64>,
    #[serde(rename = "Seasonal")]
    pub seasonal: f64,
    #[serde(rename = "Residual")]
    pub residual: Option<f64>,
    #[serde(rename = "Mean Sales Volume")]
    pub mean_sales_volume: f64,
    #[serde(rename = "Std Deviation")]
    pub std_deviation: f64,
    #[serde(rename = "Coeff of Variation")]
    pub coefficient_of_variation: Option<f64>,
    #[serde(rename = "Low Threshold")]
    pub low_threshold: f64,
    #[serde(rename = "Is Unusually Low")]
    pub is_unusually_low: bool,
}

/// Concatenate the per-group tables of several results.
pub fn decomposition_table(results: &[DecompositionResult]) -> Vec<DecompositionRow> {
    results.iter().flat_map(DecompositionResult::to_rows).collect()
}
