//! Regularly spaced univariate series of dated values.

use super::Frequency;
use crate::error::{Result, SalesError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Policy for filling missing values (NaN/Inf) in a series.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Linear interpolation between neighbours; edges take the nearest value.
    #[default]
    Interpolate,
    /// Carry the previous valid value forward; leading gaps take the first
    /// valid value.
    ForwardFill,
    /// Fill with a constant.
    Fill(f64),
}

/// A univariate time series with strictly increasing dates.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    timestamps: Vec<NaiveDate>,
    values: Vec<f64>,
    frequency: Frequency,
}

impl TimeSeries {
    /// Create a series, validating lengths and date ordering.
    pub fn new(timestamps: Vec<NaiveDate>, values: Vec<f64>, frequency: Frequency) -> Result<Self> {
        if timestamps.len() != values.len() {
            return Err(SalesError::DimensionMismatch {
                expected: timestamps.len(),
                got: values.len(),
            });
        }

        for i in 1..timestamps.len() {
            if timestamps[i] <= timestamps[i - 1] {
                return Err(SalesError::TimestampError(
                    "timestamps must be strictly increasing".to_string(),
                ));
            }
        }

        Ok(Self {
            timestamps,
            values,
            frequency,
        })
    }

    /// Create a series on the grid starting at `start`.
    pub fn regular(start: NaiveDate, frequency: Frequency, values: Vec<f64>) -> Result<Self> {
        let timestamps = (0..values.len())
            .map(|i| frequency.advance(start, i))
            .collect::<Result<Vec<_>>>()?;
        Self::new(timestamps, values, frequency)
    }

    /// Place dated points onto the regular grid spanning their date range.
    ///
    /// Points falling into the same grid slot are summed; slots with no point
    /// get `empty`. `points` need not be sorted.
    pub fn reindexed(points: &[(NaiveDate, f64)], frequency: Frequency, empty: f64) -> Result<Self> {
        let (Some(first), Some(last)) = (
            points.iter().map(|(d, _)| *d).min(),
            points.iter().map(|(d, _)| *d).max(),
        ) else {
            return Err(SalesError::EmptyData);
        };

        let anchor = frequency.anchor(first);
        let slots = frequency
            .slot(anchor, last)
            .map(|last_slot| last_slot + 1)
            .ok_or_else(|| SalesError::TimestampError("grid anchor after last date".to_string()))?;

        let mut totals: Vec<Option<f64>> = vec![None; slots];
        for &(date, value) in points {
            if let Some(slot) = frequency.slot(anchor, date) {
                let total = &mut totals[slot];
                *total = Some(total.unwrap_or(0.0) + value);
            }
        }

        let values = totals.into_iter().map(|t| t.unwrap_or(empty)).collect();
        Self::regular(anchor, frequency, values)
    }

    /// Get the number of observations.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Check if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[NaiveDate] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.timestamps.first().copied()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.timestamps.last().copied()
    }

    /// Whether every consecutive pair of dates is exactly one step apart.
    pub fn is_regular(&self) -> bool {
        self.timestamps
            .windows(2)
            .all(|w| self.frequency.advance(w[0], 1).is_ok_and(|next| next == w[1]))
    }

    /// Same dates, new values.
    pub fn with_values(&self, values: Vec<f64>) -> Result<Self> {
        Self::new(self.timestamps.clone(), values, self.frequency)
    }

    /// Extract the observations in `start..end`.
    pub fn slice(&self, start: usize, end: usize) -> Result<TimeSeries> {
        if start > end {
            return Err(SalesError::InvalidParameter(
                "start must be <= end".to_string(),
            ));
        }
        if end > self.len() {
            return Err(SalesError::InvalidParameter(format!(
                "slice end {end} exceeds series length {}",
                self.len()
            )));
        }

        Ok(TimeSeries {
            timestamps: self.timestamps[start..end].to_vec(),
            values: self.values[start..end].to_vec(),
            frequency: self.frequency,
        })
    }

    /// Check if series has missing values (NaN or Inf).
    pub fn has_missing_values(&self) -> bool {
        self.values.iter().any(|v| !v.is_finite())
    }

    /// Return a copy with missing values filled according to `policy`.
    pub fn filled(&self, policy: MissingValuePolicy) -> TimeSeries {
        let values = match policy {
            MissingValuePolicy::Interpolate => interpolate_series(&self.values),
            MissingValuePolicy::ForwardFill => forward_fill(&self.values),
            MissingValuePolicy::Fill(fill_value) => self
                .values
                .iter()
                .map(|&v| if v.is_finite() { v } else { fill_value })
                .collect(),
        };

        TimeSeries {
            timestamps: self.timestamps.clone(),
            values,
            frequency: self.frequency,
        }
    }
}

/// Linear interpolation for a series with missing values, filling edges with
/// the nearest valid value.
fn interpolate_series(values: &[f64]) -> Vec<f64> {
    let mut result = values.to_vec();
    let n = result.len();

    let mut i = 0;
    while i < n {
        if result[i].is_finite() {
            i += 1;
            continue;
        }

        let start = i;
        while i < n && !result[i].is_finite() {
            i += 1;
        }
        let end = i;

        let left = if start > 0 {
            Some(result[start - 1])
        } else {
            None
        };
        let right = if end < n { Some(result[end]) } else { None };

        match (left, right) {
            (Some(l), Some(r)) => {
                // (end - start + 1) segments between the two boundaries
                let segments = (end - start + 1) as f64;
                for (j, idx) in (start..end).enumerate() {
                    let t = (j + 1) as f64 / segments;
                    result[idx] = l + t * (r - l);
                }
            }
            (Some(l), None) => result[start..end].fill(l),
            (None, Some(r)) => result[start..end].fill(r),
            (None, None) => {}
        }
    }

    result
}

fn forward_fill(values: &[f64]) -> Vec<f64> {
    let first_valid = values.iter().copied().find(|v| v.is_finite());
    let mut last_valid = first_valid;
    values
        .iter()
        .map(|&v| {
            if v.is_finite() {
                last_valid = Some(v);
                v
            } else {
                last_valid.unwrap_or(v)
            }
        })
        .collect()
}
