use crate::core::{Frequency, MissingValuePolicy, TimeSeries};
use crate::error::{Result, SalesError};
use crate::preprocess::AggregatedRow;
use chrono::NaiveDate;

/// Turns one group's dated sales into a gap-free, regularly spaced series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesBuilder {
    frequency: Frequency,
    fill_missing_dates: bool,
    fill_policy: MissingValuePolicy,
}

impl SeriesBuilder {
    /// Builder that inserts absent dates and interpolates them.
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            fill_missing_dates: true,
            fill_policy: MissingValuePolicy::Interpolate,
        }
    }

    pub fn with_fill_missing_dates(mut self, fill: bool) -> Self {
        self.fill_missing_dates = fill;
        self
    }

    pub fn with_fill_policy(mut self, policy: MissingValuePolicy) -> Self {
        self.fill_policy = policy;
        self
    }

    /// Build from preprocessor rows of a single group.
    pub fn build_rows(&self, rows: &[AggregatedRow]) -> Result<TimeSeries> {
        let points: Vec<(NaiveDate, f64)> = rows.iter().map(|r| (r.date, r.sales)).collect();
        self.build(&points)
    }

    /// Build from dated values, in any order.
    ///
    /// Grid dates without a point are inserted as missing and filled with the
    /// configured policy. When date filling is disabled they are an error.
    pub fn build(&self, points: &[(NaiveDate, f64)]) -> Result<TimeSeries> {
        let series = TimeSeries::reindexed(points, self.frequency, f64::NAN)?;

        if !series.has_missing_values() {
            return Ok(series);
        }
        if !self.fill_missing_dates {
            let missing = series.values().iter().filter(|v| !v.is_finite()).count();
            return Err(SalesError::TimestampError(format!(
                "{missing} {} dates missing and date filling is disabled",
                self.frequency
            )));
        }

        Ok(series.filled(self.fill_policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::Duration;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
    }

    #[test]
    fn interpolates_absent_dates() {
        let points = vec![(day(0), 10.0), (day(3), 40.0), (day(1), 20.0)];

        let series = SeriesBuilder::new(Frequency::Daily).build(&points).unwrap();

        assert_eq!(series.len(), 4);
        assert!(series.is_regular());
        assert_relative_eq!(series.values()[2], 30.0, epsilon = 1e-10);
        assert_eq!(series.timestamps()[2], day(2));
    }

    #[test]
    fn forward_fill_policy() {
        let points = vec![(day(0), 10.0), (day(3), 40.0)];

        let series = SeriesBuilder::new(Frequency::Daily)
            .with_fill_policy(MissingValuePolicy::ForwardFill)
            .build(&points)
            .unwrap();

        assert_eq!(series.values(), &[10.0, 10.0, 10.0, 40.0]);
    }

    #[test]
    fn irregular_input_without_filling_is_an_error() {
        let points = vec![(day(0), 10.0), (day(2), 30.0)];

        let err = SeriesBuilder::new(Frequency::Daily)
            .with_fill_missing_dates(false)
            .build(&points)
            .unwrap_err();

        assert!(matches!(err, SalesError::TimestampError(_)));
        assert!(err.is_data_validation());
    }

    #[test]
    fn regular_input_passes_without_filling() {
        let points: Vec<_> = (0..5).map(|i| (day(i), i as f64)).collect();

        let series = SeriesBuilder::new(Frequency::Daily)
            .with_fill_missing_dates(false)
            .build(&points)
            .unwrap();

        assert_eq!(series.values(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn builds_from_aggregated_rows() {
        use crate::strategy::{GroupKey, KeyValue};
        let key = GroupKey::new(vec![KeyValue::Product("ADO".to_string())]);
        let rows: Vec<_> = (0..3)
            .map(|i| AggregatedRow {
                key: key.clone(),
                date: day(i * 7),
                sales: 1.0 + i as f64,
            })
            .collect();

        let series = SeriesBuilder::new(Frequency::Weekly).build_rows(&rows).unwrap();

        assert_eq!(series.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(series.frequency(), Frequency::Weekly);
    }
}
