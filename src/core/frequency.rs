//! Calendar granularity of a regular series.

use crate::error::{Result, SalesError};
use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spacing between consecutive points of a regular series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// One point per calendar day.
    #[default]
    Daily,
    /// One point every seven days, anchored on the first observation.
    Weekly,
    /// One point per calendar month, anchored on the first of the month.
    Monthly,
}

impl Frequency {
    /// First grid point for a series whose earliest observation is `first`.
    pub fn anchor(self, first: NaiveDate) -> NaiveDate {
        match self {
            Self::Daily | Self::Weekly => first,
            Self::Monthly => first.with_day(1).unwrap_or(first),
        }
    }

    /// Grid point `steps` periods after `anchor`.
    pub fn advance(self, anchor: NaiveDate, steps: usize) -> Result<NaiveDate> {
        let shifted = match self {
            Self::Daily => anchor.checked_add_signed(Duration::days(steps as i64)),
            Self::Weekly => anchor.checked_add_signed(Duration::weeks(steps as i64)),
            Self::Monthly => u32::try_from(steps)
                .ok()
                .and_then(|m| anchor.checked_add_months(Months::new(m))),
        };
        shifted.ok_or_else(|| {
            SalesError::TimestampError(format!("date overflow advancing {steps} {self} steps"))
        })
    }

    /// Index of the grid slot that contains `date`, counting from `anchor`.
    ///
    /// Dates between two grid points belong to the earlier one. Returns `None`
    /// for dates before the anchor.
    pub fn slot(self, anchor: NaiveDate, date: NaiveDate) -> Option<usize> {
        if date < anchor {
            return None;
        }
        let index = match self {
            Self::Daily => (date - anchor).num_days(),
            Self::Weekly => (date - anchor).num_days() / 7,
            Self::Monthly => {
                let months = (date.year() - anchor.year()) * 12 + date.month() as i32
                    - anchor.month() as i32;
                months as i64
            }
        };
        usize::try_from(index).ok()
    }

    /// Whether `date` falls exactly on the grid anchored at `anchor`.
    pub fn is_on_grid(self, anchor: NaiveDate, date: NaiveDate) -> bool {
        self.slot(anchor, date)
            .and_then(|slot| self.advance(anchor, slot).ok())
            .is_some_and(|grid_date| grid_date == date)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        };
        f.write_str(name)
    }
}

impl FromStr for Frequency {
    type Err = SalesError;

    /// Accepts pandas-style aliases (`D`, `W`, `M`/`MS`) and full names.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Self::Daily),
            "w" | "week" | "weekly" => Ok(Self::Weekly),
            "m" | "ms" | "month" | "monthly" => Ok(Self::Monthly),
            other => Err(SalesError::Configuration(format!(
                "unknown frequency '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_grid_advances_one_day() {
        let anchor = date(2024, 1, 30);
        assert_eq!(Frequency::Daily.advance(anchor, 3).unwrap(), date(2024, 2, 2));
        assert_eq!(Frequency::Daily.slot(anchor, date(2024, 2, 2)), Some(3));
        assert_eq!(Frequency::Daily.slot(anchor, date(2024, 1, 1)), None);
    }

    #[test]
    fn weekly_slots_fold_intermediate_days() {
        let anchor = date(2024, 1, 1);
        assert_eq!(Frequency::Weekly.slot(anchor, date(2024, 1, 7)), Some(0));
        assert_eq!(Frequency::Weekly.slot(anchor, date(2024, 1, 8)), Some(1));
        assert!(Frequency::Weekly.is_on_grid(anchor, date(2024, 1, 15)));
        assert!(!Frequency::Weekly.is_on_grid(anchor, date(2024, 1, 16)));
    }

    #[test]
    fn monthly_grid_is_anchored_on_first_of_month() {
        let anchor = Frequency::Monthly.anchor(date(2024, 1, 17));
        assert_eq!(anchor, date(2024, 1, 1));
        assert_eq!(Frequency::Monthly.advance(anchor, 13).unwrap(), date(2025, 2, 1));
        assert_eq!(Frequency::Monthly.slot(anchor, date(2024, 3, 31)), Some(2));
    }

    #[test]
    fn parses_pandas_aliases() {
        assert_eq!("D".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!("w".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert_eq!("MS".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert!("hourly".parse::<Frequency>().is_err());
    }
}
