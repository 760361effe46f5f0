use crate::core::TimeSeries;
use crate::error::{Result, SalesError};

/// Chronological train/validation windows of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSplit {
    pub train: TimeSeries,
    pub val: TimeSeries,
}

impl DataSplit {
    pub fn train_size(&self) -> usize {
        self.train.len()
    }

    pub fn val_size(&self) -> usize {
        self.val.len()
    }
}

/// Holds out the last `validation_length` points for validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Splitter {
    validation_length: usize,
}

impl Splitter {
    pub fn new(validation_length: usize) -> Self {
        Self { validation_length }
    }

    pub fn validation_length(&self) -> usize {
        self.validation_length
    }

    /// Split `series` so that every validation date is later than every
    /// training date. At least one training point is required.
    pub fn split(&self, series: &TimeSeries) -> Result<DataSplit> {
        let v = self.validation_length;
        if v == 0 {
            return Err(SalesError::InvalidParameter(
                "validation length must be positive".to_string(),
            ));
        }
        let n = series.len();
        if n <= v {
            return Err(SalesError::InsufficientData {
                needed: v + 1,
                got: n,
            });
        }

        Ok(DataSplit {
            train: series.slice(0, n - v)?,
            val: series.slice(n - v, n)?,
        })
    }
}
