//! Turning one group's rows into scaled train/validation series.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use salescast::core::Frequency;
//! use salescast::transform::{RobustScaler, SeriesBuilder, Splitter};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let points: Vec<_> = (0..40)
//!     .filter(|i| i % 9 != 4)
//!     .map(|i| (start + chrono::Duration::days(i), 100.0 + i as f64))
//!     .collect();
//!
//! let series = SeriesBuilder::new(Frequency::Daily).build(&points).unwrap();
//! let split = Splitter::new(10).split(&series).unwrap();
//! assert_eq!(split.train_size(), 30);
//!
//! let mut scaler = RobustScaler::new();
//! scaler.fit(split.train.values()).unwrap();
//! let scaled = scaler.apply(split.val.values()).unwrap();
//! assert_eq!(scaled.len(), 10);
//! ```

mod pipeline;
mod scale;
mod series;
mod split;

pub use pipeline::{BaseForecastConfig, DataTransformPipeline};
pub use scale::{RobustScaler, ScaleParams};
pub use series::SeriesBuilder;
pub use split::{DataSplit, Splitter};
