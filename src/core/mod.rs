//! Core data structures: input table, column schema and time series.

mod frequency;
mod schema;
mod table;
mod time_series;

pub use frequency::Frequency;
pub use schema::Schema;
pub use table::RawTable;
pub use time_series::{MissingValuePolicy, TimeSeries};
