//! Cleaning and daily aggregation of raw sales rows.
//!
//! The preprocessor is the single entry point from raw tables into the rest
//! of the library. Its output, a date-sorted list of [`AggregatedRow`]s, is
//! consumed by both the decomposer and the forecasting pipeline.
//!
//! # Example
//!
//! ```
//! use salescast::core::{RawTable, Schema};
//! use salescast::preprocess::Preprocessor;
//! use salescast::strategy::GroupingStrategy;
//!
//! let table = RawTable::from_rows(
//!     ["Station #", "Product", "Transaction Date", "Sales Vol"],
//!     vec![
//!         vec!["796".into(), "ado".into(), "2024-01-01".into(), "1,200".into()],
//!         vec!["796".into(), "ADO ".into(), "2024-01-01".into(), "300".into()],
//!     ],
//! )
//! .unwrap();
//!
//! let schema = Schema::default();
//! let strategy = GroupingStrategy::by_station_and_product(Some(796), None);
//! let rows = Preprocessor::new(&schema, &strategy).preprocess(&table).unwrap();
//!
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].sales, 1500.0);
//! ```

mod parse;

pub use parse::{coerce_sales, normalize_product, parse_date};

use crate::core::{RawTable, Schema};
use crate::error::{Result, SalesError};
use crate::observer::{PipelineEvent, PipelineObserver, TRACING_OBSERVER};
use crate::strategy::{GroupKey, GroupingStrategy};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One cleaned source row, before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    /// Present whenever the strategy groups by station.
    pub station: Option<i64>,
    /// Trimmed, uppercased product name.
    pub product: String,
    pub date: NaiveDate,
    /// `None` when the source value could not be coerced to a number.
    pub sales: Option<f64>,
}

/// Total sales of one group on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRow {
    pub key: GroupKey,
    pub date: NaiveDate,
    pub sales: f64,
}

/// Cleans raw rows and aggregates them per group and date.
pub struct Preprocessor<'a> {
    schema: &'a Schema,
    strategy: &'a GroupingStrategy,
    observer: &'a dyn PipelineObserver,
}

impl<'a> Preprocessor<'a> {
    pub fn new(schema: &'a Schema, strategy: &'a GroupingStrategy) -> Self {
        Self {
            schema,
            strategy,
            observer: &TRACING_OBSERVER,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn PipelineObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Clean, filter and aggregate `table`.
    ///
    /// Multiple source rows for the same group and date are summed. Unparseable
    /// sales values are treated as missing and do not contribute; a group-date
    /// whose contributions are all missing is dropped. The result is sorted by
    /// date, ties broken by group key.
    pub fn preprocess(&self, table: &RawTable) -> Result<Vec<AggregatedRow>> {
        if table.is_empty() {
            return Err(SalesError::EmptyData);
        }

        let records = self.clean(table)?;
        let records = self.strategy.filter(records)?;

        let mut totals: BTreeMap<(NaiveDate, GroupKey), Option<f64>> = BTreeMap::new();
        for record in &records {
            let entry = totals
                .entry((record.date, self.strategy.group_key(record)))
                .or_insert(None);
            if let Some(sales) = record.sales {
                *entry = Some(entry.unwrap_or(0.0) + sales);
            }
        }

        let rows: Vec<AggregatedRow> = totals
            .into_iter()
            .filter_map(|((date, key), sales)| sales.map(|sales| AggregatedRow { key, date, sales }))
            .collect();

        let groups = rows
            .iter()
            .map(|r| &r.key)
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        self.observer.on_event(&PipelineEvent::Preprocessed {
            input_rows: table.len(),
            output_rows: rows.len(),
            groups,
        });

        Ok(rows)
    }

    /// Parse every row into a [`SalesRecord`], failing on the first bad date
    /// or station.
    fn clean(&self, table: &RawTable) -> Result<Vec<SalesRecord>> {
        let date_idx = table.column_index(&self.schema.date)?;
        let sales_idx = table.column_index(&self.schema.sales)?;
        let product_idx = table.column_index(&self.schema.product)?;
        let station_idx = if self.strategy.uses_station() {
            Some(table.column_index(&self.schema.station)?)
        } else {
            None
        };

        table
            .rows()
            .iter()
            .map(|row| {
                let date = parse_date(&row[date_idx]).ok_or_else(|| SalesError::InvalidDate {
                    column: self.schema.date.clone(),
                    value: row[date_idx].clone(),
                })?;

                let station = station_idx
                    .map(|idx| {
                        row[idx]
                            .trim()
                            .parse::<i64>()
                            .map_err(|_| SalesError::InvalidStation {
                                column: self.schema.station.clone(),
                                value: row[idx].clone(),
                            })
                    })
                    .transpose()?;

                Ok(SalesRecord {
                    station,
                    product: normalize_product(&row[product_idx]),
                    date,
                    sales: coerce_sales(&row[sales_idx]),
                })
            })
            .collect()
    }
}

/// Split aggregated rows into one date-ordered `(date, sales)` list per group.
pub fn group_series(rows: &[AggregatedRow]) -> BTreeMap<GroupKey, Vec<(NaiveDate, f64)>> {
    let mut groups: BTreeMap<GroupKey, Vec<(NaiveDate, f64)>> = BTreeMap::new();
    for row in rows {
        groups
            .entry(row.key.clone())
            .or_default()
            .push((row.date, row.sales));
    }
    for points in groups.values_mut() {
        points.sort_by_key(|(date, _)| *date);
    }
    groups
}
