//! Grouping strategies: which rows form one series and how it is labelled.
//!
//! A [`GroupingStrategy`] is shared, read-only configuration. The
//! preprocessor uses it to filter cleaned records and build a [`GroupKey`]
//! for each of them; the decomposer uses it to turn keys back into
//! human-readable [`GroupIdentifier`]s.
//!
//! # Example
//!
//! ```
//! use salescast::core::Schema;
//! use salescast::strategy::GroupingStrategy;
//!
//! let schema = Schema::default();
//! let strategy = GroupingStrategy::by_station_and_product(Some(796), Some("ADO"));
//!
//! assert_eq!(
//!     strategy.grouping_columns(&schema),
//!     vec!["Station #", "Product", "Transaction Date"]
//! );
//! assert_eq!(
//!     strategy.folder_name().unwrap(),
//!     std::path::PathBuf::from("per_station").join("station 796")
//! );
//! ```

use crate::core::Schema;
use crate::error::{Result, SalesError};
use crate::preprocess::{normalize_product, SalesRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One component of a [`GroupKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyValue {
    Station(i64),
    Product(String),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Station(s) => write!(f, "{s}"),
            Self::Product(p) => f.write_str(p),
        }
    }
}

/// Ordered grouping-column values (date excluded) identifying one series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey(Vec<KeyValue>);

impl GroupKey {
    pub fn new(parts: Vec<KeyValue>) -> Self {
        Self(parts)
    }

    pub fn parts(&self) -> &[KeyValue] {
        &self.0
    }

    /// First station component, if any.
    pub fn station(&self) -> Option<i64> {
        self.0.iter().find_map(|part| match part {
            KeyValue::Station(s) => Some(*s),
            KeyValue::Product(_) => None,
        })
    }

    /// First product component, if any.
    pub fn product(&self) -> Option<&str> {
        self.0.iter().find_map(|part| match part {
            KeyValue::Product(p) => Some(p.as_str()),
            KeyValue::Station(_) => None,
        })
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

/// Human-readable label of a group, used for output only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupIdentifier {
    pub category: String,
    pub station: Option<i64>,
}

impl fmt::Display for GroupIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.station {
            Some(station) => write!(f, "station {station} / {}", self.category),
            None => f.write_str(&self.category),
        }
    }
}

/// Policy deciding which rows belong together and how a group is labelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GroupingStrategy {
    /// One series per product, optionally restricted to a single product.
    ByProduct {
        #[serde(default)]
        product: Option<String>,
    },
    /// One series per (station, product), optionally restricted.
    ByStationAndProduct {
        #[serde(default)]
        station: Option<i64>,
        #[serde(default)]
        product: Option<String>,
    },
}

impl GroupingStrategy {
    pub fn by_product(product: Option<&str>) -> Self {
        Self::ByProduct {
            product: product.map(str::to_string),
        }
    }

    pub fn by_station_and_product(station: Option<i64>, product: Option<&str>) -> Self {
        Self::ByStationAndProduct {
            station,
            product: product.map(str::to_string),
        }
    }

    /// Column holding the category label of a group.
    pub fn category_column<'s>(&self, schema: &'s Schema) -> &'s str {
        match self {
            Self::ByProduct { .. } | Self::ByStationAndProduct { .. } => &schema.product,
        }
    }

    /// Columns whose values (together with the date) identify one aggregated row.
    pub fn grouping_columns<'s>(&self, schema: &'s Schema) -> Vec<&'s str> {
        match self {
            Self::ByProduct { .. } => vec![&schema.product, &schema.date],
            Self::ByStationAndProduct { .. } => {
                vec![&schema.station, &schema.product, &schema.date]
            }
        }
    }

    /// Grouping columns without the date: the columns that identify a series.
    pub fn group_by_columns<'s>(&self, schema: &'s Schema) -> Vec<&'s str> {
        self.grouping_columns(schema)
            .into_iter()
            .filter(|column| *column != schema.date)
            .collect()
    }

    /// Whether the station column takes part in grouping.
    pub fn uses_station(&self) -> bool {
        matches!(self, Self::ByStationAndProduct { .. })
    }

    /// Keep only the records selected by this strategy.
    ///
    /// Fails with [`SalesError::NoMatchingRows`] rather than returning an
    /// empty set.
    pub fn filter(&self, records: Vec<SalesRecord>) -> Result<Vec<SalesRecord>> {
        let (station, product) = match self {
            Self::ByProduct { product } => (None, product.as_deref()),
            Self::ByStationAndProduct { station, product } => (*station, product.as_deref()),
        };
        let wanted_product = product.map(normalize_product);

        let kept: Vec<SalesRecord> = records
            .into_iter()
            .filter(|r| station.is_none_or(|s| r.station == Some(s)))
            .filter(|r| {
                wanted_product
                    .as_deref()
                    .is_none_or(|p| r.product == p)
            })
            .collect();

        if kept.is_empty() {
            return Err(SalesError::NoMatchingRows {
                product: product.map(str::to_string),
                station,
            });
        }
        Ok(kept)
    }

    /// Key of the series a cleaned record belongs to.
    pub fn group_key(&self, record: &SalesRecord) -> GroupKey {
        match self {
            Self::ByProduct { .. } => GroupKey::new(vec![KeyValue::Product(record.product.clone())]),
            Self::ByStationAndProduct { .. } => {
                let mut parts = Vec::with_capacity(2);
                if let Some(station) = record.station {
                    parts.push(KeyValue::Station(station));
                }
                parts.push(KeyValue::Product(record.product.clone()));
                GroupKey::new(parts)
            }
        }
    }

    /// Label a group key.
    pub fn identify(&self, key: &GroupKey) -> GroupIdentifier {
        match self {
            Self::ByProduct { .. } => GroupIdentifier {
                category: key
                    .parts()
                    .first()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                station: None,
            },
            Self::ByStationAndProduct { .. } => match key.parts() {
                [KeyValue::Station(station), category, ..] => GroupIdentifier {
                    category: category.to_string(),
                    station: Some(*station),
                },
                parts => GroupIdentifier {
                    category: parts
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join("/"),
                    station: None,
                },
            },
        }
    }

    /// Relative output directory for artefacts of this strategy.
    pub fn folder_name(&self) -> Result<PathBuf> {
        match self {
            Self::ByProduct { .. } => Ok(PathBuf::from("per_product")),
            Self::ByStationAndProduct { station, .. } => {
                let station = station.ok_or_else(|| {
                    SalesError::Configuration(
                        "station must be set to derive a per-station folder".to_string(),
                    )
                })?;
                Ok(PathBuf::from("per_station").join(format!("station {station}")))
            }
        }
    }
}

impl fmt::Display for GroupingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_opt = |v: Option<String>| v.unwrap_or_else(|| "*".to_string());
        match self {
            Self::ByProduct { product } => {
                write!(f, "by-product(product={})", fmt_opt(product.clone()))
            }
            Self::ByStationAndProduct { station, product } => write!(
                f,
                "by-station-and-product(station={}, product={})",
                fmt_opt(station.map(|s| s.to_string())),
                fmt_opt(product.clone())
            ),
        }
    }
}
