use serde::{Deserialize, Serialize};

/// Names of the source columns holding each logical field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub date: String,
    pub sales: String,
    pub product: String,
    pub station: String,
}

impl Schema {
    pub fn new(
        date: impl Into<String>,
        sales: impl Into<String>,
        product: impl Into<String>,
        station: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            sales: sales.into(),
            product: product.into(),
            station: station.into(),
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new("Transaction Date", "Sales Vol", "Product", "Station #")
    }
}
