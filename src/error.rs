//! Error types for the salescast library.

use thiserror::Error;

/// Result type alias for salescast operations.
pub type Result<T> = std::result::Result<T, SalesError>;

/// Broad category of a [`SalesError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unusable input data.
    DataValidation,
    /// Not enough history for the requested operation.
    InsufficientHistory,
    /// A model or scaler was used before being fitted.
    ModelNotTrained,
    /// A required configuration value is missing or invalid.
    Configuration,
    /// Numerical failure while computing a result.
    Computation,
}

/// Errors that can occur while preparing, decomposing or forecasting sales.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SalesError {
    /// Input table has no rows.
    #[error("empty input data")]
    EmptyData,

    /// A column named by the schema is absent from the input.
    #[error("missing column '{0}'")]
    MissingColumn(String),

    /// A row has a different number of fields than the header.
    #[error("row {row}: expected {expected} fields, got {got}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// A date value could not be parsed.
    #[error("failed to parse date column '{column}': invalid value '{value}'")]
    InvalidDate { column: String, value: String },

    /// A station value could not be parsed as an integer.
    #[error("failed to parse station column '{column}': invalid value '{value}'")]
    InvalidStation { column: String, value: String },

    /// Strategy filtering left no rows.
    #[error("no data found for {}", describe_filter(.product, .station))]
    NoMatchingRows {
        product: Option<String>,
        station: Option<i64>,
    },

    /// An operation that needs a single series received several groups.
    #[error("expected a single group, found {0}; narrow the grouping strategy")]
    MultipleGroups(usize),

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Model has not been fitted yet.
    #[error("model not trained: call fit before {0}")]
    ModelNotTrained(&'static str),

    /// Scaler used before `fit`.
    #[error("scaler must be fitted before {0}")]
    ScalerNotFitted(&'static str),

    /// Scaler fitted a second time.
    #[error("scaler has already been fitted; create a new pipeline instead of refitting")]
    ScalerAlreadyFitted,

    /// Missing or invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Seasonal decomposition could not be computed.
    #[error("decomposition failed: {0}")]
    Decomposition(String),
}

impl SalesError {
    /// Classify the error into the library's failure taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyData
            | Self::MissingColumn(_)
            | Self::RaggedRow { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidStation { .. }
            | Self::NoMatchingRows { .. }
            | Self::MultipleGroups(_)
            | Self::TimestampError(_) => ErrorKind::DataValidation,
            Self::InsufficientData { .. } => ErrorKind::InsufficientHistory,
            Self::ModelNotTrained(_) | Self::ScalerNotFitted(_) => ErrorKind::ModelNotTrained,
            Self::Configuration(_) | Self::InvalidParameter(_) | Self::ScalerAlreadyFitted => {
                ErrorKind::Configuration
            }
            Self::DimensionMismatch { .. } | Self::Decomposition(_) => ErrorKind::Computation,
        }
    }

    /// Shorthand for `self.kind() == ErrorKind::DataValidation`.
    pub fn is_data_validation(&self) -> bool {
        self.kind() == ErrorKind::DataValidation
    }
}

fn describe_filter(product: &Option<String>, station: &Option<i64>) -> String {
    match (product, station) {
        (Some(p), Some(s)) => format!("product {p} on station {s}"),
        (Some(p), None) => format!("product {p}"),
        (None, Some(s)) => format!("station {s}"),
        (None, None) => "any product or station".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = SalesError::InvalidDate {
            column: "Transaction Date".to_string(),
            value: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to parse date column 'Transaction Date': invalid value 'yesterday'"
        );

        let err = SalesError::InsufficientData { needed: 14, got: 5 };
        assert_eq!(err.to_string(), "insufficient data: need at least 14, got 5");

        let err = SalesError::ModelNotTrained("evaluate");
        assert_eq!(err.to_string(), "model not trained: call fit before evaluate");
    }

    #[test]
    fn no_matching_rows_names_the_filter() {
        let err = SalesError::NoMatchingRows {
            product: Some("ADO".to_string()),
            station: Some(796),
        };
        assert_eq!(err.to_string(), "no data found for product ADO on station 796");

        let err = SalesError::NoMatchingRows {
            product: Some("ADO".to_string()),
            station: None,
        };
        assert_eq!(err.to_string(), "no data found for product ADO");
    }

    #[test]
    fn errors_are_classified() {
        assert!(SalesError::MissingColumn("Product".into()).is_data_validation());
        assert_eq!(
            SalesError::InsufficientData { needed: 2, got: 1 }.kind(),
            ErrorKind::InsufficientHistory
        );
        assert_eq!(
            SalesError::ModelNotTrained("predict").kind(),
            ErrorKind::ModelNotTrained
        );
        assert_eq!(
            SalesError::Configuration("station required".into()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            SalesError::Decomposition("non-positive".into()).kind(),
            ErrorKind::Computation
        );
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = SalesError::EmptyData;
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
