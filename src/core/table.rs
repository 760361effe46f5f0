//! In-memory tabular input: rows of text cells under named columns.

use crate::error::{Result, SalesError};

/// Raw rows with named columns, as read from one or more source files.
///
/// Column names are whitespace-trimmed on construction. Cells are kept as
/// text; parsing happens in the preprocessor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create an empty table with the given header.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            columns: columns
                .into_iter()
                .map(|c| c.as_ref().trim().to_string())
                .collect(),
            rows: Vec::new(),
        }
    }

    /// Create a table from a header and rows, validating row widths.
    pub fn from_rows<I, S, R>(columns: I, rows: R) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        R: IntoIterator<Item = Vec<String>>,
    {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row; its width must match the header.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(SalesError::RaggedRow {
                row: self.rows.len(),
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Concatenate tables without deduplication.
    ///
    /// Columns are matched by name; the first table's header is used and every
    /// later table must contain all of its columns (in any order).
    pub fn concat(tables: impl IntoIterator<Item = RawTable>) -> Result<Self> {
        let mut tables = tables.into_iter();
        let Some(mut combined) = tables.next() else {
            return Err(SalesError::EmptyData);
        };

        for table in tables {
            let mapping = combined
                .columns
                .iter()
                .map(|name| table.column_index(name))
                .collect::<Result<Vec<_>>>()?;
            for row in table.rows {
                combined
                    .rows
                    .push(mapping.iter().map(|&i| row[i].clone()).collect());
            }
        }

        Ok(combined)
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column, or a `MissingColumn` error.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| SalesError::MissingColumn(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn header_names_are_trimmed() {
        let table = RawTable::new([" Product ", "Sales Vol\t"]);
        assert_eq!(table.columns(), &["Product", "Sales Vol"]);
        assert_eq!(table.column_index("Sales Vol").unwrap(), 1);
        assert!(matches!(
            table.column_index("Station #"),
            Err(SalesError::MissingColumn(_))
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let mut table = RawTable::new(["a", "b"]);
        table.push_row(row(&["1", "2"])).unwrap();
        let err = table.push_row(row(&["1"])).unwrap_err();
        assert_eq!(
            err,
            SalesError::RaggedRow {
                row: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn concat_matches_columns_by_name_and_keeps_duplicates() {
        let first = RawTable::from_rows(["a", "b"], vec![row(&["1", "x"])]).unwrap();
        let second = RawTable::from_rows(["b", "a"], vec![row(&["x", "1"])]).unwrap();

        let combined = RawTable::concat([first, second]).unwrap();

        assert_eq!(combined.len(), 2);
        assert_eq!(combined.rows()[0], combined.rows()[1]);
    }

    #[test]
    fn concat_requires_shared_columns() {
        let first = RawTable::new(["a", "b"]);
        let second = RawTable::new(["a"]);
        assert!(matches!(
            RawTable::concat([first, second]),
            Err(SalesError::MissingColumn(c)) if c == "b"
        ));
        assert!(matches!(
            RawTable::concat(Vec::new()),
            Err(SalesError::EmptyData)
        ));
    }
}
