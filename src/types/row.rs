use std::collections::HashMap;

use crate::error::{OraRsError, Result};

/// A row returned by `DatabaseDriver::fetch`.
/// Values are rendered as strings by the native client; SQL NULL is `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedRow {
    /// Column name to value.
    Assoc(HashMap<String, Option<String>>),
    /// Values in column order.
    Num(Vec<Option<String>>),
}

impl FetchedRow {
    /// Returns the number of values in this row.
    pub fn len(&self) -> usize {
        match self {
            FetchedRow::Assoc(values) => values.len(),
            FetchedRow::Num(values) => values.len(),
        }
    }

    /// Returns true if this row has no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single row result from a query.
/// Values are stored as strings and accessed by column name.
#[derive(Debug, Clone)]
pub struct Row {
    values: HashMap<String, Option<String>>,
}

impl Row {
    /// Creates a new Row from column names and values.
    pub(crate) fn new(columns: &[String], values: Vec<Option<String>>) -> Self {
        let values = columns
            .iter()
            .zip(values.into_iter())
            .map(|(col, val)| (col.clone(), val))
            .collect();
        Self { values }
    }

    /// Gets a value by column name. SQL NULL is `Ok(None)`.
    pub fn get(&self, column: &str) -> Result<Option<&str>> {
        self.values
            .get(column)
            .map(|v| v.as_deref())
            .ok_or_else(|| OraRsError::ColumnNotFound(column.to_string()))
    }

    /// Returns all column names in this row.
    pub fn columns(&self) -> Vec<&str> {
        self.values.keys().map(|s| s.as_str()).collect()
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if this row has no columns.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Result of a query execution, containing zero or more rows.
#[derive(Debug)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl QueryResult {
    /// Creates a QueryResult from column names and positional rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|values| Row::new(&columns, values))
            .collect();
        Self { columns, rows }
    }

    /// Extracts a single row from the result.
    /// Returns an error if the result contains zero or more than one row.
    pub fn single_row(self) -> Result<Row> {
        let actual = self.rows.len();
        let mut rows = self.rows.into_iter();
        match (rows.next(), rows.next()) {
            (Some(row), None) => Ok(row),
            _ => Err(OraRsError::UnexpectedRowCount {
                expected: 1,
                actual,
            }),
        }
    }

    /// Returns all rows from the result.
    pub fn rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns a reference to the rows without consuming the result.
    pub fn rows_ref(&self) -> &[Row] {
        &self.rows
    }

    /// Returns the column names from this result.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the number of rows in this result.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if this result contains no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
