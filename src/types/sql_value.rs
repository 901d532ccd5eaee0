use chrono::{DateTime, Utc};

/// Represents a SQL value in a driver-agnostic way.
/// Drivers are responsible for rendering these as native literals.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Text(String),
    Int32(i32),
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Timestamp(DateTime<Utc>),
}

impl SqlValue {
    /// Loose truthiness: `Null`, `false`, zero, `""` and `"0"` are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            SqlValue::Null => false,
            SqlValue::Text(s) => !(s.is_empty() || s == "0"),
            SqlValue::Int32(i) => *i != 0,
            SqlValue::Int64(i) => *i != 0,
            SqlValue::Float64(f) => *f != 0.0,
            SqlValue::Bool(b) => *b,
            SqlValue::Timestamp(_) => true,
        }
    }
}

/// The kind a value is formatted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Text,
    Binary,
    Bool,
    Integer,
    Float,
    Date,
    DateTime,
    Time,
    Identifier,
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int32(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int64(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float64(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for SqlValue {
    fn from(value: DateTime<Utc>) -> Self {
        SqlValue::Timestamp(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}
