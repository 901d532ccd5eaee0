//! Oracle SQL rendering: literals, identifiers and pagination.

use crate::config::PaginationStyle;
use crate::error::{OraRsError, Result};
use crate::types::{FieldType, SqlValue};

/// Render `value` as an Oracle SQL fragment of the given kind.
///
/// Dates and datetimes are rendered as Unix epoch seconds.
pub fn format_value(value: &SqlValue, kind: FieldType) -> Result<String> {
    if !matches!(
        kind,
        FieldType::Text
            | FieldType::Identifier
            | FieldType::Bool
            | FieldType::Date
            | FieldType::DateTime
    ) {
        return Err(OraRsError::InvalidArgument(format!(
            "unsupported formatting type {:?}",
            kind
        )));
    }
    if let SqlValue::Null = value {
        return Ok("NULL".to_string());
    }

    match kind {
        FieldType::Text => Ok(quote_text(&text_of(value)?)),
        FieldType::Identifier => match value {
            SqlValue::Text(name) => Ok(quote_identifier(name)),
            other => Err(OraRsError::InvalidArgument(format!(
                "identifier must be text, got {:?}",
                other
            ))),
        },
        FieldType::Bool => Ok(if value.is_truthy() { "1" } else { "0" }.to_string()),
        _ => epoch_seconds(value).map(|secs| secs.to_string()),
    }
}

/// Wrap `text` in single quotes, doubling embedded quotes.
pub fn quote_text(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Quote each dot-separated part of `name` with double quotes.
/// A `*` part is left bare so `t.*` stays valid.
pub fn quote_identifier(name: &str) -> String {
    name.split('.')
        .map(|part| {
            if part == "*" {
                part.to_string()
            } else {
                format!("\"{}\"", part.replace('"', "\"\""))
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Row-number column added by `PaginationStyle::RowNum` when paging with an
/// offset. `OracleDriver` hides it from fetched rows and column metadata.
pub const ROWNUM_COLUMN: &str = "__rnum";

/// Add pagination to `sql`. No-op when `limit < 0` and `offset < 1`.
pub fn apply_limit(sql: &mut String, limit: i64, offset: i64, style: PaginationStyle) {
    if limit < 0 && offset < 1 {
        return;
    }

    match style {
        PaginationStyle::FetchFirst => {
            if offset > 0 {
                sql.push_str(&format!(" OFFSET {} ROWS", offset));
                if limit >= 0 {
                    sql.push_str(&format!(" FETCH NEXT {} ROWS ONLY", limit));
                }
            } else {
                sql.push_str(&format!(" FETCH FIRST {} ROWS ONLY", limit));
            }
        }
        PaginationStyle::RowNum => {
            *sql = if offset > 0 {
                let mut inner = format!(
                    "SELECT t.*, ROWNUM AS \"{}\" FROM ({}) t",
                    ROWNUM_COLUMN, sql
                );
                // no upper bound once limit + offset leaves i64
                match limit.checked_add(offset) {
                    Some(upper) if limit >= 0 => {
                        inner.push_str(&format!(" WHERE ROWNUM <= {}", upper))
                    }
                    _ => {}
                }
                format!(
                    "SELECT * FROM ({}) WHERE \"{}\" > {}",
                    inner, ROWNUM_COLUMN, offset
                )
            } else {
                format!("SELECT * FROM ({}) WHERE ROWNUM <= {}", sql, limit)
            };
        }
    }
}

fn text_of(value: &SqlValue) -> Result<String> {
    match value {
        SqlValue::Text(s) => Ok(s.clone()),
        SqlValue::Int32(i) => Ok(i.to_string()),
        SqlValue::Int64(i) => Ok(i.to_string()),
        SqlValue::Float64(f) => Ok(f.to_string()),
        SqlValue::Bool(b) => Ok(if *b { "1" } else { "" }.to_string()),
        SqlValue::Timestamp(ts) => Ok(ts.to_rfc3339()),
        SqlValue::Null => Err(OraRsError::InvalidArgument("NULL has no text".to_string())),
    }
}

fn epoch_seconds(value: &SqlValue) -> Result<i64> {
    match value {
        SqlValue::Timestamp(ts) => Ok(ts.timestamp()),
        SqlValue::Int32(i) => Ok(i64::from(*i)),
        SqlValue::Int64(i) => Ok(*i),
        SqlValue::Text(s) => s.trim().parse().map_err(|_| {
            OraRsError::InvalidArgument(format!("'{}' is not a Unix timestamp", s))
        }),
        other => Err(OraRsError::InvalidArgument(format!(
            "{:?} is not a date",
            other
        ))),
    }
}
