use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::types::{ColumnMeta, FetchedRow, FieldType, SqlValue};

/// Trait for database driver implementations.
/// Drivers are responsible for:
/// - Opening and closing the native connection
/// - Executing statements and tracking the active result set
/// - Transaction control
/// - Rendering values and pagination in the database's dialect
///
/// Drivers are single-owner and blocking; callers that share one must
/// serialize access themselves.
pub trait DatabaseDriver {
    /// Native connection handle.
    type Resource;
    /// Native statement/result handle.
    type ResultResource;

    /// Connect to a database.
    fn connect(&mut self, config: &ConnectionConfig) -> Result<()>;

    /// Whether a native connection is currently open.
    fn is_connected(&self) -> bool;

    /// Disconnect from the database. Safe to call more than once.
    fn disconnect(&mut self);

    /// Execute a SQL statement, replacing the active result set.
    /// Returns true if the statement produced a result set.
    fn query(&mut self, sql: &str) -> Result<bool>;

    /// Number of rows affected by the last INSERT, UPDATE or DELETE.
    fn affected_rows(&self) -> Result<u64>;

    /// Identity generated by the last INSERT.
    fn insert_id(&self, sequence: Option<&str>) -> Result<i64>;

    fn begin(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    /// Render a value or identifier as a SQL fragment.
    fn format(&self, value: &SqlValue, kind: FieldType) -> Result<String>;

    /// Add LIMIT/OFFSET semantics to `sql`. A negative `limit` means
    /// "no limit"; an `offset` below 1 means "no offset".
    fn apply_limit(&self, sql: &mut String, limit: i64, offset: i64);

    /// Number of rows in the active result set.
    fn row_count(&self) -> Result<u64>;

    /// Fetch the next row, keyed by column name when `associative`.
    /// Returns `Ok(None)` when no rows remain.
    fn fetch(&mut self, associative: bool) -> Result<Option<FetchedRow>>;

    /// Move the cursor to the 0-based `row` without fetching.
    fn seek(&mut self, row: u64) -> Result<bool>;

    /// Release the active result set, if any.
    fn free(&mut self);

    /// Metadata for every column of the active result set.
    fn columns_meta(&self) -> Result<Vec<ColumnMeta>>;

    fn resource(&self) -> Option<&Self::Resource>;

    fn result_resource(&self) -> Option<&Self::ResultResource>;
}
