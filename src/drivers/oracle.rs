use std::collections::HashMap;

use crate::config::{ConnectionConfig, PaginationStyle};
use crate::dialect;
use crate::error::{OraRsError, Result};
use crate::traits::{
    CommitMode, DatabaseDriver, NativeClient, NativeConnection, NativeError, NativeStatement,
};
use crate::types::{ColumnMeta, FetchedRow, FieldType, SqlValue};

/// The statement produced by the most recent `query`.
pub struct ActiveStatement<S> {
    statement: S,
    sql: String,
    /// Visible column names; excludes the pagination row number.
    column_names: Vec<String>,
}

impl<S> ActiveStatement<S> {
    /// The native statement handle.
    pub fn native(&self) -> &S {
        &self.statement
    }

    /// The SQL text this statement was parsed from.
    pub fn sql(&self) -> &str {
        &self.sql
    }
}

type StatementOf<C> = <<C as NativeClient>::Connection as NativeConnection>::Statement;

/// Oracle driver implementation over a native client.
///
/// # Example
/// ```
/// use orars::drivers::{InMemoryClient, InMemoryResponseBuilder, OracleDriver};
/// use orars::{ConnectionConfig, DatabaseDriver};
///
/// let client = InMemoryClient::new().with_response(
///     InMemoryResponseBuilder::new()
///         .columns(&["ID"])
///         .row(&[Some("1")])
///         .build(),
/// );
/// let mut driver = OracleDriver::new(client);
/// driver.connect(&ConnectionConfig::new().username("scott")).unwrap();
/// assert!(driver.query("SELECT id FROM emp").unwrap());
/// ```
pub struct OracleDriver<C: NativeClient> {
    client: C,
    connection: Option<C::Connection>,
    active: Option<ActiveStatement<StatementOf<C>>>,
    autocommit: bool,
    pagination: PaginationStyle,
}

impl<C: NativeClient> OracleDriver<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            connection: None,
            active: None,
            autocommit: true,
            pagination: PaginationStyle::default(),
        }
    }

    /// Whether statements are committed as soon as they succeed.
    pub fn is_autocommit(&self) -> bool {
        self.autocommit
    }

    fn connection_mut(&mut self) -> Result<&mut C::Connection> {
        self.connection.as_mut().ok_or(OraRsError::NotConnected)
    }

    fn active(&self) -> Result<&ActiveStatement<StatementOf<C>>> {
        self.active.as_ref().ok_or(OraRsError::NoResultSet)
    }
}

#[cfg(feature = "oci")]
impl OracleDriver<crate::drivers::OciClient> {
    /// Create a driver backed by the Oracle client libraries.
    pub fn oci() -> Self {
        Self::new(crate::drivers::OciClient)
    }
}

/// Translate a native error, attaching the statement that caused it.
fn driver_error(err: NativeError, sql: Option<&str>) -> OraRsError {
    err.into_driver_error(sql)
}

impl<C: NativeClient> DatabaseDriver for OracleDriver<C> {
    type Resource = C::Connection;
    type ResultResource = ActiveStatement<StatementOf<C>>;

    fn connect(&mut self, config: &ConnectionConfig) -> Result<()> {
        if self.connection.is_some() {
            self.disconnect();
        }

        tracing::debug!(
            username = config.username.as_deref().unwrap_or(""),
            database = config.database.as_deref().unwrap_or(""),
            "connecting to Oracle"
        );
        let connection = self
            .client
            .connect(config)
            .map_err(|e| driver_error(e, None))?;

        self.connection = Some(connection);
        self.pagination = config.pagination;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    fn disconnect(&mut self) {
        self.free();
        match self.connection.take() {
            Some(connection) => {
                if let Err(e) = connection.close() {
                    tracing::warn!(code = e.code, "error closing Oracle connection: {}", e.message);
                }
            }
            None => tracing::debug!("disconnect called without an open connection"),
        }
    }

    fn query(&mut self, sql: &str) -> Result<bool> {
        self.free();
        let mode = if self.autocommit {
            CommitMode::CommitOnSuccess
        } else {
            CommitMode::Deferred
        };
        tracing::debug!(sql, ?mode, "executing statement");

        let connection = self.connection_mut()?;
        let mut statement = connection.parse(sql).map_err(|e| driver_error(e, Some(sql)))?;
        connection
            .execute(&mut statement, mode)
            .map_err(|e| driver_error(e, Some(sql)))?;

        let has_rows = statement.is_query();
        let mut column_names: Vec<String> = if has_rows {
            statement
                .columns()
                .map_err(|e| driver_error(e, Some(sql)))?
                .into_iter()
                .map(|c| c.name)
                .collect()
        } else {
            Vec::new()
        };
        if column_names.last().map(String::as_str) == Some(dialect::ROWNUM_COLUMN) {
            column_names.pop();
        }

        self.active = Some(ActiveStatement {
            statement,
            sql: sql.to_string(),
            column_names,
        });
        Ok(has_rows)
    }

    fn affected_rows(&self) -> Result<u64> {
        Err(OraRsError::NotImplemented("affected_rows"))
    }

    fn insert_id(&self, _sequence: Option<&str>) -> Result<i64> {
        Err(OraRsError::NotSupported(
            "Oracle does not support autoincrementing.".to_string(),
        ))
    }

    fn begin(&mut self) -> Result<()> {
        tracing::debug!("beginning transaction");
        self.autocommit = false;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        tracing::debug!("committing transaction");
        self.connection_mut()?
            .commit()
            .map_err(|e| driver_error(e, None))?;
        self.autocommit = true;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        tracing::debug!("rolling back transaction");
        self.connection_mut()?
            .rollback()
            .map_err(|e| driver_error(e, None))?;
        self.autocommit = true;
        Ok(())
    }

    fn format(&self, value: &SqlValue, kind: FieldType) -> Result<String> {
        dialect::format_value(value, kind)
    }

    fn apply_limit(&self, sql: &mut String, limit: i64, offset: i64) {
        dialect::apply_limit(sql, limit, offset, self.pagination);
    }

    fn row_count(&self) -> Result<u64> {
        Ok(self.active()?.statement.num_rows())
    }

    fn fetch(&mut self, associative: bool) -> Result<Option<FetchedRow>> {
        let active = self.active.as_mut().ok_or(OraRsError::NoResultSet)?;
        if !active.statement.is_query() {
            return Ok(None);
        }

        let mut values = match active.statement.fetch() {
            Ok(Some(values)) => values,
            Ok(None) => return Ok(None),
            Err(e) => return Err(driver_error(e, Some(&active.sql))),
        };

        values.truncate(active.column_names.len());

        let row = if associative {
            let map: HashMap<String, Option<String>> = active
                .column_names
                .iter()
                .cloned()
                .zip(values)
                .collect();
            FetchedRow::Assoc(map)
        } else {
            FetchedRow::Num(values)
        };
        Ok(Some(row))
    }

    fn seek(&mut self, _row: u64) -> Result<bool> {
        Err(OraRsError::NotImplemented("seek"))
    }

    fn free(&mut self) {
        self.active = None;
    }

    fn columns_meta(&self) -> Result<Vec<ColumnMeta>> {
        let active = self.active()?;
        let mut columns = active
            .statement
            .columns()
            .map_err(|e| driver_error(e, Some(&active.sql)))?;
        columns.truncate(active.column_names.len());

        Ok(columns
            .into_iter()
            .map(|c| ColumnMeta {
                name: c.name,
                table: None,
                native_type: c.type_name,
                size: c.size,
                scale: c.scale,
                precision: c.precision,
            })
            .collect())
    }

    fn resource(&self) -> Option<&Self::Resource> {
        self.connection.as_ref()
    }

    fn result_resource(&self) -> Option<&Self::ResultResource> {
        self.active.as_ref()
    }
}

impl<C: NativeClient> Drop for OracleDriver<C> {
    fn drop(&mut self) {
        if self.connection.is_some() {
            self.disconnect();
        }
    }
}
