use thiserror::Error;

use crate::config::ConnectionConfig;
use crate::error::OraRsError;

/// Error state reported by the native client, either connection- or
/// statement-scoped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (code {code})")]
pub struct NativeError {
    pub code: i32,
    pub message: String,
}

impl NativeError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Translates this native error into a driver error, attaching the
    /// statement that triggered it.
    pub fn into_driver_error(self, sql: Option<&str>) -> OraRsError {
        OraRsError::Driver {
            message: self.message,
            code: self.code,
            sql: sql.map(str::to_string),
        }
    }
}

impl From<NativeError> for OraRsError {
    fn from(err: NativeError) -> Self {
        err.into_driver_error(None)
    }
}

pub type NativeResult<T> = std::result::Result<T, NativeError>;

/// How an executed statement interacts with the open transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Commit as soon as the statement succeeds.
    CommitOnSuccess,
    /// Leave the transaction open for an explicit commit or rollback.
    Deferred,
}

/// Column description as reported by the native client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeColumn {
    pub name: String,
    pub type_name: String,
    pub size: Option<u32>,
    pub scale: Option<i16>,
    pub precision: Option<u16>,
}

impl NativeColumn {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            size: None,
            scale: None,
            precision: None,
        }
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn scale(mut self, scale: i16) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn precision(mut self, precision: u16) -> Self {
        self.precision = Some(precision);
        self
    }
}

/// Entry point into a native client library.
pub trait NativeClient {
    type Connection: NativeConnection;

    /// Open a new session.
    fn connect(&self, config: &ConnectionConfig) -> NativeResult<Self::Connection>;
}

/// An open native session.
pub trait NativeConnection {
    type Statement: NativeStatement;

    /// Prepare `sql` without running it.
    fn parse(&mut self, sql: &str) -> NativeResult<Self::Statement>;

    /// Run a parsed statement.
    fn execute(&mut self, statement: &mut Self::Statement, mode: CommitMode) -> NativeResult<()>;

    fn commit(&mut self) -> NativeResult<()>;

    fn rollback(&mut self) -> NativeResult<()>;

    /// Close the session, consuming the handle.
    fn close(self) -> NativeResult<()>;
}

/// A parsed (and possibly executed) native statement.
/// Cursors are forward-only.
pub trait NativeStatement {
    /// Whether executing this statement produces a result set.
    fn is_query(&self) -> bool;

    /// Rows fetched so far for queries, rows affected otherwise.
    fn num_rows(&self) -> u64;

    /// Advance the cursor. `None` once the result set is exhausted.
    fn fetch(&mut self) -> NativeResult<Option<Vec<Option<String>>>>;

    /// Columns of the result set, in order. Empty for non-queries.
    fn columns(&self) -> NativeResult<Vec<NativeColumn>>;
}
