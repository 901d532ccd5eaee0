use thiserror::Error;

/// Error type for orars operations
#[derive(Debug, Error)]
pub enum OraRsError {
    /// A call into the native client failed.
    #[error("{message}")]
    Driver {
        message: String,
        code: i32,
        /// The statement that triggered the failure, if any.
        sql: Option<String>,
    },

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("{0}")]
    NotSupported(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not connected to a database")]
    NotConnected,

    #[error("No active result set")]
    NoResultSet,

    #[error("Invalid connection configuration: {0}")]
    Config(String),

    #[error("Expected {expected} row(s), got {actual}")]
    UnexpectedRowCount { expected: usize, actual: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),
}

impl OraRsError {
    /// Native error code carried by a driver error.
    pub fn code(&self) -> Option<i32> {
        match self {
            OraRsError::Driver { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// SQL text carried by a driver error.
    pub fn sql(&self) -> Option<&str> {
        match self {
            OraRsError::Driver { sql, .. } => sql.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for OraRsError {
    fn from(err: serde_json::Error) -> Self {
        OraRsError::Config(err.to_string())
    }
}

/// Result type alias for orars operations
pub type Result<T> = std::result::Result<T, OraRsError>;
