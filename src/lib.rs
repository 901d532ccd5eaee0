//! orars - an Oracle driver adapter behind a driver-agnostic contract
//!
//! # Example
//! ```ignore
//! use orars::{ConnectionConfig, DatabaseDriver, OracleDriver};
//!
//! let config = ConnectionConfig::from_value(serde_json::json!({
//!     "user": "scott",
//!     "pass": "tiger",
//!     "db": "//localhost/XEPDB1",
//! }))?;
//!
//! let mut driver = OracleDriver::oci();
//! driver.connect(&config)?;
//!
//! let mut sql = "SELECT empno, ename FROM emp ORDER BY empno".to_string();
//! driver.apply_limit(&mut sql, 10, 0);
//!
//! if driver.query(&sql)? {
//!     while let Some(row) = driver.fetch(true)? {
//!         println!("{:?}", row);
//!     }
//! }
//! driver.free();
//! ```

pub mod config;
pub mod dialect;
pub mod drivers;
pub mod error;
pub mod traits;
pub mod types;

mod client;

// Re-export main types for convenient access
pub use client::OraRsClient;
pub use config::{ConnectionConfig, PaginationStyle};
pub use drivers::OracleDriver;
pub use error::{OraRsError, Result};
pub use traits::{DatabaseDriver, NativeClient, NativeConnection, NativeError, NativeStatement};
pub use types::{ColumnMeta, FetchedRow, FieldType, QueryResult, Row, SqlValue};
