use crate::config::ConnectionConfig;
use crate::error::Result;
use crate::traits::DatabaseDriver;
use crate::types::{FetchedRow, QueryResult};

/// Main entry point for orars.
/// Owns a driver and its configuration, connecting on first use when the
/// configuration is `lazy`.
pub struct OraRsClient<D: DatabaseDriver> {
    driver: D,
    config: ConnectionConfig,
}

#[cfg(feature = "oci")]
impl OraRsClient<crate::drivers::OracleDriver<crate::drivers::OciClient>> {
    /// Connect to an Oracle database through the native client libraries.
    ///
    /// # Example
    /// ```ignore
    /// let config = ConnectionConfig::new()
    ///     .username("scott")
    ///     .password("tiger")
    ///     .database("//localhost/XEPDB1");
    /// let mut client = OraRsClient::connect(config)?;
    /// ```
    pub fn connect(config: ConnectionConfig) -> Result<Self> {
        Self::with_driver(crate::drivers::OracleDriver::oci(), config)
    }
}

impl<D: DatabaseDriver> OraRsClient<D> {
    /// Create a new client with a custom driver.
    /// Connects immediately unless `config.lazy` is set.
    pub fn with_driver(driver: D, config: ConnectionConfig) -> Result<Self> {
        let mut client = Self { driver, config };
        if !client.config.lazy {
            client.ensure_connected()?;
        }
        Ok(client)
    }

    fn ensure_connected(&mut self) -> Result<()> {
        if !self.driver.is_connected() {
            self.driver.connect(&self.config)?;
        }
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.driver.is_connected()
    }

    /// Run a query and collect every row.
    pub fn query(&mut self, sql: &str) -> Result<QueryResult> {
        self.ensure_connected()?;
        if !self.driver.query(sql)? {
            self.driver.free();
            return Ok(QueryResult::new(Vec::new(), Vec::new()));
        }

        let collected = self.collect_rows();
        self.driver.free();
        collected
    }

    fn collect_rows(&mut self) -> Result<QueryResult> {
        let columns = self
            .driver
            .columns_meta()?
            .into_iter()
            .map(|c| c.name)
            .collect();
        let mut rows = Vec::new();
        while let Some(row) = self.driver.fetch(false)? {
            if let FetchedRow::Num(values) = row {
                rows.push(values);
            }
        }
        Ok(QueryResult::new(columns, rows))
    }

    /// Run a statement that returns no rows.
    /// Returns the native row count (rows affected, best-effort).
    pub fn execute(&mut self, sql: &str) -> Result<u64> {
        self.ensure_connected()?;
        self.driver.query(sql)?;
        let count = self.driver.row_count();
        self.driver.free();
        count
    }

    /// Run `sql` limited to `limit` rows starting after `offset` rows.
    pub fn query_page(&mut self, sql: &str, limit: i64, offset: i64) -> Result<QueryResult> {
        let mut sql = sql.to_string();
        self.driver.apply_limit(&mut sql, limit, offset);
        self.query(&sql)
    }

    pub fn begin(&mut self) -> Result<()> {
        self.ensure_connected()?;
        self.driver.begin()
    }

    pub fn commit(&mut self) -> Result<()> {
        self.ensure_connected()?;
        self.driver.commit()
    }

    pub fn rollback(&mut self) -> Result<()> {
        self.ensure_connected()?;
        self.driver.rollback()
    }

    /// Disconnect. A later call that needs the connection reconnects.
    pub fn close(&mut self) {
        if self.driver.is_connected() {
            self.driver.disconnect();
        }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}
