use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{OraRsError, Result};

/// Canonical configuration keys and the aliases accepted for them.
const ALIASES: &[(&str, &str)] = &[("username", "user"), ("password", "pass"), ("database", "db")];

/// How `apply_limit` expresses pagination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationStyle {
    /// `OFFSET n ROWS FETCH NEXT m ROWS ONLY` (Oracle 12c and later).
    #[default]
    FetchFirst,
    /// Nested `ROWNUM` filters, for servers older than 12c.
    RowNum,
}

/// Connection options for the Oracle driver.
///
/// `database` is either the name of a local instance or an entry in
/// `tnsnames.ora` / an Easy Connect string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub charset: Option<String>,
    /// Defer connecting until the connection is first needed.
    pub lazy: bool,
    pub pagination: PaginationStyle,
}

impl ConnectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a config from a key/value map, accepting `user`, `pass` and `db`
    /// as aliases. The canonical key wins when both spellings are present.
    ///
    /// # Example
    /// ```
    /// use orars::ConnectionConfig;
    ///
    /// let config = ConnectionConfig::from_value(serde_json::json!({
    ///     "user": "scott",
    ///     "pass": "tiger",
    ///     "db": "//localhost/XEPDB1",
    /// }))
    /// .unwrap();
    /// assert_eq!(config.username.as_deref(), Some("scott"));
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(mut map) => {
                normalize_aliases(&mut map);
                Ok(serde_json::from_value(Value::Object(map))?)
            }
            other => Err(OraRsError::Config(format!(
                "expected a map of options, got {}",
                other
            ))),
        }
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }

    pub fn pagination(mut self, style: PaginationStyle) -> Self {
        self.pagination = style;
        self
    }
}

fn normalize_aliases(map: &mut Map<String, Value>) {
    for (key, alias) in ALIASES {
        let aliased = map.remove(*alias);
        if !map.contains_key(*key) {
            if let Some(value) = aliased {
                map.insert((*key).to_string(), value);
            }
        }
    }
}
