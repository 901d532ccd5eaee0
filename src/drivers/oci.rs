use oracle::sql_type::OracleType;
use oracle::{Connection, ResultSet, Row, Statement};

use crate::config::ConnectionConfig;
use crate::traits::{
    CommitMode, NativeClient, NativeColumn, NativeConnection, NativeError, NativeResult,
    NativeStatement,
};

/// Native client backed by the Oracle client libraries (ODPI-C).
#[derive(Debug, Clone, Copy, Default)]
pub struct OciClient;

impl NativeClient for OciClient {
    type Connection = OciConnection;

    fn connect(&self, config: &ConnectionConfig) -> NativeResult<OciConnection> {
        if let Some(charset) = config.charset.as_deref() {
            if !is_utf8(charset) {
                tracing::warn!(charset, "the Oracle client always uses UTF-8; ignoring charset");
            }
        }

        let conn = Connection::connect(
            config.username.as_deref().unwrap_or(""),
            config.password.as_deref().unwrap_or(""),
            config.database.as_deref().unwrap_or(""),
        )?;
        Ok(OciConnection { conn })
    }
}

/// An open Oracle session.
pub struct OciConnection {
    conn: Connection,
}

impl OciConnection {
    /// The underlying `oracle` connection.
    pub fn as_inner(&self) -> &Connection {
        &self.conn
    }
}

impl NativeConnection for OciConnection {
    type Statement = OciStatement;

    fn parse(&mut self, sql: &str) -> NativeResult<OciStatement> {
        let statement = self.conn.statement(sql).build()?;
        Ok(OciStatement {
            sql: sql.to_string(),
            is_query: statement.is_query(),
            state: OciState::Parsed(statement),
        })
    }

    fn execute(&mut self, statement: &mut OciStatement, mode: CommitMode) -> NativeResult<()> {
        self.conn
            .set_autocommit(mode == CommitMode::CommitOnSuccess);

        let parsed = match std::mem::replace(&mut statement.state, OciState::Done { affected: 0 }) {
            OciState::Parsed(parsed) => parsed,
            other => {
                statement.state = other;
                return Err(NativeError::new(0, "statement has already been executed"));
            }
        };

        if statement.is_query {
            // Re-parsed through the statement cache so the result set owns its statement.
            drop(parsed);
            let rows = self.conn.query(&statement.sql, &[])?;
            let columns = rows.column_info().iter().map(describe).collect();
            statement.state = OciState::Rows {
                rows,
                columns,
                fetched: 0,
            };
        } else {
            let mut parsed = parsed;
            parsed.execute(&[])?;
            statement.state = OciState::Done {
                affected: parsed.row_count()?,
            };
        }
        Ok(())
    }

    fn commit(&mut self) -> NativeResult<()> {
        Ok(self.conn.commit()?)
    }

    fn rollback(&mut self) -> NativeResult<()> {
        Ok(self.conn.rollback()?)
    }

    fn close(self) -> NativeResult<()> {
        Ok(self.conn.close()?)
    }
}

enum OciState {
    Parsed(Statement),
    Rows {
        rows: ResultSet<'static, Row>,
        columns: Vec<NativeColumn>,
        fetched: u64,
    },
    Done {
        affected: u64,
    },
}

/// A parsed or executed Oracle statement.
pub struct OciStatement {
    sql: String,
    is_query: bool,
    state: OciState,
}

impl NativeStatement for OciStatement {
    fn is_query(&self) -> bool {
        self.is_query
    }

    fn num_rows(&self) -> u64 {
        match &self.state {
            OciState::Parsed(_) => 0,
            OciState::Rows { fetched, .. } => *fetched,
            OciState::Done { affected } => *affected,
        }
    }

    fn fetch(&mut self) -> NativeResult<Option<Vec<Option<String>>>> {
        let (rows, fetched) = match &mut self.state {
            OciState::Rows { rows, fetched, .. } => (rows, fetched),
            _ => return Ok(None),
        };

        let row = match rows.next() {
            Some(row) => row?,
            None => return Ok(None),
        };
        let mut values = Vec::with_capacity(row.sql_values().len());
        for index in 0..row.sql_values().len() {
            values.push(row.get::<usize, Option<String>>(index)?);
        }
        *fetched += 1;
        Ok(Some(values))
    }

    fn columns(&self) -> NativeResult<Vec<NativeColumn>> {
        match &self.state {
            OciState::Rows { columns, .. } => Ok(columns.clone()),
            _ => Ok(Vec::new()),
        }
    }
}

impl From<oracle::Error> for NativeError {
    fn from(err: oracle::Error) -> Self {
        match err.db_error() {
            Some(db) => NativeError::new(db.code(), db.message()),
            None => NativeError::new(0, err.to_string()),
        }
    }
}

fn describe(info: &oracle::ColumnInfo) -> NativeColumn {
    let oracle_type = info.oracle_type();
    let column = NativeColumn::new(info.name(), base_type_name(&oracle_type.to_string()));

    match oracle_type {
        OracleType::Varchar2(size)
        | OracleType::NVarchar2(size)
        | OracleType::Char(size)
        | OracleType::NChar(size)
        | OracleType::Raw(size) => column.size(*size),
        OracleType::Number(precision, scale) => column
            .precision(u16::from(*precision))
            .scale(i16::from(*scale)),
        OracleType::Float(precision) => column.precision(u16::from(*precision)),
        OracleType::Timestamp(fsprec)
        | OracleType::TimestampTZ(fsprec)
        | OracleType::TimestampLTZ(fsprec) => column.scale(i16::from(*fsprec)),
        _ => column,
    }
}

/// `VARCHAR2(20)` → `VARCHAR2`, `TIMESTAMP(6) WITH TIME ZONE` → `TIMESTAMP WITH TIME ZONE`.
fn base_type_name(display: &str) -> String {
    let mut name = String::with_capacity(display.len());
    let mut depth = 0usize;
    for ch in display.chars() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => name.push(ch),
            _ => {}
        }
    }
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_utf8(charset: &str) -> bool {
    matches!(
        charset.to_ascii_uppercase().replace('-', "").as_str(),
        "UTF8" | "AL32UTF8"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_type_name() {
        assert_eq!(base_type_name("VARCHAR2(20)"), "VARCHAR2");
        assert_eq!(base_type_name("NUMBER(10,2)"), "NUMBER");
        assert_eq!(base_type_name("DATE"), "DATE");
        assert_eq!(
            base_type_name("TIMESTAMP(6) WITH TIME ZONE"),
            "TIMESTAMP WITH TIME ZONE"
        );
    }

    #[test]
    fn test_is_utf8() {
        assert!(is_utf8("utf-8"));
        assert!(is_utf8("AL32UTF8"));
        assert!(!is_utf8("WE8ISO8859P1"));
    }
}
