use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::ConnectionConfig;
use crate::traits::{
    CommitMode, NativeClient, NativeColumn, NativeConnection, NativeError, NativeResult,
    NativeStatement,
};

/// A recorded statement execution for verification.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedStatement {
    pub sql: String,
    pub mode: CommitMode,
}

/// A scripted outcome for the next parsed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum InMemoryResponse {
    /// A query producing the given columns and rows.
    Rows {
        columns: Vec<NativeColumn>,
        rows: Vec<Vec<Option<String>>>,
    },
    /// A non-query statement affecting `n` rows.
    Affected(u64),
    /// Parsing fails.
    ParseError(NativeError),
    /// Parsing succeeds but execution fails.
    ExecuteError(NativeError),
}

impl InMemoryResponse {
    pub fn affected(rows: u64) -> Self {
        InMemoryResponse::Affected(rows)
    }

    pub fn parse_error(code: i32, message: &str) -> Self {
        InMemoryResponse::ParseError(NativeError::new(code, message))
    }

    pub fn execute_error(code: i32, message: &str) -> Self {
        InMemoryResponse::ExecuteError(NativeError::new(code, message))
    }
}

#[derive(Default)]
struct State {
    responses: VecDeque<InMemoryResponse>,
    recorded_statements: Vec<RecordedStatement>,
    connect_error: Option<NativeError>,
    commit_error: Option<NativeError>,
    rollback_error: Option<NativeError>,
    last_config: Option<ConnectionConfig>,
    connects: usize,
    closes: usize,
    commits: usize,
    rollbacks: usize,
}

/// An in-memory native client for testing.
///
/// Allows configuring statement outcomes and verifying what the driver sent.
/// Clones share state, so a test can keep one handle while the driver owns
/// another.
///
/// # Example
/// ```
/// use orars::drivers::{InMemoryClient, InMemoryResponseBuilder};
///
/// let client = InMemoryClient::new().with_response(
///     InMemoryResponseBuilder::new()
///         .columns(&["ID", "NAME"])
///         .row(&[Some("1"), Some("Alice")])
///         .build(),
/// );
/// ```
#[derive(Clone, Default)]
pub struct InMemoryClient {
    state: Arc<Mutex<State>>,
}

impl InMemoryClient {
    /// Create a new in-memory client with no pre-configured responses.
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    /// Add a response for the next parsed statement.
    /// Responses are consumed in FIFO order; an empty queue yields
    /// `InMemoryResponse::Affected(0)`.
    pub fn with_response(self, response: InMemoryResponse) -> Self {
        self.state().responses.push_back(response);
        self
    }

    /// Add multiple responses for subsequent statements.
    pub fn with_responses(self, responses: impl IntoIterator<Item = InMemoryResponse>) -> Self {
        self.state().responses.extend(responses);
        self
    }

    /// Make the next `connect` fail.
    pub fn with_connect_error(self, err: NativeError) -> Self {
        self.state().connect_error = Some(err);
        self
    }

    /// Make the next `commit` fail.
    pub fn with_commit_error(self, err: NativeError) -> Self {
        self.state().commit_error = Some(err);
        self
    }

    /// Make the next `rollback` fail.
    pub fn with_rollback_error(self, err: NativeError) -> Self {
        self.state().rollback_error = Some(err);
        self
    }

    /// Get all statements that have been executed.
    pub fn recorded_statements(&self) -> Vec<RecordedStatement> {
        self.state().recorded_statements.clone()
    }

    /// Get the last executed statement, if any.
    pub fn last_statement(&self) -> Option<RecordedStatement> {
        self.state().recorded_statements.last().cloned()
    }

    /// The configuration passed to the most recent `connect`.
    pub fn last_config(&self) -> Option<ConnectionConfig> {
        self.state().last_config.clone()
    }

    pub fn connect_count(&self) -> usize {
        self.state().connects
    }

    pub fn close_count(&self) -> usize {
        self.state().closes
    }

    pub fn commit_count(&self) -> usize {
        self.state().commits
    }

    pub fn rollback_count(&self) -> usize {
        self.state().rollbacks
    }

    /// Assert that the last statement matches the expected SQL and commit mode.
    pub fn assert_last_statement(&self, expected_sql: &str, expected_mode: CommitMode) {
        let last = self.last_statement().expect("No statements were recorded");
        assert_eq!(
            last.sql, expected_sql,
            "SQL mismatch.\nExpected: {}\nActual: {}",
            expected_sql, last.sql
        );
        assert_eq!(
            last.mode, expected_mode,
            "Commit mode mismatch.\nExpected: {:?}\nActual: {:?}",
            expected_mode, last.mode
        );
    }

    /// Assert that exactly n statements were executed.
    pub fn assert_statement_count(&self, expected: usize) {
        let actual = self.state().recorded_statements.len();
        assert_eq!(
            actual, expected,
            "Statement count mismatch. Expected: {}, Actual: {}",
            expected, actual
        );
    }
}

impl NativeClient for InMemoryClient {
    type Connection = InMemoryConnection;

    fn connect(&self, config: &ConnectionConfig) -> NativeResult<InMemoryConnection> {
        let mut state = self.state();
        if let Some(err) = state.connect_error.take() {
            return Err(err);
        }
        state.connects += 1;
        state.last_config = Some(config.clone());
        Ok(InMemoryConnection {
            state: Arc::clone(&self.state),
        })
    }
}

/// Session handed out by `InMemoryClient`.
pub struct InMemoryConnection {
    state: Arc<Mutex<State>>,
}

impl InMemoryConnection {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

impl NativeConnection for InMemoryConnection {
    type Statement = InMemoryStatement;

    fn parse(&mut self, sql: &str) -> NativeResult<InMemoryStatement> {
        let response = self
            .state()
            .responses
            .pop_front()
            .unwrap_or(InMemoryResponse::Affected(0));
        if let InMemoryResponse::ParseError(err) = response {
            return Err(err);
        }
        Ok(InMemoryStatement {
            sql: sql.to_string(),
            response,
            executed: false,
            cursor: 0,
        })
    }

    fn execute(&mut self, statement: &mut InMemoryStatement, mode: CommitMode) -> NativeResult<()> {
        self.state().recorded_statements.push(RecordedStatement {
            sql: statement.sql.clone(),
            mode,
        });
        if let InMemoryResponse::ExecuteError(err) = &statement.response {
            return Err(err.clone());
        }
        statement.executed = true;
        Ok(())
    }

    fn commit(&mut self) -> NativeResult<()> {
        let mut state = self.state();
        if let Some(err) = state.commit_error.take() {
            return Err(err);
        }
        state.commits += 1;
        Ok(())
    }

    fn rollback(&mut self) -> NativeResult<()> {
        let mut state = self.state();
        if let Some(err) = state.rollback_error.take() {
            return Err(err);
        }
        state.rollbacks += 1;
        Ok(())
    }

    fn close(self) -> NativeResult<()> {
        self.state().closes += 1;
        Ok(())
    }
}

/// Statement handed out by `InMemoryConnection`.
pub struct InMemoryStatement {
    sql: String,
    response: InMemoryResponse,
    executed: bool,
    cursor: usize,
}

impl NativeStatement for InMemoryStatement {
    fn is_query(&self) -> bool {
        matches!(self.response, InMemoryResponse::Rows { .. })
    }

    fn num_rows(&self) -> u64 {
        match &self.response {
            InMemoryResponse::Rows { .. } => self.cursor as u64,
            InMemoryResponse::Affected(n) if self.executed => *n,
            _ => 0,
        }
    }

    fn fetch(&mut self) -> NativeResult<Option<Vec<Option<String>>>> {
        if !self.executed {
            return Err(NativeError::new(24338, "statement handle not executed"));
        }
        match &self.response {
            InMemoryResponse::Rows { rows, .. } => {
                let row = rows.get(self.cursor).cloned();
                if row.is_some() {
                    self.cursor += 1;
                }
                Ok(row)
            }
            _ => Err(NativeError::new(24374, "define not done before fetch or execute and fetch")),
        }
    }

    fn columns(&self) -> NativeResult<Vec<NativeColumn>> {
        match &self.response {
            InMemoryResponse::Rows { columns, .. } => Ok(columns.clone()),
            _ => Ok(Vec::new()),
        }
    }
}

/// Builder for creating query responses easily.
pub struct InMemoryResponseBuilder {
    columns: Vec<NativeColumn>,
    rows: Vec<Vec<Option<String>>>,
}

impl InMemoryResponseBuilder {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Set the column names for the response. Columns are typed `VARCHAR2`.
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols
            .iter()
            .map(|name| NativeColumn::new(*name, "VARCHAR2"))
            .collect();
        self
    }

    /// Add one fully described column.
    pub fn column(mut self, column: NativeColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a row of values; `None` is SQL NULL.
    pub fn row(mut self, values: &[Option<&str>]) -> Self {
        self.rows
            .push(values.iter().map(|v| v.map(str::to_string)).collect());
        self
    }

    /// Build the query response.
    pub fn build(self) -> InMemoryResponse {
        InMemoryResponse::Rows {
            columns: self.columns,
            rows: self.rows,
        }
    }
}

impl Default for InMemoryResponseBuilder {
    fn default() -> Self {
        Self::new()
    }
}
