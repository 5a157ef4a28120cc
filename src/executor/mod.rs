use async_trait::async_trait;

use crate::error::MysqlInterfaceError;
use crate::results::ResultSet;

mod recording;

pub use recording::RecordingExecutor;

/// What the driver reported for one statement.
#[derive(Debug, Clone, Default)]
pub struct QueryOutcome {
    /// Rows for selects; empty for DML.
    pub result_set: ResultSet,
    /// Auto-increment id generated by an insert, when there was one.
    pub last_insert_id: Option<u64>,
    /// Rows changed by DML.
    pub rows_affected: u64,
}

impl QueryOutcome {
    #[must_use]
    pub fn from_result_set(result_set: ResultSet) -> Self {
        Self {
            rows_affected: result_set.rows_affected as u64,
            result_set,
            last_insert_id: None,
        }
    }

    #[must_use]
    pub fn from_insert_id(id: u64) -> Self {
        Self {
            last_insert_id: Some(id),
            rows_affected: 1,
            ..Self::default()
        }
    }
}

/// A single connection that runs SQL text and reports the outcome.
#[async_trait]
pub trait SqlExecutor: Send {
    /// Open the connection. A no-op when it is already open.
    async fn connect(&mut self) -> Result<(), MysqlInterfaceError>;

    /// Close the connection. A no-op when it is already closed.
    async fn close(&mut self) -> Result<(), MysqlInterfaceError>;

    /// Whether a connection is currently open.
    fn is_connected(&self) -> bool;

    /// Run one SQL statement, opening the connection first if needed.
    async fn query(&mut self, sql: &str) -> Result<QueryOutcome, MysqlInterfaceError>;
}
