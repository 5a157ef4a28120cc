use async_trait::async_trait;

use super::{QueryOutcome, SqlExecutor};
use crate::error::MysqlInterfaceError;
use crate::results::ResultSet;

/// Executor that records SQL instead of sending it anywhere.
///
/// Every call to [`SqlExecutor::query`] answers with the same canned outcome, which
/// defaults to an empty result set.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    queries: Vec<String>,
    outcome: QueryOutcome,
    connected: bool,
}

impl RecordingExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every query with this insert id.
    #[must_use]
    pub fn with_insert_id(mut self, id: u64) -> Self {
        self.outcome = QueryOutcome::from_insert_id(id);
        self
    }

    /// Answer every query with these rows.
    #[must_use]
    pub fn with_result_set(mut self, result_set: ResultSet) -> Self {
        self.outcome = QueryOutcome::from_result_set(result_set);
        self
    }

    #[must_use]
    pub fn last_query(&self) -> Option<&str> {
        self.queries.last().map(String::as_str)
    }

    #[must_use]
    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub fn clear(&mut self) {
        self.queries.clear();
    }
}

#[async_trait]
impl SqlExecutor for RecordingExecutor {
    async fn connect(&mut self) -> Result<(), MysqlInterfaceError> {
        self.connected = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), MysqlInterfaceError> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    async fn query(&mut self, sql: &str) -> Result<QueryOutcome, MysqlInterfaceError> {
        self.connected = true;
        self.queries.push(sql.to_string());
        Ok(self.outcome.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_and_connects_lazily() -> Result<(), Box<dyn std::error::Error>> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async {
            let mut exec = RecordingExecutor::new().with_insert_id(42);
            assert!(!exec.is_connected());

            let outcome = exec.query("select 1;").await?;
            assert!(exec.is_connected());
            assert_eq!(outcome.last_insert_id, Some(42));
            assert_eq!(exec.last_query(), Some("select 1;"));

            exec.query("select 2;").await?;
            assert_eq!(exec.queries(), ["select 1;", "select 2;"]);

            exec.close().await?;
            exec.close().await?;
            assert!(!exec.is_connected());
            Ok::<(), MysqlInterfaceError>(())
        })?;
        Ok(())
    }
}
