use crate::error::MysqlInterfaceError;
use crate::executor::{QueryOutcome, SqlExecutor};
use crate::model::{DeleteInfo, GetInfo, PostInfo, PutInfo};
use crate::query_builder::{render_delete, render_insert, render_select, render_update};
use crate::results::ResultSet;

#[cfg(feature = "mysql")]
use crate::mysql::{MysqlConnection, MysqlOptions};

/// CRUD helper over a single connection.
///
/// Descriptors are rendered to SQL and sent through the executor; the connection is
/// opened on first use if `connect` was not called.
///
/// ```rust
/// use mysql_interface::prelude::*;
/// use serde_json::json;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let rt = tokio::runtime::Runtime::new()?;
/// # rt.block_on(async {
/// let mut db = MysqlInterface::with_executor(RecordingExecutor::new().with_insert_id(7));
/// let id = db
///     .post(&PostInfo::from_value(json!({
///         "database": "db",
///         "table": "fruits",
///         "properties": {"name": "Apple", "color": "Green"}
///     }))?)
///     .await?;
/// assert_eq!(id, Some(7));
/// assert_eq!(
///     db.executor().last_query(),
///     Some(r#"insert into db.fruits ( name, color ) values( "Apple", "Green" );"#)
/// );
/// # Ok::<(), MysqlInterfaceError>(())
/// # })?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MysqlInterface<E: SqlExecutor = DefaultExecutor> {
    executor: E,
}

#[cfg(feature = "mysql")]
pub type DefaultExecutor = MysqlConnection;
#[cfg(not(feature = "mysql"))]
pub type DefaultExecutor = crate::executor::RecordingExecutor;

#[cfg(feature = "mysql")]
impl MysqlInterface<MysqlConnection> {
    /// # Errors
    /// Returns `MysqlInterfaceError::ConfigError` if the options are incomplete.
    pub fn new(options: MysqlOptions) -> Result<Self, MysqlInterfaceError> {
        let executor = MysqlConnection::new(options)?;
        tracing::debug!(?executor, "mysql interface initialized");
        Ok(Self { executor })
    }
}

impl<E: SqlExecutor> MysqlInterface<E> {
    #[must_use]
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    #[must_use]
    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    #[must_use]
    pub fn into_executor(self) -> E {
        self.executor
    }

    /// # Errors
    /// Returns the driver's connection error.
    pub async fn connect(&mut self) -> Result<(), MysqlInterfaceError> {
        self.executor.connect().await
    }

    /// # Errors
    /// Returns the driver's disconnect error.
    pub async fn close(&mut self) -> Result<(), MysqlInterfaceError> {
        self.executor.close().await
    }

    /// Run raw SQL.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    pub async fn query(&mut self, sql: &str) -> Result<QueryOutcome, MysqlInterfaceError> {
        tracing::debug!(sql, "query");
        self.executor.query(sql).await
    }

    /// Insert one row and return the generated id, if the table has an auto-increment key.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    pub async fn post(&mut self, info: &PostInfo) -> Result<Option<u64>, MysqlInterfaceError> {
        let sql = render_insert(info);
        let outcome = self.query(&sql).await?;
        Ok(outcome.last_insert_id)
    }

    /// Update the rows matching `info.id`.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    pub async fn put(&mut self, info: &PutInfo) -> Result<(), MysqlInterfaceError> {
        let sql = render_update(info);
        self.query(&sql).await?;
        Ok(())
    }

    /// Delete the rows matching `info.id`.
    ///
    /// # Errors
    /// Returns the driver's error unchanged.
    pub async fn delete(&mut self, info: &DeleteInfo) -> Result<(), MysqlInterfaceError> {
        let sql = render_delete(info);
        self.query(&sql).await?;
        Ok(())
    }

    /// Select rows.
    ///
    /// # Errors
    /// Returns `MysqlInterfaceError::UsageError` if both an id and a where clause are set,
    /// otherwise the driver's error unchanged.
    pub async fn get(&mut self, info: &GetInfo) -> Result<ResultSet, MysqlInterfaceError> {
        let sql = render_select(info)?;
        let outcome = self.query(&sql).await?;
        Ok(outcome.result_set)
    }
}
