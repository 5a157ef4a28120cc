use async_trait::async_trait;
use mysql_async::Conn;

use super::config::MysqlOptions;
use super::query::run_query;
use crate::error::MysqlInterfaceError;
use crate::executor::{QueryOutcome, SqlExecutor};

/// One lazily opened MySQL connection.
pub struct MysqlConnection {
    options: MysqlOptions,
    conn: Option<Conn>,
}

// Manual Debug implementation to keep the password out of logs
impl std::fmt::Debug for MysqlConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MysqlConnection")
            .field("host", &self.options.host)
            .field("port", &self.options.port)
            .field("user", &self.options.user)
            .field("connected", &self.conn.is_some())
            .finish_non_exhaustive()
    }
}

impl MysqlConnection {
    /// Validate the options; no connection is opened yet.
    ///
    /// # Errors
    /// Returns `MysqlInterfaceError::ConfigError` if the options are incomplete.
    pub fn new(options: MysqlOptions) -> Result<Self, MysqlInterfaceError> {
        options.validate()?;
        Ok(Self {
            options,
            conn: None,
        })
    }

    #[must_use]
    pub fn options(&self) -> &MysqlOptions {
        &self.options
    }
}

#[async_trait]
impl SqlExecutor for MysqlConnection {
    async fn connect(&mut self) -> Result<(), MysqlInterfaceError> {
        if self.conn.is_some() {
            return Ok(());
        }

        let conn = Conn::new(self.options.to_opts()).await?;
        tracing::info!(
            host = %self.options.host,
            port = self.options.port,
            "mysql connection opened"
        );
        self.conn = Some(conn);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), MysqlInterfaceError> {
        if let Some(conn) = self.conn.take() {
            conn.disconnect().await?;
            tracing::info!(host = %self.options.host, "mysql connection closed");
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    async fn query(&mut self, sql: &str) -> Result<QueryOutcome, MysqlInterfaceError> {
        self.connect().await?;
        let conn = self.conn.as_mut().ok_or_else(|| {
            MysqlInterfaceError::ConnectionError("connection is not open".to_string())
        })?;
        run_query(conn, sql).await
    }
}
