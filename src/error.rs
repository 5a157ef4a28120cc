use thiserror::Error;

#[derive(Debug, Error)]
pub enum MysqlInterfaceError {
    #[cfg(feature = "mysql")]
    #[error(transparent)]
    MysqlError(#[from] mysql_async::Error),

    #[error("Usage error: {0}")]
    UsageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter error: {0}")]
    ParameterError(String),

    #[error("Other database error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for MysqlInterfaceError {
    fn from(err: serde_json::Error) -> Self {
        MysqlInterfaceError::ParameterError(format!("descriptor does not match: {err}"))
    }
}
