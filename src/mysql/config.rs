use serde::{Deserialize, Serialize};

use crate::error::MysqlInterfaceError;

/// Connection settings for a single MySQL connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MysqlOptions {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub user: String,
    #[serde(default)]
    pub password: String,
    /// Default schema for the session. Descriptors always qualify tables, so this is optional.
    #[serde(default)]
    pub database: Option<String>,
}

fn default_port() -> u16 {
    MysqlOptions::DEFAULT_PORT
}

impl MysqlOptions {
    pub const DEFAULT_PORT: u16 = 3306;

    #[must_use]
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            user: user.into(),
            password: password.into(),
            database: None,
        }
    }

    #[must_use]
    pub fn builder(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> MysqlOptionsBuilder {
        MysqlOptionsBuilder::new(host, user, password)
    }

    /// Read `MYSQL_HOST`, `MYSQL_PORT`, `MYSQL_USER`, `MYSQL_PASSWORD` and `MYSQL_DATABASE`.
    ///
    /// # Errors
    /// Returns `MysqlInterfaceError::ConfigError` if `MYSQL_USER` is missing or
    /// `MYSQL_PORT` is not a port number.
    pub fn from_env() -> Result<Self, MysqlInterfaceError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`MysqlOptions::from_env`] with a caller-supplied variable lookup.
    ///
    /// # Errors
    /// Returns `MysqlInterfaceError::ConfigError` on a missing user or a bad port.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, MysqlInterfaceError> {
        let host = lookup("MYSQL_HOST").unwrap_or_else(|| "localhost".to_string());
        let user = lookup("MYSQL_USER")
            .ok_or_else(|| MysqlInterfaceError::ConfigError("MYSQL_USER is required".to_string()))?;
        let password = lookup("MYSQL_PASSWORD").unwrap_or_default();

        let port = match lookup("MYSQL_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                MysqlInterfaceError::ConfigError(format!("MYSQL_PORT {raw:?} is not a port: {e}"))
            })?,
            None => Self::DEFAULT_PORT,
        };

        let options = Self {
            host,
            port,
            user,
            password,
            database: lookup("MYSQL_DATABASE").filter(|db| !db.is_empty()),
        };
        options.validate()?;
        Ok(options)
    }

    /// # Errors
    /// Returns `MysqlInterfaceError::ConfigError` if host or user is empty, or port is 0.
    pub fn validate(&self) -> Result<(), MysqlInterfaceError> {
        if self.host.trim().is_empty() {
            return Err(MysqlInterfaceError::ConfigError(
                "host is required".to_string(),
            ));
        }
        if self.user.trim().is_empty() {
            return Err(MysqlInterfaceError::ConfigError(
                "user is required".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(MysqlInterfaceError::ConfigError(
                "port must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn to_opts(&self) -> mysql_async::Opts {
        mysql_async::OptsBuilder::default()
            .ip_or_hostname(self.host.clone())
            .tcp_port(self.port)
            .user(Some(self.user.clone()))
            .pass(Some(self.password.clone()))
            .db_name(self.database.clone())
            .into()
    }
}

/// Fluent builder for `MysqlOptions`.
#[derive(Debug, Clone)]
pub struct MysqlOptionsBuilder {
    opts: MysqlOptions,
}

impl MysqlOptionsBuilder {
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            opts: MysqlOptions::new(host, user, password),
        }
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.opts.port = port;
        self
    }

    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.opts.database = Some(database.into());
        self
    }

    #[must_use]
    pub fn finish(self) -> MysqlOptions {
        self.opts
    }

    /// Validate and return the options.
    ///
    /// # Errors
    /// Returns `MysqlInterfaceError::ConfigError` if the options are incomplete.
    pub fn build(self) -> Result<MysqlOptions, MysqlInterfaceError> {
        self.opts.validate()?;
        Ok(self.opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_defaults() {
        let opts = MysqlOptions::from_lookup(lookup(&[("MYSQL_USER", "user")])).unwrap();
        assert_eq!(opts.host, "localhost");
        assert_eq!(opts.port, 3306);
        assert_eq!(opts.password, "");
        assert_eq!(opts.database, None);
    }

    #[test]
    fn env_overrides() {
        let opts = MysqlOptions::from_lookup(lookup(&[
            ("MYSQL_HOST", "db.internal"),
            ("MYSQL_PORT", "3307"),
            ("MYSQL_USER", "user"),
            ("MYSQL_PASSWORD", "password"),
            ("MYSQL_DATABASE", "db"),
        ]))
        .unwrap();
        assert_eq!(
            opts,
            MysqlOptions::builder("db.internal", "user", "password")
                .port(3307)
                .database("db")
                .finish()
        );
    }

    #[test]
    fn env_requires_user_and_valid_port() {
        let missing = MysqlOptions::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(missing, MysqlInterfaceError::ConfigError(_)));

        let bad_port = MysqlOptions::from_lookup(lookup(&[
            ("MYSQL_USER", "user"),
            ("MYSQL_PORT", "three"),
        ]))
        .unwrap_err();
        assert!(matches!(bad_port, MysqlInterfaceError::ConfigError(_)));
    }

    #[test]
    fn builder_validates() {
        assert!(MysqlOptions::builder("", "user", "pw").build().is_err());
        assert!(MysqlOptions::builder("localhost", " ", "pw").build().is_err());
        assert!(MysqlOptions::builder("localhost", "user", "pw").port(0).build().is_err());
        assert!(MysqlOptions::builder("localhost", "user", "pw").build().is_ok());
    }
}
