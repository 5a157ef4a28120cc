use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use mysql_interface::harness::Fixture;
use mysql_interface::mysql::MysqlOptionsBuilder;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Mode {
    /// Compare rendered SQL without touching a server
    DryRun,
    /// Run round trips against a live server
    Live,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Self-test for mysql-interface CRUD operations")]
pub(crate) struct Args {
    #[arg(long, value_enum, default_value = "dry-run")]
    pub(crate) mode: Mode,
    #[arg(long, env = "MYSQL_HOST", default_value = "localhost")]
    pub(crate) host: String,
    #[arg(long, env = "MYSQL_PORT", default_value_t = 3306)]
    pub(crate) port: u16,
    #[arg(long, env = "MYSQL_USER", default_value = "user")]
    pub(crate) user: String,
    #[arg(long, env = "MYSQL_PASSWORD", default_value = "password", hide_env_values = true)]
    pub(crate) password: String,
    /// Default schema for the session
    #[arg(long, env = "MYSQL_DATABASE")]
    pub(crate) session_database: Option<String>,
    /// Database named in the descriptors
    #[arg(long, default_value = "db")]
    pub(crate) database: String,
    #[arg(long, default_value = "fruits")]
    pub(crate) table: String,
    #[arg(long, default_value = "fruitsId")]
    pub(crate) id_column: String,
    /// Create the table before the live run if it is missing
    #[arg(long)]
    pub(crate) create_table: bool,
    #[arg(long)]
    pub(crate) log: Option<PathBuf>,
    /// Log every rendered statement
    #[arg(long, short)]
    pub(crate) verbose: bool,
}

impl Args {
    pub(crate) fn fixture(&self) -> Fixture {
        Fixture {
            database: self.database.clone(),
            table: self.table.clone(),
            id_column: self.id_column.clone(),
        }
    }

    pub(crate) fn options(&self) -> MysqlOptionsBuilder {
        let builder =
            MysqlOptionsBuilder::new(&self.host, &self.user, &self.password).port(self.port);
        match &self.session_database {
            Some(db) => builder.database(db),
            None => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fruits_fixture() {
        let args = Args::parse_from(["mysqli-selftest"]);
        assert_eq!(args.mode, Mode::DryRun);
        assert_eq!(args.fixture(), Fixture::default());
    }

    #[test]
    fn live_flags_build_options() {
        let args = Args::parse_from([
            "mysqli-selftest",
            "--mode",
            "live",
            "--host",
            "db.internal",
            "--port",
            "3307",
            "--user",
            "tester",
            "--password",
            "secret",
            "--session-database",
            "db",
        ]);
        assert_eq!(args.mode, Mode::Live);
        let opts = args.options().finish();
        assert_eq!(opts.host, "db.internal");
        assert_eq!(opts.port, 3307);
        assert_eq!(opts.database.as_deref(), Some("db"));
    }
}
