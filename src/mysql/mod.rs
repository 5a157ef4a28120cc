pub mod config;
mod executor;
pub mod query;

pub use config::{MysqlOptions, MysqlOptionsBuilder};
pub use executor::MysqlConnection;
pub use query::{build_result_set, mysql_extract_value};
