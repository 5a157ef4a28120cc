//! Thin CRUD helper for MySQL.
//!
//! Descriptor maps naming a database, table, id, properties, where clause and limit are
//! rendered into plain SQL and sent over one lazily opened connection:
//!
//! ```rust
//! use mysql_interface::prelude::*;
//! use serde_json::json;
//!
//! let get = GetInfo::from_value(json!({
//!     "database": "db",
//!     "table": "fruits",
//!     "id": {"fruitsId": 1}
//! }))?;
//! assert_eq!(render_select(&get)?, "select * from db.fruits where fruitsId = 1;");
//! # Ok::<(), MysqlInterfaceError>(())
//! ```

pub mod error;
pub mod executor;
pub mod harness;
pub mod interface;
pub mod model;
#[cfg(feature = "mysql")]
pub mod mysql;
pub mod prelude;
pub mod query_builder;
pub mod results;
pub mod types;

pub use error::MysqlInterfaceError;
pub use interface::MysqlInterface;
