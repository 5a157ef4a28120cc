//! Convenient imports for common functionality.

pub use crate::error::MysqlInterfaceError;
pub use crate::executor::{QueryOutcome, RecordingExecutor, SqlExecutor};
pub use crate::interface::MysqlInterface;
pub use crate::model::{DeleteInfo, GetInfo, Limit, PostInfo, Properties, PutInfo, WhereClause};
pub use crate::query_builder::{render_delete, render_insert, render_select, render_update};
pub use crate::results::{CustomDbRow, ResultSet};
pub use crate::types::{Fields, RowValues};

#[cfg(feature = "mysql")]
pub use crate::mysql::{MysqlConnection, MysqlOptions, MysqlOptionsBuilder};
