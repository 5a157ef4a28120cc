//! Per-call descriptors for the four CRUD operations.
//!
//! Each descriptor deserializes from the JSON shape callers already use, e.g.
//! `{"database": "db", "table": "fruits", "id": {"fruitsId": 1}}`:
//! ```rust
//! use mysql_interface::prelude::*;
//! use serde_json::json;
//!
//! let get = GetInfo::from_value(json!({
//!     "database": "db",
//!     "table": "fruits",
//!     "where": "color = \"Green\"",
//!     "limit": 5
//! }))?;
//! assert_eq!(get.limit, Some(Limit::Count(5)));
//! # Ok::<(), MysqlInterfaceError>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::MysqlInterfaceError;
use crate::types::Fields;

/// A where clause: either raw SQL or a column/value map joined with `and`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WhereClause {
    Raw(String),
    Fields(Fields),
}

impl WhereClause {
    /// Blank text and empty maps select nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            WhereClause::Raw(text) => text.trim().is_empty(),
            WhereClause::Fields(fields) => fields.is_empty(),
        }
    }
}

impl From<&str> for WhereClause {
    fn from(value: &str) -> Self {
        WhereClause::Raw(value.to_string())
    }
}

impl From<String> for WhereClause {
    fn from(value: String) -> Self {
        WhereClause::Raw(value)
    }
}

impl From<Fields> for WhereClause {
    fn from(value: Fields) -> Self {
        WhereClause::Fields(value)
    }
}

/// Selected columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Properties {
    List(Vec<String>),
    Raw(String),
}

impl Default for Properties {
    fn default() -> Self {
        Properties::Raw("*".to_string())
    }
}

impl From<&str> for Properties {
    fn from(value: &str) -> Self {
        Properties::Raw(value.to_string())
    }
}

impl From<Vec<String>> for Properties {
    fn from(value: Vec<String>) -> Self {
        Properties::List(value)
    }
}

impl From<&[&str]> for Properties {
    fn from(value: &[&str]) -> Self {
        Properties::List(value.iter().map(ToString::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Properties {
    fn from(value: [&str; N]) -> Self {
        Properties::List(value.iter().map(ToString::to_string).collect())
    }
}

/// Row limit: a count, or raw text such as `"10 offset 20"` or `"limit 5"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Limit {
    Count(u64),
    Raw(String),
}

impl From<u64> for Limit {
    fn from(value: u64) -> Self {
        Limit::Count(value)
    }
}

impl From<&str> for Limit {
    fn from(value: &str) -> Self {
        Limit::Raw(value.to_string())
    }
}

impl From<String> for Limit {
    fn from(value: String) -> Self {
        Limit::Raw(value)
    }
}

/// Insert descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostInfo {
    pub database: String,
    pub table: String,
    pub properties: Fields,
}

impl PostInfo {
    #[must_use]
    pub fn new(database: impl Into<String>, table: impl Into<String>, properties: Fields) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
            properties,
        }
    }

    /// # Errors
    /// Returns `MysqlInterfaceError::ParameterError` if the value is not a post descriptor.
    pub fn from_value(value: JsonValue) -> Result<Self, MysqlInterfaceError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Update descriptor: `properties` are set on the rows matching `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PutInfo {
    pub database: String,
    pub table: String,
    pub id: Fields,
    pub properties: Fields,
}

impl PutInfo {
    #[must_use]
    pub fn new(
        database: impl Into<String>,
        table: impl Into<String>,
        id: Fields,
        properties: Fields,
    ) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
            id,
            properties,
        }
    }

    /// # Errors
    /// Returns `MysqlInterfaceError::ParameterError` if the value is not a put descriptor.
    pub fn from_value(value: JsonValue) -> Result<Self, MysqlInterfaceError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Delete descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteInfo {
    pub database: String,
    pub table: String,
    pub id: Fields,
}

impl DeleteInfo {
    #[must_use]
    pub fn new(database: impl Into<String>, table: impl Into<String>, id: Fields) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
            id,
        }
    }

    /// # Errors
    /// Returns `MysqlInterfaceError::ParameterError` if the value is not a delete descriptor.
    pub fn from_value(value: JsonValue) -> Result<Self, MysqlInterfaceError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Select descriptor.
///
/// `id` and `where_clause` are mutually exclusive; supplying both non-empty is a usage
/// error at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetInfo {
    pub database: String,
    pub table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Fields>,
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<WhereClause>,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<Limit>,
}

impl GetInfo {
    #[must_use]
    pub fn new(database: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            table: table.into(),
            id: None,
            where_clause: None,
            properties: Properties::default(),
            limit: None,
        }
    }

    #[must_use]
    pub fn id(mut self, id: Fields) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn where_clause(mut self, where_clause: impl Into<WhereClause>) -> Self {
        self.where_clause = Some(where_clause.into());
        self
    }

    #[must_use]
    pub fn properties(mut self, properties: impl Into<Properties>) -> Self {
        self.properties = properties.into();
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: impl Into<Limit>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    /// # Errors
    /// Returns `MysqlInterfaceError::ParameterError` if the value is not a get descriptor.
    pub fn from_value(value: JsonValue) -> Result<Self, MysqlInterfaceError> {
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_defaults_to_all_columns() {
        let get = GetInfo::from_value(json!({"database": "db", "table": "fruits"})).unwrap();
        assert_eq!(get, GetInfo::new("db", "fruits"));
        assert_eq!(get.properties, Properties::Raw("*".into()));
    }

    #[test]
    fn where_accepts_text_or_map() {
        let raw = GetInfo::from_value(json!({
            "database": "db", "table": "fruits", "where": "name = \"Apple\""
        }))
        .unwrap();
        assert_eq!(
            raw.where_clause,
            Some(WhereClause::Raw("name = \"Apple\"".into()))
        );

        let map = GetInfo::from_value(json!({
            "database": "db", "table": "fruits", "where": {"color": "Green"}
        }))
        .unwrap();
        let Some(WhereClause::Fields(fields)) = map.where_clause else {
            panic!("expected a field map");
        };
        assert_eq!(fields["color"], json!("Green"));
    }

    #[test]
    fn properties_and_limit_shapes() {
        let get = GetInfo::from_value(json!({
            "database": "db",
            "table": "fruits",
            "properties": ["name", "color"],
            "limit": "limit 3"
        }))
        .unwrap();
        assert_eq!(
            get.properties,
            Properties::List(vec!["name".into(), "color".into()])
        );
        assert_eq!(get.limit, Some(Limit::Raw("limit 3".into())));
    }

    #[test]
    fn post_keeps_property_order() {
        let post = PostInfo::from_value(json!({
            "database": "db",
            "table": "fruits",
            "properties": {"name": "Apple", "color": "Green"}
        }))
        .unwrap();
        let keys: Vec<&str> = post.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "color"]);
    }

    #[test]
    fn missing_id_is_a_parameter_error() {
        let err = DeleteInfo::from_value(json!({"database": "db", "table": "fruits"}))
            .unwrap_err();
        assert!(matches!(err, MysqlInterfaceError::ParameterError(_)));
    }

    #[test]
    fn blank_where_is_empty() {
        assert!(WhereClause::from("   ").is_empty());
        assert!(WhereClause::Fields(Fields::new()).is_empty());
        assert!(!WhereClause::from("fruitsId = 1").is_empty());
    }
}
