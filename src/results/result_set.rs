use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value as JsonValue;

use super::row::{CustomDbRow, index_columns};
use crate::types::RowValues;

/// Rows returned by a select, plus the row count reported by the driver.
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    /// The rows returned by the query
    pub results: Vec<CustomDbRow>,
    /// Rows returned for selects, rows changed for DML
    pub rows_affected: usize,
    column_names: Option<Arc<Vec<String>>>,
    column_index_cache: Option<Arc<HashMap<String, usize>>>,
}

impl ResultSet {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> ResultSet {
        ResultSet {
            results: Vec::with_capacity(capacity),
            ..ResultSet::default()
        }
    }

    /// Set the column names shared by all rows added afterwards.
    pub fn set_column_names(&mut self, column_names: Arc<Vec<String>>) {
        self.column_index_cache = Some(Arc::new(index_columns(&column_names)));
        self.column_names = Some(column_names);
    }

    #[must_use]
    pub fn get_column_names(&self) -> Option<&Arc<Vec<String>>> {
        self.column_names.as_ref()
    }

    /// Add a row under the current column names. Ignored until column names are set.
    pub fn add_row_values(&mut self, row_values: Vec<RowValues>) {
        let (Some(column_names), Some(cache)) = (&self.column_names, &self.column_index_cache)
        else {
            return;
        };

        self.results.push(CustomDbRow {
            column_names: column_names.clone(),
            rows: row_values,
            column_index_cache: cache.clone(),
        });
        self.rows_affected += 1;
    }

    pub fn add_row(&mut self, row: CustomDbRow) {
        if self.column_names.is_none() {
            self.set_column_names(row.column_names.clone());
        }

        self.results.push(row);
        self.rows_affected += 1;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// All rows as a JSON array of objects.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Array(self.results.iter().map(CustomDbRow::to_json).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fruits() -> ResultSet {
        let mut rs = ResultSet::with_capacity(2);
        rs.set_column_names(Arc::new(vec![
            "fruitsId".to_string(),
            "name".to_string(),
            "color".to_string(),
        ]));
        rs.add_row_values(vec![
            RowValues::Int(1),
            RowValues::Text("Orange".into()),
            RowValues::Text("Orange".into()),
        ]);
        rs.add_row_values(vec![
            RowValues::Int(2),
            RowValues::Text("Pear".into()),
            RowValues::Null,
        ]);
        rs
    }

    #[test]
    fn rows_look_up_by_name() {
        let rs = fruits();
        assert_eq!(rs.len(), 2);
        assert_eq!(rs.rows_affected, 2);
        assert_eq!(rs.results[1].get("name").unwrap().as_text(), Some("Pear"));
        assert!(rs.results[1].get("color").unwrap().is_null());
        assert!(rs.results[0].get("weight").is_none());
    }

    #[test]
    fn json_keeps_column_order() {
        let rs = fruits();
        let text = serde_json::to_string(&rs.to_json()).unwrap();
        assert_eq!(
            text,
            r#"[{"fruitsId":1,"name":"Orange","color":"Orange"},{"fruitsId":2,"name":"Pear","color":null}]"#
        );
        assert_eq!(rs.results[0].to_json()["fruitsId"], json!(1));
    }

    #[test]
    fn rows_without_columns_are_dropped() {
        let mut rs = ResultSet::default();
        rs.add_row_values(vec![RowValues::Int(1)]);
        assert!(rs.is_empty());
    }

    #[test]
    fn add_row_adopts_column_names() {
        let mut rs = ResultSet::default();
        rs.add_row(CustomDbRow::new(
            Arc::new(vec!["id".to_string()]),
            vec![RowValues::Int(9)],
        ));
        assert_eq!(rs.get_column_names().unwrap().as_slice(), ["id".to_string()]);
        assert_eq!(rs.results[0].get_by_index(0), Some(&RowValues::Int(9)));
    }
}
