//! Rendering of CRUD descriptors into SQL text.
//!
//! Values are inlined, not bound: each one is JSON-stringified, which quotes and
//! escapes strings the way MySQL's default (non-ANSI) mode reads double-quoted
//! literals. Nested arrays and objects are stringified once more so they arrive as JSON
//! text.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value as JsonValue;

use crate::types::Fields;

mod dml;
mod select;


pub use dml::{render_delete, render_insert, render_update};
pub use select::render_select;

static WHERE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^where\s").expect("where prefix pattern is valid"));
static LIMIT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^limit\s").expect("limit prefix pattern is valid"));

/// Render a single value as an inline SQL literal.
#[must_use]
pub fn render_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Array(_) | JsonValue::Object(_) => {
            JsonValue::String(value.to_string()).to_string()
        }
        scalar => scalar.to_string(),
    }
}

/// `k1 = v1 and k2 = v2`, in map order.
#[must_use]
pub fn render_predicate(fields: &Fields) -> String {
    join_pairs(fields, " and ")
}

/// `k1 = v1, k2 = v2`, in map order.
#[must_use]
pub fn render_assignments(fields: &Fields) -> String {
    join_pairs(fields, ", ")
}

fn join_pairs(fields: &Fields, separator: &str) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{key} = {}", render_value(value)))
        .collect::<Vec<_>>()
        .join(separator)
}

pub(crate) fn qualified_table(database: &str, table: &str) -> String {
    format!("{database}.{table}")
}

/// Prefix `keyword` unless the text already starts with it (case-insensitive).
pub(crate) fn ensure_prefix(pattern: &Regex, keyword: &str, text: &str) -> String {
    if pattern.is_match(text) {
        text.to_string()
    } else {
        format!("{keyword} {text}")
    }
}
