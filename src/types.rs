use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// Column name to value map, in insertion order.
///
/// Descriptor maps (`properties`, `id`, `where`) use this type; the key order is the
/// order columns appear in the rendered SQL.
pub type Fields = serde_json::Map<String, JsonValue>;

/// Format used when a `Timestamp` cell is turned back into JSON.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Values read back from a result row.
///
/// ```rust
/// use mysql_interface::prelude::*;
///
/// let cells = vec![
///     RowValues::Int(1),
///     RowValues::Text("Apple".into()),
///     RowValues::Null,
/// ];
/// assert_eq!(cells[1].as_text(), Some("Apple"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// DATE, DATETIME or TIMESTAMP value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON column value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// MySQL has no real boolean column; `TINYINT(1)` values 0 and 1 count as booleans.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RowValues::Bool(value) => Some(*value),
            RowValues::Int(1) => Some(true),
            RowValues::Int(0) => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            RowValues::Timestamp(value) => Some(*value),
            RowValues::Text(s) => parse_timestamp(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    /// Convert the cell into the JSON value a caller would see in a row object.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            RowValues::Int(i) => JsonValue::from(*i),
            RowValues::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(JsonValue::Null, JsonValue::Number),
            RowValues::Text(s) => JsonValue::String(s.clone()),
            RowValues::Bool(b) => JsonValue::Bool(*b),
            RowValues::Timestamp(ts) => {
                JsonValue::String(ts.format(TIMESTAMP_FORMAT).to_string())
            }
            RowValues::Null => JsonValue::Null,
            RowValues::JSON(value) => value.clone(),
            RowValues::Blob(bytes) => {
                JsonValue::Array(bytes.iter().map(|b| JsonValue::from(*b)).collect())
            }
        }
    }
}

/// Parse the textual DATETIME/DATE forms MySQL sends over the text protocol.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    // "YYYY-MM-DD HH:MM:SS" with optional fractional seconds
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tinyint_reads_as_bool() {
        assert_eq!(RowValues::Int(1).as_bool(), Some(true));
        assert_eq!(RowValues::Int(0).as_bool(), Some(false));
        assert_eq!(RowValues::Int(2).as_bool(), None);
    }

    #[test]
    fn parses_datetime_and_date_text() {
        let dt = parse_timestamp("2024-03-01 12:30:05").unwrap();
        assert_eq!(dt.format(TIMESTAMP_FORMAT).to_string(), "2024-03-01 12:30:05");

        let frac = parse_timestamp("2024-03-01 12:30:05.250").unwrap();
        assert_eq!(frac.format(TIMESTAMP_FORMAT).to_string(), "2024-03-01 12:30:05");

        let date = parse_timestamp("2024-03-01").unwrap();
        assert_eq!(date.format(TIMESTAMP_FORMAT).to_string(), "2024-03-01 00:00:00");

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn cells_convert_to_json() {
        assert_eq!(RowValues::Int(7).to_json(), json!(7));
        assert_eq!(RowValues::Text("Pear".into()).to_json(), json!("Pear"));
        assert_eq!(RowValues::Null.to_json(), json!(null));
        assert_eq!(RowValues::Float(f64::NAN).to_json(), json!(null));
        assert_eq!(RowValues::Blob(vec![1, 2]).to_json(), json!([1, 2]));
        assert_eq!(
            RowValues::JSON(json!({"ripe": true})).to_json(),
            json!({"ripe": true})
        );
    }
}
