use std::sync::Arc;

use chrono::NaiveDate;
use mysql_async::consts::ColumnType;
use mysql_async::prelude::Queryable;
use mysql_async::{Column, Conn, Row, Value};

use crate::error::MysqlInterfaceError;
use crate::executor::QueryOutcome;
use crate::results::ResultSet;
use crate::types::{RowValues, parse_timestamp};

/// Collation id MySQL reports for binary strings and blobs.
const BINARY_CHARSET: u16 = 63;

/// Run one statement over the text protocol and gather everything the server reports.
///
/// # Errors
/// Returns the driver's error unchanged.
pub(crate) async fn run_query(
    conn: &mut Conn,
    sql: &str,
) -> Result<QueryOutcome, MysqlInterfaceError> {
    let mut result = conn.query_iter(sql).await?;
    let columns = result.columns();
    let rows: Vec<Row> = result.collect().await?;
    let last_insert_id = result.last_insert_id();
    let rows_affected = result.affected_rows();
    result.drop_result().await?;

    Ok(QueryOutcome {
        result_set: build_result_set(columns.as_deref(), rows),
        last_insert_id,
        rows_affected,
    })
}

/// Build a result set from text-protocol rows.
#[must_use]
pub fn build_result_set(columns: Option<&[Column]>, rows: Vec<Row>) -> ResultSet {
    let Some(columns) = columns.filter(|cols| !cols.is_empty()) else {
        return ResultSet::default();
    };

    let mut result_set = ResultSet::with_capacity(rows.len());
    let column_names: Vec<String> = columns
        .iter()
        .map(|col| col.name_str().into_owned())
        .collect();
    result_set.set_column_names(Arc::new(column_names));

    for mut row in rows {
        let mut row_values = Vec::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            let raw: Value = row.take(idx).unwrap_or(Value::NULL);
            row_values.push(mysql_extract_value(column, raw));
        }
        result_set.add_row_values(row_values);
    }

    result_set
}

/// Convert one cell according to its column's declared type.
#[must_use]
pub fn mysql_extract_value(column: &Column, value: Value) -> RowValues {
    match value {
        Value::NULL => RowValues::Null,
        Value::Int(i) => RowValues::Int(i),
        Value::UInt(u) => {
            i64::try_from(u).map_or_else(|_| RowValues::Text(u.to_string()), RowValues::Int)
        }
        Value::Float(f) => RowValues::Float(f64::from(f)),
        Value::Double(d) => RowValues::Float(d),
        Value::Date(year, month, day, hour, minute, second, micros) => {
            NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
                .and_then(|date| {
                    date.and_hms_micro_opt(
                        u32::from(hour),
                        u32::from(minute),
                        u32::from(second),
                        micros,
                    )
                })
                .map_or_else(
                    || {
                        RowValues::Text(format!(
                            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                        ))
                    },
                    RowValues::Timestamp,
                )
        }
        Value::Time(negative, days, hours, minutes, seconds, _micros) => {
            let sign = if negative { "-" } else { "" };
            let hours = days * 24 + u32::from(hours);
            RowValues::Text(format!("{sign}{hours:02}:{minutes:02}:{seconds:02}"))
        }
        Value::Bytes(bytes) => convert_text_cell(
            column.column_type(),
            column.character_set() == BINARY_CHARSET,
            bytes,
        ),
    }
}

/// Text-protocol cells arrive as bytes; the column type decides what they mean.
pub(crate) fn convert_text_cell(
    column_type: ColumnType,
    binary: bool,
    bytes: Vec<u8>,
) -> RowValues {
    use ColumnType::{
        MYSQL_TYPE_BIT, MYSQL_TYPE_BLOB, MYSQL_TYPE_GEOMETRY, MYSQL_TYPE_LONG_BLOB,
        MYSQL_TYPE_MEDIUM_BLOB, MYSQL_TYPE_STRING, MYSQL_TYPE_TINY_BLOB, MYSQL_TYPE_VAR_STRING,
        MYSQL_TYPE_VARCHAR,
    };

    match column_type {
        MYSQL_TYPE_BIT | MYSQL_TYPE_GEOMETRY => RowValues::Blob(bytes),
        MYSQL_TYPE_TINY_BLOB | MYSQL_TYPE_MEDIUM_BLOB | MYSQL_TYPE_LONG_BLOB | MYSQL_TYPE_BLOB
        | MYSQL_TYPE_STRING | MYSQL_TYPE_VAR_STRING | MYSQL_TYPE_VARCHAR
            if binary =>
        {
            RowValues::Blob(bytes)
        }
        _ => {
            let text = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(err) => return RowValues::Blob(err.into_bytes()),
            };
            convert_text(column_type, text)
        }
    }
}

fn convert_text(column_type: ColumnType, text: String) -> RowValues {
    use ColumnType::{
        MYSQL_TYPE_DATE, MYSQL_TYPE_DATETIME, MYSQL_TYPE_DATETIME2, MYSQL_TYPE_DOUBLE,
        MYSQL_TYPE_FLOAT, MYSQL_TYPE_INT24, MYSQL_TYPE_JSON, MYSQL_TYPE_LONG, MYSQL_TYPE_LONGLONG,
        MYSQL_TYPE_NEWDATE, MYSQL_TYPE_SHORT, MYSQL_TYPE_TIMESTAMP, MYSQL_TYPE_TIMESTAMP2,
        MYSQL_TYPE_TINY, MYSQL_TYPE_YEAR,
    };

    match column_type {
        MYSQL_TYPE_TINY | MYSQL_TYPE_SHORT | MYSQL_TYPE_LONG | MYSQL_TYPE_INT24
        | MYSQL_TYPE_LONGLONG | MYSQL_TYPE_YEAR => text
            .parse::<i64>()
            .map_or(RowValues::Text(text), RowValues::Int),
        MYSQL_TYPE_FLOAT | MYSQL_TYPE_DOUBLE => text
            .parse::<f64>()
            .map_or(RowValues::Text(text), RowValues::Float),
        MYSQL_TYPE_DATE | MYSQL_TYPE_NEWDATE | MYSQL_TYPE_DATETIME | MYSQL_TYPE_DATETIME2
        | MYSQL_TYPE_TIMESTAMP | MYSQL_TYPE_TIMESTAMP2 => {
            parse_timestamp(&text).map_or(RowValues::Text(text), RowValues::Timestamp)
        }
        MYSQL_TYPE_JSON => {
            serde_json::from_str(&text).map_or(RowValues::Text(text), RowValues::JSON)
        }
        // DECIMAL stays textual to keep its precision
        _ => RowValues::Text(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_and_float_columns_parse() {
        assert_eq!(
            convert_text_cell(ColumnType::MYSQL_TYPE_LONG, false, b"42".to_vec()),
            RowValues::Int(42)
        );
        assert_eq!(
            convert_text_cell(ColumnType::MYSQL_TYPE_DOUBLE, false, b"1.25".to_vec()),
            RowValues::Float(1.25)
        );
        // unsigned BIGINT beyond i64 falls back to text
        assert_eq!(
            convert_text_cell(
                ColumnType::MYSQL_TYPE_LONGLONG,
                false,
                b"18446744073709551615".to_vec()
            ),
            RowValues::Text("18446744073709551615".into())
        );
    }

    #[test]
    fn decimal_stays_text() {
        assert_eq!(
            convert_text_cell(ColumnType::MYSQL_TYPE_NEWDECIMAL, false, b"10.50".to_vec()),
            RowValues::Text("10.50".into())
        );
    }

    #[test]
    fn datetime_and_json_columns() {
        let cell = convert_text_cell(
            ColumnType::MYSQL_TYPE_DATETIME,
            false,
            b"2024-05-06 07:08:09".to_vec(),
        );
        assert_eq!(
            cell.as_timestamp().map(|t| t.to_string()),
            Some("2024-05-06 07:08:09".to_string())
        );

        assert_eq!(
            convert_text_cell(ColumnType::MYSQL_TYPE_JSON, false, br#"{"ripe":true}"#.to_vec()),
            RowValues::JSON(json!({"ripe": true}))
        );
    }

    #[test]
    fn binary_strings_become_blobs() {
        assert_eq!(
            convert_text_cell(ColumnType::MYSQL_TYPE_BLOB, true, vec![0, 159, 146]),
            RowValues::Blob(vec![0, 159, 146])
        );
        assert_eq!(
            convert_text_cell(ColumnType::MYSQL_TYPE_VAR_STRING, false, b"Apple".to_vec()),
            RowValues::Text("Apple".into())
        );
        // invalid utf-8 in a text column is kept as bytes
        assert_eq!(
            convert_text_cell(ColumnType::MYSQL_TYPE_VAR_STRING, false, vec![0xff]),
            RowValues::Blob(vec![0xff])
        );
    }
}
