use std::sync::Arc;

use mysql_interface::prelude::*;
use serde_json::json;

#[test]
fn test1_crud_sql_from_json_descriptors() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut db = MysqlInterface::with_executor(RecordingExecutor::new().with_insert_id(1));
        db.connect().await?;

        let id = db
            .post(&PostInfo::from_value(json!({
                "database": "db",
                "table": "fruits",
                "properties": {"name": "Apple", "color": "Green"}
            }))?)
            .await?;
        assert_eq!(id, Some(1));

        db.delete(&DeleteInfo::from_value(json!({
            "database": "db",
            "table": "fruits",
            "id": {"fruitsId": 1}
        }))?)
        .await?;

        db.put(&PutInfo::from_value(json!({
            "database": "db",
            "table": "fruits",
            "id": {"fruitsId": 1},
            "properties": {"name": "Pear", "color": "Brown"}
        }))?)
        .await?;

        db.get(&GetInfo::from_value(json!({"database": "db", "table": "fruits"}))?)
            .await?;

        db.get(&GetInfo::from_value(json!({
            "database": "db",
            "table": "fruits",
            "id": {"fruitsId": 1}
        }))?)
        .await?;

        db.close().await?;

        assert_eq!(
            db.executor().queries(),
            [
                r#"insert into db.fruits ( name, color ) values( "Apple", "Green" );"#,
                "delete from db.fruits where fruitsId = 1;",
                r#"update db.fruits set name = "Pear", color = "Brown" where fruitsId = 1;"#,
                "select * from db.fruits;",
                "select * from db.fruits where fruitsId = 1;",
            ]
        );
        assert!(!db.executor().is_connected());
        Ok::<(), MysqlInterfaceError>(())
    })?;
    Ok(())
}

#[test]
fn test1_get_rejects_id_with_where() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut db = MysqlInterface::with_executor(RecordingExecutor::new());
        let info = GetInfo::from_value(json!({
            "database": "db",
            "table": "fruits",
            "id": {"fruitsId": 1},
            "where": {"color": "Green"}
        }))?;

        let err = db.get(&info).await.unwrap_err();
        assert!(matches!(err, MysqlInterfaceError::UsageError(_)));
        assert_eq!(err.to_string(), "Usage error: The id and where clause were both set.");
        assert!(db.executor().queries().is_empty());
        Ok::<(), MysqlInterfaceError>(())
    })?;
    Ok(())
}

#[test]
fn test1_get_returns_rows_and_opens_lazily() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut rows = ResultSet::with_capacity(1);
        rows.set_column_names(Arc::new(vec![
            "fruitsId".to_string(),
            "name".to_string(),
            "color".to_string(),
        ]));
        rows.add_row_values(vec![
            RowValues::Int(3),
            RowValues::Text("Orange".into()),
            RowValues::Text("Orange".into()),
        ]);

        let mut db = MysqlInterface::with_executor(RecordingExecutor::new().with_result_set(rows));
        assert!(!db.executor().is_connected());

        let info = GetInfo::new("db", "fruits")
            .properties(["fruitsId", "name", "color"])
            .where_clause("where color = \"Orange\"")
            .limit("1");
        let result = db.get(&info).await?;

        assert!(db.executor().is_connected());
        assert_eq!(
            db.executor().last_query(),
            Some(r#"select fruitsId, name, color from db.fruits where color = "Orange" limit 1;"#)
        );
        assert_eq!(
            serde_json::to_string(&result.to_json())?,
            r#"[{"fruitsId":3,"name":"Orange","color":"Orange"}]"#
        );
        assert_eq!(result.results[0].get("name").and_then(RowValues::as_text), Some("Orange"));
        Ok::<(), MysqlInterfaceError>(())
    })?;
    Ok(())
}

#[test]
fn test1_raw_query_passes_through() -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let mut db = MysqlInterface::with_executor(RecordingExecutor::new());
        let outcome = db.query("select now();").await?;
        assert!(outcome.result_set.is_empty());
        assert_eq!(outcome.last_insert_id, None);

        let exec = db.into_executor();
        assert_eq!(exec.last_query(), Some("select now();"));
        Ok::<(), MysqlInterfaceError>(())
    })?;
    Ok(())
}
