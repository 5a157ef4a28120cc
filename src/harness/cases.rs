use serde_json::{Value as JsonValue, json};

use super::{CaseFuture, Check, Fixture, TestCase};
use crate::error::MysqlInterfaceError;
use crate::executor::{RecordingExecutor, SqlExecutor};
use crate::interface::MysqlInterface;
use crate::model::{DeleteInfo, GetInfo, PostInfo, PutInfo};
use crate::types::Fields;

/// DDL for the table the live cases expect.
#[must_use]
pub fn create_table_sql(fixture: &Fixture) -> String {
    format!(
        "create table if not exists {}.{} ( {} int unsigned not null auto_increment primary key, \
         name varchar(64) not null, color varchar(64) not null );",
        fixture.database, fixture.table, fixture.id_column
    )
}

/// Rendered-SQL expectations, run against a [`RecordingExecutor`].
#[must_use]
pub fn dry_run_cases() -> Vec<TestCase<RecordingExecutor>> {
    vec![
        TestCase::new("post_{name,color}_returnsId", dry_post),
        TestCase::new("delete_id_returnsVoid", dry_delete),
        TestCase::new("put_{db,fruits,id,properties}_returnsVoid", dry_put),
        TestCase::new("get_{db,fruits}_returnsAll", dry_get_all),
        TestCase::new("get_{db,fruits,id}_returnsRow", dry_get_by_id),
        TestCase::new("get_{db,fruits,id,where}_isUsageError", dry_get_id_and_where),
    ]
}

/// Round trips against a live table.
#[must_use]
pub fn live_cases<E: SqlExecutor>() -> Vec<TestCase<E>> {
    vec![
        TestCase::new("post_{name,color}_returnsId", live_post),
        TestCase::new("delete_id_returnsVoid", live_delete),
        TestCase::new("put_{db,fruits,id,properties}_returnsVoid", live_put),
        TestCase::new("get_{db,fruits}_returnsAll", live_get_all),
        TestCase::new("get_{db,fruits,id}_returnsRow", live_get_by_id),
        TestCase::new("get_{db,fruits,emptyWhereObject}_returnsAll", live_get_empty_where),
    ]
}

fn fields(value: JsonValue) -> Fields {
    match value {
        JsonValue::Object(map) => map,
        _ => Fields::new(),
    }
}

fn id_fields(fixture: &Fixture, id: impl Into<JsonValue>) -> Fields {
    let mut id_map = Fields::new();
    id_map.insert(fixture.id_column.clone(), id.into());
    id_map
}

fn post_info(fixture: &Fixture, name: &str, color: &str) -> PostInfo {
    PostInfo::new(
        &fixture.database,
        &fixture.table,
        fields(json!({"name": name, "color": color})),
    )
}

fn expect_sql(db: &MysqlInterface<RecordingExecutor>, expected: String) -> Check {
    Check::equal(db.executor().last_query().map(str::to_string), Some(expected))
}

fn dry_post<'a>(
    db: &'a mut MysqlInterface<RecordingExecutor>,
    fixture: &'a Fixture,
) -> CaseFuture<'a> {
    Box::pin(async move {
        db.post(&post_info(fixture, "Apple", "Green")).await?;
        Ok(expect_sql(
            db,
            format!(
                r#"insert into {}.{} ( name, color ) values( "Apple", "Green" );"#,
                fixture.database, fixture.table
            ),
        ))
    })
}

fn dry_delete<'a>(
    db: &'a mut MysqlInterface<RecordingExecutor>,
    fixture: &'a Fixture,
) -> CaseFuture<'a> {
    Box::pin(async move {
        let info = DeleteInfo::new(&fixture.database, &fixture.table, id_fields(fixture, 1));
        db.delete(&info).await?;
        Ok(expect_sql(
            db,
            format!(
                "delete from {}.{} where {} = 1;",
                fixture.database, fixture.table, fixture.id_column
            ),
        ))
    })
}

fn dry_put<'a>(
    db: &'a mut MysqlInterface<RecordingExecutor>,
    fixture: &'a Fixture,
) -> CaseFuture<'a> {
    Box::pin(async move {
        let info = PutInfo::new(
            &fixture.database,
            &fixture.table,
            id_fields(fixture, 1),
            fields(json!({"name": "Pear", "color": "Brown"})),
        );
        db.put(&info).await?;
        Ok(expect_sql(
            db,
            format!(
                r#"update {}.{} set name = "Pear", color = "Brown" where {} = 1;"#,
                fixture.database, fixture.table, fixture.id_column
            ),
        ))
    })
}

fn dry_get_all<'a>(
    db: &'a mut MysqlInterface<RecordingExecutor>,
    fixture: &'a Fixture,
) -> CaseFuture<'a> {
    Box::pin(async move {
        db.get(&GetInfo::new(&fixture.database, &fixture.table))
            .await?;
        Ok(expect_sql(
            db,
            format!("select * from {}.{};", fixture.database, fixture.table),
        ))
    })
}

fn dry_get_by_id<'a>(
    db: &'a mut MysqlInterface<RecordingExecutor>,
    fixture: &'a Fixture,
) -> CaseFuture<'a> {
    Box::pin(async move {
        let info = GetInfo::new(&fixture.database, &fixture.table).id(id_fields(fixture, 1));
        db.get(&info).await?;
        Ok(expect_sql(
            db,
            format!(
                "select * from {}.{} where {} = 1;",
                fixture.database, fixture.table, fixture.id_column
            ),
        ))
    })
}

fn dry_get_id_and_where<'a>(
    db: &'a mut MysqlInterface<RecordingExecutor>,
    fixture: &'a Fixture,
) -> CaseFuture<'a> {
    Box::pin(async move {
        db.executor_mut().clear();
        let info = GetInfo::new(&fixture.database, &fixture.table)
            .id(id_fields(fixture, 1))
            .where_clause(r#"color = "Green""#);
        match db.get(&info).await {
            Err(MysqlInterfaceError::UsageError(_)) => Ok(Check::that(
                db.executor().queries().is_empty(),
                "sql was sent despite the usage error",
            )),
            Err(other) => Ok(Check::Fail(format!("unexpected error: {other}"))),
            Ok(_) => Ok(Check::Fail("id and where were both accepted".to_string())),
        }
    })
}

fn live_post<'a, E: SqlExecutor>(
    db: &'a mut MysqlInterface<E>,
    fixture: &'a Fixture,
) -> CaseFuture<'a> {
    Box::pin(async move {
        let id = db.post(&post_info(fixture, "Apple", "Green")).await?;
        let Some(id) = id else {
            return Ok(Check::Fail("insert did not report an id".to_string()));
        };
        db.delete(&DeleteInfo::new(
            &fixture.database,
            &fixture.table,
            id_fields(fixture, id),
        ))
        .await?;
        Ok(Check::Pass)
    })
}

fn live_delete<'a, E: SqlExecutor>(
    db: &'a mut MysqlInterface<E>,
    fixture: &'a Fixture,
) -> CaseFuture<'a> {
    Box::pin(async move {
        let Some(id) = db.post(&post_info(fixture, "Apple", "Red")).await? else {
            return Ok(Check::Fail("insert did not report an id".to_string()));
        };
        db.delete(&DeleteInfo::new(
            &fixture.database,
            &fixture.table,
            id_fields(fixture, id),
        ))
        .await?;

        let left = db
            .get(&GetInfo::new(&fixture.database, &fixture.table).id(id_fields(fixture, id)))
            .await?;
        Ok(Check::that(left.is_empty(), "row still present after delete"))
    })
}

fn live_put<'a, E: SqlExecutor>(
    db: &'a mut MysqlInterface<E>,
    fixture: &'a Fixture,
) -> CaseFuture<'a> {
    Box::pin(async move {
        let Some(id) = db.post(&post_info(fixture, "Appple", "Yellow")).await? else {
            return Ok(Check::Fail("insert did not report an id".to_string()));
        };
        db.put(&PutInfo::new(
            &fixture.database,
            &fixture.table,
            id_fields(fixture, id),
            fields(json!({"name": "Pear", "color": "Brown"})),
        ))
        .await?;

        let rows = db
            .get(
                &GetInfo::new(&fixture.database, &fixture.table)
                    .id(id_fields(fixture, id))
                    .properties(["name", "color"]),
            )
            .await?;
        db.delete(&DeleteInfo::new(
            &fixture.database,
            &fixture.table,
            id_fields(fixture, id),
        ))
        .await?;

        Ok(Check::equal(
            rows.to_json(),
            json!([{"name": "Pear", "color": "Brown"}]),
        ))
    })
}

fn live_get_all<'a, E: SqlExecutor>(
    db: &'a mut MysqlInterface<E>,
    fixture: &'a Fixture,
) -> CaseFuture<'a> {
    Box::pin(async move {
        let rows = db
            .get(&GetInfo::new(&fixture.database, &fixture.table))
            .await?;
        Ok(Check::that(rows.to_json().is_array(), "select did not return rows"))
    })
}

fn live_get_by_id<'a, E: SqlExecutor>(
    db: &'a mut MysqlInterface<E>,
    fixture: &'a Fixture,
) -> CaseFuture<'a> {
    Box::pin(async move {
        let Some(id) = db.post(&post_info(fixture, "Orange", "Orange")).await? else {
            return Ok(Check::Fail("insert did not report an id".to_string()));
        };
        let rows = db
            .get(&GetInfo::new(&fixture.database, &fixture.table).id(id_fields(fixture, id)))
            .await?;

        let mut expected = id_fields(fixture, id);
        expected.extend(fields(json!({"name": "Orange", "color": "Orange"})));

        db.delete(&DeleteInfo::new(
            &fixture.database,
            &fixture.table,
            id_fields(fixture, id),
        ))
        .await?;

        Ok(Check::equal(
            serde_json::to_string(&rows.to_json())?,
            serde_json::to_string(&JsonValue::Array(vec![JsonValue::Object(expected)]))?,
        ))
    })
}

fn live_get_empty_where<'a, E: SqlExecutor>(
    db: &'a mut MysqlInterface<E>,
    fixture: &'a Fixture,
) -> CaseFuture<'a> {
    Box::pin(async move {
        let all = db
            .get(&GetInfo::new(&fixture.database, &fixture.table))
            .await?;
        let empty_where = db
            .get(&GetInfo::new(&fixture.database, &fixture.table).where_clause(Fields::new()))
            .await?;
        Ok(Check::equal(empty_where.to_json(), all.to_json()))
    })
}
