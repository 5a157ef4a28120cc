use crate::model::{DeleteInfo, PostInfo, PutInfo};

use super::{qualified_table, render_assignments, render_predicate, render_value};

/// `insert into db.table ( k1, k2 ) values( v1, v2 );`
#[must_use]
pub fn render_insert(info: &PostInfo) -> String {
    let keys = info
        .properties
        .keys()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    let values = info
        .properties
        .values()
        .map(render_value)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "insert into {} ( {keys} ) values( {values} );",
        qualified_table(&info.database, &info.table)
    )
}

/// `update db.table set k1 = v1, k2 = v2 where id = x;`
#[must_use]
pub fn render_update(info: &PutInfo) -> String {
    format!(
        "update {} set {} where {};",
        qualified_table(&info.database, &info.table),
        render_assignments(&info.properties),
        render_predicate(&info.id)
    )
}

/// `delete from db.table where id = x;`
#[must_use]
pub fn render_delete(info: &DeleteInfo) -> String {
    format!(
        "delete from {} where {};",
        qualified_table(&info.database, &info.table),
        render_predicate(&info.id)
    )
}
