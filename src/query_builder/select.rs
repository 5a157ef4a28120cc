use crate::error::MysqlInterfaceError;
use crate::model::{GetInfo, Limit, Properties, WhereClause};

use super::{LIMIT_PREFIX, WHERE_PREFIX, ensure_prefix, qualified_table, render_predicate};

/// Render a select.
///
/// A non-empty `id` becomes the where clause; otherwise a non-empty `where_clause` is
/// used. Both set at once is rejected before anything is rendered.
///
/// # Errors
/// Returns `MysqlInterfaceError::UsageError` if both `id` and `where_clause` are non-empty.
pub fn render_select(info: &GetInfo) -> Result<String, MysqlInterfaceError> {
    let id = info.id.as_ref().filter(|id| !id.is_empty());
    let where_clause = info.where_clause.as_ref().filter(|w| !w.is_empty());

    if id.is_some() && where_clause.is_some() {
        return Err(MysqlInterfaceError::UsageError(
            "The id and where clause were both set.".to_string(),
        ));
    }

    let mut clauses = vec![
        "select".to_string(),
        render_properties(&info.properties),
        "from".to_string(),
        qualified_table(&info.database, &info.table),
    ];

    let filter = match (id, where_clause) {
        (Some(id), _) => Some(format!("where {}", render_predicate(id))),
        (None, Some(WhereClause::Fields(fields))) => {
            Some(format!("where {}", render_predicate(fields)))
        }
        (None, Some(WhereClause::Raw(text))) => {
            Some(ensure_prefix(&WHERE_PREFIX, "where", text.trim()))
        }
        (None, None) => None,
    };
    clauses.extend(filter);
    clauses.extend(info.limit.as_ref().and_then(render_limit));

    Ok(format!("{};", clauses.join(" ")))
}

fn render_properties(properties: &Properties) -> String {
    match properties {
        Properties::List(columns) if !columns.is_empty() => columns.join(", "),
        Properties::Raw(text) if !text.trim().is_empty() => text.trim().to_string(),
        _ => "*".to_string(),
    }
}

/// A zero count or blank text means no limit.
fn render_limit(limit: &Limit) -> Option<String> {
    match limit {
        Limit::Count(0) => None,
        Limit::Count(count) => Some(format!("limit {count}")),
        Limit::Raw(text) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(ensure_prefix(&LIMIT_PREFIX, "limit", text))
            }
        }
    }
}
