//! Schema inspection handlers (SHOW TABLES, DESCRIBE, SHOW INDEX).
//!
//! All three are thin wrappers that build an INFORMATION_SCHEMA query and
//! run it through the session's read path.

use super::CommandResult;
use crate::error::Result;
use crate::query::{strip_statement, trailing_word};
use crate::session::Session;

/// Tables of the default schema.
pub const LIST_TABLES_SQL: &str =
    "SELECT TABLE_NAME FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_CATALOG='' AND TABLE_SCHEMA=''";

/// Columns of the default schema, used for completion.
pub const LIST_COLUMNS_SQL: &str =
    "SELECT COLUMN_NAME FROM INFORMATION_SCHEMA.COLUMNS WHERE TABLE_CATALOG='' AND TABLE_SCHEMA=''";

const SHOW_INDEX_SQL: &str = "SELECT c.TABLE_NAME, c.INDEX_NAME, c.INDEX_TYPE, c.COLUMN_NAME, \
c.SPANNER_TYPE, c.IS_NULLABLE, c.COLUMN_ORDERING, i.PARENT_TABLE_NAME, i.IS_UNIQUE, \
i.IS_NULL_FILTERED, i.INDEX_STATE \
FROM INFORMATION_SCHEMA.INDEX_COLUMNS c \
LEFT JOIN INFORMATION_SCHEMA.INDEXES i ON c.TABLE_NAME = i.TABLE_NAME AND i.INDEX_NAME = c.INDEX_NAME \
WHERE c.TABLE_SCHEMA=''";

const SHOW_INDEX_ORDER: &str = " ORDER BY c.TABLE_NAME, c.INDEX_NAME ASC, c.ORDINAL_POSITION ASC";

/// Builds the column listing for one table.
pub fn describe_table_sql(table: &str) -> String {
    format!(
        "SELECT COLUMN_NAME, SPANNER_TYPE, COLUMN_DEFAULT, IS_NULLABLE \
         FROM INFORMATION_SCHEMA.COLUMNS t WHERE t.TABLE_NAME = '{}' \
         ORDER BY ORDINAL_POSITION ASC",
        table
    )
}

/// Builds the index listing, for every table when `table` is `None`.
pub fn show_index_sql(table: Option<&str>) -> String {
    let mut sql = SHOW_INDEX_SQL.to_string();
    if let Some(table) = table {
        sql.push_str(&format!(
            " AND c.TABLE_NAME='{0}' AND i.TABLE_NAME = '{0}'",
            table
        ));
    }
    sql.push_str(SHOW_INDEX_ORDER);
    sql
}

/// Handle `SHOW TABLES` / `\lt`.
pub async fn handle_list_tables(session: &Session) -> Result<CommandResult> {
    Ok(session.query(LIST_TABLES_SQL).await?.into())
}

/// Handle `DESCRIBE <table>`, `DESC <table>` and `\dt <table>`.
pub async fn handle_describe_table(session: &Session, text: &str) -> Result<CommandResult> {
    let text = strip_statement(text);
    if text.split_whitespace().count() != 2 {
        return Ok(CommandResult::message("Missing table name."));
    }

    let sql = describe_table_sql(trailing_word(text));
    Ok(session.query(&sql).await?.into())
}

/// Handle `SHOW INDEX [table]`.
///
/// Without a table name the last word is `INDEX` itself, which selects
/// every table.
pub async fn handle_show_index(session: &Session, text: &str) -> Result<CommandResult> {
    let table = trailing_word(strip_statement(text));
    let filter = (!table.eq_ignore_ascii_case("INDEX")).then_some(table);

    Ok(session.query(&show_index_sql(filter)).await?.into())
}
