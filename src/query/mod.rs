//! Statement classification for query routing.
//!
//! Decides which executor path a raw statement takes. Classification is a
//! case-insensitive keyword prefix check; no SQL parsing is attempted.

mod text;

pub use text::{
    is_ddl_query, is_write_query, normalize_whitespace, strip_statement, trailing_word,
};

/// Suffix that requests vertical output for a read.
pub const VERTICAL_SUFFIX: &str = "\\G";

/// How a statement is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// SELECT and anything else not matched below.
    Read,
    /// INSERT, UPDATE, DELETE.
    Write,
    /// `CREATE DATABASE` / `DROP DATABASE`.
    Database,
    /// CREATE, ALTER, DROP on schema objects.
    Ddl,
}

impl QueryKind {
    /// Classifies a statement.
    pub fn classify(sql: &str) -> Self {
        let sql = sql.trim_start();
        if is_write_query(sql) {
            Self::Write
        } else if is_ddl_query(sql) {
            if is_database_statement(sql) {
                Self::Database
            } else {
                Self::Ddl
            }
        } else {
            Self::Read
        }
    }
}

fn is_database_statement(sql: &str) -> bool {
    let upper = normalize_whitespace(sql).to_uppercase();
    upper.starts_with("CREATE DATABASE") || upper.starts_with("DROP DATABASE")
}

/// Splits a trailing `\G` off a read statement.
///
/// Returns the statement without the suffix and whether it was present.
pub fn split_vertical_suffix(sql: &str) -> (&str, bool) {
    let trimmed = sql.trim();
    match trimmed.strip_suffix(VERTICAL_SUFFIX) {
        Some(rest) => (rest, true),
        None => (sql, false),
    }
}
