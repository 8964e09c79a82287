//! Pure text helpers shared by the command resolver, the handlers and the
//! query router.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static TRAILING_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+$").unwrap());

const STATEMENT_TERMINATOR: char = ';';

const WRITE_PREFIXES: [&str; 3] = ["INSERT", "UPDATE", "DELETE"];
const DDL_PREFIXES: [&str; 3] = ["CREATE", "ALTER", "DROP"];

/// Collapses every run of whitespace into a single space. Ends are kept.
pub fn normalize_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s, " ").into_owned()
}

/// Trims surrounding whitespace and one trailing `;`.
pub fn strip_statement(s: &str) -> &str {
    let s = s.trim();
    s.strip_suffix(STATEMENT_TERMINATOR).unwrap_or(s)
}

/// Returns the run of word characters at the very end of `s`, or `""` when
/// `s` is empty or ends in anything else.
///
/// ```
/// use spanner_cli::query::trailing_word;
///
/// assert_eq!(trailing_word("DESCRIBE Singers"), "Singers");
/// assert_eq!(trailing_word("SELECT 1;"), "");
/// ```
pub fn trailing_word(s: &str) -> &str {
    if s.chars().next_back().map_or(true, char::is_whitespace) {
        return "";
    }
    TRAILING_WORD.find(s).map_or("", |m| m.as_str())
}

fn has_prefix_ignore_case(sql: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| {
        sql.get(..p.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(p))
    })
}

/// True for INSERT, UPDATE and DELETE statements.
pub fn is_write_query(sql: &str) -> bool {
    has_prefix_ignore_case(sql, &WRITE_PREFIXES)
}

/// True for CREATE, ALTER and DROP statements.
pub fn is_ddl_query(sql: &str) -> bool {
    has_prefix_ignore_case(sql, &DDL_PREFIXES)
}
