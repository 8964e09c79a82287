//! Tab completion for the line editor.
//!
//! The first word completes from statement keywords and command keys; later
//! words complete from everything, including database, table and column
//! names loaded from the instance. Matching is a case-insensitive prefix
//! match on the text after the last space, and candidates are sorted.

use std::collections::BTreeSet;

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::app::SchemaNames;

/// Words that may start a statement.
const STATEMENTS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "WITH", "CREATE", "ALTER", "DROP", "SHOW",
    "DESCRIBE", "DESC", "GRANT", "REVOKE", "ANALYZE",
];

/// Schema objects and clauses used in DDL.
const DDL: &[&str] = &[
    "DATABASE", "TABLE", "INDEX", "UNIQUE", "NULL_FILTERED", "INTERLEAVE", "PARENT", "CASCADE",
    "NO ACTION", "PRIMARY KEY", "FOREIGN KEY", "REFERENCES", "CONSTRAINT", "CHECK", "COLUMN",
    "STORING", "VIEW", "SQL SECURITY INVOKER", "ROW DELETION POLICY", "OLDER_THAN",
    "CHANGE STREAM", "OPTIONS", "ADD", "SET",
];

const KEYWORDS: &[&str] = &[
    "ALL", "AND", "ANY", "ARRAY", "AS", "ASC", "AT", "BETWEEN", "BY", "CASE", "CAST", "CROSS",
    "DEFAULT", "DISTINCT", "ELSE", "END", "ESCAPE", "EXCEPT", "EXISTS", "FALSE", "FOR", "FROM",
    "FULL", "GROUP", "HAVING", "IF", "IGNORE", "IN", "INNER", "INTERSECT", "INTERVAL", "INTO",
    "IS", "JOIN", "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "NULLS", "OF", "OFFSET", "ON", "OR",
    "ORDER", "OUTER", "OVER", "PARTITION", "RANGE", "RIGHT", "ROWS", "STRUCT", "TABLESAMPLE",
    "THEN", "TRUE", "UNION", "UNNEST", "USING", "VALUES", "WHEN", "WHERE", "WINDOW",
];

const FUNCTIONS: &[&str] = &[
    "ABS", "ARRAY_AGG", "ARRAY_LENGTH", "AVG", "COALESCE", "CONCAT", "COUNT", "CURRENT_DATE",
    "CURRENT_TIMESTAMP", "DATE_ADD", "DATE_DIFF", "EXTRACT", "FORMAT", "GENERATE_UUID",
    "IFNULL", "JSON_VALUE", "LENGTH", "LOWER", "MAX", "MIN", "PENDING_COMMIT_TIMESTAMP",
    "REGEXP_CONTAINS", "REPLACE", "SAFE_CAST", "STARTS_WITH", "STRING_AGG", "SUBSTR", "SUM",
    "TIMESTAMP_ADD", "TIMESTAMP_DIFF", "TRIM", "UPPER",
];

const DATATYPES: &[&str] = &[
    "BOOL", "BYTES", "DATE", "FLOAT32", "FLOAT64", "INT64", "JSON", "NUMERIC", "STRING",
    "TIMESTAMP",
];

/// Completion candidates.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    commands: Vec<String>,
    schema: SchemaNames,
}

impl Candidates {
    /// Creates candidates with the given command keys and no schema names.
    pub fn new(commands: Vec<String>) -> Self {
        Self {
            commands,
            schema: SchemaNames::default(),
        }
    }

    /// Replaces the database, table and column names.
    pub fn set_schema(&mut self, schema: SchemaNames) {
        self.schema = schema;
    }

    /// Sorted candidates starting with `prefix`, ignoring case.
    pub fn find_matches(&self, prefix: &str, first_word: bool) -> Vec<String> {
        let mut pool: BTreeSet<&str> = STATEMENTS.iter().chain(DDL).copied().collect();
        pool.extend(self.commands.iter().map(String::as_str));

        if !first_word {
            pool.extend(KEYWORDS.iter().chain(FUNCTIONS).chain(DATATYPES).copied());
            pool.extend(
                self.schema
                    .databases
                    .iter()
                    .chain(&self.schema.tables)
                    .chain(&self.schema.columns)
                    .map(String::as_str),
            );
        }

        let prefix = prefix.to_lowercase();
        pool.into_iter()
            .filter(|c| c.to_lowercase().starts_with(&prefix))
            .map(str::to_string)
            .collect()
    }
}

/// rustyline helper providing completion.
#[derive(Debug, Default)]
pub struct SqlHelper {
    candidates: Candidates,
}

impl SqlHelper {
    pub fn new(candidates: Candidates) -> Self {
        Self { candidates }
    }

    pub fn candidates_mut(&mut self) -> &mut Candidates {
        &mut self.candidates
    }
}

impl Completer for SqlHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, word, first_word) = current_word(line, pos);
        let pairs = self
            .candidates
            .find_matches(word, first_word)
            .into_iter()
            .map(|c| Pair {
                display: c.clone(),
                replacement: c,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for SqlHelper {
    type Hint = String;
}

impl Highlighter for SqlHelper {}

impl Validator for SqlHelper {}

impl Helper for SqlHelper {}

/// Start offset and text of the word under the cursor, and whether it is the
/// first word of the line.
fn current_word(line: &str, pos: usize) -> (usize, &str, bool) {
    let before = line.get(..pos).unwrap_or(line);
    let start = before
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let first_word = before[..start].trim().is_empty();
    (start, &before[start..], first_word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Candidates {
        let mut candidates = Candidates::new(vec![
            "use".to_string(),
            "\\dt".to_string(),
            "show tables".to_string(),
        ]);
        candidates.set_schema(SchemaNames {
            databases: vec!["music".to_string()],
            tables: vec!["Singers".to_string(), "Albums".to_string()],
            columns: vec!["SingerId".to_string()],
        });
        candidates
    }

    #[test]
    fn test_current_word() {
        assert_eq!(current_word("SEL", 3), (0, "SEL", true));
        assert_eq!(current_word("SELECT * FROM Si", 16), (14, "Si", false));
        assert_eq!(current_word("SELECT ", 7), (7, "", false));
        assert_eq!(current_word("  \\d", 4), (2, "\\d", true));
    }

    #[test]
    fn test_first_word_skips_schema_names() {
        let matches = candidates().find_matches("s", true);
        assert!(matches.contains(&"SELECT".to_string()));
        assert!(matches.contains(&"show tables".to_string()));
        assert!(!matches.contains(&"Singers".to_string()));
    }

    #[test]
    fn test_later_words_include_schema_names() {
        let matches = candidates().find_matches("sing", false);
        assert_eq!(matches, vec!["SingerId", "Singers"]);
    }

    #[test]
    fn test_command_aliases_complete() {
        assert_eq!(candidates().find_matches("\\d", true), vec!["\\dt"]);
    }

    #[test]
    fn test_matches_are_sorted_and_unique() {
        let matches = candidates().find_matches("d", false);
        let mut sorted = matches.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(matches, sorted);
        assert!(matches.contains(&"DATABASE".to_string()));
        assert!(matches.contains(&"DATE".to_string()));
    }
}
