//! The connected session: current target plus query routing.
//!
//! Holds the project/instance/database the user is working against and
//! routes raw statements to the matching executor path.

use tracing::{debug, warn};

use crate::db::{DatabaseClient, DisplayFormat, ResultContainer, ResultSet};
use crate::error::Result;
use crate::query::{self, QueryKind};

/// Default cap on rows read from a single query.
pub const DEFAULT_MAX_ROWS: usize = 1000;

/// Base URL of the Cloud Console.
const CONSOLE_URL: &str = "https://console.cloud.google.com";

/// Identifies the database the session talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub project: String,
    pub instance: String,
    pub database: String,
}

/// An interactive or batch session against one Spanner instance.
pub struct Session {
    client: Box<dyn DatabaseClient>,
    target: Target,
    max_rows: usize,
}

impl Session {
    /// Creates a session using the given client and target.
    pub fn new(client: Box<dyn DatabaseClient>, target: Target) -> Self {
        debug!(
            "Starting session project={}, instance={}, database={}",
            target.project, target.instance, target.database
        );
        Self {
            client,
            target,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }

    /// Sets the row limit for reads.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn project(&self) -> &str {
        &self.target.project
    }

    pub fn instance(&self) -> &str {
        &self.target.instance
    }

    pub fn database(&self) -> &str {
        &self.target.database
    }

    /// Points the session at another database. No round-trip is made.
    pub fn change_database(&mut self, database: impl Into<String>) {
        self.target.database = database.into();
        debug!("Active database is now {}", self.target.database);
    }

    /// Prompt shown before each input line.
    pub fn prompt(&self) -> String {
        format!(
            "Spanner [{}/{}/{}]:\n> ",
            self.target.project, self.target.instance, self.target.database
        )
    }

    /// Cloud Console page for the current database.
    pub fn console_url(&self) -> String {
        format!(
            "{}/spanner/instances/{}/databases/{}?project={}",
            CONSOLE_URL, self.target.instance, self.target.database, self.target.project
        )
    }

    /// Routes a raw statement to the read, write or DDL path.
    pub async fn query(&self, sql: &str) -> Result<ResultContainer> {
        debug!("QUERY: {}", sql);
        match QueryKind::classify(sql) {
            QueryKind::Write => self.write_query(sql).await,
            QueryKind::Ddl | QueryKind::Database => self.ddl_query(sql).await,
            QueryKind::Read => self.read_query(sql).await,
        }
    }

    /// Runs a read in a snapshot, honoring the `\G` suffix and row limit.
    pub async fn read_query(&self, sql: &str) -> Result<ResultContainer> {
        let (sql, vertical) = query::split_vertical_suffix(sql);
        let sql = query::strip_statement(sql);

        let set = self.client.execute_sql(&self.target.database, sql).await?;
        let mut result = self.limit_rows(set);
        if vertical {
            result.meta.format = DisplayFormat::Vertical;
        }
        Ok(result)
    }

    fn limit_rows(&self, set: ResultSet) -> ResultContainer {
        let ResultSet {
            columns,
            mut rows,
            stats,
        } = set;

        let truncated = rows.len() > self.max_rows;
        rows.truncate(self.max_rows);

        let message = match stats {
            Some(stats) => format!(
                "rows_returned: {}, scanned: {}, elapsed_time: {}, cpu_time:{}",
                with_thousands(stats.rows_returned),
                stats.rows_scanned,
                stats.elapsed_time,
                stats.cpu_time
            ),
            None if truncated => format!(
                "returns over limit: {}, aborted to read all results, stats is not available.",
                self.max_rows
            ),
            None => String::new(),
        };

        ResultContainer::with_data(columns, rows).with_message(message)
    }

    /// Runs one DML statement in a read-write transaction.
    pub async fn write_query(&self, sql: &str) -> Result<ResultContainer> {
        let sql = query::strip_statement(sql);
        let affected = self.client.execute_dml(&self.target.database, sql).await?;
        Ok(ResultContainer::message(format!("{} row affected.", affected)))
    }

    /// Applies a schema change, or creates/drops a database.
    pub async fn ddl_query(&self, sql: &str) -> Result<ResultContainer> {
        let sql = query::strip_statement(sql);
        if QueryKind::classify(sql) == QueryKind::Database {
            return self.create_or_drop_database(sql).await;
        }

        self.client.update_ddl(&self.target.database, sql).await?;
        Ok(ResultContainer::message("operation done."))
    }

    async fn create_or_drop_database(&self, sql: &str) -> Result<ResultContainer> {
        let database = query::trailing_word(sql);
        if sql.trim_start().to_uppercase().starts_with("CREATE") {
            self.client.create_database(database).await?;
            Ok(ResultContainer::message(format!(
                "Created database {} on instance {}",
                database, self.target.instance
            )))
        } else {
            self.client.drop_database(database).await?;
            Ok(ResultContainer::message(format!(
                "Drop database {} on instance {}",
                database, self.target.instance
            )))
        }
    }

    /// Lists database ids in the instance.
    ///
    /// Failures (typically a missing `spanner.databases.list` permission)
    /// are logged and yield an empty list.
    pub async fn list_databases(&self) -> Vec<String> {
        match self.client.list_databases().await {
            Ok(names) => names,
            Err(e) => {
                warn!("Could not list databases: {}", e);
                Vec::new()
            }
        }
    }

    /// Reads the first column of every row, for completion candidates.
    /// Failures are logged and yield an empty list.
    pub async fn first_column(&self, sql: &str) -> Vec<String> {
        match self.client.execute_sql(&self.target.database, sql).await {
            Ok(set) => set
                .rows
                .into_iter()
                .filter_map(|row| row.into_iter().next())
                .map(|v| v.to_display_string())
                .collect(),
            Err(e) => {
                warn!("Could not load completion candidates: {}", e);
                Vec::new()
            }
        }
    }
}

fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
