//! Database abstraction layer for spanner-cli.
//!
//! Provides a trait-based interface for the Spanner operations the client
//! needs, so the command layer can be exercised against a mock.

mod mock;
mod rest;
mod spanner;
mod types;

pub use mock::{MockDatabaseClient, MockResponse, RecordedCall};
pub use spanner::{
    SpannerClient, SpannerClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS,
};
pub use types::{DisplayFormat, ResultContainer, ResultMeta, Row, Value};

use crate::error::Result;
use async_trait::async_trait;

/// Statistics returned alongside a profiled query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStats {
    pub rows_returned: u64,
    pub rows_scanned: u64,
    pub elapsed_time: String,
    pub cpu_time: String,
}

/// Rows, column names and optional statistics from a read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub stats: Option<QueryStats>,
}

/// Trait defining the interface for Spanner clients.
///
/// Every call addresses a database by id within the client's instance.
/// All operations are async and return Results with SpannerCliError.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Executes a read-only query in a single-use snapshot.
    async fn execute_sql(&self, database: &str, sql: &str) -> Result<ResultSet>;

    /// Executes one DML statement in a read-write transaction and commits.
    /// Returns the number of affected rows.
    async fn execute_dml(&self, database: &str, sql: &str) -> Result<i64>;

    /// Applies a schema change and waits for it to finish.
    async fn update_ddl(&self, database: &str, sql: &str) -> Result<()>;

    /// Creates a database and waits for it to become ready.
    async fn create_database(&self, database: &str) -> Result<()>;

    /// Drops a database.
    async fn drop_database(&self, database: &str) -> Result<()>;

    /// Lists database ids in the instance.
    async fn list_databases(&self) -> Result<Vec<String>>;
}

#[async_trait]
impl<T: DatabaseClient + ?Sized> DatabaseClient for std::sync::Arc<T> {
    async fn execute_sql(&self, database: &str, sql: &str) -> Result<ResultSet> {
        (**self).execute_sql(database, sql).await
    }

    async fn execute_dml(&self, database: &str, sql: &str) -> Result<i64> {
        (**self).execute_dml(database, sql).await
    }

    async fn update_ddl(&self, database: &str, sql: &str) -> Result<()> {
        (**self).update_ddl(database, sql).await
    }

    async fn create_database(&self, database: &str) -> Result<()> {
        (**self).create_database(database).await
    }

    async fn drop_database(&self, database: &str) -> Result<()> {
        (**self).drop_database(database).await
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        (**self).list_databases().await
    }
}
