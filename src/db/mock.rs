//! Mock database client for testing.
//!
//! Provides an in-memory stand-in for Spanner that answers with scripted
//! results and records every statement it receives.

use super::{DatabaseClient, QueryStats, ResultSet, Value};
use crate::error::{Result, SpannerCliError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// A scripted answer for a specific SQL text.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return these rows.
    Rows(ResultSet),
    /// Fail with a not-found error carrying this message.
    NotFound(String),
    /// Fail with a generic API error carrying this message.
    Error(String),
}

/// A statement received by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub database: String,
    pub sql: String,
}

/// A mock database client that returns predefined results.
#[derive(Debug, Default)]
pub struct MockDatabaseClient {
    databases: Mutex<Vec<String>>,
    responses: Mutex<HashMap<String, MockResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
    deny_list: bool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

impl MockDatabaseClient {
    /// Creates a mock with no databases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an existing database.
    pub fn with_database(self, name: impl Into<String>) -> Self {
        lock(&self.databases).push(name.into());
        self
    }

    /// Scripts the response for an exact SQL text.
    pub fn with_response(self, sql: impl Into<String>, response: MockResponse) -> Self {
        lock(&self.responses).insert(sql.into(), response);
        self
    }

    /// Makes `list_databases` fail as if the caller lacked permission.
    pub fn deny_list_databases(mut self) -> Self {
        self.deny_list = true;
        self
    }

    /// Returns every statement received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Returns the SQL text of the most recent statement.
    pub fn last_sql(&self) -> Option<String> {
        lock(&self.calls).last().map(|c| c.sql.clone())
    }

    fn record(&self, database: &str, sql: &str) {
        lock(&self.calls).push(RecordedCall {
            database: database.to_string(),
            sql: sql.to_string(),
        });
    }

    fn ensure_database(&self, database: &str) -> Result<()> {
        if lock(&self.databases).iter().any(|d| d == database) {
            Ok(())
        } else {
            Err(SpannerCliError::not_found(format!(
                "Database not found: {}",
                database
            )))
        }
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    async fn execute_sql(&self, database: &str, sql: &str) -> Result<ResultSet> {
        self.record(database, sql);
        self.ensure_database(database)?;

        match lock(&self.responses).get(sql) {
            Some(MockResponse::Rows(set)) => return Ok(set.clone()),
            Some(MockResponse::NotFound(msg)) => return Err(SpannerCliError::not_found(msg)),
            Some(MockResponse::Error(msg)) => return Err(SpannerCliError::api(msg)),
            None => {}
        }

        if sql.eq_ignore_ascii_case("SELECT 1") {
            return Ok(ResultSet {
                columns: vec![String::new()],
                rows: vec![vec![Value::Int(1)]],
                stats: Some(QueryStats {
                    rows_returned: 1,
                    rows_scanned: 0,
                    elapsed_time: "0.1 msecs".to_string(),
                    cpu_time: "0.1 msecs".to_string(),
                }),
            });
        }

        Ok(ResultSet::default())
    }

    async fn execute_dml(&self, database: &str, sql: &str) -> Result<i64> {
        self.record(database, sql);
        self.ensure_database(database)?;
        if let Some(MockResponse::Error(msg)) = lock(&self.responses).get(sql) {
            return Err(SpannerCliError::api(msg));
        }
        Ok(1)
    }

    async fn update_ddl(&self, database: &str, sql: &str) -> Result<()> {
        self.record(database, sql);
        self.ensure_database(database)
    }

    async fn create_database(&self, database: &str) -> Result<()> {
        let mut databases = lock(&self.databases);
        if databases.iter().any(|d| d == database) {
            return Err(SpannerCliError::api(format!(
                "Database already exists: {}",
                database
            )));
        }
        databases.push(database.to_string());
        Ok(())
    }

    async fn drop_database(&self, database: &str) -> Result<()> {
        self.ensure_database(database)?;
        lock(&self.databases).retain(|d| d != database);
        Ok(())
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        if self.deny_list {
            return Err(SpannerCliError::permission_denied(
                "spanner.databases.list denied",
            ));
        }
        Ok(lock(&self.databases).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_select_one() {
        let client = MockDatabaseClient::new().with_database("db");
        let result = client.execute_sql("db", "SELECT 1").await.unwrap();
        assert_eq!(result.rows, vec![vec![Value::Int(1)]]);
        assert_eq!(client.last_sql().as_deref(), Some("SELECT 1"));
    }

    #[tokio::test]
    async fn test_mock_unknown_database() {
        let client = MockDatabaseClient::new().with_database("db");
        let err = client.execute_sql("other", "SELECT 1").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_mock_create_and_drop() {
        let client = MockDatabaseClient::new();
        client.create_database("fresh").await.unwrap();
        assert_eq!(client.list_databases().await.unwrap(), vec!["fresh"]);
        client.drop_database("fresh").await.unwrap();
        assert!(client.list_databases().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_denied_listing() {
        let client = MockDatabaseClient::new().deny_list_databases();
        let err = client.list_databases().await.unwrap_err();
        assert!(matches!(err, SpannerCliError::PermissionDenied(_)));
    }
}
