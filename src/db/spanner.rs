//! Cloud Spanner client over the REST API.
//!
//! Implements the DatabaseClient trait against `spanner.googleapis.com`
//! or any compatible endpoint (the emulator's REST port, for instance).

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use super::rest::{
    BatchDmlResponse, ErrorResponse, ListDatabasesResponse, Operation, ResultSetResponse,
    SessionResponse,
};
use super::{DatabaseClient, ResultSet};
use crate::error::{Result, SpannerCliError};

/// Default timeout for API requests, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Production endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://spanner.googleapis.com/";

/// Delay between polls of a long-running operation.
const OPERATION_POLL_INTERVAL_MS: u64 = 500;

/// Spanner client configuration.
#[derive(Debug, Clone)]
pub struct SpannerClientConfig {
    /// API root, e.g. `https://spanner.googleapis.com/`.
    pub endpoint: Url,
    /// Google Cloud project id.
    pub project: String,
    /// Spanner instance id.
    pub instance: String,
    /// OAuth2 access token; omitted from requests when absent.
    pub access_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl SpannerClientConfig {
    /// Creates a config for the production endpoint.
    pub fn new(project: impl Into<String>, instance: impl Into<String>) -> Result<Self> {
        let endpoint = Url::parse(DEFAULT_ENDPOINT)
            .map_err(|e| SpannerCliError::internal(format!("Bad default endpoint: {e}")))?;
        Ok(Self {
            endpoint,
            project: project.into(),
            instance: instance.into(),
            access_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Sets the API endpoint.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    /// Sets the access token.
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|t| !t.is_empty());
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// `projects/{project}/instances/{instance}`
    pub fn instance_path(&self) -> String {
        format!("projects/{}/instances/{}", self.project, self.instance)
    }

    /// `projects/{project}/instances/{instance}/databases/{database}`
    pub fn database_path(&self, database: &str) -> String {
        format!("{}/databases/{}", self.instance_path(), database)
    }
}

/// Spanner REST client.
///
/// Keeps one session per database; a session the server has expired is
/// dropped and recreated once.
pub struct SpannerClient {
    config: SpannerClientConfig,
    http: Client,
    sessions: Mutex<HashMap<String, String>>,
}

impl SpannerClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: SpannerClientConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SpannerCliError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    fn url(&self, resource: &str) -> String {
        let root = self.config.endpoint.as_str().trim_end_matches('/');
        format!("{}/v1/{}", root, resource)
    }

    fn request(&self, method: Method, resource: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(resource));
        match &self.config.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and decodes the JSON body, mapping API failures.
    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder
            .send()
            .await
            .map_err(|e| SpannerCliError::api(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SpannerCliError::api(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(Self::parse_error(status, &body));
        }

        let body = if body.trim().is_empty() {
            "{}"
        } else {
            body.as_str()
        };
        serde_json::from_str(body)
            .map_err(|e| SpannerCliError::api(format!("Failed to parse response: {}", e)))
    }

    /// Maps an error response onto the error taxonomy.
    fn parse_error(status: StatusCode, body: &str) -> SpannerCliError {
        // The body's code wins over the HTTP status when it is a valid one.
        let (status, code, message) = match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) => (
                StatusCode::from_u16(parsed.error.code).unwrap_or(status),
                parsed.error.status,
                parsed.error.message,
            ),
            Err(_) => (status, String::new(), format!("{} {}", status, body.trim())),
        };

        if code == "NOT_FOUND" || status == StatusCode::NOT_FOUND {
            SpannerCliError::not_found(message)
        } else if code == "PERMISSION_DENIED" || status == StatusCode::FORBIDDEN {
            SpannerCliError::permission_denied(message)
        } else if code == "INVALID_ARGUMENT" || status == StatusCode::BAD_REQUEST {
            SpannerCliError::invalid_argument(message)
        } else {
            SpannerCliError::api(message)
        }
    }

    async fn session(&self, database: &str) -> Result<String> {
        let mut sessions = self.sessions.lock().await;
        if let Some(name) = sessions.get(database) {
            return Ok(name.clone());
        }

        let resource = format!("{}/sessions", self.config.database_path(database));
        debug!("Creating session on {}", resource);
        let created: SessionResponse = self
            .send(self.request(Method::POST, &resource).json(&json!({})))
            .await?;
        sessions.insert(database.to_string(), created.name.clone());
        Ok(created.name)
    }

    async fn forget_session(&self, database: &str) {
        self.sessions.lock().await.remove(database);
    }

    /// Runs `op` with a session, recreating the session once if the server
    /// reports it as expired.
    async fn with_session<T, F, Fut>(&self, database: &str, op: F) -> Result<T>
    where
        F: Fn(String) -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let session = self.session(database).await?;
        match op(session).await {
            Err(SpannerCliError::NotFound(msg)) if msg.contains("Session not found") => {
                warn!("Session expired, creating a new one: {}", msg);
                self.forget_session(database).await;
                let session = self.session(database).await?;
                op(session).await
            }
            other => other,
        }
    }

    async fn wait_operation(&self, mut operation: Operation) -> Result<()> {
        loop {
            if let Some(error) = &operation.error {
                return Err(SpannerCliError::api(format!(
                    "code={}, {}",
                    error.code, error.message
                )));
            }
            if operation.done {
                return Ok(());
            }
            tokio::time::sleep(Duration::from_millis(OPERATION_POLL_INTERVAL_MS)).await;
            debug!("Polling operation {}", operation.name);
            let name = operation.name.clone();
            operation = self.send(self.request(Method::GET, &name)).await?;
        }
    }
}

#[async_trait]
impl DatabaseClient for SpannerClient {
    async fn execute_sql(&self, database: &str, sql: &str) -> Result<ResultSet> {
        let body = json!({ "sql": sql, "queryMode": "PROFILE" });
        let response: ResultSetResponse = self
            .with_session(database, |session| {
                let builder = self
                    .request(Method::POST, &format!("{}:executeSql", session))
                    .json(&body);
                self.send(builder)
            })
            .await?;

        Ok(ResultSet {
            columns: response.column_names(),
            rows: response.typed_rows(),
            stats: response.query_stats(),
        })
    }

    async fn execute_dml(&self, database: &str, sql: &str) -> Result<i64> {
        let body = json!({
            "transaction": { "begin": { "readWrite": {} } },
            "statements": [ { "sql": sql } ],
            "seqno": "1",
        });

        self.with_session(database, |session| {
            let body = &body;
            async move {
                let batch: BatchDmlResponse = self
                    .send(
                        self.request(Method::POST, &format!("{}:executeBatchDml", session))
                            .json(body),
                    )
                    .await?;

                if let Some(status) = &batch.status {
                    if status.code != 0 {
                        return Err(SpannerCliError::api(format!(
                            "code={}, {}",
                            status.code, status.message
                        )));
                    }
                }

                let first = batch
                    .result_sets
                    .first()
                    .ok_or_else(|| SpannerCliError::api("Batch DML returned no result sets"))?;
                let transaction_id = first
                    .metadata
                    .as_ref()
                    .and_then(|m| m.transaction.as_ref())
                    .map(|t| t.id.clone())
                    .ok_or_else(|| SpannerCliError::api("Batch DML did not begin a transaction"))?;
                let affected = first
                    .stats
                    .as_ref()
                    .and_then(|s| s.row_count_exact.as_deref())
                    .and_then(|n| n.parse::<i64>().ok())
                    .unwrap_or(0);

                let _: serde_json::Value = self
                    .send(
                        self.request(Method::POST, &format!("{}:commit", session))
                            .json(&json!({ "transactionId": transaction_id })),
                    )
                    .await?;

                Ok(affected)
            }
        })
        .await
    }

    async fn update_ddl(&self, database: &str, sql: &str) -> Result<()> {
        let resource = format!("{}/ddl", self.config.database_path(database));
        let operation: Operation = self
            .send(
                self.request(Method::PATCH, &resource)
                    .json(&json!({ "statements": [sql] })),
            )
            .await?;
        self.wait_operation(operation).await
    }

    async fn create_database(&self, database: &str) -> Result<()> {
        let resource = format!("{}/databases", self.config.instance_path());
        let operation: Operation = self
            .send(
                self.request(Method::POST, &resource)
                    .json(&json!({ "createStatement": format!("CREATE DATABASE `{}`", database) })),
            )
            .await?;
        self.wait_operation(operation).await
    }

    async fn drop_database(&self, database: &str) -> Result<()> {
        let resource = self.config.database_path(database);
        let _: serde_json::Value = self.send(self.request(Method::DELETE, &resource)).await?;
        self.forget_session(database).await;
        Ok(())
    }

    async fn list_databases(&self) -> Result<Vec<String>> {
        let resource = format!("{}/databases", self.config.instance_path());
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut builder = self.request(Method::GET, &resource);
            if let Some(token) = &page_token {
                builder = builder.query(&[("pageToken", token)]);
            }
            let page: ListDatabasesResponse = self.send(builder).await?;
            names.extend(page.databases.iter().map(|d| d.database_id().to_string()));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(names)
    }
}
