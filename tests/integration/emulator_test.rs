//! Tests against a live Cloud Spanner emulator.
//!
//! Set SPANNER_EMULATOR_REST to the emulator's REST endpoint. The target
//! instance and database default to test-instance/test-database and can be
//! overridden with SPANNER_PROJECT, SPANNER_INSTANCE and SPANNER_DB.

use spanner_cli::app::{InputResult, Orchestrator};
use spanner_cli::config::parse_endpoint;
use spanner_cli::db::{DatabaseClient, SpannerClient, SpannerClientConfig, Value};
use spanner_cli::session::{Session, Target};

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_test_target() -> Option<(String, Target)> {
    let endpoint = std::env::var("SPANNER_EMULATOR_REST").ok()?;
    Some((
        endpoint,
        Target {
            project: env_or("SPANNER_PROJECT", "test-project"),
            instance: env_or("SPANNER_INSTANCE", "test-instance"),
            database: env_or("SPANNER_DB", "test-database"),
        },
    ))
}

fn get_test_client() -> Option<(SpannerClient, Target)> {
    let (endpoint, target) = get_test_target()?;
    let config = SpannerClientConfig::new(&target.project, &target.instance)
        .ok()?
        .with_endpoint(parse_endpoint(&endpoint).ok()?);
    Some((SpannerClient::new(config).ok()?, target))
}

#[tokio::test]
async fn test_select_one() {
    let Some((client, target)) = get_test_client() else {
        eprintln!("Skipping test: SPANNER_EMULATOR_REST not set");
        return;
    };

    let result = client
        .execute_sql(&target.database, "SELECT 1")
        .await
        .unwrap();
    assert_eq!(result.rows, vec![vec![Value::Int(1)]]);
}

#[tokio::test]
async fn test_list_databases_contains_target() {
    let Some((client, target)) = get_test_client() else {
        eprintln!("Skipping test: SPANNER_EMULATOR_REST not set");
        return;
    };

    let names = client.list_databases().await.unwrap();
    assert!(names.contains(&target.database), "{names:?}");
}

#[tokio::test]
async fn test_use_unknown_database_keeps_session() {
    let Some((client, target)) = get_test_client() else {
        eprintln!("Skipping test: SPANNER_EMULATOR_REST not set");
        return;
    };

    let database = target.database.clone();
    let mut app = Orchestrator::new(Session::new(Box::new(client), target));

    let err = app
        .handle_input("use no-such-database-for-tests")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("no-such-database-for-tests"));
    assert_eq!(app.session().database(), database);

    let result = app.handle_input("SHOW TABLES").await.unwrap();
    assert!(matches!(result, InputResult::Output(_)));
}
