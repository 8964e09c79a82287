//! End-to-end input handling against the mock database.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use spanner_cli::app::{InputResult, Orchestrator};
use spanner_cli::db::{MockDatabaseClient, MockResponse, ResultSet, Value};
use spanner_cli::output::write_result;
use spanner_cli::session::{Session, Target};

fn orchestrator(client: &Arc<MockDatabaseClient>) -> Orchestrator {
    Orchestrator::new(Session::new(
        Box::new(Arc::clone(client)),
        Target {
            project: "proj".to_string(),
            instance: "inst".to_string(),
            database: "music".to_string(),
        },
    ))
}

fn printed(result: &InputResult) -> String {
    let (InputResult::Output(r) | InputResult::SchemaChanged(r)) = result else {
        panic!("expected a result, got {result:?}");
    };
    let mut buf = Vec::new();
    write_result(&mut buf, r).unwrap();
    String::from_utf8(buf).unwrap()
}

#[tokio::test]
async fn test_help_output() {
    let client = Arc::new(MockDatabaseClient::new().with_database("music"));
    let mut app = orchestrator(&client);

    let output = printed(&app.handle_input("help").await.unwrap());
    assert!(output.contains("| Command(abbr)  | Shortcut and Usage    | Description"));
    assert!(output.contains("| help           | \\?                    | Show this help."));
    assert!(!output.contains("| DESC "));
}

#[tokio::test]
async fn test_session_flow() {
    let client = Arc::new(
        MockDatabaseClient::new()
            .with_database("music")
            .with_database("albums")
            .with_response(
                "SELECT SingerId FROM Singers",
                MockResponse::Rows(ResultSet {
                    columns: vec!["SingerId".to_string()],
                    rows: vec![vec![Value::Int(1)], vec![Value::Int(2)]],
                    stats: None,
                }),
            ),
    );
    let mut app = orchestrator(&client);

    let switched = app.handle_input("use albums").await.unwrap();
    assert_eq!(printed(&switched), "\nchange database to albums\n\n");
    assert_eq!(app.prompt(), "Spanner [proj/inst/albums]:\n> ");

    let failed = app.handle_input("use nowhere").await.unwrap_err();
    assert!(failed.to_string().contains("nowhere"));
    assert_eq!(app.session().database(), "albums");

    let rows = app
        .handle_input("SELECT SingerId FROM Singers;")
        .await
        .unwrap();
    assert_eq!(
        printed(&rows),
        "+----------+\n| SingerId |\n+----------+\n| 1        |\n| 2        |\n+----------+\n"
    );
    let last = client.calls().pop().unwrap();
    assert_eq!(last.database, "albums");

    assert_eq!(app.handle_input("\\q").await.unwrap(), InputResult::Exit);
}

#[tokio::test]
async fn test_vertical_output() {
    let client = Arc::new(MockDatabaseClient::new().with_database("music"));
    let mut app = orchestrator(&client);

    let result = app.handle_input("SELECT 1\\G").await.unwrap();
    let output = printed(&result);
    assert!(output.starts_with("***************************[ 1. row ]***************************\n"));
    assert!(output.contains("rows_returned: 1"));
}

#[tokio::test]
async fn test_show_databases_and_describe() {
    let client = Arc::new(
        MockDatabaseClient::new()
            .with_database("music")
            .with_database("albums"),
    );
    let mut app = orchestrator(&client);

    let output = printed(&app.handle_input("SHOW DATABASES").await.unwrap());
    assert_eq!(
        output,
        "+-----------+\n| Databases |\n+-----------+\n| music     |\n| albums    |\n+-----------+\n"
    );

    let missing = printed(&app.handle_input("DESCRIBE").await.unwrap());
    assert_eq!(missing, "\nMissing table name.\n\n");

    app.handle_input("\\dt Singers").await.unwrap();
    assert!(client
        .last_sql()
        .unwrap()
        .contains("t.TABLE_NAME = 'Singers'"));
}

#[tokio::test]
async fn test_write_and_ddl() {
    let client = Arc::new(MockDatabaseClient::new().with_database("music"));
    let mut app = orchestrator(&client);

    let written = app
        .handle_input("UPDATE Singers SET FirstName = 'Marc' WHERE SingerId = 1")
        .await
        .unwrap();
    assert_eq!(printed(&written), "\n1 row affected.\n\n");

    let created = app.handle_input("CREATE DATABASE albums").await.unwrap();
    assert!(matches!(created, InputResult::SchemaChanged(_)));
    assert_eq!(
        printed(&created),
        "\nCreated database albums on instance inst\n\n"
    );
}
