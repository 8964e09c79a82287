//! Database command handlers (use, SHOW DATABASES).

use tracing::{debug, warn};

use super::CommandResult;
use crate::db::{ResultContainer, Value};
use crate::error::{Result, SpannerCliError};
use crate::query::strip_statement;
use crate::session::Session;

const USE_USAGE: &str = "Invalid call to change database, try `use dbname`";

/// Statement used to verify a freshly selected database.
const PROBE_SQL: &str = "SELECT 1";

/// Handle `use <db>` / `\u <db>`.
///
/// Switches first, then probes the new database. A not-found probe restores
/// the previous database; any other failure is returned as is and leaves
/// the new database selected.
pub async fn handle_change_database(session: &mut Session, text: &str) -> Result<CommandResult> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let [_, name] = words.as_slice() else {
        return Err(SpannerCliError::command(USE_USAGE));
    };

    let database = strip_statement(name).to_string();
    let previous = session.database().to_string();
    session.change_database(database.as_str());

    if let Err(e) = session.query(PROBE_SQL).await {
        if e.is_not_found() {
            warn!("Database {} not found, staying on {}", database, previous);
            session.change_database(previous);
            return Err(SpannerCliError::command(e.to_string()));
        }
        return Err(e);
    }

    debug!("Changed database from {} to {}", previous, database);
    Ok(CommandResult::message(format!(
        "change database to {}",
        database
    )))
}

/// Handle `SHOW DATABASES` / `\l`.
pub async fn handle_list_databases(session: &Session) -> CommandResult {
    let rows = session
        .list_databases()
        .await
        .into_iter()
        .map(|name| vec![Value::String(name)])
        .collect();

    CommandResult::Output(ResultContainer::with_data(
        vec!["Databases".to_string()],
        rows,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MockDatabaseClient, MockResponse};
    use crate::session::Target;
    use std::sync::Arc;

    fn session_with(client: &Arc<MockDatabaseClient>) -> Session {
        Session::new(
            Box::new(Arc::clone(client)),
            Target {
                project: "proj".to_string(),
                instance: "inst".to_string(),
                database: "music".to_string(),
            },
        )
    }

    fn music_and_albums() -> Arc<MockDatabaseClient> {
        Arc::new(
            MockDatabaseClient::new()
                .with_database("music")
                .with_database("albums"),
        )
    }

    #[tokio::test]
    async fn test_use_switches_database() {
        let client = music_and_albums();
        let mut session = session_with(&client);

        let result = handle_change_database(&mut session, "use albums;")
            .await
            .unwrap();

        assert_eq!(result, CommandResult::message("change database to albums"));
        assert_eq!(session.database(), "albums");
        let probe = client.calls().pop().unwrap();
        assert_eq!(probe.database, "albums");
        assert_eq!(probe.sql, "SELECT 1");
    }

    #[tokio::test]
    async fn test_use_alias() {
        let client = music_and_albums();
        let mut session = session_with(&client);

        handle_change_database(&mut session, "\\u albums").await.unwrap();
        assert_eq!(session.database(), "albums");
    }

    #[tokio::test]
    async fn test_use_wrong_arity() {
        let client = music_and_albums();
        let mut session = session_with(&client);

        for text in ["use", "use a b", "use albums ;"] {
            let err = handle_change_database(&mut session, text)
                .await
                .unwrap_err();
            assert!(matches!(err, SpannerCliError::Command(_)), "{text}");
            assert_eq!(err.to_string(), USE_USAGE);
        }
        assert_eq!(session.database(), "music");
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_use_missing_database_rolls_back() {
        let client = music_and_albums();
        let mut session = session_with(&client);

        let err = handle_change_database(&mut session, "use nope")
            .await
            .unwrap_err();

        assert!(matches!(err, SpannerCliError::Command(_)));
        assert!(err.to_string().contains("Database not found: nope"));
        assert_eq!(session.database(), "music");
    }

    #[tokio::test]
    async fn test_use_other_failure_keeps_new_database() {
        let client = Arc::new(
            MockDatabaseClient::new()
                .with_database("music")
                .with_database("albums")
                .with_response("SELECT 1", MockResponse::Error("deadline exceeded".into())),
        );
        let mut session = session_with(&client);

        let err = handle_change_database(&mut session, "use albums")
            .await
            .unwrap_err();

        assert!(matches!(err, SpannerCliError::Api(_)));
        assert_eq!(session.database(), "albums");
    }

    #[tokio::test]
    async fn test_list_databases() {
        let client = music_and_albums();
        let session = session_with(&client);

        let CommandResult::Output(result) = handle_list_databases(&session).await else {
            panic!("expected output");
        };
        assert_eq!(result.header, vec!["Databases"]);
        assert_eq!(
            result.rows,
            vec![vec![Value::from("music")], vec![Value::from("albums")]]
        );
    }

    #[tokio::test]
    async fn test_list_databases_without_permission() {
        let client = Arc::new(
            MockDatabaseClient::new()
                .with_database("music")
                .deny_list_databases(),
        );
        let session = session_with(&client);

        let CommandResult::Output(result) = handle_list_databases(&session).await else {
            panic!("expected output");
        };
        assert_eq!(result.header, vec!["Databases"]);
        assert!(result.rows.is_empty());
    }
}
