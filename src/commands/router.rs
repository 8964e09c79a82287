//! Command routing for spanner-cli.
//!
//! Resolves raw input against the registry and dispatches matches to their
//! handlers. Input that resolves to no command is left for the SQL path.

use tracing::debug;

use super::definitions::CommandDef;
use super::handlers::{self, CommandResult};
use super::registry::Registry;
use crate::error::Result;
use crate::session::Session;

/// Dispatcher over an explicitly constructed registry.
#[derive(Debug, Clone)]
pub struct CommandRouter<'a> {
    registry: Registry<'a>,
}

impl CommandRouter<'static> {
    /// Router over the built-in commands.
    pub fn builtin() -> Self {
        Self::new(Registry::builtin())
    }
}

impl Default for CommandRouter<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> CommandRouter<'a> {
    pub fn new(registry: Registry<'a>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    /// Resolves input to a command without running it.
    pub fn resolve(&self, text: &str) -> Option<&'a CommandDef> {
        self.registry.resolve(text)
    }

    /// Runs the command `text` resolves to.
    ///
    /// Returns `Ok(None)` when no command matches.
    pub async fn execute(&self, session: &mut Session, text: &str) -> Result<Option<CommandResult>> {
        let Some(command) = self.resolve(text) else {
            return Ok(None);
        };

        debug!("Command {} matched input {:?}", command.name, text);
        handlers::execute(command, &self.registry, session, text)
            .await
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MockDatabaseClient;
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

    #[tokio::test]
    async fn test_unmatched_input_falls_through() {
        let client = Arc::new(MockDatabaseClient::new().with_database("music"));
        let mut session = session_with(&client);
        let router = CommandRouter::builtin();

        for text in ["", "   ", "SELECT 1", "HELP", "BROWSE", "\\Q"] {
            let result = router.execute(&mut session, text).await.unwrap();
            assert!(result.is_none(), "{text:?}");
        }
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_exit_and_alias() {
        let client = Arc::new(MockDatabaseClient::new().with_database("music"));
        let mut session = session_with(&client);
        let router = CommandRouter::builtin();

        for text in ["exit", "\\q", "exit;"] {
            let result = router.execute(&mut session, text).await.unwrap();
            assert_eq!(result, Some(CommandResult::Exit), "{text}");
        }
    }

    #[tokio::test]
    async fn test_dispatch_passes_raw_text() {
        let client = Arc::new(
            MockDatabaseClient::new()
                .with_database("music")
                .with_database("albums"),
        );
        let mut session = session_with(&client);
        let router = CommandRouter::builtin();

        let result = router
            .execute(&mut session, "\\u albums")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(result, CommandResult::message("change database to albums"));
        assert_eq!(session.database(), "albums");
    }

    #[tokio::test]
    async fn test_handler_error_propagates() {
        let client = Arc::new(MockDatabaseClient::new().with_database("music"));
        let mut session = session_with(&client);
        let router = CommandRouter::builtin();

        let err = router.execute(&mut session, "use").await.unwrap_err();
        assert!(matches!(err, crate::error::SpannerCliError::Command(_)));
    }
}
