//! Core orchestrator for spanner-cli.
//!
//! Sits between the line editor and the session: offers each input to the
//! command router first and runs it as SQL when no command matches.

use tracing::debug;

use crate::commands::{handlers::schema, CommandResult, CommandRouter};
use crate::db::{DisplayFormat, ResultContainer};
use crate::error::Result;
use crate::query::QueryKind;
use crate::session::Session;

/// Result of processing user input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputResult {
    /// No action needed (empty input).
    None,
    /// A result to print.
    Output(ResultContainer),
    /// A result to print; the schema changed, so completion data is stale.
    SchemaChanged(ResultContainer),
    /// Open this URL in the system browser.
    OpenBrowser(String),
    /// The session should end.
    Exit,
}

impl From<CommandResult> for InputResult {
    fn from(result: CommandResult) -> Self {
        match result {
            CommandResult::Output(output) => Self::Output(output),
            CommandResult::OpenBrowser(url) => Self::OpenBrowser(url),
            CommandResult::Exit => Self::Exit,
        }
    }
}

/// Names offered by tab completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaNames {
    pub databases: Vec<String>,
    pub tables: Vec<String>,
    pub columns: Vec<String>,
}

/// The main orchestrator that coordinates the router and the session.
pub struct Orchestrator {
    session: Session,
    router: CommandRouter<'static>,
}

impl Orchestrator {
    /// Creates an orchestrator over the built-in commands.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            router: CommandRouter::builtin(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn router(&self) -> &CommandRouter<'static> {
        &self.router
    }

    /// Prompt for the next input line.
    pub fn prompt(&self) -> String {
        self.session.prompt()
    }

    /// Handles one line of interactive input.
    pub async fn handle_input(&mut self, input: &str) -> Result<InputResult> {
        if input.trim().is_empty() {
            return Ok(InputResult::None);
        }

        if let Some(result) = self.router.execute(&mut self.session, input).await? {
            return Ok(result.into());
        }

        self.handle_sql(input).await
    }

    async fn handle_sql(&self, sql: &str) -> Result<InputResult> {
        let sql = sql.trim();
        let result = self.session.query(sql).await?;

        match QueryKind::classify(sql) {
            QueryKind::Ddl | QueryKind::Database => Ok(InputResult::SchemaChanged(result)),
            QueryKind::Read | QueryKind::Write => Ok(InputResult::Output(result)),
        }
    }

    /// Runs one statement non-interactively.
    ///
    /// Meta-commands are not recognized here. The result is laid out as TSV
    /// and carries no status message.
    pub async fn execute_batch(&self, sql: &str) -> Result<ResultContainer> {
        debug!("Batch statement: {}", sql);
        let mut result = self.session.query(sql.trim()).await?;
        result.meta.format = DisplayFormat::Tsv;
        result.meta.message = None;
        Ok(result)
    }

    /// Loads databases, tables and columns for completion.
    ///
    /// Failures leave the corresponding list empty.
    pub async fn schema_names(&self) -> SchemaNames {
        SchemaNames {
            databases: self.session.list_databases().await,
            tables: self.session.first_column(schema::LIST_TABLES_SQL).await,
            columns: self.session.first_column(schema::LIST_COLUMNS_SQL).await,
        }
    }
}
