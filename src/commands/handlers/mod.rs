//! Command handlers for spanner-cli.
//!
//! Each handler takes the session plus the raw input text and returns a
//! result. Side effects outside the session (opening a browser) are
//! described by the result and carried out by the caller.

pub mod database;
pub mod schema;
pub mod system;

use crate::db::ResultContainer;
use crate::error::Result;
use crate::session::Session;

use super::definitions::{CommandDef, CommandKind};
use super::registry::Registry;

/// Result of executing a command.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    /// Rows and/or a status message to render.
    Output(ResultContainer),
    /// Open this URL in the system browser.
    OpenBrowser(String),
    /// The session should end.
    Exit,
}

impl CommandResult {
    /// Creates a message-only result.
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Output(ResultContainer::message(msg))
    }
}

impl From<ResultContainer> for CommandResult {
    fn from(result: ResultContainer) -> Self {
        Self::Output(result)
    }
}

/// Runs the handler for `command` against the raw input `text`.
pub async fn execute(
    command: &CommandDef,
    registry: &Registry<'_>,
    session: &mut Session,
    text: &str,
) -> Result<CommandResult> {
    match command.kind {
        CommandKind::Help => Ok(system::handle_help(registry)),
        CommandKind::Quit => Ok(system::handle_quit()),
        CommandKind::Browse => Ok(system::handle_browse(session)),
        CommandKind::ChangeDatabase => database::handle_change_database(session, text).await,
        CommandKind::ListDatabases => Ok(database::handle_list_databases(session).await),
        CommandKind::ListTables => schema::handle_list_tables(session).await,
        CommandKind::DescribeTable => schema::handle_describe_table(session, text).await,
        CommandKind::ShowIndex => schema::handle_show_index(session, text).await,
    }
}
