//! System command handlers (help, exit, browse).

use super::CommandResult;
use crate::commands::registry::Registry;
use crate::db::{ResultContainer, Value};
use crate::session::Session;

/// Column headers of the help table.
pub const HELP_HEADER: [&str; 3] = ["Command(abbr)", "Shortcut and Usage", "Description"];

/// Handle `help` / `\?`.
///
/// One row per distinct command that has a description, in registration
/// order.
pub fn handle_help(registry: &Registry<'_>) -> CommandResult {
    let header = HELP_HEADER.iter().map(|h| h.to_string()).collect();
    let rows = registry
        .commands()
        .into_iter()
        .filter_map(|c| c.describe())
        .map(|row| row.into_iter().map(Value::from).collect())
        .collect();

    CommandResult::Output(ResultContainer::with_data(header, rows))
}

/// Handle `exit` / `\q`.
pub fn handle_quit() -> CommandResult {
    CommandResult::Exit
}

/// Handle `browse`.
pub fn handle_browse(session: &Session) -> CommandResult {
    CommandResult::OpenBrowser(session.console_url())
}
