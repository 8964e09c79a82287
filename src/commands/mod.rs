//! Meta-commands for spanner-cli.
//!
//! Input is first offered to the command router; text that resolves to no
//! command is executed as SQL by the session.

pub mod definitions;
pub mod handlers;
pub mod registry;
pub mod router;

pub use definitions::{CommandDef, CommandKind, HelpEntry, COMMANDS};
pub use handlers::CommandResult;
pub use registry::Registry;
pub use router::CommandRouter;
