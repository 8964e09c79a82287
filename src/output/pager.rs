//! Pager support.
//!
//! Pipes rendered output through `$PAGER` (default `less`). `LESS` is set
//! to `-RXF` for the child when the user has not set it, so short output
//! is printed without entering the pager.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::{Result, SpannerCliError};

const PAGER_ENV: &str = "PAGER";
const LESS_ENV: &str = "LESS";
const DEFAULT_PAGER: &str = "less";
const DEFAULT_LESS_FLAGS: &str = "-RXF";

/// An external pager command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    program: String,
    args: Vec<String>,
}

impl Pager {
    /// Builds a pager from a command line such as `less -S`.
    ///
    /// Returns `None` for a blank command.
    pub fn from_command(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Uses `$PAGER`, falling back to `less`.
    pub fn from_env() -> Self {
        std::env::var(PAGER_ENV)
            .ok()
            .and_then(|cmd| Self::from_command(&cmd))
            .unwrap_or_else(|| Self {
                program: DEFAULT_PAGER.to_string(),
                args: Vec::new(),
            })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Shows `text` through the pager and waits for it to exit.
    ///
    /// If the pager cannot be started the text goes to stdout instead.
    pub fn page(&self, text: &str) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).stdin(Stdio::piped());
        if std::env::var_os(LESS_ENV).is_none() {
            command.env(LESS_ENV, DEFAULT_LESS_FLAGS);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("Could not start pager {}: {}", self.program, e);
                print!("{}", text);
                return Ok(());
            }
        };

        debug!("Paging {} bytes through {}", text.len(), self.program);
        if let Some(mut stdin) = child.stdin.take() {
            // The user may quit the pager before reading everything.
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    return Err(SpannerCliError::io(format!("Failed to write to pager: {}", e)));
                }
            }
        }

        child
            .wait()
            .map_err(|e| SpannerCliError::io(format!("Failed to wait for pager: {}", e)))?;
        Ok(())
    }
}
