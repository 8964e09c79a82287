//! # REPL - Read-Eval-Print Loop
//!
//! The interactive loop of spanner-cli:
//!
//! - reads a line with rustyline (history, completion, line editing)
//! - hands it to the [`Orchestrator`], which tries meta-commands before SQL
//! - prints the result, or the error, and reads the next line
//!
//! Errors from a single input never end the loop. `exit`, `\q` and Ctrl+D
//! do; Ctrl+C discards the current line.

mod completion;
mod history;

pub use completion::{Candidates, SqlHelper};
pub use history::history_path;

use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tracing::{debug, error, warn};

use crate::app::{InputResult, Orchestrator};
use crate::browser;
use crate::db::ResultContainer;
use crate::error::{Result, SpannerCliError};
use crate::output::Printer;

pub struct Repl {
    app: Orchestrator,
    editor: Editor<SqlHelper, DefaultHistory>,
    printer: Printer,
    history: Option<PathBuf>,
}

impl Repl {
    pub fn new(app: Orchestrator, printer: Printer, history: Option<PathBuf>) -> Result<Self> {
        let mut editor = Editor::<SqlHelper, DefaultHistory>::new()
            .map_err(|e| SpannerCliError::io(format!("Failed to initialize line editor: {}", e)))?;

        let commands = app.router().registry().keys().map(str::to_string).collect();
        editor.set_helper(Some(SqlHelper::new(Candidates::new(commands))));

        if let Some(path) = &history {
            if let Err(e) = editor.load_history(path) {
                debug!("No history loaded from {}: {}", path.display(), e);
            }
        }

        Ok(Self {
            app,
            editor,
            printer,
            history,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.rehash().await;

        loop {
            let prompt = self.app.prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line.as_str());
                    if !self.handle_line(&line).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    self.save_history();
                    return Err(SpannerCliError::io(format!("Error reading input: {}", e)));
                }
            }
        }

        println!("bye");
        self.save_history();
        Ok(())
    }

    /// Processes one line. Returns false when the session should end.
    async fn handle_line(&mut self, line: &str) -> bool {
        match self.app.handle_input(line).await {
            Ok(InputResult::Exit) => return false,
            Ok(InputResult::None) => {}
            Ok(InputResult::Output(result)) => self.print(&result),
            Ok(InputResult::SchemaChanged(result)) => {
                self.print(&result);
                self.rehash().await;
            }
            Ok(InputResult::OpenBrowser(url)) => {
                if let Err(e) = browser::open(&url) {
                    warn!("{}", e);
                    self.printer.print_error(&e);
                }
            }
            Err(e) => {
                error!("{}: {}", e.category(), e);
                self.printer.print_error(&e);
            }
        }
        true
    }

    fn print(&self, result: &ResultContainer) {
        if let Err(e) = self.printer.print(result) {
            error!("{}", e);
            self.printer.print_error(&e);
        }
    }

    /// Reloads database, table and column names for completion.
    async fn rehash(&mut self) {
        let names = self.app.schema_names().await;
        debug!(
            "Completion refreshed: {} databases, {} tables, {} columns",
            names.databases.len(),
            names.tables.len(),
            names.columns.len()
        );
        if let Some(helper) = self.editor.helper_mut() {
            helper.candidates_mut().set_schema(names);
        }
    }

    fn save_history(&mut self) {
        if let Some(path) = &self.history {
            if let Err(e) = self.editor.save_history(path) {
                warn!("Could not save history to {}: {}", path.display(), e);
            }
        }
    }
}
