//! Output of results and errors to the terminal.

mod pager;
mod table;

pub use pager::Pager;
pub use table::{render, render_tsv, render_vertical, TableFormatter};

use std::io::{self, Write};

use crate::db::ResultContainer;
use crate::error::{Result, SpannerCliError};

/// Writes results to stdout, optionally through a pager.
#[derive(Debug, Clone, Default)]
pub struct Printer {
    pager: Option<Pager>,
}

impl Printer {
    pub fn new(pager: Option<Pager>) -> Self {
        Self { pager }
    }

    /// Prints the rows (if any) followed by the status message (if any).
    pub fn print(&self, result: &ResultContainer) -> Result<()> {
        if let (Some(pager), false) = (&self.pager, result.is_empty()) {
            pager.page(&render(result))?;
            let mut stdout = io::stdout().lock();
            return write_message(&mut stdout, result).map_err(write_error);
        }

        let mut stdout = io::stdout().lock();
        write_result(&mut stdout, result).map_err(write_error)
    }

    /// Prints an error surrounded by blank lines on stderr.
    pub fn print_error(&self, err: &SpannerCliError) {
        eprintln!("\n{}\n", err);
    }
}

/// Writes the rendered rows and status message of `result`.
pub fn write_result<W: Write>(out: &mut W, result: &ResultContainer) -> io::Result<()> {
    if !result.is_empty() {
        out.write_all(render(result).as_bytes())?;
    }
    write_message(out, result)
}

fn write_message<W: Write>(out: &mut W, result: &ResultContainer) -> io::Result<()> {
    if let Some(message) = result.status_message() {
        writeln!(out, "\n{}\n", message)?;
    }
    out.flush()
}

fn write_error(e: io::Error) -> SpannerCliError {
    SpannerCliError::io(format!("Failed to write output: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{DisplayFormat, Value};
    use pretty_assertions::assert_eq;

    fn written(result: &ResultContainer) -> String {
        let mut buf = Vec::new();
        write_result(&mut buf, result).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_rows_then_message() {
        let result = ResultContainer::with_data(vec!["n".to_string()], vec![vec![Value::Int(1)]])
            .with_message("rows_returned: 1");
        assert_eq!(
            written(&result),
            "+---+\n| n |\n+---+\n| 1 |\n+---+\n\nrows_returned: 1\n\n"
        );
    }

    #[test]
    fn test_message_only() {
        let result = ResultContainer::message("operation done.");
        assert_eq!(written(&result), "\noperation done.\n\n");
    }

    #[test]
    fn test_empty_rows_print_nothing() {
        let result = ResultContainer::with_data(vec!["n".to_string()], vec![]);
        assert_eq!(written(&result), "");
    }

    #[test]
    fn test_tsv_without_message() {
        let result = ResultContainer::with_data(vec!["n".to_string()], vec![vec![Value::Int(7)]])
            .with_format(DisplayFormat::Tsv);
        assert_eq!(written(&result), "n\n7\n");
    }
}
