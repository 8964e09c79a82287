//! # Result Renderers
//!
//! Turns a [`ResultContainer`] into text in one of three layouts.
//!
//! ## Table (default)
//!
//! ```text
//! +----------+------------+
//! | SingerId | FirstName  |
//! +----------+------------+
//! | 1        | Marc       |
//! | 2        | Catalina   |
//! +----------+------------+
//! ```
//!
//! ## Vertical (`\G`)
//!
//! ```text
//! ***************************[ 1. row ]***************************
//! SingerId  | 1
//! FirstName | Marc
//! ```
//!
//! ## TSV (batch mode)
//!
//! Header line then one line per row, cells separated by tabs. Tabs and
//! newlines inside values are escaped so every row stays on one line.
//!
//! Column widths count characters, not bytes, so non-ASCII values line up.

use std::fmt::Write;

use crate::db::{DisplayFormat, ResultContainer, Row};

const ROW_MARKER: &str = "***************************";

/// Renders `result` in the layout its metadata asks for.
pub fn render(result: &ResultContainer) -> String {
    match result.meta.format {
        DisplayFormat::Table => TableFormatter::new(&result.header, &result.rows).render(),
        DisplayFormat::Vertical => render_vertical(&result.header, &result.rows),
        DisplayFormat::Tsv => render_tsv(&result.header, &result.rows),
    }
}

pub struct TableFormatter<'a> {
    headers: &'a [String],
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl<'a> TableFormatter<'a> {
    pub fn new(headers: &'a [String], rows: &[Row]) -> Self {
        let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();

        let formatted_rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(i, val)| {
                        let formatted = val.to_display_string();
                        match widths.get_mut(i) {
                            Some(w) => *w = (*w).max(display_width(&formatted)),
                            None => widths.push(display_width(&formatted)),
                        }
                        formatted
                    })
                    .collect()
            })
            .collect();

        Self {
            headers,
            widths,
            rows: formatted_rows,
        }
    }

    pub fn render(&self) -> String {
        let mut output = String::new();

        self.write_separator(&mut output);
        self.write_row(&mut output, self.headers);
        self.write_separator(&mut output);

        for row in &self.rows {
            self.write_row(&mut output, row);
        }

        self.write_separator(&mut output);

        output
    }

    fn write_separator(&self, output: &mut String) {
        output.push('+');
        for width in &self.widths {
            output.push_str(&"-".repeat(width + 2));
            output.push('+');
        }
        output.push('\n');
    }

    fn write_row(&self, output: &mut String, cells: &[String]) {
        output.push('|');
        for (i, width) in self.widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let _ = write!(output, " {} |", pad(cell, *width));
        }
        output.push('\n');
    }
}

/// One block per row, one `name | value` line per column.
pub fn render_vertical(headers: &[String], rows: &[Row]) -> String {
    let label_width = headers.iter().map(|h| display_width(h)).max().unwrap_or(0);
    let mut output = String::new();

    for (n, row) in rows.iter().enumerate() {
        let _ = writeln!(output, "{ROW_MARKER}[ {}. row ]{ROW_MARKER}", n + 1);
        for (header, value) in headers.iter().zip(row) {
            let _ = writeln!(
                output,
                "{} | {}",
                pad(header, label_width),
                value.to_display_string()
            );
        }
    }

    output
}

/// Tab separated header and rows.
pub fn render_tsv(headers: &[String], rows: &[Row]) -> String {
    let mut output = String::new();

    let header: Vec<String> = headers.iter().map(|h| escape_tsv(h)).collect();
    output.push_str(&header.join("\t"));
    output.push('\n');

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .map(|v| escape_tsv(&v.to_display_string()))
            .collect();
        output.push_str(&cells.join("\t"));
        output.push('\n');
    }

    output
}

fn escape_tsv(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('\t', "\\t")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}
