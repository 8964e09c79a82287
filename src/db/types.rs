//! Result types for spanner-cli.
//!
//! Defines the uniform container every query and meta-command produces.

use std::fmt;

/// Layout hint attached to a result for the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayFormat {
    /// Boxed ASCII table.
    #[default]
    Table,
    /// One `column: value` line per cell, grouped by row (`\G`).
    Vertical,
    /// Tab separated values without decoration (batch mode).
    Tsv,
}

/// Free-form metadata that travels with a result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultMeta {
    /// Requested display layout.
    pub format: DisplayFormat,
    /// Human-readable status line printed after the rows.
    pub message: Option<String>,
}

/// The uniform output of any query or command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultContainer {
    /// Column headers, in order.
    pub header: Vec<String>,
    /// Rows of data.
    pub rows: Vec<Row>,
    /// Display hints and status message.
    pub meta: ResultMeta,
}

impl ResultContainer {
    /// Creates an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a result with the given header and rows.
    pub fn with_data(header: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            header,
            rows,
            meta: ResultMeta::default(),
        }
    }

    /// Creates an empty result that only carries a status message.
    pub fn message(msg: impl Into<String>) -> Self {
        Self::new().with_message(msg)
    }

    /// Sets the status message.
    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.meta.message = Some(msg.into());
        self
    }

    /// Sets the display format.
    pub fn with_format(mut self, format: DisplayFormat) -> Self {
        self.meta.format = format;
        self
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the result has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the status message, if any.
    pub fn status_message(&self) -> Option<&str> {
        self.meta.message.as_deref().filter(|m| !m.is_empty())
    }
}

/// A row of data from a query result.
pub type Row = Vec<Value>;

/// Represents a single value from a Spanner result set.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// BOOL value.
    Bool(bool),

    /// INT64 value.
    Int(i64),

    /// FLOAT64 value.
    Float(f64),

    /// Any value rendered as text (STRING, BYTES, TIMESTAMP, NUMERIC,
    /// ARRAY, STRUCT, ...).
    String(String),
}

impl Value {
    /// Converts the value to its display representation.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}
