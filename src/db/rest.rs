//! Wire types for the Cloud Spanner REST API (`v1`).
//!
//! Only the fields the client reads are modelled; everything else is
//! ignored during deserialization.

use std::collections::HashMap;

use serde::Deserialize;

use super::{QueryStats, Value};

#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultSetResponse {
    #[serde(default)]
    pub metadata: Option<ResultSetMetadata>,
    #[serde(default)]
    pub rows: Vec<Vec<serde_json::Value>>,
    #[serde(default)]
    pub stats: Option<ResultSetStats>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSetMetadata {
    #[serde(default)]
    pub row_type: Option<StructType>,
    #[serde(default)]
    pub transaction: Option<Transaction>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StructType {
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Field {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub field_type: Option<FieldType>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FieldType {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSetStats {
    #[serde(default)]
    pub query_stats: Option<HashMap<String, serde_json::Value>>,
    #[serde(default)]
    pub row_count_exact: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDmlResponse {
    #[serde(default)]
    pub result_sets: Vec<ResultSetResponse>,
    #[serde(default)]
    pub status: Option<Status>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub error: Option<Status>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDatabasesResponse {
    #[serde(default)]
    pub databases: Vec<DatabaseEntry>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DatabaseEntry {
    #[serde(default)]
    pub name: String,
}

impl DatabaseEntry {
    /// The trailing id of `projects/p/instances/i/databases/{id}`.
    pub fn database_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

impl ResultSetResponse {
    /// Column names in result order.
    pub fn column_names(&self) -> Vec<String> {
        self.fields().iter().map(|f| f.name.clone()).collect()
    }

    /// Converts the JSON rows into typed values using the row type.
    pub fn typed_rows(&self) -> Vec<Vec<Value>> {
        let fields = self.fields();
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        let code = fields
                            .get(i)
                            .and_then(|f| f.field_type.as_ref())
                            .map(|t| t.code.as_str())
                            .unwrap_or("");
                        convert_value(code, cell)
                    })
                    .collect()
            })
            .collect()
    }

    /// Extracts profile statistics, if the query ran in PROFILE mode.
    pub fn query_stats(&self) -> Option<QueryStats> {
        let stats = self.stats.as_ref()?.query_stats.as_ref()?;
        let text = |key: &str| -> String {
            match stats.get(key) {
                Some(serde_json::Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => String::new(),
            }
        };
        let count = |key: &str| -> u64 { text(key).parse().unwrap_or(0) };
        Some(QueryStats {
            rows_returned: count("rows_returned"),
            rows_scanned: count("rows_scanned"),
            elapsed_time: text("elapsed_time"),
            cpu_time: text("cpu_time"),
        })
    }

    fn fields(&self) -> &[Field] {
        self.metadata
            .as_ref()
            .and_then(|m| m.row_type.as_ref())
            .map(|t| t.fields.as_slice())
            .unwrap_or(&[])
    }
}

/// Converts one JSON cell according to its Spanner type code.
///
/// INT64 travels as a decimal string; FLOAT64 as a number or one of the
/// strings `NaN`, `Infinity`, `-Infinity`.
pub fn convert_value(code: &str, cell: &serde_json::Value) -> Value {
    use serde_json::Value as Json;

    match (code, cell) {
        (_, Json::Null) => Value::Null,
        (_, Json::Bool(b)) => Value::Bool(*b),
        ("INT64", Json::String(s)) => s
            .parse::<i64>()
            .map(Value::Int)
            .unwrap_or_else(|_| Value::String(s.clone())),
        ("FLOAT64", Json::Number(n)) => n
            .as_f64()
            .map(Value::Float)
            .unwrap_or_else(|| Value::String(n.to_string())),
        ("FLOAT64", Json::String(s)) => match s.as_str() {
            "NaN" => Value::Float(f64::NAN),
            "Infinity" => Value::Float(f64::INFINITY),
            "-Infinity" => Value::Float(f64::NEG_INFINITY),
            _ => Value::String(s.clone()),
        },
        (_, Json::String(s)) => Value::String(s.clone()),
        (_, other) => Value::String(other.to_string()),
    }
}
