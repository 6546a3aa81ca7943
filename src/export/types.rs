//! Export projection types

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// Default timestamp rendering, matching the browsing UI's display format
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Export Spec
// ============================================================================

/// Projection applied to each exported record
///
/// Columns are emitted in order; a column absent from a record renders as an
/// empty field. The timestamp column, if named, is rendered as a formatted
/// UTC string instead of raw epoch seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSpec {
    /// Field names to emit, in order
    pub columns: Vec<String>,
    /// Column holding the record's epoch-seconds timestamp
    #[serde(default)]
    pub timestamp_field: Option<String>,
    /// chrono format string for the timestamp column
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

impl Default for ExportSpec {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            timestamp_field: None,
            timestamp_format: default_timestamp_format(),
        }
    }
}

impl ExportSpec {
    /// Create a spec over the given columns
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// Name the timestamp column
    #[must_use]
    pub fn with_timestamp_field(mut self, field: impl Into<String>) -> Self {
        self.timestamp_field = Some(field.into());
        self
    }

    /// The column names, in output order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Project one record to its export shape
    pub fn project(&self, record: &JsonValue) -> ExportRecord {
        let values = self
            .columns
            .iter()
            .map(|column| {
                let value = record.get(column).unwrap_or(&JsonValue::Null);
                if self.timestamp_field.as_deref() == Some(column.as_str()) {
                    render_timestamp(value, &self.timestamp_format)
                } else {
                    render_field(value)
                }
            })
            .collect();
        ExportRecord { values }
    }
}

// ============================================================================
// Export Record
// ============================================================================

/// One projected record: rendered field values aligned with the spec's columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    /// Rendered values, one per column
    pub values: Vec<String>,
}

// ============================================================================
// Rendering
// ============================================================================

/// Render a scalar field for export
///
/// Nulls and missing fields are empty; structured values fall back to their
/// compact JSON form.
pub fn render_field(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Render an epoch-seconds timestamp as a formatted UTC string
///
/// Accepts a bare integer or a `{ "seconds": ... }` object (the wire shape
/// some stores use for timestamps). Anything unparseable falls back to the
/// plain field rendering.
pub fn render_timestamp(value: &JsonValue, format: &str) -> String {
    let seconds = value
        .as_i64()
        .or_else(|| value.get("seconds").and_then(JsonValue::as_i64));

    match seconds.and_then(|secs| chrono::DateTime::from_timestamp(secs, 0)) {
        Some(timestamp) => timestamp.format(format).to_string(),
        None => render_field(value),
    }
}
