use serde_json::Value;
use std::collections::HashMap;

/// One cell as read from the source file. The reader decides the shape once;
/// everything downstream pattern-matches over this closed set.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Text(String),
    Number(f64),
    Missing,
}

impl RawCell {
    pub fn is_missing(&self) -> bool {
        matches!(self, RawCell::Missing)
    }

    /// Text form used for the failure CSV artifact and for date passthrough.
    pub fn as_text(&self) -> String {
        match self {
            RawCell::Text(s) => s.clone(),
            RawCell::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            RawCell::Missing => String::new(),
        }
    }

    /// Raw JSON form used for the failure JSON artifact.
    pub fn to_json(&self) -> Value {
        match self {
            RawCell::Text(s) => Value::String(s.clone()),
            RawCell::Number(n) if n.is_finite() => {
                if n.fract() == 0.0 {
                    Value::from(*n as i64)
                } else {
                    Value::from(*n)
                }
            }
            _ => Value::Null,
        }
    }
}

/// One track's worth of fields, keyed by lowercased/trimmed column name.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub cells: HashMap<String, RawCell>,
}

impl RawRow {
    pub fn get(&self, column: &str) -> Option<&RawCell> {
        self.cells.get(column)
    }
}

/// Parsed source file: header order is preserved so failure artifacts can
/// mirror the original column layout.
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// A record ready for insertion: only non-null fields survive normalization.
pub type NormalizedRecord = serde_json::Map<String, Value>;

/// A row that failed normalization or insertion, plus diagnostics.
#[derive(Debug, Clone)]
pub struct FailedRecord {
    pub row: RawRow,
    pub error_message: String,
    pub error_time: String,
}

impl FailedRecord {
    pub fn new(row: RawRow, error_message: String) -> Self {
        Self {
            row,
            error_message,
            error_time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Counters for one run of the importer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}
