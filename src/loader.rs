use crate::record::Record;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected an array of records or an object wrapping one, found {found}")]
    Shape { found: String },
    #[error("record {index} is not an object")]
    Record { index: usize },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total: usize,
    pub usable: usize,
    pub dropped: usize,
}

#[derive(Debug)]
pub struct LoadOutput {
    pub records: Vec<Record>,
    pub report: LoadReport,
}

pub fn load_records(path: &Path) -> Result<LoadOutput, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_records(&contents)
}

pub fn parse_records(input: &str) -> Result<LoadOutput, LoadError> {
    let document: Value = serde_json::from_str(input)?;
    records_from_value(document)
}

/// Accepts a bare array, or an object with a single key whose value is the
/// array. Records without a usable id are dropped and counted.
pub fn records_from_value(document: Value) -> Result<LoadOutput, LoadError> {
    let entries = match document {
        Value::Array(entries) => entries,
        Value::Object(map) if map.len() == 1 => match map.into_iter().next() {
            Some((_, Value::Array(entries))) => entries,
            Some((key, other)) => {
                return Err(LoadError::Shape {
                    found: format!("key '{key}' holding {}", describe(&other)),
                });
            }
            None => {
                return Err(LoadError::Shape {
                    found: "an empty object".to_string(),
                });
            }
        },
        other => {
            return Err(LoadError::Shape {
                found: describe(&other),
            });
        }
    };

    let total = entries.len();
    let mut records = Vec::with_capacity(total);
    for (index, entry) in entries.into_iter().enumerate() {
        let Value::Object(fields) = entry else {
            return Err(LoadError::Record { index });
        };
        let record = Record::new(fields);
        if record.id().is_none() {
            debug!(index, "dropping record without a usable id");
            continue;
        }
        records.push(record);
    }

    let report = LoadReport {
        total,
        usable: records.len(),
        dropped: total - records.len(),
    };
    Ok(LoadOutput { records, report })
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "a boolean".to_string(),
        Value::Number(_) => "a number".to_string(),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "an array".to_string(),
        Value::Object(map) => format!("an object with {} keys", map.len()),
    }
}
