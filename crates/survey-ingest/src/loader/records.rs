//! Structured-record input: JSON arrays of objects, or objects of columns.

use std::path::Path;

use polars::prelude::DataFrame;
use serde_json::{Map, Value};

use super::InputFormat;
use super::cells::{Cell, build_frame};
use crate::error::{IngestError, Result};

pub(crate) fn read_records(path: &Path) -> Result<DataFrame> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => {
            IngestError::unreadable(path, InputFormat::Records, "file is not valid UTF-8")
        }
        _ => IngestError::io(path, e),
    })?;
    let value: Value = serde_json::from_str(text.trim_start_matches('\u{feff}'))
        .map_err(|e| IngestError::unreadable(path, InputFormat::Records, e.to_string()))?;

    let columns = match value {
        Value::Array(records) => record_columns(&records)
            .map_err(|message| IngestError::unreadable(path, InputFormat::Records, message))?,
        Value::Object(columns) => column_columns(&columns)
            .map_err(|message| IngestError::unreadable(path, InputFormat::Records, message))?,
        _ => {
            return Err(IngestError::unreadable(
                path,
                InputFormat::Records,
                "expected an array of records or an object of columns",
            ));
        }
    };

    build_frame(columns)
        .map_err(|e| IngestError::unreadable(path, InputFormat::Records, e.to_string()))
}

fn to_cell(value: &Value) -> Option<Cell> {
    match value {
        Value::Null => None,
        Value::Bool(v) => Some(Cell::Bool(*v)),
        Value::Number(n) => match n.as_i64() {
            Some(v) => Some(Cell::Int(v)),
            None => n.as_f64().map(Cell::Float),
        },
        Value::String(s) => Some(Cell::Text(s.clone())),
        other => Some(Cell::Text(other.to_string())),
    }
}

/// `[{"a": 1, "b": "x"}, ...]`; keys missing from a record read as null.
fn record_columns(
    records: &[Value],
) -> std::result::Result<Vec<(String, Vec<Option<Cell>>)>, String> {
    let mut names: Vec<String> = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        let Value::Object(fields) = record else {
            return Err(format!("record {idx} is not an object"));
        };
        for key in fields.keys() {
            if !names.iter().any(|name| name == key) {
                names.push(key.clone());
            }
        }
    }

    Ok(names
        .into_iter()
        .map(|name| {
            let cells = records
                .iter()
                .map(|record| record.get(&name).and_then(to_cell))
                .collect();
            (name, cells)
        })
        .collect())
}

/// `{"a": [1, 2], "b": ["x", "y"]}` or the index-keyed form
/// `{"a": {"0": 1, "1": 2}}`. All columns must have the same length.
fn column_columns(
    columns: &Map<String, Value>,
) -> std::result::Result<Vec<(String, Vec<Option<Cell>>)>, String> {
    let mut out = Vec::with_capacity(columns.len());
    let mut height: Option<usize> = None;
    for (name, values) in columns {
        let cells: Vec<Option<Cell>> = match values {
            Value::Array(items) => items.iter().map(to_cell).collect(),
            Value::Object(indexed) => indexed.values().map(to_cell).collect(),
            _ => return Err(format!("column '{name}' is not an array or object")),
        };
        match height {
            Some(expected) if expected != cells.len() => {
                return Err(format!(
                    "column '{name}' has {} values, expected {expected}",
                    cells.len()
                ));
            }
            _ => height = Some(cells.len()),
        }
        out.push((name.clone(), cells));
    }
    Ok(out)
}
