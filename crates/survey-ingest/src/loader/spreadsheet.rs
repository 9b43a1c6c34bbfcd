//! Spreadsheet input: the first worksheet of a workbook, first row as header.

use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};
use polars::prelude::DataFrame;

use super::InputFormat;
use super::cells::{Cell, build_frame};
use crate::error::{IngestError, Result};

pub(crate) fn read_spreadsheet(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| IngestError::unreadable(path, InputFormat::Spreadsheet, e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            IngestError::unreadable(path, InputFormat::Spreadsheet, "workbook has no worksheets")
        })?
        .map_err(|e| IngestError::unreadable(path, InputFormat::Spreadsheet, e.to_string()))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| match to_cell(cell) {
            Some(Cell::Text(name)) if !name.trim().is_empty() => name,
            Some(Cell::Float(v)) => survey_common::format_numeric(v),
            Some(Cell::Int(v)) => v.to_string(),
            _ => format!("Unnamed: {idx}"),
        })
        .collect();

    let mut columns: Vec<(String, Vec<Option<Cell>>)> = names
        .into_iter()
        .map(|name| (name, Vec::with_capacity(range.height())))
        .collect();
    for row in rows {
        for (idx, (_, cells)) in columns.iter_mut().enumerate() {
            cells.push(row.get(idx).and_then(to_cell));
        }
    }

    build_frame(columns)
        .map_err(|e| IngestError::unreadable(path, InputFormat::Spreadsheet, e.to_string()))
}

fn to_cell(cell: &Data) -> Option<Cell> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::Int(v) => Some(Cell::Int(*v)),
        Data::Float(v) => Some(Cell::Float(*v)),
        Data::Bool(v) => Some(Cell::Bool(*v)),
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(Cell::Text(s.clone())),
        other => Some(Cell::Text(
            other
                .as_datetime()
                .map(|dt| dt.to_string())
                .unwrap_or_else(|| other.to_string()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_corrupt_workbook_is_unreadable() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"this is not a zip archive").unwrap();
        let result = read_spreadsheet(file.path());
        assert!(matches!(
            result,
            Err(IngestError::Unreadable {
                format: InputFormat::Spreadsheet,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_workbook() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().with_extension("xlsx");
        drop(file);
        let result = read_spreadsheet(&path);
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(to_cell(&Data::Empty), None);
        assert_eq!(to_cell(&Data::Int(1)), Some(Cell::Int(1)));
        assert_eq!(to_cell(&Data::Bool(false)), Some(Cell::Bool(false)));
        assert_eq!(to_cell(&Data::String("  ".to_string())), None);
        assert_eq!(
            to_cell(&Data::String("Laptop".to_string())),
            Some(Cell::Text("Laptop".to_string()))
        );
    }
}
