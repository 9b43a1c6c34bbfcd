//! Format dispatch for input files.

mod cells;
mod delimited;
mod records;
mod spreadsheet;

use std::fmt;
use std::path::Path;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::Result;

pub use delimited::validate_encoding;

/// Decoder family chosen from a file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Workbooks read through calamine (first worksheet).
    Spreadsheet,
    /// JSON records or columns.
    Records,
    /// Delimited text; the fallback for unknown or missing extensions.
    Delimited,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => Self::Spreadsheet,
            Some("json") => Self::Records,
            _ => Self::Delimited,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Spreadsheet => "spreadsheet",
            Self::Records => "JSON",
            Self::Delimited => "CSV",
        };
        f.write_str(label)
    }
}

/// Reads one input file into a `DataFrame`, column names verbatim from the source.
///
/// # Errors
///
/// Returns [`crate::IngestError::Unreadable`] when the content cannot be decoded
/// in the format implied by the extension, and a file error when it cannot be
/// opened.
pub fn load_table(path: &Path) -> Result<DataFrame> {
    let format = InputFormat::from_path(path);
    let start = Instant::now();
    let df = match format {
        InputFormat::Spreadsheet => spreadsheet::read_spreadsheet(path)?,
        InputFormat::Records => records::read_records(path)?,
        InputFormat::Delimited => delimited::read_delimited(path)?,
    };
    debug!(
        path = %path.display(),
        %format,
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "loaded input table"
    );
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dispatch() {
        assert_eq!(
            InputFormat::from_path(Path::new("a/WEEK.XLSX")),
            InputFormat::Spreadsheet
        );
        assert_eq!(
            InputFormat::from_path(Path::new("week.ods")),
            InputFormat::Spreadsheet
        );
        assert_eq!(
            InputFormat::from_path(Path::new("week.json")),
            InputFormat::Records
        );
        assert_eq!(
            InputFormat::from_path(Path::new("week.tsv")),
            InputFormat::Delimited
        );
        assert_eq!(
            InputFormat::from_path(Path::new("week")),
            InputFormat::Delimited
        );
    }
}
