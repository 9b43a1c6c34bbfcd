//! Delimited text input through the Polars CSV reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;

use super::InputFormat;
use crate::error::{IngestError, Result};

/// Rejects encodings the CSV reader cannot decode.
///
/// UTF-8 (with or without BOM) passes; UTF-16 byte-order marks are refused.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = File::open(path).map_err(|e| IngestError::io(path, e))?;

    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::io(path, e))?;

    if bytes_read >= 2 {
        if buffer[0..2] == [0xFF, 0xFE] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 LE",
            });
        }
        if buffer[0..2] == [0xFE, 0xFF] {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a delimited text file with a header row.
///
/// Every row is scanned for schema inference so a late non-numeric value does
/// not fail the parse of a column inferred as numeric from the first rows.
pub(crate) fn read_delimited(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::unreadable(path, InputFormat::Delimited, e.to_string()))?
        .finish()
        .map_err(|e| IngestError::unreadable(path, InputFormat::Delimited, e.to_string()))
}
